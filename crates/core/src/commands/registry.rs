use super::{
    context::CommandContext,
    node::CommandNode,
    parser::{self, ParseResult},
    CommandSender,
};
use crate::config::CloudConfig;
use tracing::{debug, warn};

pub struct CommandRegistry {
    root: CommandNode,
    custom_aliases: Vec<(String, String)>,
    case_insensitive_literals: bool,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            root: CommandNode::root(),
            custom_aliases: Vec::new(),
            case_insensitive_literals: false,
        }
    }

    /// Applies the command aliases and literal matching mode from `config`.
    pub fn with_config(config: &CloudConfig) -> Self {
        let mut registry = Self::new();
        registry.case_insensitive_literals = config.case_insensitive_literals;
        for (alias, replacement) in &config.command_aliases {
            registry.add_custom_alias(alias.trim(), replacement.trim());
        }
        registry
    }

    pub fn register(&mut self, command: CommandNode) {
        self.root.children.push(command);
    }

    pub fn get_root(&self) -> &CommandNode {
        &self.root
    }

    pub fn add_custom_alias(&mut self, prefix: impl Into<String>, replacement: impl Into<String>) {
        self.custom_aliases
            .push((prefix.into(), replacement.into()));
    }

    pub fn get_custom_aliases(&self) -> &[(String, String)] {
        &self.custom_aliases
    }

    pub fn set_case_insensitive_literals(&mut self, case_insensitive: bool) {
        self.case_insensitive_literals = case_insensitive;
    }

    pub fn case_insensitive_literals(&self) -> bool {
        self.case_insensitive_literals
    }

    pub async fn parse<'a>(&'a self, ctx: &CommandContext, input: &str) -> ParseResult<'a> {
        parser::parse(&self.root, ctx, input, self.case_insensitive_literals).await
    }

    /// Rewrites a command line starting with a custom alias.
    ///
    /// `{}` in the replacement marks where the rest of the line goes,
    /// otherwise it is appended.
    pub fn expand_custom_aliases(&self, command_line: &str) -> String {
        for (alias, expansion) in self.get_custom_aliases() {
            if let Some(rest) = strip_alias(command_line, alias) {
                debug!("Expanding custom alias '{}' to '{}'", alias, expansion);
                if expansion.contains("{}") {
                    return expansion.replace("{}", rest.trim_start());
                } else {
                    return format!("{}{}", expansion, rest);
                }
            }
        }

        command_line.to_string()
    }

    /// Logs every custom alias whose replacement does not lead to a command.
    ///
    /// Returns the number of aliases that matched nothing.
    pub async fn validate_custom_aliases(&self) -> usize {
        let ctx = CommandContext::new(CommandSender::Console, "");
        let mut broken = 0;
        for (alias, replacement) in &self.custom_aliases {
            // Only the part before the placeholder is known ahead of time
            let replacement = match replacement.find("{}") {
                Some(pos) => replacement[..pos].trim(),
                None => replacement.as_str(),
            };

            match self.parse(&ctx, replacement).await {
                ParseResult::Success { .. } => {
                    debug!("Custom alias '{}' replacement '{}' successfully parsed", alias, replacement);
                }
                ParseResult::Partial { .. } => {
                    debug!("Custom alias '{}' replacement '{}' is incomplete", alias, replacement);
                }
                ParseResult::TooManyArguments { remaining, .. } => {
                    debug!(
                        "Custom alias '{}' replacement '{}' has too many arguments: '{}'",
                        alias, replacement, remaining
                    );
                }
                ParseResult::InvalidArgument { remaining, .. } => {
                    debug!(
                        "Custom alias '{}' replacement '{}' has invalid argument: '{}'",
                        alias, replacement, remaining
                    );
                }
                ParseResult::NothingMatched { .. } => {
                    warn!(
                        "Custom alias '{}' replacement '{}' did not match any command",
                        alias, replacement
                    );
                    broken += 1;
                }
            }
        }
        broken
    }
}

/// The rest of `command_line` if it starts with `alias` as a whole token.
fn strip_alias<'a>(command_line: &'a str, alias: &str) -> Option<&'a str> {
    let rest = command_line.strip_prefix(alias)?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest)
    } else {
        None
    }
}
