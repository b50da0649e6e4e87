use crate::commands::{
    argument_set::ArgumentSet,
    context::{Audience, CommandContext, ExecutionContext},
    error::{ArgumentParseError, CommandError, CommandResult, InternalError, UnwrapRuntimeError},
    node::CommandNode,
    parser::ParseResult,
    registry::CommandRegistry,
    usage, CommandSender,
};
use tracing::debug;

impl CommandRegistry {
    /// Parses and runs `command_line` on behalf of `sender`.
    ///
    /// Problems caused by the input are reported to `audience`; only bugs in
    /// the registered commands are returned as errors.
    pub async fn execute(
        &self,
        audience: &mut dyn Audience,
        sender: CommandSender,
        command_line: &str,
    ) -> Result<(), InternalError> {
        let command_line = command_line.trim();
        if command_line.is_empty() {
            return Ok(());
        }

        let command_line = self.expand_custom_aliases(command_line);
        debug!("{} issued command: {}", sender.name(), command_line);
        let command = CommandContext::new(sender, command_line.as_str());
        let parse_result = self.parse(&command, &command_line).await;

        match parse_result {
            ParseResult::Success {
                node,
                arguments,
                path,
            } => {
                let mut ctx =
                    ExecutionContext::new(self, audience, command, ArgumentSet::new(arguments));
                match Self::execute_impl(&mut ctx, node, &path) {
                    Ok(()) => Ok(()),
                    Err(CommandError::Runtime(err)) => {
                        ctx.error(&err.to_string()).unwrap_runtime()?;
                        Ok(())
                    }
                    Err(CommandError::Internal(err)) => Err(err),
                }
            }

            ParseResult::Partial { path, .. } => {
                self.handle_parse_error(audience, command, &path, "Not enough arguments")
            }
            ParseResult::TooManyArguments {
                path, remaining, ..
            } => {
                let message = format!("Too many arguments: {remaining}");
                self.handle_parse_error(audience, command, &path, &message)
            }
            ParseResult::InvalidArgument {
                error: Some(ArgumentParseError::Internal(err)),
                ..
            } => Err(err),
            ParseResult::InvalidArgument {
                path,
                remaining,
                error,
                ..
            } => {
                let message = invalid_argument_message(&remaining, error.as_ref());
                self.handle_parse_error(audience, command, &path, &message)
            }

            ParseResult::NothingMatched { .. } => {
                let mut ctx = ExecutionContext::new(self, audience, command, ArgumentSet::empty());
                ctx.error("Command not found!").unwrap_runtime()?;
                Ok(())
            }
        }
    }

    fn execute_impl(
        ctx: &mut ExecutionContext<'_>,
        node: &CommandNode,
        path: &[&CommandNode],
    ) -> CommandResult<()> {
        let Some(executor) = node.executor else {
            unreachable!("Node must have executor to be parsed successfully")
        };

        for node in path {
            for permission in &node.permissions {
                ctx.require_permission(permission)?;
            }
        }

        executor(ctx)
    }

    fn handle_parse_error(
        &self,
        audience: &mut dyn Audience,
        command: CommandContext,
        path: &[&CommandNode],
        error_message: &str,
    ) -> Result<(), InternalError> {
        let mut ctx = ExecutionContext::new(self, audience, command, ArgumentSet::empty());

        ctx.error(error_message).unwrap_runtime()?;

        let usage = usage::generate_usage(path);
        ctx.reply(&format!("Usage: {}", usage)).unwrap_runtime()?;
        let base_name = usage::generate_base_name(path);
        ctx.reply(&format!("Run /help {} for more information.", base_name.trim_start_matches('/')))
            .unwrap_runtime()?;

        Ok(())
    }
}

fn invalid_argument_message(remaining: &str, error: Option<&ArgumentParseError>) -> String {
    match error {
        Some(error) => format!("Invalid argument: {remaining} ({error})"),
        None => format!("Invalid argument: {remaining}"),
    }
}
