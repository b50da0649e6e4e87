//! Tab completion over the registered command tree.

use super::{
    argument_parser::consume_token,
    context::{CommandContext, CommandSender},
    node::{CommandNode, NodeType},
    registry::CommandRegistry,
};
use tracing::trace;

/// Completions for the last, possibly empty, token of `input`.
///
/// Nodes whose permissions `sender` lacks are neither suggested nor walked
/// into.
pub async fn suggestions(
    registry: &CommandRegistry,
    sender: &CommandSender,
    input: &str,
) -> Vec<String> {
    let input = expand_alias_prefix(registry, input);
    let ctx = CommandContext::new(sender.clone(), input.as_str());
    let case_insensitive = registry.case_insensitive_literals();

    let mut current = registry.get_root();
    let mut remaining = input.as_str();
    let mut results = Vec::new();

    'walk: loop {
        let at_root = matches!(current.node_type, NodeType::Root);
        for child in current.children.iter().filter(|child| can_use(sender, child)) {
            match &child.node_type {
                NodeType::Root => continue,
                NodeType::Literal { name, aliases } => match consume_token(remaining) {
                    Some((token, rest)) if !rest.is_empty() => {
                        if child.matches_literal(token, case_insensitive) {
                            current = child;
                            remaining = rest;
                            results.clear();
                            continue 'walk;
                        }
                    }
                    token => {
                        let prefix = token.map(|(token, _)| token).unwrap_or_default();
                        results.extend(
                            std::iter::once(name)
                                .chain(aliases)
                                .filter(|candidate| starts_with(candidate, prefix, case_insensitive))
                                .cloned(),
                        );
                    }
                },
                NodeType::Argument { name, arg_type } => {
                    match arg_type.parse(&ctx, remaining).await {
                        Ok((_, rest)) if !rest.is_empty() => {
                            trace!("Completing past argument '{}'", name);
                            current = child;
                            remaining = rest;
                            results.clear();
                            continue 'walk;
                        }
                        _ => results.extend(arg_type.complete(&ctx, remaining).await),
                    }
                }
            }
        }

        if at_root && consume_token(remaining).is_none_or(|(_, rest)| rest.is_empty()) {
            let prefix = remaining.trim_start();
            results.extend(
                registry
                    .get_custom_aliases()
                    .iter()
                    .map(|(alias, _)| alias)
                    .filter(|alias| !alias.contains(char::is_whitespace))
                    .filter(|alias| starts_with(alias, prefix, case_insensitive))
                    .cloned(),
            );
        }
        break;
    }

    results.sort();
    results.dedup();
    results
}

fn can_use(sender: &CommandSender, node: &CommandNode) -> bool {
    node.permissions
        .iter()
        .all(|permission| sender.has_permission(permission))
}

fn starts_with(candidate: &str, prefix: &str, case_insensitive: bool) -> bool {
    if case_insensitive {
        candidate.to_lowercase().starts_with(&prefix.to_lowercase())
    } else {
        candidate.starts_with(prefix)
    }
}

/// Replaces a completed custom alias with the part of its replacement before
/// the `{}` placeholder.
fn expand_alias_prefix(registry: &CommandRegistry, input: &str) -> String {
    for (alias, replacement) in registry.get_custom_aliases() {
        let Some(rest) = input.strip_prefix(alias.as_str()) else {
            continue;
        };
        if !rest.starts_with(char::is_whitespace) {
            continue;
        }
        let replacement = match replacement.find("{}") {
            Some(pos) => replacement[..pos].trim_end(),
            None => replacement.as_str(),
        };
        return format!("{}{}", replacement, rest);
    }
    input.to_string()
}
