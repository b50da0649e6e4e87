use crate::commands::{
    argument::ArgumentType,
    context::ExecutionContext,
    error::CommandResult,
    node::{CommandNode, NodeType},
    registry::CommandRegistry,
    usage,
};

pub fn register_help(registry: &mut CommandRegistry) {
    fn exec_help_command(ctx: &mut ExecutionContext<'_>) -> CommandResult<()> {
        let command = ctx.args().get_greedy("command")?;
        let command = command.trim().trim_start_matches('/');
        let registry = ctx.registry();
        let root = registry.get_root();

        if command.is_empty() {
            let mut commands = Vec::new();

            for child in &root.children {
                if let NodeType::Literal { name, aliases } = &child.node_type {
                    let mut line = format!("/{}", name);
                    if !aliases.is_empty() {
                        line.push_str(&format!(" (Aliases: {})", aliases.join(", ")));
                    }
                    if let Some(description) = &child.description {
                        line.push_str(&format!(" - {}", description));
                    }
                    commands.push(line);
                }
            }

            commands.sort();
            ctx.reply("Run /help <command> for more information.")?;
            ctx.reply("Available commands:")?;
            for cmd in commands {
                ctx.reply(&format!(" {}", cmd))?;
            }
            return Ok(());
        }

        let path = usage::find_literal_path(root, command, registry.case_insensitive_literals());
        let Some(&node) = path.last().filter(|_| path.len() > 1) else {
            return ctx.reply(&format!("Command not found: {}", command));
        };

        let usage = usage::generate_usage(&path);
        let flag_details = usage::generate_flag_details(node);
        let description = node.description.clone();

        ctx.reply(&format!("Usage: {}", usage))?;
        if let Some(description) = description {
            ctx.reply(&description)?;
        }
        if !flag_details.is_empty() {
            ctx.reply("Available flags:")?;
            for flag_detail in flag_details {
                ctx.reply(&format!(" {flag_detail}"))?;
            }
        }
        Ok(())
    }

    registry.register(
        CommandNode::literal("help")
            .description("Lists commands or shows how to use one")
            .then(
                CommandNode::argument("command", ArgumentType::greedy_string())
                    .executes(exec_help_command),
            ),
    );
}
