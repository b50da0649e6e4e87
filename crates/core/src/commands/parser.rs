use crate::commands::{
    argument_parser,
    context::CommandContext,
    error::ArgumentParseError,
    node::{CommandNode, NodeType},
    value::Value,
};
use tracing::trace;

pub enum ParseResult<'a> {
    Success {
        node: &'a CommandNode,
        arguments: Vec<(String, Value)>,
        path: Vec<&'a CommandNode>,
    },
    Partial {
        node: &'a CommandNode,
        arguments: Vec<(String, Value)>,
        path: Vec<&'a CommandNode>,
    },
    TooManyArguments {
        node: &'a CommandNode,
        arguments: Vec<(String, Value)>,
        path: Vec<&'a CommandNode>,
        remaining: String,
    },
    InvalidArgument {
        node: &'a CommandNode,
        arguments: Vec<(String, Value)>,
        path: Vec<&'a CommandNode>,
        remaining: String,
        error: Option<ArgumentParseError>,
    },
    NothingMatched {
        root: &'a CommandNode,
    },
}

impl<'a> ParseResult<'a> {
    /// The matched path, unless nothing matched at all.
    pub fn path(&self) -> Option<&[&'a CommandNode]> {
        match self {
            ParseResult::Success { path, .. }
            | ParseResult::Partial { path, .. }
            | ParseResult::TooManyArguments { path, .. }
            | ParseResult::InvalidArgument { path, .. } => Some(path),
            ParseResult::NothingMatched { .. } => None,
        }
    }
}

/// Walks the tree below `root`, taking the first child that accepts the next
/// part of `input` at every level.
pub async fn parse<'a>(
    root: &'a CommandNode,
    ctx: &CommandContext,
    input: &str,
    case_insensitive_literals: bool,
) -> ParseResult<'a> {
    let mut remaining_input = input;
    let mut current = root;
    let mut path: Vec<&'a CommandNode> = vec![root];
    let mut arguments: Vec<(String, Value)> = Vec::new();
    let mut last_error = None;

    'walk: loop {
        for child in &current.children {
            match &child.node_type {
                NodeType::Root => continue,

                NodeType::Literal { .. } => {
                    let Some((token, rest)) = argument_parser::consume_token(remaining_input)
                    else {
                        continue;
                    };

                    if child.matches_literal(token, case_insensitive_literals) {
                        path.push(child);
                        current = child;
                        remaining_input = rest;
                        last_error = None;
                        continue 'walk;
                    }
                }

                NodeType::Argument { name, arg_type } => {
                    match arg_type.parse(ctx, remaining_input).await {
                        Ok((value, rest)) => {
                            trace!("Parsed argument '{}' as {:?}", name, value);
                            path.push(child);
                            current = child;
                            arguments.push((name.clone(), value));
                            remaining_input = rest;
                            last_error = None;
                            continue 'walk;
                        }
                        Err(err) => {
                            trace!("Argument '{}' rejected input: {}", name, err);
                            // Registration bugs win over ordinary rejections
                            if last_error.is_none() || matches!(err, ArgumentParseError::Internal(_)) {
                                last_error = Some(err);
                            }
                        }
                    }
                }
            }
        }
        break;
    }

    if matches!(current.node_type, NodeType::Root) {
        return ParseResult::NothingMatched { root };
    }

    let remainder = remaining_input.trim_start();

    // An aggregate may consume part of the input and then run out
    let ran_out = matches!(last_error, Some(ArgumentParseError::NoInput));

    if !remainder.is_empty() && !ran_out {
        if current.has_executor() && current.children.is_empty() {
            ParseResult::TooManyArguments {
                node: current,
                arguments,
                path,
                remaining: remainder.to_string(),
            }
        } else {
            ParseResult::InvalidArgument {
                node: current,
                arguments,
                path,
                remaining: remainder.to_string(),
                error: last_error,
            }
        }
    } else if current.has_executor() && remainder.is_empty() {
        ParseResult::Success {
            node: current,
            arguments,
            path,
        }
    } else {
        ParseResult::Partial {
            node: current,
            arguments,
            path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{argument::ArgumentType, context::CommandSender};

    fn tree() -> CommandNode {
        CommandNode::root()
            .then(
                CommandNode::literal("add")
                    .alias("plus")
                    .then(
                        CommandNode::argument("a", ArgumentType::integer(-100, 100)).then(
                            CommandNode::argument("b", ArgumentType::integer(-100, 100))
                                .executes(|_| Ok(())),
                        ),
                    ),
            )
            .then(
                CommandNode::literal("say")
                    .then(CommandNode::argument("text", ArgumentType::greedy_string()).executes(|_| Ok(()))),
            )
            .then(CommandNode::literal("ping").executes(|_| Ok(())))
    }

    async fn run<'a>(root: &'a CommandNode, input: &str) -> ParseResult<'a> {
        let ctx = CommandContext::new(CommandSender::Console, input);
        parse(root, &ctx, input, false).await
    }

    #[tokio::test]
    async fn success_collects_arguments_in_order() {
        let root = tree();
        let ParseResult::Success { arguments, path, .. } = run(&root, "plus 1 2").await else {
            panic!("expected success");
        };
        assert_eq!(path.len(), 4);
        let names: Vec<_> = arguments.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[tokio::test]
    async fn partial_and_nothing_matched() {
        let root = tree();
        assert!(matches!(run(&root, "add 1").await, ParseResult::Partial { .. }));
        assert!(matches!(run(&root, "nope").await, ParseResult::NothingMatched { .. }));
        assert!(matches!(run(&root, "ADD 1 2").await, ParseResult::NothingMatched { .. }));
    }

    #[tokio::test]
    async fn case_insensitive_literals() {
        let root = tree();
        let ctx = CommandContext::new(CommandSender::Console, "PING");
        assert!(matches!(
            parse(&root, &ctx, "PING", true).await,
            ParseResult::Success { .. }
        ));
    }

    #[tokio::test]
    async fn too_many_and_invalid_arguments() {
        let root = tree();
        let ParseResult::TooManyArguments { remaining, .. } = run(&root, "ping pong").await else {
            panic!("expected too many arguments");
        };
        assert_eq!(remaining, "pong");
        assert_eq!(run(&root, "ping pong").await.path().map(<[_]>::len), Some(2));
        assert!(run(&root, "pong").await.path().is_none());

        let ParseResult::InvalidArgument { remaining, error, .. } = run(&root, "add 1 500").await
        else {
            panic!("expected invalid argument");
        };
        assert_eq!(remaining, "500");
        assert!(matches!(error, Some(ArgumentParseError::OutOfRange { .. })));
    }

    #[tokio::test]
    async fn aggregate_running_out_of_input_is_partial() {
        use crate::commands::aggregate::{component, AggregateParserTripletBuilder};

        let position = AggregateParserTripletBuilder::triplet(
            component::integer("x", -100, 100),
            component::integer("y", -100, 100),
            component::integer("z", -100, 100),
        )
        .build()
        .unwrap();
        let root = CommandNode::root().then(
            CommandNode::literal("goto")
                .then(CommandNode::argument("position", position).executes(|_| Ok(()))),
        );

        assert!(matches!(run(&root, "goto 1 2").await, ParseResult::Partial { .. }));
        assert!(matches!(run(&root, "goto 1 2 3").await, ParseResult::Success { .. }));
        assert!(matches!(
            run(&root, "goto 1 x 3").await,
            ParseResult::InvalidArgument {
                error: Some(ArgumentParseError::InvalidInteger { .. }),
                ..
            }
        ));
    }
}
