use super::{
    argument::{ArgumentType, FlagSpec},
    argument_parser::consume_token,
    node::{CommandNode, NodeType},
};
use indexmap::IndexSet;
use itertools::Itertools;
use std::collections::{HashMap, HashSet};

/// Renders the syntax of the command at the end of `path`, e.g.
/// `/give <player> [amount]`.
pub fn generate_usage(path: &[&CommandNode]) -> String {
    let mut parts: Vec<String> = path.iter().skip(1).map(|node| display_name(node)).collect();

    if let Some(current_node) = path.last() {
        let suffix = build_usage_suffix(current_node);
        if !suffix.is_empty() {
            parts.push(suffix);
        }
    }

    format!("/{}", parts.join(" "))
}

#[derive(Debug)]
struct UsageStructure {
    content: String,
    trailing_optionals: Vec<String>,
}

fn build_usage_suffix(node: &CommandNode) -> String {
    let structure = analyze_structure(node);

    let mut parts = Vec::new();
    if !structure.content.is_empty() {
        parts.push(structure.content);
    }

    parts.extend(
        structure
            .trailing_optionals
            .into_iter()
            .map(|opt| format!("[{}]", opt)),
    );

    parts.join(" ")
}

fn analyze_structure(node: &CommandNode) -> UsageStructure {
    if node.children.is_empty() {
        return UsageStructure {
            content: String::new(),
            trailing_optionals: Vec::new(),
        };
    }

    let (optional_children, regular_children): (Vec<_>, Vec<_>) =
        node.children.iter().partition(|child| child.is_greedy());

    let mut all_optionals: HashSet<String> =
        optional_children.iter().map(|child| display_name(child)).collect();

    let children_optional = node.has_executor() || !optional_children.is_empty();

    let content = format_regular_children(&regular_children, children_optional, &mut all_optionals);

    UsageStructure {
        content,
        trailing_optionals: all_optionals.into_iter().sorted().collect_vec(),
    }
}

fn format_regular_children(
    children: &[&CommandNode],
    make_optional: bool,
    all_optionals: &mut HashSet<String>,
) -> String {
    if children.is_empty() {
        return String::new();
    }

    let mut groups: HashMap<String, Vec<&CommandNode>> = HashMap::new();
    for child in children {
        groups.entry(display_name(child)).or_default().push(child);
    }

    let alternatives = if groups.len() == 1 && children.len() > 1 {
        children.iter().map(|c| display_name(c)).join(" | ")
    } else {
        children
            .iter()
            .map(|child| {
                let child_structure = analyze_structure(child);
                all_optionals.extend(child_structure.trailing_optionals);

                let child_name = display_name(child);
                if child_structure.content.is_empty() {
                    child_name
                } else {
                    format!("{} {}", child_name, child_structure.content)
                }
            })
            .join(" | ")
    };

    if make_optional {
        format!("[{}]", alternatives)
    } else if children.len() == 1 {
        alternatives
    } else {
        format!("({})", alternatives)
    }
}

fn display_name(node: &CommandNode) -> String {
    match &node.node_type {
        NodeType::Root => String::new(),
        NodeType::Literal { name, .. } => name.clone(),
        NodeType::Argument {
            arg_type: ArgumentType::Aggregate(parser),
            ..
        } => parser
            .components()
            .iter()
            .map(|component| format!("<{}>", component.name()))
            .join(" "),
        NodeType::Argument { name, .. } => format!("<{}>", name),
    }
}

pub fn generate_flag_details(node: &CommandNode) -> Vec<String> {
    let mut flags = IndexSet::default();
    collect_flags(&mut flags, node);
    flags
        .into_iter()
        .map(|spec| {
            let names = match spec.short {
                Some(short) => format!("-{} | --{}", short, spec.long),
                None => format!("--{}", spec.long),
            };
            match &spec.description {
                Some(description) => format!("{names}: {description}"),
                None => names,
            }
        })
        .collect()
}

fn collect_flags(all_flags: &mut IndexSet<FlagSpec>, node: &CommandNode) {
    if let NodeType::Argument {
        arg_type: ArgumentType::Flags { flags },
        ..
    } = &node.node_type
    {
        all_flags.extend(flags.iter().cloned());
    }
    for child in &node.children {
        collect_flags(all_flags, child);
    }
}

pub fn generate_base_name(path: &[&CommandNode]) -> String {
    let names = path
        .iter()
        .map_while(|node| match &node.node_type {
            NodeType::Root => Some(None),
            NodeType::Literal { name, .. } => Some(Some(name.as_str())),
            NodeType::Argument { .. } => None,
        })
        .flatten()
        .join(" ");

    format!("/{}", names)
}

/// Follows literal tokens of `input` from `root` as far as they match.
pub fn find_literal_path<'a>(
    root: &'a CommandNode,
    input: &str,
    case_insensitive: bool,
) -> Vec<&'a CommandNode> {
    let mut path = vec![root];
    let mut current = root;
    let mut remaining = input;

    while let Some((token, rest)) = consume_token(remaining) {
        let Some(child) = current
            .children
            .iter()
            .find(|child| child.matches_literal(token, case_insensitive))
        else {
            break;
        };
        path.push(child);
        current = child;
        remaining = rest;
    }

    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::aggregate::{component, AggregateParserTripletBuilder};

    fn noop(_: &mut crate::commands::context::ExecutionContext<'_>) -> crate::commands::error::CommandResult<()> {
        Ok(())
    }

    fn root() -> CommandNode {
        let position = AggregateParserTripletBuilder::triplet(
            component::integer("x", -100, 100),
            component::integer("y", -100, 100),
            component::integer("z", -100, 100),
        )
        .build()
        .unwrap();

        CommandNode::root()
            .then(
                CommandNode::literal("tp")
                    .then(CommandNode::argument("position", position).executes(noop))
                    .then(CommandNode::argument("player", ArgumentType::string()).executes(noop)),
            )
            .then(
                CommandNode::literal("time")
                    .then(CommandNode::literal("set").then(
                        CommandNode::argument("value", ArgumentType::integer(0, 24000)).executes(noop),
                    ))
                    .then(CommandNode::literal("query").executes(noop)),
            )
            .then(
                CommandNode::literal("clear").executes(noop).then(
                    CommandNode::argument(
                        "flags",
                        ArgumentType::flags()
                            .add('a', "all", "Clear everything")
                            .add(None, "quiet", None),
                    )
                    .executes(noop),
                ),
            )
    }

    #[test]
    fn usage_expands_aggregates_and_alternatives() {
        let root = root();
        let path = find_literal_path(&root, "tp", false);
        assert_eq!(generate_usage(&path), "/tp (<x> <y> <z> | <player>)");

        let path = find_literal_path(&root, "time", false);
        assert_eq!(generate_usage(&path), "/time (set <value> | query)");

        let path = find_literal_path(&root, "time set", false);
        assert_eq!(generate_usage(&path), "/time set <value>");
    }

    #[test]
    fn greedy_children_are_optional() {
        let root = root();
        let path = find_literal_path(&root, "clear", false);
        assert_eq!(generate_usage(&path), "/clear [<flags>]");
        assert_eq!(
            generate_flag_details(path[1]),
            vec!["-a | --all: Clear everything", "--quiet"]
        );
    }

    #[test]
    fn base_name_stops_at_arguments() {
        let root = root();
        let tp = &root.children[0];
        let position = &tp.children[0];
        assert_eq!(generate_base_name(&[&root, tp, position]), "/tp");
        assert_eq!(find_literal_path(&root, "TIME SET", true).len(), 3);
        assert_eq!(find_literal_path(&root, "TIME SET", false).len(), 1);
    }
}
