use crate::commands::{argument::ArgumentType, context::ExecutionContext, error::CommandResult};

pub type Executor = fn(&mut ExecutionContext<'_>) -> CommandResult<()>;

#[derive(Clone)]
pub struct CommandNode {
    pub(crate) node_type: NodeType,
    pub(crate) children: Vec<CommandNode>,
    pub(crate) executor: Option<Executor>,
    pub(crate) permissions: Vec<String>,
    pub(crate) description: Option<String>,
}

#[derive(Clone)]
pub enum NodeType {
    Root,
    Literal {
        name: String,
        aliases: Vec<String>,
    },
    Argument {
        name: String,
        arg_type: ArgumentType,
    },
}

impl CommandNode {
    fn with_type(node_type: NodeType) -> Self {
        Self {
            node_type,
            children: Vec::new(),
            executor: None,
            permissions: Vec::new(),
            description: None,
        }
    }

    pub fn root() -> Self {
        Self::with_type(NodeType::Root)
    }

    pub fn literal(name: impl Into<String>) -> Self {
        Self::with_type(NodeType::Literal {
            name: name.into(),
            aliases: Vec::new(),
        })
    }

    pub fn argument(name: impl Into<String>, arg_type: impl Into<ArgumentType>) -> Self {
        Self::with_type(NodeType::Argument {
            name: name.into(),
            arg_type: arg_type.into(),
        })
    }

    pub fn then(mut self, child: CommandNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn executes(mut self, executor: Executor) -> Self {
        self.executor = Some(executor);
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        let NodeType::Literal { aliases, .. } = &mut self.node_type else {
            panic!("Can not create alias for non-literal command nodes")
        };
        aliases.push(alias.into());
        self
    }

    pub fn require_permission(mut self, permission: impl Into<String>) -> Self {
        self.permissions.push(permission.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn children(&self) -> &[CommandNode] {
        &self.children
    }

    pub(crate) fn has_executor(&self) -> bool {
        self.executor.is_some()
    }

    pub(crate) fn is_greedy(&self) -> bool {
        matches!(&self.node_type, NodeType::Argument { arg_type, .. } if arg_type.is_greedy())
    }

    /// Whether the literal accepts `token` as its name or one of its aliases.
    pub(crate) fn matches_literal(&self, token: &str, case_insensitive: bool) -> bool {
        let NodeType::Literal { name, aliases } = &self.node_type else {
            return false;
        };
        let eq = |candidate: &String| {
            if case_insensitive {
                candidate.eq_ignore_ascii_case(token)
            } else {
                candidate == token
            }
        };
        eq(name) || aliases.iter().any(eq)
    }
}
