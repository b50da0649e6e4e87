use super::argument_set::ArgumentSet;
use super::registry::CommandRegistry;
use crate::commands::error::{CommandResult, RuntimeError};
use rustc_hash::FxHashSet;

/// Permission granted to users that bypasses every permission check.
pub const WILDCARD_PERMISSION: &str = "*";

#[derive(Debug, Clone)]
pub enum CommandSender {
    Console,
    User {
        name: String,
        permissions: FxHashSet<String>,
    },
}

impl CommandSender {
    pub fn user<I, S>(name: impl Into<String>, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommandSender::User {
            name: name.into(),
            permissions: permissions.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            CommandSender::Console => "Console",
            CommandSender::User { name, .. } => name,
        }
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        match self {
            CommandSender::Console => true,
            CommandSender::User { permissions, .. } => {
                permissions.contains(permission) || permissions.contains(WILDCARD_PERMISSION)
            }
        }
    }
}

/// Ambient state of one command invocation, handed to argument parsers and
/// aggregate mappers unchanged.
#[derive(Debug, Clone)]
pub struct CommandContext {
    sender: CommandSender,
    input: String,
}

impl CommandContext {
    pub fn new(sender: CommandSender, input: impl Into<String>) -> Self {
        Self {
            sender,
            input: input.into(),
        }
    }

    pub fn sender(&self) -> &CommandSender {
        &self.sender
    }

    /// The full command line after alias expansion.
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Destination for command output.
pub trait Audience {
    fn send_message(&mut self, message: &str);

    fn send_error(&mut self, message: &str);
}

pub struct ConsoleAudience;

impl Audience for ConsoleAudience {
    fn send_message(&mut self, message: &str) {
        println!("{}", message);
    }

    fn send_error(&mut self, message: &str) {
        eprintln!("Error: {}", message);
    }
}

/// Keeps every message in memory.
#[derive(Debug, Default)]
pub struct RecordingAudience {
    pub messages: Vec<String>,
    pub errors: Vec<String>,
}

impl Audience for RecordingAudience {
    fn send_message(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }

    fn send_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
}

pub struct ExecutionContext<'a> {
    registry: &'a CommandRegistry,
    audience: &'a mut dyn Audience,
    command: CommandContext,
    arguments: ArgumentSet,
}

impl<'a> ExecutionContext<'a> {
    pub(super) fn new(
        registry: &'a CommandRegistry,
        audience: &'a mut dyn Audience,
        command: CommandContext,
        arguments: ArgumentSet,
    ) -> Self {
        Self {
            registry,
            audience,
            command,
            arguments,
        }
    }

    pub fn args(&self) -> &ArgumentSet {
        &self.arguments
    }

    pub fn sender(&self) -> &CommandSender {
        self.command.sender()
    }

    pub fn command_context(&self) -> &CommandContext {
        &self.command
    }

    pub fn registry(&self) -> &'a CommandRegistry {
        self.registry
    }

    pub fn reply(&mut self, message: &str) -> CommandResult<()> {
        self.audience.send_message(message);
        Ok(())
    }

    pub fn error(&mut self, message: &str) -> CommandResult<()> {
        self.audience.send_error(message);
        Ok(())
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.sender().has_permission(permission)
    }

    pub fn require_permission(&self, permission: &str) -> CommandResult<()> {
        if !self.has_permission(permission) {
            return Err(RuntimeError::PermissionDenied {
                permission: permission.to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Name of the invoking user, failing for the console.
    pub fn require_user(&self) -> CommandResult<&str> {
        match self.sender() {
            CommandSender::User { name, .. } => Ok(name),
            CommandSender::Console => Err(RuntimeError::UserOnly.into()),
        }
    }
}
