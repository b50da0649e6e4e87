use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Permission denied: {permission}")]
    PermissionDenied { permission: String },
    #[error("This command can only be executed by users")]
    UserOnly,
    #[error("{0}")]
    Message(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InternalError {
    #[error(
        "Internal error: Argument '{name}' not found in ArgumentSet (command registration bug)"
    )]
    MissingArgument { name: String },
    #[error("Internal error: Argument '{name}' has wrong type, expected {expected} (command registration bug)")]
    WrongArgumentType { name: String, expected: String },
    #[error("Internal error: Component '{name}' appears more than once in an aggregate (command registration bug)")]
    DuplicateComponent { name: String },
    #[error("Internal error: Aggregate parser has no components (command registration bug)")]
    EmptyAggregate,
    #[error("Internal error (bug): {message}")]
    Message { message: String },
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl CommandError {
    pub fn runtime(message: impl Into<String>) -> Self {
        CommandError::Runtime(RuntimeError::Message(message.into()))
    }
}

pub type CommandResult<T> = Result<T, CommandError>;

/// Reason an argument could not be parsed from the input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArgumentParseError {
    #[error("No input was provided")]
    NoInput,
    #[error("'{input}' is not a valid integer")]
    InvalidInteger { input: String },
    #[error("'{input}' is not a valid number")]
    InvalidFloat { input: String },
    #[error("'{input}' is not a valid boolean")]
    InvalidBoolean { input: String },
    #[error("{value} is not in the range {min} to {max}")]
    OutOfRange {
        value: String,
        min: String,
        max: String,
    },
    #[error("'{input}' is not one of: {choices}")]
    InvalidChoice { input: String, choices: String },
    #[error("Unknown flag '{flag}'")]
    UnknownFlag { flag: String },
    #[error("{0}")]
    Failure(String),
    /// A bug in the registered command, not a problem with the input.
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl ArgumentParseError {
    pub fn failure(message: impl Into<String>) -> Self {
        ArgumentParseError::Failure(message.into())
    }
}

pub(crate) trait UnwrapRuntimeError<T> {
    fn unwrap_runtime(self) -> Result<T, InternalError>;
}

impl<T> UnwrapRuntimeError<T> for CommandResult<T> {
    fn unwrap_runtime(self) -> Result<T, InternalError> {
        self.map_err(|err| match err {
            CommandError::Runtime(err) => InternalError::Message {
                message: format!("Runtime Error: {}", err),
            },
            CommandError::Internal(err) => err,
        })
    }
}
