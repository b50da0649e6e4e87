pub mod aggregate;
pub mod argument;
pub mod argument_parser;
pub mod argument_set;
mod builtin;
pub mod context;
pub mod error;
mod executor;
pub mod node;
pub mod parser;
pub mod registry;
pub mod suggestions;
pub mod usage;
pub mod value;

pub use argument::ArgumentType;
pub use builtin::register_help;
pub use context::{
    Audience, CommandContext, CommandSender, ConsoleAudience, ExecutionContext, RecordingAudience,
};
pub use error::{ArgumentParseError, CommandError, CommandResult, InternalError, RuntimeError};
pub use node::CommandNode;
pub use registry::CommandRegistry;
pub use suggestions::suggestions;
