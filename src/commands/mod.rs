pub mod handlers;
pub mod parser;
pub mod types;

pub use handlers::{describe_state, handle_command, handle_reply};
pub use parser::parse_command;
pub use types::{Command, CommandResult};
