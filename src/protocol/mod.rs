//! Line protocol
//!
//! Handles command parsing, message translation and reply generation for the
//! login transport.

pub mod commands;
pub mod handlers;
pub mod responses;
pub mod translators;

pub use commands::{Command, CommandResult, CommandStatus, parse_command};
pub use handlers::handle_command;
pub use responses::StatusReply;
pub use translators::translate;
