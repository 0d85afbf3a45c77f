//! Login transport
//!
//! A line-oriented TCP front end for the login service. Each connection is
//! one request context with its own session store.

pub mod connection;
pub mod core;

pub use connection::handle_connection;
pub use self::core::{GateService, Server};
