//! Session gate
//!
//! Validates login attempts, establishes expiring sessions, reports every
//! attempt to a notification sink and tears sessions down on logout.

pub mod auth;
pub mod config;
pub mod error;
pub mod notify;
pub mod protocol;
pub mod server;
pub mod service;
pub mod session;
pub mod utils;

pub use server::Server;
pub use service::LoginService;
