//! Session lifecycle
//!
//! Turns verdicts into live sessions, drives login notifications and tears
//! sessions down on logout.

pub mod gate;
pub mod policy;
pub mod results;
pub mod store;

pub use gate::{GateOptions, SessionGate};
pub use policy::{
    FileSessionSettings, SessionPolicy, SessionSettings, SettingsSource, StaticSessionSettings,
};
pub use results::{Landing, LoginResult, LogoutResult, MessageKey};
pub use store::{MemorySessionStore, SessionStore};
