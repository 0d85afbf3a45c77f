//! Error handling
//!
//! Defines error types for the credential, settings, session store and
//! notification capabilities, plus the gate-level error surfaced to callers.

pub mod types;

pub use types::*;
