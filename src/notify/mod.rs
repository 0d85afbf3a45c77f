//! Login event notification
//!
//! Every login attempt produces one [`LoginEvent`], handed to a
//! [`NotifyLoginEvent`] sink exactly once. Sinks are fire-and-forget.

pub mod event;
pub mod sinks;

pub use event::{LoginEvent, LoginOutcome};
pub use sinks::{ChannelNotifier, LogNotifier, NotifyLoginEvent, drain_alerts};
