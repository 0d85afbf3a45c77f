//! Error types
//!
//! Each capability the gate consumes has its own error type. Only
//! [`GateError`] ever reaches the transport layer.

use std::fmt;
use std::time::Duration;

/// Credential backend failures. "User not found" is not an error.
#[derive(Debug)]
pub enum CredentialError {
    Unavailable(String),
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialError::Unavailable(s) => write!(f, "Credential backend unavailable: {}", s),
        }
    }
}

impl std::error::Error for CredentialError {}

/// Session policy read failures
#[derive(Debug)]
pub enum SettingsError {
    Source(config::ConfigError),
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Source(e) => write!(f, "Settings source error: {}", e),
            SettingsError::InvalidValue(s) => write!(f, "Invalid setting value: {}", s),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Source(e) => Some(e),
            SettingsError::InvalidValue(_) => None,
        }
    }
}

impl From<config::ConfigError> for SettingsError {
    fn from(error: config::ConfigError) -> Self {
        SettingsError::Source(error)
    }
}

/// Session store command failures
#[derive(Debug)]
pub enum StoreError {
    InvalidMaxAge(u64),
    ExpiryOverflow(u64),
    Unavailable(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::InvalidMaxAge(s) => write!(f, "Invalid session max age: {}s", s),
            StoreError::ExpiryOverflow(s) => {
                write!(f, "Session expiry out of range for max age {}s", s)
            }
            StoreError::Unavailable(s) => write!(f, "Session store unavailable: {}", s),
        }
    }
}

impl std::error::Error for StoreError {}

/// Notification sink failures. Never affects a login outcome.
#[derive(Debug)]
pub enum NotifyError {
    ChannelFull,
    ChannelClosed,
    TimedOut(Duration),
    Sink(String),
}

impl fmt::Display for NotifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotifyError::ChannelFull => write!(f, "Notification channel is full"),
            NotifyError::ChannelClosed => write!(f, "Notification channel is closed"),
            NotifyError::TimedOut(d) => {
                write!(f, "Notification timed out after {}ms", d.as_millis())
            }
            NotifyError::Sink(s) => write!(f, "Notification sink error: {}", s),
        }
    }
}

impl std::error::Error for NotifyError {}

/// Failures surfaced by login and logout operations
#[derive(Debug)]
pub enum GateError {
    /// An authenticated user could not be bound to the session.
    SessionBind(StoreError),
    CredentialLookup(CredentialError),
}

impl fmt::Display for GateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateError::SessionBind(e) => write!(f, "Failed to bind session: {}", e),
            GateError::CredentialLookup(e) => write!(f, "Credential lookup failed: {}", e),
        }
    }
}

impl std::error::Error for GateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GateError::SessionBind(e) => Some(e),
            GateError::CredentialLookup(e) => Some(e),
        }
    }
}

impl From<CredentialError> for GateError {
    fn from(error: CredentialError) -> Self {
        GateError::CredentialLookup(error)
    }
}
