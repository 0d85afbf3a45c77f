//! Authentication result types
//!
//! Defines the verdict produced by credential validation.

use super::user::User;
use crate::session::MessageKey;

/// Outcome of validating one login attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    MalformedInput,
    EmptyUsername,
    EmptyPassword,
    InvalidCredentials,
    Authenticated(User),
}

impl Verdict {
    /// The user-facing message for this verdict.
    pub fn message_key(&self) -> MessageKey {
        match self {
            Verdict::MalformedInput => MessageKey::InvalidFormData,
            Verdict::EmptyUsername => MessageKey::EmptyUsername,
            Verdict::EmptyPassword => MessageKey::EmptyPassword,
            Verdict::InvalidCredentials => MessageKey::WrongUsernameOrPassword,
            Verdict::Authenticated(_) => MessageKey::SuccessLogin,
        }
    }
}

/// A verdict together with the username it was reached for.
///
/// The username is empty when the form could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginAttempt {
    pub username: String,
    pub verdict: Verdict,
}
