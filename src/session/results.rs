//! Session result types
//!
//! Defines the values returned to the transport layer by login, logout and
//! landing operations.

use crate::auth::User;

/// User-facing message kinds. The transport resolves them to text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    InvalidFormData,
    EmptyUsername,
    EmptyPassword,
    WrongUsernameOrPassword,
    SuccessLogin,
}

impl MessageKey {
    /// Localization key for this message.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKey::InvalidFormData => "pages.login.toasts.invalidFormData",
            MessageKey::EmptyUsername => "pages.login.toasts.emptyUsername",
            MessageKey::EmptyPassword => "pages.login.toasts.emptyPassword",
            MessageKey::WrongUsernameOrPassword => "pages.login.toasts.wrongUsernameOrPassword",
            MessageKey::SuccessLogin => "pages.login.toasts.successLogin",
        }
    }
}

/// Result of a completed login attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginResult {
    pub ok: bool,
    pub message: MessageKey,
}

/// Result of a logout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoutResult {
    pub previous_owner: Option<User>,
    pub redirect: String,
}

/// Where a visitor of the landing page should go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Landing {
    Panel(String),
    LoginPage,
}
