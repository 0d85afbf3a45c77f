//! Message translation
//!
//! Resolves message keys to display text through a lookup table. Unknown
//! keys fall back to the key itself.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::session::MessageKey;

static EN_MESSAGES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut messages = HashMap::new();
    messages.insert("pages.login.toasts.invalidFormData", "The input data format is invalid.");
    messages.insert("pages.login.toasts.emptyUsername", "Please enter username");
    messages.insert("pages.login.toasts.emptyPassword", "Please enter password");
    messages.insert(
        "pages.login.toasts.wrongUsernameOrPassword",
        "Invalid username or password.",
    );
    messages.insert("pages.login.toasts.successLogin", "Login");
    messages
});

/// Display text for `key`.
pub fn translate(key: MessageKey) -> &'static str {
    EN_MESSAGES.get(key.as_str()).copied().unwrap_or(key.as_str())
}
