//! Credential handling
//!
//! Decodes the submitted login form and provides an in-memory user
//! directory seeded from configuration.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;

use super::user::User;
use super::validator::CheckCredentials;
use crate::error::CredentialError;

/// A submitted username/password pair.
///
/// Missing fields decode as empty strings so that the emptiness checks,
/// not the decoder, report them.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

impl Credential {
    /// Decodes a JSON login form body. Only a JSON object is a form;
    /// arrays and scalars are rejected even when their values line up.
    /// Bodies that are not valid UTF-8 are rejected too.
    pub fn parse(raw: impl AsRef<[u8]>) -> Result<Self, serde_json::Error> {
        let form: Map<String, Value> = serde_json::from_slice(raw.as_ref())?;
        serde_json::from_value(Value::Object(form))
    }
}

// Never print the password, not even in debug output.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// One configured account
#[derive(Clone, Deserialize)]
pub struct UserEntry {
    pub id: u64,
    pub username: String,
    pub password: String,
}

impl fmt::Debug for UserEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserEntry")
            .field("id", &self.id)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// In-memory credential store keyed by username
#[derive(Debug, Default)]
pub struct UserDirectory {
    entries: HashMap<String, UserEntry>,
}

impl UserDirectory {
    pub fn new(entries: impl IntoIterator<Item = UserEntry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|entry| (entry.username.clone(), entry))
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CheckCredentials for UserDirectory {
    fn check_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, CredentialError> {
        Ok(match self.entries.get(username) {
            Some(entry) if entry.password == password => Some(User::new(entry.id)),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> UserDirectory {
        UserDirectory::new([
            UserEntry {
                id: 1,
                username: "admin".into(),
                password: "admin123".into(),
            },
            UserEntry {
                id: 7,
                username: "bob".into(),
                password: "bob123".into(),
            },
        ])
    }

    #[test]
    fn test_parse_missing_fields_default_to_empty() {
        let cred = Credential::parse(r#"{"username":"admin"}"#).unwrap();
        assert_eq!(cred.username, "admin");
        assert_eq!(cred.password, "");

        let cred = Credential::parse("{}").unwrap();
        assert!(cred.username.is_empty());
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        assert!(Credential::parse("").is_err());
        assert!(Credential::parse("not json").is_err());
        assert!(Credential::parse(r#"{"username":42}"#).is_err());
        assert!(Credential::parse(r#"["admin","pw"]"#).is_err());
        assert!(Credential::parse(r#""admin""#).is_err());
        assert!(Credential::parse(b"{\"username\":\"adm\xffin\",\"password\":\"x\"}").is_err());
    }

    #[test]
    fn test_debug_redacts_password() {
        let cred = Credential {
            username: "admin".into(),
            password: "hunter2".into(),
        };
        let printed = format!("{:?}", cred);
        assert!(printed.contains("admin"));
        assert!(!printed.contains("hunter2"));
    }

    #[test]
    fn test_directory_lookup() {
        let dir = directory();
        assert_eq!(dir.len(), 2);
        assert_eq!(
            dir.check_credentials("bob", "bob123").unwrap(),
            Some(User::new(7))
        );
        assert_eq!(dir.check_credentials("bob", "wrong").unwrap(), None);
        assert_eq!(dir.check_credentials("carol", "bob123").unwrap(), None);
    }
}
