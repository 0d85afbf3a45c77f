//! Reply formatting
//!
//! Login replies are single-line JSON status objects; navigation replies are
//! plain `REDIRECT`/`PAGE` lines.

use serde::Serialize;

/// JSON status payload returned for a login attempt
#[derive(Debug, Serialize, PartialEq)]
pub struct StatusReply {
    pub success: bool,
    pub msg: String,
}

impl StatusReply {
    pub fn new(success: bool, msg: impl Into<String>) -> Self {
        Self {
            success,
            msg: msg.into(),
        }
    }

    /// Encodes the reply as a terminated line.
    pub fn to_line(&self) -> String {
        match serde_json::to_string(self) {
            Ok(json) => format!("{}\r\n", json),
            Err(_) => "{\"success\":false,\"msg\":\"\"}\r\n".to_string(),
        }
    }
}

pub fn redirect(path: &str) -> String {
    format!("REDIRECT {}\r\n", path)
}

pub fn page(name: &str) -> String {
    format!("PAGE {}\r\n", name)
}

pub fn error(message: &str) -> String {
    format!("ERR {}\r\n", message)
}
