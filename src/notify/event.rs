//! Login event record

use chrono::{DateTime, Local};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Success,
    Failure,
}

/// Audit record of a single login attempt. Never carries the password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginEvent {
    pub username: String,
    pub remote_ip: String,
    pub timestamp: DateTime<Local>,
    pub outcome: LoginOutcome,
}

impl LoginEvent {
    pub fn new(
        username: impl Into<String>,
        remote_ip: impl Into<String>,
        timestamp: DateTime<Local>,
        outcome: LoginOutcome,
    ) -> Self {
        Self {
            username: username.into(),
            remote_ip: remote_ip.into(),
            timestamp,
            outcome,
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == LoginOutcome::Success
    }

    /// Timestamp as `YYYY-MM-DD HH:MM:SS`, local time.
    pub fn timestamp_str(&self) -> String {
        self.timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

impl fmt::Display for LoginEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = match self.outcome {
            LoginOutcome::Success => "succeeded",
            LoginOutcome::Failure => "failed",
        };
        write!(
            f,
            "login {} for user {} from {} at {}",
            status,
            self.username,
            self.remote_ip,
            self.timestamp_str()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_display_and_timestamp() {
        let ts = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        let event = LoginEvent::new("admin", "10.0.0.2", ts, LoginOutcome::Failure);

        assert!(!event.is_success());
        assert_eq!(event.timestamp_str(), "2024-03-09 07:05:01");
        assert_eq!(
            event.to_string(),
            "login failed for user admin from 10.0.0.2 at 2024-03-09 07:05:01"
        );
    }
}
