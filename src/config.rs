//! Configuration management for the session gate
//!
//! Separates listener settings from the session policy and the seeded user
//! accounts. Loaded from `config.toml` with `SESSION_GATE_*` environment
//! overrides.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

use crate::auth::UserEntry;
use crate::session::{FileSessionSettings, SettingsSource, StaticSessionSettings};

/// Complete gate configuration
#[derive(Debug, Deserialize, Clone)]
pub struct GateConfig {
    #[serde(flatten)]
    pub server: ServerSettings,

    #[serde(flatten)]
    pub session: SessionConfig,

    #[serde(default)]
    pub users: Vec<UserEntry>,
}

/// Listener settings (restart required)
#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    /// Environment: SESSION_GATE_BIND_ADDRESS
    pub bind_address: String,

    /// Environment: SESSION_GATE_PORT
    pub port: u16,

    /// Longest accepted request line, in bytes
    pub max_line_length: usize,
}

/// Session policy settings
#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// Redirect target after logout
    pub base_path: String,

    /// Redirect target for visitors that are already logged in
    pub panel_path: String,

    /// Session max age pushed to the store on login, 0 keeps the store default
    pub session_max_age_minutes: u32,

    /// Store default used when no max age is pushed
    pub default_session_max_age_secs: u64,

    /// Upper bound on a single login notification
    pub notify_timeout_ms: u64,

    /// When set, the max age is re-read from this file on every login
    #[serde(default)]
    pub settings_file: Option<PathBuf>,
}

impl GateConfig {
    /// Load configuration from config.toml with environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_paths = ["session-gate/config", "config"];

        let mut last_error = None;

        for config_path in &config_paths {
            match Config::builder()
                .add_source(File::with_name(config_path))
                .add_source(
                    Environment::with_prefix("SESSION_GATE")
                        .prefix_separator("_")
                        .separator("__")
                        .try_parsing(true),
                )
                .build()
            {
                Ok(settings) => {
                    let config: GateConfig = settings.try_deserialize()?;
                    config.validate()?;
                    return Ok(config);
                }
                Err(e) => {
                    last_error = Some(e);
                    continue;
                }
            }
        }

        Err(config::ConfigError::Message(format!(
            "Failed to load config.toml from any location. Tried: {config_paths:?}. Last error: {last_error:?}"
        )))
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.server.port == 0 {
            return Err(config::ConfigError::Message("port cannot be 0".into()));
        }

        if self.server.max_line_length == 0 {
            return Err(config::ConfigError::Message(
                "max_line_length must be greater than 0".into(),
            ));
        }

        if self.session.base_path.is_empty() {
            return Err(config::ConfigError::Message(
                "base_path cannot be empty".into(),
            ));
        }

        if self.session.default_session_max_age_secs == 0 {
            return Err(config::ConfigError::Message(
                "default_session_max_age_secs must be greater than 0".into(),
            ));
        }

        if self.session.notify_timeout_ms == 0 {
            return Err(config::ConfigError::Message(
                "notify_timeout_ms must be greater than 0".into(),
            ));
        }

        let mut seen = HashSet::new();
        for user in &self.users {
            if user.username.is_empty() {
                return Err(config::ConfigError::Message(format!(
                    "user {} has an empty username",
                    user.id
                )));
            }
            if !seen.insert(user.username.as_str()) {
                return Err(config::ConfigError::Message(format!(
                    "duplicate username: {}",
                    user.username
                )));
            }
        }

        Ok(())
    }
}

impl ServerSettings {
    /// Get bind address and port as socket address
    pub fn listen_socket(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

impl SessionConfig {
    pub fn notify_timeout(&self) -> Duration {
        Duration::from_millis(self.notify_timeout_ms)
    }

    pub fn default_session_max_age(&self) -> Duration {
        Duration::from_secs(self.default_session_max_age_secs)
    }

    /// Where login attempts read the session max age from
    pub fn settings_source(&self) -> SettingsSource {
        match &self.settings_file {
            Some(path) => SettingsSource::File(FileSessionSettings::new(path.clone())),
            None => SettingsSource::Static(StaticSessionSettings(self.session_max_age_minutes)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GateConfig {
        GateConfig {
            server: ServerSettings {
                bind_address: "127.0.0.1".into(),
                port: 2180,
                max_line_length: 1024,
            },
            session: SessionConfig {
                base_path: "/".into(),
                panel_path: "xui/".into(),
                session_max_age_minutes: 60,
                default_session_max_age_secs: 3600,
                notify_timeout_ms: 500,
                settings_file: None,
            },
            users: vec![UserEntry {
                id: 1,
                username: "admin".into(),
                password: "admin".into(),
            }],
        }
    }

    #[test]
    fn test_valid_config() {
        let config = sample();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.listen_socket(), "127.0.0.1:2180");
        assert_eq!(config.session.notify_timeout(), Duration::from_millis(500));
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = sample();
        config.server.port = 0;
        assert!(config.validate().is_err());

        let mut config = sample();
        config.session.base_path.clear();
        assert!(config.validate().is_err());

        let mut config = sample();
        config.session.notify_timeout_ms = 0;
        assert!(config.validate().is_err());

        let mut config = sample();
        config.session.default_session_max_age_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_duplicate_usernames() {
        let mut config = sample();
        config.users.push(UserEntry {
            id: 2,
            username: "admin".into(),
            password: "other".into(),
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_settings_source_selection() {
        let mut config = sample();
        assert!(matches!(
            config.session.settings_source(),
            SettingsSource::Static(StaticSessionSettings(60))
        ));

        config.session.settings_file = Some(PathBuf::from("settings.toml"));
        assert!(matches!(
            config.session.settings_source(),
            SettingsSource::File(_)
        ));
    }
}
