//! Session policy
//!
//! The max-age policy is read once per login attempt. A read failure is
//! never fatal: the gate falls back to the store default.

use config::{Config, ConfigError, File};
use std::path::PathBuf;

use crate::error::SettingsError;

/// Setting key holding the session max age, in minutes.
pub const SESSION_MAX_AGE_KEY: &str = "session_max_age_minutes";

/// Reads the configured session max age, in minutes.
pub trait SessionSettings {
    fn session_max_age(&self) -> Result<u32, SettingsError>;
}

/// Session expiry policy for one login attempt
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionPolicy {
    pub max_age_minutes: u32,
}

impl SessionPolicy {
    /// Max age to push to the store, or `None` to keep the store default.
    pub fn max_age_secs(&self) -> Option<u64> {
        match self.max_age_minutes {
            0 => None,
            minutes => Some(u64::from(minutes) * 60),
        }
    }
}

/// A fixed max age, taken from startup configuration
#[derive(Debug, Clone, Copy)]
pub struct StaticSessionSettings(pub u32);

impl SessionSettings for StaticSessionSettings {
    fn session_max_age(&self) -> Result<u32, SettingsError> {
        Ok(self.0)
    }
}

/// Re-reads the max age from a settings file on every call, so edits take
/// effect on the next login without a restart.
#[derive(Debug, Clone)]
pub struct FileSessionSettings {
    path: PathBuf,
}

impl FileSessionSettings {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionSettings for FileSessionSettings {
    fn session_max_age(&self) -> Result<u32, SettingsError> {
        let settings = Config::builder()
            .add_source(File::from(self.path.as_path()))
            .build()?;

        let minutes = match settings.get_int(SESSION_MAX_AGE_KEY) {
            Ok(minutes) => minutes,
            // Unset means "use the store default".
            Err(ConfigError::NotFound(_)) => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        u32::try_from(minutes).map_err(|_| {
            SettingsError::InvalidValue(format!("{} = {}", SESSION_MAX_AGE_KEY, minutes))
        })
    }
}

/// Settings source selected at startup
#[derive(Debug, Clone)]
pub enum SettingsSource {
    Static(StaticSessionSettings),
    File(FileSessionSettings),
}

impl SessionSettings for SettingsSource {
    fn session_max_age(&self) -> Result<u32, SettingsError> {
        match self {
            SettingsSource::Static(s) => s.session_max_age(),
            SettingsSource::File(s) => s.session_max_age(),
        }
    }
}
