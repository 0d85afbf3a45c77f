//! Session store
//!
//! The session store owns session records. The gate only issues commands
//! through [`SessionStore`]; expiry is enforced here, on read.

use chrono::{DateTime, TimeDelta, Utc};
use std::time::Duration;

use crate::auth::User;
use crate::error::StoreError;

/// Request-scoped session commands
pub trait SessionStore {
    fn set_max_age(&mut self, seconds: u64) -> Result<(), StoreError>;
    fn bind_user(&mut self, user: &User) -> Result<(), StoreError>;
    fn current_user(&self) -> Option<User>;
    fn clear(&mut self) -> Result<(), StoreError>;
}

#[derive(Debug, Clone)]
struct SessionRecord {
    owner: User,
    expires_at: DateTime<Utc>,
}

/// In-memory store holding at most one session, one per connection.
#[derive(Debug)]
pub struct MemorySessionStore {
    default_max_age: Duration,
    max_age: Option<Duration>,
    session: Option<SessionRecord>,
}

impl MemorySessionStore {
    pub fn new(default_max_age: Duration) -> Self {
        Self {
            default_max_age,
            max_age: None,
            session: None,
        }
    }

    /// Max age applied to the next bind.
    pub fn effective_max_age(&self) -> Duration {
        self.max_age.unwrap_or(self.default_max_age)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.session.as_ref().map(|s| s.expires_at)
    }

    /// Binds `user` with an expiry computed from `now`.
    pub fn bind_user_at(&mut self, user: &User, now: DateTime<Utc>) -> Result<(), StoreError> {
        let secs = self.effective_max_age().as_secs();
        let expires_at = i64::try_from(secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .and_then(|delta| now.checked_add_signed(delta))
            .ok_or(StoreError::ExpiryOverflow(secs))?;

        self.session = Some(SessionRecord {
            owner: user.clone(),
            expires_at,
        });
        Ok(())
    }

    /// Owner of the session if it has not expired at `now`.
    pub fn current_user_at(&self, now: DateTime<Utc>) -> Option<User> {
        self.session
            .as_ref()
            .filter(|s| now < s.expires_at)
            .map(|s| s.owner.clone())
    }
}

impl SessionStore for MemorySessionStore {
    fn set_max_age(&mut self, seconds: u64) -> Result<(), StoreError> {
        if seconds == 0 {
            return Err(StoreError::InvalidMaxAge(seconds));
        }
        self.max_age = Some(Duration::from_secs(seconds));
        Ok(())
    }

    fn bind_user(&mut self, user: &User) -> Result<(), StoreError> {
        self.bind_user_at(user, Utc::now())
    }

    fn current_user(&self) -> Option<User> {
        self.current_user_at(Utc::now())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.session = None;
        self.max_age = None;
        Ok(())
    }
}
