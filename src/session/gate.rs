//! Session gate
//!
//! Completes a login from a validation verdict and tears sessions down on
//! logout. Within one attempt the steps run strictly in order: notification,
//! session policy read, expiry update, user bind.

use chrono::{DateTime, Local};
use log::{error, info, warn};
use std::time::Duration;

use super::policy::{SessionPolicy, SessionSettings};
use super::results::{Landing, LoginResult, LogoutResult, MessageKey};
use super::store::SessionStore;
use crate::auth::{LoginAttempt, Verdict};
use crate::config::SessionConfig;
use crate::error::{GateError, NotifyError};
use crate::notify::{LoginEvent, LoginOutcome, NotifyLoginEvent};

/// Redirect targets and notification bound for a [`SessionGate`]
#[derive(Debug, Clone)]
pub struct GateOptions {
    pub base_path: String,
    pub panel_path: String,
    pub notify_timeout: Duration,
}

impl Default for GateOptions {
    fn default() -> Self {
        Self {
            base_path: "/".to_string(),
            panel_path: "xui/".to_string(),
            notify_timeout: Duration::from_millis(500),
        }
    }
}

impl From<&SessionConfig> for GateOptions {
    fn from(config: &SessionConfig) -> Self {
        Self {
            base_path: config.base_path.clone(),
            panel_path: config.panel_path.clone(),
            notify_timeout: config.notify_timeout(),
        }
    }
}

pub struct SessionGate<S, N> {
    settings: S,
    notifier: N,
    options: GateOptions,
}

impl<S, N> SessionGate<S, N>
where
    S: SessionSettings,
    N: NotifyLoginEvent,
{
    pub fn new(settings: S, notifier: N, options: GateOptions) -> Self {
        Self {
            settings,
            notifier,
            options,
        }
    }

    /// Completes a login attempt.
    ///
    /// Failed verdicts are reported and returned as a soft failure. On an
    /// authenticated verdict the success event is dispatched before the store
    /// is touched; only a failed bind is returned as an error.
    pub async fn complete_login<St: SessionStore>(
        &self,
        attempt: LoginAttempt,
        store: &mut St,
        remote_ip: &str,
        now: DateTime<Local>,
    ) -> Result<LoginResult, GateError> {
        let LoginAttempt { username, verdict } = attempt;

        let user = match verdict {
            Verdict::Authenticated(user) => user,
            failed => {
                info!("Login failed for user {:?} from {}", username, remote_ip);
                self.dispatch(LoginEvent::new(
                    username,
                    remote_ip,
                    now,
                    LoginOutcome::Failure,
                ))
                .await;
                return Ok(LoginResult {
                    ok: false,
                    message: failed.message_key(),
                });
            }
        };

        info!("User {} logged in from {}", username, remote_ip);
        self.dispatch(LoginEvent::new(
            username,
            remote_ip,
            now,
            LoginOutcome::Success,
        ))
        .await;

        let policy = self.read_policy();
        if let Some(seconds) = policy.max_age_secs() {
            if let Err(e) = store.set_max_age(seconds) {
                warn!("Unable to set session max age to {}s: {}", seconds, e);
            }
        }

        if let Err(e) = store.bind_user(&user) {
            error!("Unable to bind session for user {}: {}", user.id(), e);
            return Err(GateError::SessionBind(e));
        }

        info!("User {} session established", user.id());
        Ok(LoginResult {
            ok: true,
            message: MessageKey::SuccessLogin,
        })
    }

    /// Clears the session and returns the base path. Safe to repeat.
    pub fn logout<St: SessionStore>(&self, store: &mut St) -> LogoutResult {
        let previous_owner = store.current_user();
        if let Some(user) = &previous_owner {
            info!("User {} logged out", user.id());
        }

        if let Err(e) = store.clear() {
            warn!("Unable to clear session: {}", e);
        }

        LogoutResult {
            previous_owner,
            redirect: self.options.base_path.clone(),
        }
    }

    /// Sends logged-in visitors to the panel, everyone else to the login page.
    pub fn landing<St: SessionStore>(&self, store: &St) -> Landing {
        match store.current_user() {
            Some(_) => Landing::Panel(self.options.panel_path.clone()),
            None => Landing::LoginPage,
        }
    }

    fn read_policy(&self) -> SessionPolicy {
        match self.settings.session_max_age() {
            Ok(max_age_minutes) => SessionPolicy { max_age_minutes },
            Err(e) => {
                warn!("Unable to read session max age, using store default: {}", e);
                SessionPolicy::default()
            }
        }
    }

    async fn dispatch(&self, event: LoginEvent) {
        let timeout = self.options.notify_timeout;
        let result = match tokio::time::timeout(timeout, self.notifier.notify(&event)).await {
            Ok(result) => result,
            Err(_) => Err(NotifyError::TimedOut(timeout)),
        };

        if let Err(e) = result {
            warn!("Login notification for {:?} not delivered: {}", event.username, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::User;
    use crate::error::{SettingsError, StoreError};
    use crate::notify::LogNotifier;
    use crate::session::{MemorySessionStore, StaticSessionSettings};

    struct Unreadable;

    impl SessionSettings for Unreadable {
        fn session_max_age(&self) -> Result<u32, SettingsError> {
            Err(SettingsError::InvalidValue("unreadable".into()))
        }
    }

    struct Stalled;

    impl NotifyLoginEvent for Stalled {
        async fn notify(&self, _: &LoginEvent) -> Result<(), NotifyError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(())
        }
    }

    struct RejectingStore;

    impl SessionStore for RejectingStore {
        fn set_max_age(&mut self, seconds: u64) -> Result<(), StoreError> {
            Err(StoreError::InvalidMaxAge(seconds))
        }
        fn bind_user(&mut self, _: &User) -> Result<(), StoreError> {
            Ok(())
        }
        fn current_user(&self) -> Option<User> {
            None
        }
        fn clear(&mut self) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("gone".into()))
        }
    }

    fn store() -> MemorySessionStore {
        MemorySessionStore::new(Duration::from_secs(3600))
    }

    fn authenticated(id: u64) -> LoginAttempt {
        LoginAttempt {
            username: "admin".into(),
            verdict: Verdict::Authenticated(User::new(id)),
        }
    }

    #[tokio::test]
    async fn test_unreadable_policy_keeps_store_default() {
        let gate = SessionGate::new(Unreadable, LogNotifier, GateOptions::default());
        let mut store = store();

        let result = gate
            .complete_login(authenticated(1), &mut store, "127.0.0.1", Local::now())
            .await
            .unwrap();

        assert!(result.ok);
        assert_eq!(store.effective_max_age(), Duration::from_secs(3600));
        assert_eq!(store.current_user(), Some(User::new(1)));
    }

    #[tokio::test]
    async fn test_zero_policy_keeps_store_default() {
        let gate = SessionGate::new(StaticSessionSettings(0), LogNotifier, GateOptions::default());
        let mut store = store();
        gate.complete_login(authenticated(1), &mut store, "127.0.0.1", Local::now())
            .await
            .unwrap();
        assert_eq!(store.effective_max_age(), Duration::from_secs(3600));
    }

    #[tokio::test]
    async fn test_set_max_age_failure_is_not_fatal() {
        let gate = SessionGate::new(StaticSessionSettings(30), LogNotifier, GateOptions::default());
        let result = gate
            .complete_login(authenticated(1), &mut RejectingStore, "127.0.0.1", Local::now())
            .await
            .unwrap();
        assert!(result.ok);
    }

    #[tokio::test]
    async fn test_stalled_notifier_is_bounded() {
        let options = GateOptions {
            notify_timeout: Duration::from_millis(50),
            ..GateOptions::default()
        };
        let gate = SessionGate::new(StaticSessionSettings(30), Stalled, options);
        let mut store = store();

        let result = gate
            .complete_login(authenticated(2), &mut store, "127.0.0.1", Local::now())
            .await
            .unwrap();

        assert!(result.ok);
        assert_eq!(store.current_user(), Some(User::new(2)));
    }

    #[tokio::test]
    async fn test_failed_verdict_maps_message() {
        let gate = SessionGate::new(StaticSessionSettings(30), LogNotifier, GateOptions::default());
        let mut store = store();
        let attempt = LoginAttempt {
            username: String::new(),
            verdict: Verdict::MalformedInput,
        };

        let result = gate
            .complete_login(attempt, &mut store, "127.0.0.1", Local::now())
            .await
            .unwrap();

        assert_eq!(
            result,
            LoginResult {
                ok: false,
                message: MessageKey::InvalidFormData
            }
        );
        assert!(store.current_user().is_none());
    }

    #[test]
    fn test_logout_survives_clear_failure() {
        let gate = SessionGate::new(StaticSessionSettings(30), LogNotifier, GateOptions::default());
        let result = gate.logout(&mut RejectingStore);
        assert_eq!(result.redirect, "/");
        assert!(result.previous_owner.is_none());
    }

    #[test]
    fn test_landing() {
        let options = GateOptions {
            panel_path: "panel/".into(),
            ..GateOptions::default()
        };
        let gate = SessionGate::new(StaticSessionSettings(30), LogNotifier, options);
        let mut store = store();
        assert_eq!(gate.landing(&store), Landing::LoginPage);

        store.bind_user(&User::new(1)).unwrap();
        assert_eq!(gate.landing(&store), Landing::Panel("panel/".into()));
    }
}
