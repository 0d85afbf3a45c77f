//! Login service
//!
//! Composes the credential validator and the session gate into the two
//! operations the transport layer calls: login and logout.

use chrono::{DateTime, Local};
use log::error;

use crate::auth::{CheckCredentials, CredentialValidator};
use crate::error::GateError;
use crate::notify::NotifyLoginEvent;
use crate::session::{
    GateOptions, Landing, LoginResult, SessionGate, SessionSettings, SessionStore,
};

pub struct LoginService<C, S, N> {
    validator: CredentialValidator<C>,
    gate: SessionGate<S, N>,
}

impl<C, S, N> LoginService<C, S, N>
where
    C: CheckCredentials,
    S: SessionSettings,
    N: NotifyLoginEvent,
{
    pub fn new(checker: C, settings: S, notifier: N, options: GateOptions) -> Self {
        Self {
            validator: CredentialValidator::new(checker),
            gate: SessionGate::new(settings, notifier, options),
        }
    }

    pub fn gate(&self) -> &SessionGate<S, N> {
        &self.gate
    }

    /// Handles a login form body submitted from `remote_ip`.
    pub async fn handle_login<St: SessionStore>(
        &self,
        form: impl AsRef<[u8]>,
        store: &mut St,
        remote_ip: &str,
    ) -> Result<LoginResult, GateError> {
        self.handle_login_at(form, store, remote_ip, Local::now())
            .await
    }

    pub async fn handle_login_at<St: SessionStore>(
        &self,
        form: impl AsRef<[u8]>,
        store: &mut St,
        remote_ip: &str,
        now: DateTime<Local>,
    ) -> Result<LoginResult, GateError> {
        let attempt = self.validator.validate(form).map_err(|e| {
            error!("Credential check failed for login from {}: {}", remote_ip, e);
            GateError::from(e)
        })?;

        self.gate
            .complete_login(attempt, store, remote_ip, now)
            .await
    }

    /// Clears the session and returns the redirect path.
    pub fn handle_logout<St: SessionStore>(&self, store: &mut St) -> String {
        self.gate.logout(store).redirect
    }

    pub fn landing<St: SessionStore>(&self, store: &St) -> Landing {
        self.gate.landing(store)
    }
}
