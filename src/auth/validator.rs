//! Credential validator
//!
//! Checks the structure of a login form and delegates the credential check
//! to an external capability. Checks run in a fixed order and the first
//! failure is terminal.

use super::credentials::Credential;
use super::results::{LoginAttempt, Verdict};
use super::user::User;
use crate::error::CredentialError;

/// Looks up a user by username and password.
///
/// Returns `Ok(None)` when no user matches; `Err` is reserved for
/// infrastructure failures.
pub trait CheckCredentials {
    fn check_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, CredentialError>;
}

pub struct CredentialValidator<C> {
    checker: C,
}

impl<C: CheckCredentials> CredentialValidator<C> {
    pub fn new(checker: C) -> Self {
        Self { checker }
    }

    /// Validates a raw login form body.
    pub fn validate(&self, raw: impl AsRef<[u8]>) -> Result<LoginAttempt, CredentialError> {
        let credential = match Credential::parse(raw) {
            Ok(credential) => credential,
            Err(_) => {
                return Ok(LoginAttempt {
                    username: String::new(),
                    verdict: Verdict::MalformedInput,
                });
            }
        };
        self.validate_credential(credential)
    }

    /// Validates an already decoded credential.
    pub fn validate_credential(
        &self,
        credential: Credential,
    ) -> Result<LoginAttempt, CredentialError> {
        let verdict = if credential.username.is_empty() {
            Verdict::EmptyUsername
        } else if credential.password.is_empty() {
            Verdict::EmptyPassword
        } else {
            match self
                .checker
                .check_credentials(&credential.username, &credential.password)?
            {
                Some(user) => Verdict::Authenticated(user),
                None => Verdict::InvalidCredentials,
            }
        };

        Ok(LoginAttempt {
            username: credential.username,
            verdict,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Fixed {
        user: Option<User>,
        calls: Cell<usize>,
    }

    impl Fixed {
        fn new(user: Option<User>) -> Self {
            Self {
                user,
                calls: Cell::new(0),
            }
        }
    }

    impl CheckCredentials for Fixed {
        fn check_credentials(&self, _: &str, _: &str) -> Result<Option<User>, CredentialError> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.user.clone())
        }
    }

    struct Broken;

    impl CheckCredentials for Broken {
        fn check_credentials(&self, _: &str, _: &str) -> Result<Option<User>, CredentialError> {
            Err(CredentialError::Unavailable("db down".into()))
        }
    }

    #[test]
    fn test_malformed_input_wins() {
        let validator = CredentialValidator::new(Fixed::new(Some(User::new(1))));
        let attempt = validator.validate("{username:").unwrap();
        assert_eq!(attempt.verdict, Verdict::MalformedInput);
        assert!(attempt.username.is_empty());
        assert_eq!(validator.checker.calls.get(), 0);
    }

    #[test]
    fn test_array_form_is_malformed() {
        let validator = CredentialValidator::new(Fixed::new(Some(User::new(1))));
        let attempt = validator.validate(r#"["admin","pw"]"#).unwrap();
        assert_eq!(attempt.verdict, Verdict::MalformedInput);
        assert!(attempt.username.is_empty());
        assert_eq!(validator.checker.calls.get(), 0);
    }

    #[test]
    fn test_empty_username_shadows_password() {
        let validator = CredentialValidator::new(Fixed::new(Some(User::new(1))));
        for body in [
            r#"{"username":"","password":"x"}"#,
            r#"{"username":"","password":""}"#,
            r#"{"password":"x"}"#,
        ] {
            let attempt = validator.validate(body).unwrap();
            assert_eq!(attempt.verdict, Verdict::EmptyUsername, "body: {}", body);
        }
        assert_eq!(validator.checker.calls.get(), 0);
    }

    #[test]
    fn test_empty_password() {
        let validator = CredentialValidator::new(Fixed::new(Some(User::new(1))));
        let attempt = validator
            .validate(r#"{"username":"admin","password":""}"#)
            .unwrap();
        assert_eq!(attempt.verdict, Verdict::EmptyPassword);
        assert_eq!(attempt.username, "admin");
        assert_eq!(validator.checker.calls.get(), 0);
    }

    #[test]
    fn test_invalid_and_authenticated() {
        let validator = CredentialValidator::new(Fixed::new(None));
        let attempt = validator
            .validate(r#"{"username":"admin","password":"wrong"}"#)
            .unwrap();
        assert_eq!(attempt.verdict, Verdict::InvalidCredentials);

        let validator = CredentialValidator::new(Fixed::new(Some(User::new(1))));
        let attempt = validator
            .validate(r#"{"username":"admin","password":"right"}"#)
            .unwrap();
        assert_eq!(attempt.verdict, Verdict::Authenticated(User::new(1)));
        assert_eq!(validator.checker.calls.get(), 1);
    }

    #[test]
    fn test_backend_failure_propagates() {
        let validator = CredentialValidator::new(Broken);
        let result = validator.validate(r#"{"username":"admin","password":"pw"}"#);
        assert!(matches!(result, Err(CredentialError::Unavailable(_))));
    }
}
