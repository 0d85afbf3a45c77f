//! Authentication system
//!
//! Handles login form decoding, credential checks and the resulting verdict.

pub mod credentials;
pub mod results;
pub mod user;
pub mod validator;

pub use credentials::{Credential, UserDirectory, UserEntry};
pub use results::{LoginAttempt, Verdict};
pub use user::{User, UserId};
pub use validator::{CheckCredentials, CredentialValidator};
