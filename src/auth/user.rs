//! User identity
//!
//! The gate treats users as opaque: only the identity is ever inspected.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An authenticated user as returned by a credential backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
}

impl User {
    pub fn new(id: u64) -> Self {
        Self { id: UserId(id) }
    }

    pub fn id(&self) -> UserId {
        self.id
    }
}
