//! Caller identity as supplied by the external authentication service.
//!
//! The engine never verifies credentials. It receives an already-validated
//! caller id on every call and treats the sentinel id `"1"` (or an empty id)
//! as the anonymous caller.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sentinel id used by the identity provider for unauthenticated callers.
pub const ANONYMOUS_ID: &str = "1";

/// Role granted to authenticated users.
pub const USER_ROLE: &str = "USER";

/// Identifier of a caller or note owner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallerId(String);

impl CallerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn anonymous() -> Self {
        Self(ANONYMOUS_ID.to_string())
    }

    pub fn is_anonymous(&self) -> bool {
        self.0.is_empty() || self.0 == ANONYMOUS_ID
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CallerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CallerId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CallerId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Identity payload for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub id: CallerId,
    pub roles: Vec<String>,
}

impl Caller {
    pub fn new(id: impl Into<CallerId>, roles: Vec<String>) -> Self {
        Self {
            id: id.into(),
            roles,
        }
    }

    /// An authenticated user holding the `USER` role.
    pub fn user(id: impl Into<CallerId>) -> Self {
        Self::new(id, vec![USER_ROLE.to_string()])
    }

    pub fn anonymous() -> Self {
        Self::new(CallerId::anonymous(), Vec::new())
    }

    pub fn is_authenticated(&self) -> bool {
        !self.id.is_anonymous() && self.roles.iter().any(|role| role == USER_ROLE)
    }

    /// The id writes are attributed to: the caller's own id when
    /// authenticated, the anonymous sentinel otherwise.
    pub fn author(&self) -> CallerId {
        if self.is_authenticated() {
            self.id.clone()
        } else {
            CallerId::anonymous()
        }
    }
}
