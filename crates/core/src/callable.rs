//! Caller identity attached to client-initiated calls.
//!
//! The runtime resolves the bearer token of each request into a
//! [`CallContext`]. Handlers that serve authenticated callers ask the
//! context for the caller id before doing anything else.

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// Verified identity of the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    pub uid: String,
}

/// Per-request context handed to client-facing handlers.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    pub auth: Option<AuthContext>,
}

impl CallContext {
    pub fn authenticated(uid: impl Into<String>) -> Self {
        Self {
            auth: Some(AuthContext { uid: uid.into() }),
        }
    }

    pub fn anonymous() -> Self {
        Self { auth: None }
    }

    /// Returns the caller id, or `Unauthenticated` when no identity is attached.
    pub fn require_uid(&self) -> Result<&str> {
        self.auth
            .as_ref()
            .map(|auth| auth.uid.as_str())
            .ok_or_else(Error::unauthenticated)
    }
}
