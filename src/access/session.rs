//! Request-scoped identity supplied by the external session provider.

use super::AccessError;
use crate::directory::domain::{ActorId, Role};
use serde::{Deserialize, Serialize};

/// Authenticated identity attached to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    actor_id: ActorId,
    role: Role,
}

impl Session {
    /// Creates a session for `actor_id` carrying the role asserted by the
    /// session provider.
    #[must_use]
    pub const fn new(actor_id: ActorId, role: Role) -> Self {
        Self { actor_id, role }
    }

    /// Returns the authenticated actor.
    #[must_use]
    pub const fn actor_id(&self) -> ActorId {
        self.actor_id
    }

    /// Returns the role asserted by the session provider.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }
}

/// Explicit per-call context passed into every service operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestContext {
    session: Option<Session>,
}

impl RequestContext {
    /// Creates a context for an authenticated request.
    #[must_use]
    pub const fn authenticated(session: Session) -> Self {
        Self {
            session: Some(session),
        }
    }

    /// Creates a context for a request without a session.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { session: None }
    }

    /// Creates a context from whatever the session provider returned.
    #[must_use]
    pub const fn from_session(session: Option<Session>) -> Self {
        Self { session }
    }

    /// Returns the session.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Unauthorized`] when the request carries no
    /// session.
    pub const fn session(&self) -> Result<&Session, AccessError> {
        match &self.session {
            Some(session) => Ok(session),
            None => Err(AccessError::Unauthorized),
        }
    }
}
