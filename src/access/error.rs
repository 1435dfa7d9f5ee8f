//! Access-control failures.

use super::Operation;
use crate::directory::domain::ActorId;
use thiserror::Error;

/// Expected policy violations raised before any write happens.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AccessError {
    /// The request carries no session, or the session's actor is unknown or
    /// deactivated.
    #[error("authentication required")]
    Unauthorized,

    /// The actor is authenticated but the permission table denies the
    /// operation.
    #[error("actor {actor_id} may not {operation}")]
    Forbidden {
        /// The denied actor.
        actor_id: ActorId,
        /// The attempted operation.
        operation: Operation,
    },
}
