//! Caller authentication and department-membership lookups.

use crate::access::{AccessError, RequestContext};
use crate::directory::{
    domain::{Actor, ActorId, DepartmentId, resolve_effective_department},
    ports::{Directory, DirectoryRepositoryError, DirectoryRepositoryResult},
};
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while resolving the calling actor.
#[derive(Debug, Error)]
pub enum MembershipError {
    /// The request is not authenticated.
    #[error(transparent)]
    Access(#[from] AccessError),
    /// Directory lookup failed.
    #[error(transparent)]
    Repository(#[from] DirectoryRepositoryError),
}

/// Resolves callers and their effective departments against the directory.
#[derive(Clone)]
pub struct MembershipResolver<D>
where
    D: Directory,
{
    directory: Arc<D>,
}

impl<D> MembershipResolver<D>
where
    D: Directory,
{
    /// Creates a resolver over `directory`.
    #[must_use]
    pub const fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }

    /// Loads the actor behind the request's session.
    ///
    /// The persisted actor record is authoritative: its role, not the role
    /// carried by the session, feeds the permission table.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Unauthorized`] when the request has no session
    /// or its actor is unknown or deactivated.
    pub async fn authenticate(&self, context: &RequestContext) -> Result<Actor, MembershipError> {
        let session = context.session()?;
        let actor = self
            .directory
            .find_actor(session.actor_id())
            .await?
            .filter(Actor::is_active)
            .ok_or(AccessError::Unauthorized)?;
        if actor.role() != session.role() {
            tracing::debug!(
                actor_id = %actor.id(),
                session_role = %session.role(),
                stored_role = %actor.role(),
                "session role is stale; using stored role"
            );
        }
        Ok(actor)
    }

    /// Resolves the effective department of a loaded actor.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryRepositoryError`] when the headship lookup fails.
    pub async fn effective_department(
        &self,
        actor: &Actor,
    ) -> DirectoryRepositoryResult<Option<DepartmentId>> {
        if let Some(direct) = actor.department_id() {
            return Ok(Some(direct));
        }
        let headed = self.directory.find_department_headed_by(actor.id()).await?;
        Ok(resolve_effective_department(actor, headed.as_ref()))
    }

    /// Returns `true` when `actor_id` heads `department_id`.
    ///
    /// A missing department, or no department at all, yields `false`.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryRepositoryError`] when the lookup fails.
    pub async fn heads_department(
        &self,
        actor_id: ActorId,
        department_id: Option<DepartmentId>,
    ) -> DirectoryRepositoryResult<bool> {
        let Some(id) = department_id else {
            return Ok(false);
        };
        let department = self.directory.find_department(id).await?;
        Ok(department.is_some_and(|found| found.is_headed_by(actor_id)))
    }
}
