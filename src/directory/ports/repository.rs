//! Repository ports for actor and department persistence.

use crate::directory::domain::{Actor, ActorId, Department, DepartmentId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for directory repository operations.
pub type DirectoryRepositoryResult<T> = Result<T, DirectoryRepositoryError>;

/// Actor persistence contract.
#[async_trait]
pub trait ActorRepository: Send + Sync {
    /// Stores a new actor.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryRepositoryError::DuplicateActor`] when the actor ID
    /// already exists or [`DirectoryRepositoryError::DuplicateEmail`] when the
    /// email address is already registered.
    async fn store_actor(&self, actor: &Actor) -> DirectoryRepositoryResult<()>;

    /// Persists changes to an existing actor.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryRepositoryError::ActorNotFound`] when the actor does
    /// not exist.
    async fn update_actor(&self, actor: &Actor) -> DirectoryRepositoryResult<()>;

    /// Finds an actor by identifier, regardless of lifecycle status.
    async fn find_actor(&self, id: ActorId) -> DirectoryRepositoryResult<Option<Actor>>;

    /// Returns active actors whose direct membership is `department_id`.
    async fn list_active_members(
        &self,
        department_id: DepartmentId,
    ) -> DirectoryRepositoryResult<Vec<Actor>>;

    /// Counts active actors whose direct membership is `department_id`.
    async fn count_active_members(
        &self,
        department_id: DepartmentId,
    ) -> DirectoryRepositoryResult<u64>;
}

/// Department persistence contract.
#[async_trait]
pub trait DepartmentRepository: Send + Sync {
    /// Stores a new department.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryRepositoryError::DuplicateDepartment`] when the ID
    /// already exists.
    async fn store_department(&self, department: &Department) -> DirectoryRepositoryResult<()>;

    /// Persists changes to an existing department.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryRepositoryError::DepartmentNotFound`] when the
    /// department does not exist or [`DirectoryRepositoryError::DuplicateHead`]
    /// when the new head already heads another department.
    async fn update_department(&self, department: &Department) -> DirectoryRepositoryResult<()>;

    /// Deletes a department.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryRepositoryError::DepartmentNotFound`] when the
    /// department does not exist.
    async fn delete_department(&self, id: DepartmentId) -> DirectoryRepositoryResult<()>;

    /// Finds a department by identifier.
    async fn find_department(
        &self,
        id: DepartmentId,
    ) -> DirectoryRepositoryResult<Option<Department>>;

    /// Finds the department headed by `actor_id`, if any.
    async fn find_department_headed_by(
        &self,
        actor_id: ActorId,
    ) -> DirectoryRepositoryResult<Option<Department>>;
}

/// Errors returned by directory repository implementations.
#[derive(Debug, Clone, Error)]
pub enum DirectoryRepositoryError {
    /// An actor with the same identifier already exists.
    #[error("duplicate actor identifier: {0}")]
    DuplicateActor(ActorId),

    /// The email address is already registered to another actor.
    #[error("duplicate email address: {0}")]
    DuplicateEmail(String),

    /// A department with the same identifier already exists.
    #[error("duplicate department identifier: {0}")]
    DuplicateDepartment(DepartmentId),

    /// The actor already heads another department.
    #[error("actor {0} already heads another department")]
    DuplicateHead(ActorId),

    /// The actor was not found.
    #[error("actor not found: {0}")]
    ActorNotFound(ActorId),

    /// The department was not found.
    #[error("department not found: {0}")]
    DepartmentNotFound(DepartmentId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl DirectoryRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
