//! Repository port for work item persistence.

use crate::directory::domain::{ActorId, DepartmentId};
use crate::workflow::domain::{WorkItem, WorkItemId, WorkItemKind};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for work item repository operations.
pub type WorkItemRepositoryResult<T> = Result<T, WorkItemRepositoryError>;

/// Work item persistence contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkItemRepository: Send + Sync {
    /// Stores a new work item.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemRepositoryError::DuplicateItem`] when the ID already
    /// exists.
    async fn store(&self, item: &WorkItem) -> WorkItemRepositoryResult<()>;

    /// Persists changes to an existing work item.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemRepositoryError::NotFound`] when the item does not
    /// exist.
    async fn update(&self, item: &WorkItem) -> WorkItemRepositoryResult<()>;

    /// Finds a work item by identifier.
    async fn find_by_id(&self, id: WorkItemId) -> WorkItemRepositoryResult<Option<WorkItem>>;

    /// Lists items scoped to `department_id`, oldest first, optionally
    /// restricted to one kind.
    async fn list_by_department(
        &self,
        department_id: DepartmentId,
        kind: Option<WorkItemKind>,
    ) -> WorkItemRepositoryResult<Vec<WorkItem>>;

    /// Lists items assigned to `assignee`, oldest first.
    async fn list_by_assignee(
        &self,
        assignee: ActorId,
    ) -> WorkItemRepositoryResult<Vec<WorkItem>>;
}

/// Errors returned by work item repository implementations.
#[derive(Debug, Clone, Error)]
pub enum WorkItemRepositoryError {
    /// A work item with the same identifier already exists.
    #[error("duplicate work item identifier: {0}")]
    DuplicateItem(WorkItemId),

    /// The work item was not found.
    #[error("work item not found: {0}")]
    NotFound(WorkItemId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl WorkItemRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
