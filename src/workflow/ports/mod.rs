//! Port contracts for workflow persistence.

pub mod repository;

pub use repository::{WorkItemRepository, WorkItemRepositoryError, WorkItemRepositoryResult};

#[cfg(test)]
pub use repository::MockWorkItemRepository;
