//! Application services for the task and milestone lifecycle.

mod lifecycle;

pub use lifecycle::{
    CreateWorkItemRequest, WorkflowService, WorkflowServiceError, WorkflowServiceResult,
};
