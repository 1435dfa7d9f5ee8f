//! Domain model for tasks and milestones.
//!
//! Both kinds share a single [`WorkItem`] aggregate whose completion and
//! review sub-states move independently. See [`WorkflowState`] for the
//! collapsed view.

mod error;
mod ids;
mod item;
mod kind;
mod review;

pub use error::{ParseWorkItemKindError, WorkflowDomainError};
pub use ids::WorkItemId;
pub use item::{MAX_TITLE_LENGTH, NewWorkItem, PersistedWorkItemData, WorkItem, WorkItemTitle};
pub use kind::WorkItemKind;
pub use review::{Completion, RejectionNote, Review, WorkflowState};
