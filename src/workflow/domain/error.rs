//! Error types for workflow domain validation and parsing.

use super::WorkItemId;
use thiserror::Error;

/// Errors returned while constructing or reconstructing workflow values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkflowDomainError {
    /// The work item title is empty after trimming.
    #[error("work item title must not be empty")]
    EmptyTitle,

    /// The title exceeds [`super::MAX_TITLE_LENGTH`] characters.
    #[error("work item title must be at most {max} characters")]
    TitleTooLong {
        /// Maximum accepted length in characters.
        max: usize,
    },

    /// The rejection note is empty after trimming.
    #[error("rejection note must not be empty")]
    EmptyRejectionNote,

    /// Persisted completion fields disagree (flag set without timestamp or
    /// vice versa).
    #[error("work item {0} has inconsistent completion fields")]
    InconsistentCompletion(WorkItemId),

    /// Persisted approval fields disagree, or an approved item carries a
    /// rejection note.
    #[error("work item {0} has inconsistent approval fields")]
    InconsistentApproval(WorkItemId),
}

/// Error returned while parsing work item kinds.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown work item kind: {0}")]
pub struct ParseWorkItemKindError(pub String);
