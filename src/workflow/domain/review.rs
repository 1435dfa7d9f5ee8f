//! Completion and review sub-states of a work item.
//!
//! Completion and review move independently. Modelling each as an enum makes
//! the field invariants structural: a completion timestamp exists exactly
//! when the item is completed, approver and approval time exist exactly when
//! the item is approved, and a rejection note can never coexist with an
//! approval.

use super::WorkflowDomainError;
use crate::directory::domain::ActorId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Completion sub-state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Completion {
    /// Work has not been marked complete.
    Open,
    /// Work was marked complete at `at`.
    Completed {
        /// Completion timestamp.
        at: DateTime<Utc>,
    },
}

/// Review sub-state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Review {
    /// Not yet reviewed.
    Unreviewed,
    /// Approved by `by` at `at`.
    Approved {
        /// Approving actor.
        by: ActorId,
        /// Approval timestamp.
        at: DateTime<Utc>,
    },
    /// Rejected with an explanatory note.
    Rejected {
        /// Reviewer's note.
        note: RejectionNote,
    },
}

/// Trimmed, non-empty reason given when rejecting a work item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RejectionNote(String);

impl RejectionNote {
    /// Creates a validated rejection note.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowDomainError::EmptyRejectionNote`] if the value is
    /// empty or whitespace-only.
    pub fn new(value: impl AsRef<str>) -> Result<Self, WorkflowDomainError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(WorkflowDomainError::EmptyRejectionNote);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the note as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RejectionNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Collapsed view of the completion and review sub-states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowState {
    /// Neither completed nor reviewed.
    Pending,
    /// Completed, awaiting review.
    Completed,
    /// Approved, whether or not completed.
    Approved,
    /// Rejected, whether or not completed.
    Rejected,
}

impl WorkflowState {
    /// Collapses the two sub-states. Review outcome takes precedence over
    /// completion.
    #[must_use]
    pub const fn from_parts(completion: &Completion, review: &Review) -> Self {
        match (review, completion) {
            (Review::Approved { .. }, _) => Self::Approved,
            (Review::Rejected { .. }, _) => Self::Rejected,
            (Review::Unreviewed, Completion::Completed { .. }) => Self::Completed,
            (Review::Unreviewed, Completion::Open) => Self::Pending,
        }
    }

    /// Returns the canonical representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
