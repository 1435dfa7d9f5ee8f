//! Work item aggregate root shared by tasks and milestones.

use super::{
    Completion, RejectionNote, Review, WorkItemId, WorkItemKind, WorkflowDomainError,
    WorkflowState,
};
use crate::directory::domain::{ActorId, DepartmentId};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum title length in characters, matching the stored column width.
pub const MAX_TITLE_LENGTH: usize = 255;

/// Trimmed, non-empty work item title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkItemTitle(String);

impl WorkItemTitle {
    /// Creates a validated title.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowDomainError::EmptyTitle`] if the value is empty
    /// after trimming, or [`WorkflowDomainError::TitleTooLong`] if it exceeds
    /// [`MAX_TITLE_LENGTH`] characters.
    pub fn new(value: impl AsRef<str>) -> Result<Self, WorkflowDomainError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(WorkflowDomainError::EmptyTitle);
        }
        if trimmed.chars().count() > MAX_TITLE_LENGTH {
            return Err(WorkflowDomainError::TitleTooLong {
                max: MAX_TITLE_LENGTH,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkItemTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parameter object for creating a work item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWorkItem {
    /// Task or milestone.
    pub kind: WorkItemKind,
    /// Validated title.
    pub title: WorkItemTitle,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Creating actor. Fixed for the item's lifetime.
    pub created_by: ActorId,
    /// Responsible actor, if any.
    pub assignee: Option<ActorId>,
    /// Department scoping the item, if any.
    pub department_id: Option<DepartmentId>,
}

/// A task or milestone moving through completion and review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    id: WorkItemId,
    kind: WorkItemKind,
    title: WorkItemTitle,
    description: Option<String>,
    due_date: Option<NaiveDate>,
    created_by: ActorId,
    assignee: Option<ActorId>,
    department_id: Option<DepartmentId>,
    completion: Completion,
    review: Review,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted work item.
///
/// Completion and review are stored as flat columns; [`WorkItem::from_persisted`]
/// checks that they agree before building the aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedWorkItemData {
    /// Persisted identifier.
    pub id: WorkItemId,
    /// Persisted kind.
    pub kind: WorkItemKind,
    /// Persisted title.
    pub title: WorkItemTitle,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted due date.
    pub due_date: Option<NaiveDate>,
    /// Persisted creator.
    pub created_by: ActorId,
    /// Persisted assignee.
    pub assignee: Option<ActorId>,
    /// Persisted department scope.
    pub department_id: Option<DepartmentId>,
    /// Persisted completion flag.
    pub is_completed: bool,
    /// Persisted completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Persisted approval flag.
    pub is_approved: bool,
    /// Persisted approver.
    pub approved_by: Option<ActorId>,
    /// Persisted approval timestamp.
    pub approved_at: Option<DateTime<Utc>>,
    /// Persisted rejection note.
    pub rejection_note: Option<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl WorkItem {
    /// Creates a new pending work item.
    #[must_use]
    pub fn new(data: NewWorkItem, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: WorkItemId::new(),
            kind: data.kind,
            title: data.title,
            description: data.description,
            due_date: data.due_date,
            created_by: data.created_by,
            assignee: data.assignee,
            department_id: data.department_id,
            completion: Completion::Open,
            review: Review::Unreviewed,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a work item from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowDomainError::InconsistentCompletion`] when the
    /// completion flag and timestamp disagree, and
    /// [`WorkflowDomainError::InconsistentApproval`] when the approval flag,
    /// approver, approval timestamp and rejection note disagree.
    pub fn from_persisted(data: PersistedWorkItemData) -> Result<Self, WorkflowDomainError> {
        let completion = match (data.is_completed, data.completed_at) {
            (true, Some(at)) => Completion::Completed { at },
            (false, None) => Completion::Open,
            _ => return Err(WorkflowDomainError::InconsistentCompletion(data.id)),
        };
        let review = match (
            data.is_approved,
            data.approved_by,
            data.approved_at,
            data.rejection_note,
        ) {
            (true, Some(by), Some(at), None) => Review::Approved { by, at },
            (false, None, None, None) => Review::Unreviewed,
            (false, None, None, Some(note)) => Review::Rejected {
                note: RejectionNote::new(note)?,
            },
            _ => return Err(WorkflowDomainError::InconsistentApproval(data.id)),
        };

        Ok(Self {
            id: data.id,
            kind: data.kind,
            title: data.title,
            description: data.description,
            due_date: data.due_date,
            created_by: data.created_by,
            assignee: data.assignee,
            department_id: data.department_id,
            completion,
            review,
            created_at: data.created_at,
            updated_at: data.updated_at,
        })
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn id(&self) -> WorkItemId {
        self.id
    }

    /// Returns whether this is a task or a milestone.
    #[must_use]
    pub const fn kind(&self) -> WorkItemKind {
        self.kind
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &WorkItemTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the creating actor.
    #[must_use]
    pub const fn created_by(&self) -> ActorId {
        self.created_by
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<ActorId> {
        self.assignee
    }

    /// Returns the scoping department, if any.
    #[must_use]
    pub const fn department_id(&self) -> Option<DepartmentId> {
        self.department_id
    }

    /// Returns the completion sub-state.
    #[must_use]
    pub const fn completion(&self) -> &Completion {
        &self.completion
    }

    /// Returns the review sub-state.
    #[must_use]
    pub const fn review(&self) -> &Review {
        &self.review
    }

    /// Returns the collapsed workflow state.
    #[must_use]
    pub const fn state(&self) -> WorkflowState {
        WorkflowState::from_parts(&self.completion, &self.review)
    }

    /// Returns `true` once the item has been completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self.completion, Completion::Completed { .. })
    }

    /// Returns the completion timestamp, if completed.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        match self.completion {
            Completion::Completed { at } => Some(at),
            Completion::Open => None,
        }
    }

    /// Returns `true` while the item is approved.
    #[must_use]
    pub const fn is_approved(&self) -> bool {
        matches!(self.review, Review::Approved { .. })
    }

    /// Returns the approving actor, if approved.
    #[must_use]
    pub const fn approved_by(&self) -> Option<ActorId> {
        match self.review {
            Review::Approved { by, .. } => Some(by),
            Review::Unreviewed | Review::Rejected { .. } => None,
        }
    }

    /// Returns the approval timestamp, if approved.
    #[must_use]
    pub const fn approved_at(&self) -> Option<DateTime<Utc>> {
        match self.review {
            Review::Approved { at, .. } => Some(at),
            Review::Unreviewed | Review::Rejected { .. } => None,
        }
    }

    /// Returns the rejection note, if rejected.
    #[must_use]
    pub const fn rejection_note(&self) -> Option<&RejectionNote> {
        match &self.review {
            Review::Rejected { note } => Some(note),
            Review::Unreviewed | Review::Approved { .. } => None,
        }
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Marks the item complete.
    ///
    /// Returns `false` without changing anything when the item is already
    /// completed; the original completion time is kept.
    pub fn complete(&mut self, clock: &impl Clock) -> bool {
        if self.is_completed() {
            return false;
        }
        let timestamp = clock.utc();
        self.completion = Completion::Completed { at: timestamp };
        self.updated_at = timestamp;
        true
    }

    /// Approves the item on behalf of `approver`.
    ///
    /// Clears any rejection note and leaves completion untouched. Approving
    /// an approved item records the new approver and time.
    pub fn approve(&mut self, approver: ActorId, clock: &impl Clock) {
        let timestamp = clock.utc();
        self.review = Review::Approved {
            by: approver,
            at: timestamp,
        };
        self.updated_at = timestamp;
    }

    /// Rejects the item with `note`.
    ///
    /// Clears approver and approval time. Completion is left untouched for
    /// both kinds.
    pub fn reject(&mut self, note: RejectionNote, clock: &impl Clock) {
        self.review = Review::Rejected { note };
        self.touch(clock);
    }

    /// Replaces the assignee; `None` leaves the item unassigned.
    pub fn reassign(&mut self, assignee: Option<ActorId>, clock: &impl Clock) {
        self.assignee = assignee;
        self.touch(clock);
    }

    /// Drops the department reference once that department no longer
    /// exists. The update timestamp is kept.
    pub(crate) const fn detach_department(&mut self) {
        self.department_id = None;
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
