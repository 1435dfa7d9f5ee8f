//! Diesel row models for workflow persistence.

use super::schema::work_items;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query result row for work item records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = work_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct WorkItemRow {
    /// Internal work item identifier.
    pub id: uuid::Uuid,
    /// Kind storage value.
    pub kind: String,
    /// Title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Creating actor.
    pub created_by: uuid::Uuid,
    /// Optional assignee.
    pub assignee_id: Option<uuid::Uuid>,
    /// Optional scoping department.
    pub department_id: Option<uuid::Uuid>,
    /// Completion flag.
    pub is_completed: bool,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Approval flag.
    pub is_approved: bool,
    /// Approving actor.
    pub approved_by: Option<uuid::Uuid>,
    /// Approval timestamp.
    pub approved_at: Option<DateTime<Utc>>,
    /// Rejection note.
    pub rejection_note: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert and update model for work item records.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = work_items)]
#[diesel(treat_none_as_null = true)]
pub struct NewWorkItemRow {
    /// Internal work item identifier.
    pub id: uuid::Uuid,
    /// Kind storage value.
    pub kind: String,
    /// Title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Creating actor.
    pub created_by: uuid::Uuid,
    /// Optional assignee.
    pub assignee_id: Option<uuid::Uuid>,
    /// Optional scoping department.
    pub department_id: Option<uuid::Uuid>,
    /// Completion flag.
    pub is_completed: bool,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Approval flag.
    pub is_approved: bool,
    /// Approving actor.
    pub approved_by: Option<uuid::Uuid>,
    /// Approval timestamp.
    pub approved_at: Option<DateTime<Utc>>,
    /// Rejection note.
    pub rejection_note: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
