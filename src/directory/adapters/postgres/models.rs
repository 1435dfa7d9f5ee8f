//! Diesel row models for directory persistence.

use super::schema::{actors, departments};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for actor records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = actors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ActorRow {
    /// Internal actor identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Optional job position.
    pub position: Option<String>,
    /// Role storage value.
    pub role: String,
    /// Power storage value.
    pub power: String,
    /// Optional direct department membership.
    pub department_id: Option<uuid::Uuid>,
    /// Lifecycle status storage value.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for actor records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = actors)]
pub struct NewActorRow {
    /// Internal actor identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Optional job position.
    pub position: Option<String>,
    /// Role storage value.
    pub role: String,
    /// Power storage value.
    pub power: String,
    /// Optional direct department membership.
    pub department_id: Option<uuid::Uuid>,
    /// Lifecycle status storage value.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for department records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = departments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DepartmentRow {
    /// Internal department identifier.
    pub id: uuid::Uuid,
    /// Department name.
    pub name: String,
    /// Optional head.
    pub head_id: Option<uuid::Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for department records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = departments)]
pub struct NewDepartmentRow {
    /// Internal department identifier.
    pub id: uuid::Uuid,
    /// Department name.
    pub name: String,
    /// Optional head.
    pub head_id: Option<uuid::Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
