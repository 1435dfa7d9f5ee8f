//! Department aggregate root.

use super::{Actor, ActorId, DepartmentId, DirectoryDomainError, profile::ensure_fits};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-empty department name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DepartmentName(String);

impl DepartmentName {
    /// Creates a validated department name.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryDomainError::EmptyDepartmentName`] if the value is
    /// empty after trimming and [`DirectoryDomainError::TooLong`] if it
    /// exceeds [`super::MAX_TEXT_LENGTH`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, DirectoryDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DirectoryDomainError::EmptyDepartmentName);
        }
        ensure_fits(trimmed, "department name")?;
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DepartmentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Organisational unit with at most one head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    id: DepartmentId,
    name: DepartmentName,
    head_id: Option<ActorId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted department.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedDepartmentData {
    /// Persisted department identifier.
    pub id: DepartmentId,
    /// Persisted department name.
    pub name: DepartmentName,
    /// Persisted head, if any.
    pub head_id: Option<ActorId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Department {
    /// Creates a department without a head.
    #[must_use]
    pub fn new(name: DepartmentName, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: DepartmentId::new(),
            name,
            head_id: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a department from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedDepartmentData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            head_id: data.head_id,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the department identifier.
    #[must_use]
    pub const fn id(&self) -> DepartmentId {
        self.id
    }

    /// Returns the department name.
    #[must_use]
    pub const fn name(&self) -> &DepartmentName {
        &self.name
    }

    /// Returns the head of the department, if any.
    #[must_use]
    pub const fn head_id(&self) -> Option<ActorId> {
        self.head_id
    }

    /// Returns `true` when `actor_id` heads this department.
    #[must_use]
    pub fn is_headed_by(&self, actor_id: ActorId) -> bool {
        self.head_id == Some(actor_id)
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

    /// Makes `actor` the head of this department, replacing any previous head.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryDomainError::InactiveHead`] when the actor has been
    /// deactivated.
    pub fn appoint_head(
        &mut self,
        actor: &Actor,
        clock: &impl Clock,
    ) -> Result<(), DirectoryDomainError> {
        if !actor.is_active() {
            return Err(DirectoryDomainError::InactiveHead(actor.id()));
        }
        self.head_id = Some(actor.id());
        self.touch(clock);
        Ok(())
    }

    /// Removes the current head, if any.
    pub fn clear_head(&mut self, clock: &impl Clock) {
        if self.head_id.take().is_some() {
            self.touch(clock);
        }
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
