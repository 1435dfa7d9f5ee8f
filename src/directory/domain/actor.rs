//! Actor aggregate root.

use super::{ActorId, ActorStatus, DepartmentId, Power, Profile, Role};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// An employee who can act on the workboard.
///
/// Headship of a department is stored on the [`super::Department`] side; the
/// actor only records direct membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    id: ActorId,
    profile: Profile,
    role: Role,
    power: Power,
    department_id: Option<DepartmentId>,
    status: ActorStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedActorData {
    /// Persisted actor identifier.
    pub id: ActorId,
    /// Persisted profile fields.
    pub profile: Profile,
    /// Persisted role.
    pub role: Role,
    /// Persisted power level.
    pub power: Power,
    /// Persisted direct department membership, if any.
    pub department_id: Option<DepartmentId>,
    /// Persisted lifecycle status.
    pub status: ActorStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Actor {
    /// Creates a new active actor.
    #[must_use]
    pub fn new(
        profile: Profile,
        role: Role,
        power: Power,
        department_id: Option<DepartmentId>,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: ActorId::new(),
            profile,
            role,
            power,
            department_id,
            status: ActorStatus::Active,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs an actor from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedActorData) -> Self {
        Self {
            id: data.id,
            profile: data.profile,
            role: data.role,
            power: data.power,
            department_id: data.department_id,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the actor identifier.
    #[must_use]
    pub const fn id(&self) -> ActorId {
        self.id
    }

    /// Returns the profile fields.
    #[must_use]
    pub const fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Returns the role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the power level.
    #[must_use]
    pub const fn power(&self) -> Power {
        self.power
    }

    /// Returns the direct department membership, if any.
    #[must_use]
    pub const fn department_id(&self) -> Option<DepartmentId> {
        self.department_id
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> ActorStatus {
        self.status
    }

    /// Returns `true` while the actor has not been deactivated.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.status, ActorStatus::Active)
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

    /// Replaces the editable profile fields.
    pub fn update_profile(&mut self, profile: Profile, clock: &impl Clock) {
        self.profile = profile;
        self.touch(clock);
    }

    /// Soft-deletes the actor.
    ///
    /// Returns `false` when the actor was already deactivated, in which case
    /// nothing changes.
    pub fn deactivate(&mut self, clock: &impl Clock) -> bool {
        if !self.is_active() {
            return false;
        }
        self.status = ActorStatus::Deactivated;
        self.touch(clock);
        true
    }

    /// Drops the membership reference after its department is deleted.
    ///
    /// Mirrors a storage-level `SET NULL`, so the update timestamp is kept.
    pub(crate) const fn detach_department(&mut self) {
        self.department_id = None;
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
