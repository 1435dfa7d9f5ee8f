//! Closed role and power vocabularies used by the permission table.

use super::{ParsePowerError, ParseRoleError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Organisational role of an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full administrative access across all departments.
    Admin,
    /// Head of a department; may create and review workflow items.
    DepartmentHead,
    /// Leads a group inside a department.
    GroupLeader,
    /// Rank-and-file member.
    Member,
}

impl Role {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::DepartmentHead => "department_head",
            Self::GroupLeader => "group_leader",
            Self::Member => "member",
        }
    }

    /// Returns `true` for [`Role::Admin`].
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "admin" => Ok(Self::Admin),
            "department_head" => Ok(Self::DepartmentHead),
            "group_leader" => Ok(Self::GroupLeader),
            "member" => Ok(Self::Member),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}

/// Breadth of an actor's write access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Power {
    /// Read-mostly access.
    #[default]
    Monitoring,
    /// Full write access within the actor's role.
    Full,
}

impl Power {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monitoring => "monitoring",
            Self::Full => "full",
        }
    }
}

impl fmt::Display for Power {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Power {
    type Error = ParsePowerError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "monitoring" => Ok(Self::Monitoring),
            "full" => Ok(Self::Full),
            _ => Err(ParsePowerError(value.to_owned())),
        }
    }
}
