//! Actor lifecycle status.

use super::ParseActorStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of an actor record.
///
/// Employees are never hard-deleted; removal moves them to
/// [`ActorStatus::Deactivated`] and every listing filters on
/// [`ActorStatus::Active`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorStatus {
    /// The actor can sign in and appears in listings.
    Active,
    /// The actor has been soft-deleted.
    Deactivated,
}

impl ActorStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Deactivated => "deactivated",
        }
    }
}

impl fmt::Display for ActorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ActorStatus {
    type Error = ParseActorStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "active" => Ok(Self::Active),
            "deactivated" => Ok(Self::Deactivated),
            _ => Err(ParseActorStatusError(value.to_owned())),
        }
    }
}
