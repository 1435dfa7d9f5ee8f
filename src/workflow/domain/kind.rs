//! Work item kinds sharing the approval/completion lifecycle.

use super::ParseWorkItemKindError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of workflow item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkItemKind {
    /// A unit of work.
    Task,
    /// A project checkpoint.
    Milestone,
}

impl WorkItemKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Milestone => "milestone",
        }
    }
}

impl fmt::Display for WorkItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for WorkItemKind {
    type Error = ParseWorkItemKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "task" => Ok(Self::Task),
            "milestone" => Ok(Self::Milestone),
            _ => Err(ParseWorkItemKindError(value.to_owned())),
        }
    }
}
