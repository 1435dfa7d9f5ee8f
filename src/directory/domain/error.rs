//! Error types for directory domain validation and parsing.

use super::ActorId;
use thiserror::Error;

/// Errors returned while constructing directory domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryDomainError {
    /// The person name is empty after trimming.
    #[error("employee name must not be empty")]
    EmptyPersonName,

    /// The email address is not of the form `local@domain`.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// A text value exceeds the stored column width.
    #[error("{field} must be at most {max} characters")]
    TooLong {
        /// Name of the offending field.
        field: &'static str,
        /// Maximum accepted length in characters.
        max: usize,
    },

    /// The department name is empty after trimming.
    #[error("department name must not be empty")]
    EmptyDepartmentName,

    /// The actor cannot head a department while deactivated.
    #[error("actor {0} is deactivated and cannot head a department")]
    InactiveHead(ActorId),
}

/// Error returned while parsing roles from persistence or requests.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);

/// Error returned while parsing actor power levels.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown power level: {0}")]
pub struct ParsePowerError(pub String);

/// Error returned while parsing actor lifecycle status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown actor status: {0}")]
pub struct ParseActorStatusError(pub String);
