//! Error taxonomy exposed to the presentation layer.

use crate::access::AccessError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminant of a failed action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// No session.
    Unauthorized,
    /// Authenticated, but the permission table denies the operation.
    Forbidden,
    /// The target entity does not exist.
    NotFound,
    /// The request content is invalid.
    InvalidArgument,
    /// Unexpected storage or runtime failure.
    InternalError,
}

impl ErrorKind {
    /// Returns the HTTP status code associated with the kind.
    #[must_use]
    pub const fn status(self) -> u16 {
        match self {
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::InvalidArgument => 400,
            Self::InternalError => 500,
        }
    }

    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::InvalidArgument => "invalid_argument",
            Self::InternalError => "internal_error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service errors that can be reported through the result envelope.
pub trait ActionFailure: std::error::Error {
    /// Classifies the error.
    fn kind(&self) -> ErrorKind;
}

impl ActionFailure for AccessError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized => ErrorKind::Unauthorized,
            Self::Forbidden { .. } => ErrorKind::Forbidden,
        }
    }
}
