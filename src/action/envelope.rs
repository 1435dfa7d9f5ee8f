//! Uniform result envelope returned by every action.

use super::{ActionFailure, ErrorKind};
use serde::{Deserialize, Serialize};

/// Either `{ "success": true, "data": ... }` or
/// `{ "error": "<kind>", "status": <code> }`.
///
/// Callers must branch on the variant before reading `data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionResponse<T> {
    /// The action succeeded.
    Success {
        /// Always `true`.
        success: bool,
        /// The action's payload.
        data: T,
    },
    /// The action failed.
    Failure {
        /// Failure discriminant.
        error: ErrorKind,
        /// HTTP status code for `error`.
        status: u16,
    },
}

impl<T> ActionResponse<T> {
    /// Wraps a successful payload.
    #[must_use]
    pub const fn success(data: T) -> Self {
        Self::Success {
            success: true,
            data,
        }
    }

    /// Builds a failure envelope for `kind`.
    #[must_use]
    pub const fn failure(kind: ErrorKind) -> Self {
        Self::Failure {
            error: kind,
            status: kind.status(),
        }
    }

    /// Returns `true` for [`ActionResponse::Success`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Returns the payload of a successful action.
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Success { data, .. } => Some(data),
            Self::Failure { .. } => None,
        }
    }

    /// Returns the failure kind, if any.
    #[must_use]
    pub const fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error, .. } => Some(*error),
        }
    }

    /// Returns the HTTP status code of the envelope.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::Success { .. } => 200,
            Self::Failure { status, .. } => *status,
        }
    }

    /// Converts the envelope into a `Result`.
    ///
    /// # Errors
    ///
    /// Returns the failure kind for [`ActionResponse::Failure`].
    pub fn into_result(self) -> Result<T, ErrorKind> {
        match self {
            Self::Success { data, .. } => Ok(data),
            Self::Failure { error, .. } => Err(error),
        }
    }
}

/// Converts a service result into an envelope at the operation boundary.
///
/// Internal failures are logged with their cause at `error` level and
/// reported only as [`ErrorKind::InternalError`]; expected refusals are logged
/// at `debug` level.
pub fn respond<T, E>(operation: &'static str, result: Result<T, E>) -> ActionResponse<T>
where
    E: ActionFailure,
{
    match result {
        Ok(data) => ActionResponse::success(data),
        Err(err) => {
            let kind = err.kind();
            if kind == ErrorKind::InternalError {
                tracing::error!(operation, error = %err, "action failed");
            } else {
                tracing::debug!(operation, kind = kind.as_str(), error = %err, "action refused");
            }
            ActionResponse::failure(kind)
        }
    }
}
