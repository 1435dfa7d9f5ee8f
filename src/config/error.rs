//! Configuration error types.

use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge failed.
    #[error("configuration error: {0}")]
    Figment(Box<figment::Error>),

    /// A required configuration value is missing.
    #[error("configuration value '{field}' is not set")]
    NotConfigured {
        /// Dotted path of the missing field.
        field: &'static str,
    },

    /// A configuration field has an invalid value.
    #[error("invalid configuration value for '{field}': {reason}")]
    InvalidValue {
        /// Dotted path of the invalid field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}
