//! Structured logging initialisation.

use crate::config::LoggingConfig;
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

/// Errors raised while installing the global subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The configured filter directive could not be parsed.
    #[error("invalid log filter: {0}")]
    InvalidFilter(#[from] ParseError),

    /// A global subscriber is already installed.
    #[error("failed to install tracing subscriber: {0}")]
    Install(String),
}

/// Builds the filter for the configured directive.
///
/// `RUST_LOG`, when set and valid, takes precedence over the configuration.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidFilter`] when the configured directive is
/// malformed.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    Ok(EnvFilter::try_new(config.filter.trim())?)
}

/// Installs a `tracing` fmt subscriber for the process.
///
/// # Errors
///
/// Returns [`TelemetryError`] when the filter is invalid or a subscriber has
/// already been installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let filter = build_filter(config)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|err| TelemetryError::Install(err.to_string()))
}
