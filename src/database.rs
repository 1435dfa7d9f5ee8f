//! `PostgreSQL` connection pool construction.

use crate::config::{ConfigError, DatabaseConfig};
use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use thiserror::Error;

/// `PostgreSQL` connection pool shared by the `PostgreSQL` adapters.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Errors raised while building the connection pool.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The database section of the configuration is incomplete.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The pool could not establish its initial connections.
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] PoolError),
}

/// Builds a connection pool from configuration.
///
/// # Errors
///
/// Returns [`DatabaseError::Config`] when no URL is configured and
/// [`DatabaseError::Pool`] when connections cannot be established.
pub fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
    let url = config.require_url()?;
    let manager = ConnectionManager::<PgConnection>::new(url);
    let pool = Pool::builder()
        .max_size(config.max_connections)
        .build(manager)?;
    tracing::info!(
        max_connections = config.max_connections,
        "database pool ready"
    );
    Ok(pool)
}
