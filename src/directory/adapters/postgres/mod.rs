//! `PostgreSQL` adapters for directory persistence.

mod models;
mod repository;
mod schema;

pub use repository::PostgresDirectory;
