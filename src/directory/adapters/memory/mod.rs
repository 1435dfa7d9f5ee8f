//! In-memory adapters for the directory.

mod directory;

pub use directory::InMemoryDirectory;
