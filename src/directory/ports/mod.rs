//! Port contracts for the directory.
//!
//! Ports define infrastructure-agnostic interfaces used by directory and
//! workflow services.

pub mod repository;

pub use repository::{
    ActorRepository, DepartmentRepository, DirectoryRepositoryError, DirectoryRepositoryResult,
};

/// Combined directory persistence used by services that need both actors and
/// departments.
pub trait Directory: ActorRepository + DepartmentRepository {}

impl<T> Directory for T where T: ActorRepository + DepartmentRepository {}
