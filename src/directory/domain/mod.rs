//! Domain model for the employee and department directory.
//!
//! Actors carry a closed [`Role`] and [`Power`], an optional direct
//! department membership and an explicit [`ActorStatus`] lifecycle.
//! Departments own the headship relation.

mod actor;
mod department;
mod error;
mod ids;
mod membership;
mod profile;
mod role;
mod status;

pub use actor::{Actor, PersistedActorData};
pub use department::{Department, DepartmentName, PersistedDepartmentData};
pub use error::{DirectoryDomainError, ParseActorStatusError, ParsePowerError, ParseRoleError};
pub use ids::{ActorId, DepartmentId};
pub use membership::resolve_effective_department;
pub use profile::{EmailAddress, MAX_TEXT_LENGTH, PersonName, Profile};
pub use role::{Power, Role};
pub use status::ActorStatus;
