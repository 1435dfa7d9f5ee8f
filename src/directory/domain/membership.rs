//! Effective department resolution.
//!
//! An actor relates to departments through two independent optional
//! relations: direct membership (`Actor::department_id`) and headship
//! (`Department::head_id`). Direct membership always wins.

use super::{Actor, Department, DepartmentId};

/// Resolves the department an actor is considered part of.
///
/// `headed` is the department whose head is `actor`, as returned by a lookup
/// against the directory. Returns the direct membership when present, else
/// the headed department, else `None`.
#[must_use]
pub fn resolve_effective_department(
    actor: &Actor,
    headed: Option<&Department>,
) -> Option<DepartmentId> {
    actor
        .department_id()
        .or_else(|| headed.map(Department::id))
}
