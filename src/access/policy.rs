//! The permission table.
//!
//! Every mutating operation is gated by a pure boolean combination of a
//! fixed vocabulary of facts about the caller and the target entity. Call
//! sites gather [`AccessFacts`] and ask [`permits`]; they never compare roles
//! themselves.

use super::AccessError;
use crate::directory::domain::{Actor, ActorId, Power, Role};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operations gated by the permission table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Create a task or milestone.
    CreateWorkItem,
    /// Mark a task or milestone as completed.
    CompleteWorkItem,
    /// Approve a task or milestone.
    ApproveWorkItem,
    /// Reject a task or milestone with a note.
    RejectWorkItem,
    /// Change the assignee of a task or milestone.
    ReassignWorkItem,
    /// Register employees, create departments and appoint heads.
    ManageDirectory,
    /// Delete a department.
    DeleteDepartment,
    /// Soft-delete an employee.
    DeactivateEmployee,
    /// Edit an employee's profile.
    EditProfile,
}

impl Operation {
    /// Returns a short human-readable description.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreateWorkItem => "create work items",
            Self::CompleteWorkItem => "complete this work item",
            Self::ApproveWorkItem => "approve this work item",
            Self::RejectWorkItem => "reject this work item",
            Self::ReassignWorkItem => "reassign this work item",
            Self::ManageDirectory => "manage the directory",
            Self::DeleteDepartment => "delete this department",
            Self::DeactivateEmployee => "deactivate employees",
            Self::EditProfile => "edit this profile",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Facts about the caller relative to the target entity.
///
/// Facts default to `false` and the employee count to unknown; call sites
/// set only the facts their operation consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessFacts {
    actor_id: ActorId,
    role: Role,
    power: Power,
    is_creator: bool,
    is_assignee: bool,
    is_department_head: bool,
    is_self: bool,
    department_employee_count: Option<u64>,
}

impl AccessFacts {
    /// Starts a fact set for `actor`.
    #[must_use]
    pub const fn for_actor(actor: &Actor) -> Self {
        Self {
            actor_id: actor.id(),
            role: actor.role(),
            power: actor.power(),
            is_creator: false,
            is_assignee: false,
            is_department_head: false,
            is_self: false,
            department_employee_count: None,
        }
    }

    /// Records whether the caller created the target item.
    #[must_use]
    pub const fn creator(mut self, value: bool) -> Self {
        self.is_creator = value;
        self
    }

    /// Records whether the caller is the target item's assignee.
    #[must_use]
    pub const fn assignee(mut self, value: bool) -> Self {
        self.is_assignee = value;
        self
    }

    /// Records whether the caller heads the target's department.
    #[must_use]
    pub const fn department_head(mut self, value: bool) -> Self {
        self.is_department_head = value;
        self
    }

    /// Records whether the target is the caller's own record.
    #[must_use]
    pub const fn own_record(mut self, value: bool) -> Self {
        self.is_self = value;
        self
    }

    /// Records the number of active employees in the target department.
    #[must_use]
    pub const fn employee_count(mut self, count: u64) -> Self {
        self.department_employee_count = Some(count);
        self
    }

    /// Returns the caller.
    #[must_use]
    pub const fn actor_id(&self) -> ActorId {
        self.actor_id
    }

    /// Returns `true` when the caller is an admin.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Returns `true` when the caller has full power.
    #[must_use]
    pub const fn has_full_power(&self) -> bool {
        matches!(self.power, Power::Full)
    }
}

/// Evaluates the permission table.
#[must_use]
pub const fn permits(operation: Operation, facts: &AccessFacts) -> bool {
    let is_admin = facts.is_admin();
    match operation {
        Operation::CreateWorkItem => is_admin || matches!(facts.role, Role::DepartmentHead),
        Operation::CompleteWorkItem => {
            facts.is_assignee || facts.is_creator || facts.is_department_head || is_admin
        }
        Operation::ApproveWorkItem | Operation::RejectWorkItem => is_admin || facts.is_creator,
        Operation::ReassignWorkItem => is_admin || (facts.is_creator && facts.has_full_power()),
        Operation::DeleteDepartment => {
            is_admin && matches!(facts.department_employee_count, Some(0))
        }
        Operation::ManageDirectory | Operation::DeactivateEmployee => is_admin,
        Operation::EditProfile => facts.is_self || is_admin,
    }
}

/// Evaluates the permission table, turning a denial into an error.
///
/// # Errors
///
/// Returns [`AccessError::Forbidden`] when [`permits`] denies the operation.
pub const fn ensure_permitted(
    operation: Operation,
    facts: &AccessFacts,
) -> Result<(), AccessError> {
    if permits(operation, facts) {
        Ok(())
    } else {
        Err(AccessError::Forbidden {
            actor_id: facts.actor_id,
            operation,
        })
    }
}
