//! Service layer for employee and department administration.
//!
//! Provides [`DirectoryService`], which gates registration, profile edits,
//! soft deletion and department maintenance through the permission table.

use super::membership::{MembershipError, MembershipResolver};
use crate::access::{AccessError, AccessFacts, Operation, RequestContext, ensure_permitted};
use crate::action::{ActionFailure, ErrorKind};
use crate::directory::{
    domain::{
        Actor, ActorId, Department, DepartmentId, DepartmentName, DirectoryDomainError,
        EmailAddress, PersonName, Power, Profile, Role,
    },
    ports::{Directory, DirectoryRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for registering a new employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterEmployeeRequest {
    name: String,
    email: String,
    position: Option<String>,
    role: Role,
    power: Power,
    department_id: Option<DepartmentId>,
}

impl RegisterEmployeeRequest {
    /// Creates a request with required employee fields.
    ///
    /// The employee starts with [`Power::Monitoring`] and no department.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            position: None,
            role,
            power: Power::default(),
            department_id: None,
        }
    }

    /// Sets the job position.
    #[must_use]
    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }

    /// Sets the power level.
    #[must_use]
    pub const fn with_power(mut self, power: Power) -> Self {
        self.power = power;
        self
    }

    /// Sets the direct department membership.
    #[must_use]
    pub const fn in_department(mut self, department_id: DepartmentId) -> Self {
        self.department_id = Some(department_id);
        self
    }
}

/// Request payload for editing an employee's profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditProfileRequest {
    name: String,
    email: String,
    position: Option<String>,
}

impl EditProfileRequest {
    /// Creates a request replacing name and email.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            position: None,
        }
    }

    /// Sets the job position.
    #[must_use]
    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }
}

/// Service-level errors for directory administration.
#[derive(Debug, Error)]
pub enum DirectoryServiceError {
    /// The caller is unauthenticated or not permitted.
    #[error(transparent)]
    Access(#[from] AccessError),
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] DirectoryDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] DirectoryRepositoryError),
    /// The target actor does not exist.
    #[error("actor not found: {0}")]
    ActorNotFound(ActorId),
    /// The target department does not exist.
    #[error("department not found: {0}")]
    DepartmentNotFound(DepartmentId),
}

impl From<MembershipError> for DirectoryServiceError {
    fn from(err: MembershipError) -> Self {
        match err {
            MembershipError::Access(access) => Self::Access(access),
            MembershipError::Repository(repository) => Self::Repository(repository),
        }
    }
}

impl ActionFailure for DirectoryServiceError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Access(err) => err.kind(),
            Self::Domain(_) => ErrorKind::InvalidArgument,
            Self::ActorNotFound(_) | Self::DepartmentNotFound(_) => ErrorKind::NotFound,
            Self::Repository(err) => directory_repository_kind(err),
        }
    }
}

/// Classifies a directory repository error for the result envelope.
pub(crate) const fn directory_repository_kind(err: &DirectoryRepositoryError) -> ErrorKind {
    match err {
        DirectoryRepositoryError::ActorNotFound(_)
        | DirectoryRepositoryError::DepartmentNotFound(_) => ErrorKind::NotFound,
        DirectoryRepositoryError::DuplicateEmail(_) | DirectoryRepositoryError::DuplicateHead(_) => {
            ErrorKind::InvalidArgument
        }
        DirectoryRepositoryError::DuplicateActor(_)
        | DirectoryRepositoryError::DuplicateDepartment(_)
        | DirectoryRepositoryError::Persistence(_) => ErrorKind::InternalError,
    }
}

/// Result type for directory service operations.
pub type DirectoryServiceResult<T> = Result<T, DirectoryServiceError>;

/// Employee and department administration service.
#[derive(Clone)]
pub struct DirectoryService<D, C>
where
    D: Directory,
    C: Clock + Send + Sync,
{
    directory: Arc<D>,
    membership: MembershipResolver<D>,
    clock: Arc<C>,
}

impl<D, C> DirectoryService<D, C>
where
    D: Directory,
    C: Clock + Send + Sync,
{
    /// Creates a new directory service.
    #[must_use]
    pub fn new(directory: Arc<D>, clock: Arc<C>) -> Self {
        let membership = MembershipResolver::new(Arc::clone(&directory));
        Self {
            directory,
            membership,
            clock,
        }
    }

    /// Registers a new active employee.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError`] when the caller is not an admin, the
    /// profile is invalid, the department does not exist, or persistence
    /// fails.
    pub async fn register_employee(
        &self,
        context: &RequestContext,
        request: RegisterEmployeeRequest,
    ) -> DirectoryServiceResult<Actor> {
        let caller = self.membership.authenticate(context).await?;
        ensure_permitted(Operation::ManageDirectory, &AccessFacts::for_actor(&caller))?;

        let RegisterEmployeeRequest {
            name,
            email,
            position,
            role,
            power,
            department_id,
        } = request;
        let profile = Profile::new(PersonName::new(name)?, EmailAddress::new(email)?, position);
        if let Some(id) = department_id {
            self.require_department(id).await?;
        }

        let actor = Actor::new(profile, role, power, department_id, &*self.clock);
        self.directory.store_actor(&actor).await?;
        tracing::info!(
            actor_id = %actor.id(),
            registered_by = %caller.id(),
            role = %actor.role(),
            "employee registered"
        );
        Ok(actor)
    }

    /// Creates a department without a head.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError`] when the caller is not an admin, the
    /// name is blank, or persistence fails.
    pub async fn create_department(
        &self,
        context: &RequestContext,
        name: &str,
    ) -> DirectoryServiceResult<Department> {
        let caller = self.membership.authenticate(context).await?;
        ensure_permitted(Operation::ManageDirectory, &AccessFacts::for_actor(&caller))?;

        let department = Department::new(DepartmentName::new(name)?, &*self.clock);
        self.directory.store_department(&department).await?;
        tracing::info!(
            department_id = %department.id(),
            created_by = %caller.id(),
            "department created"
        );
        Ok(department)
    }

    /// Makes `actor_id` the head of `department_id`.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError`] when the caller is not an admin,
    /// either entity is missing, the actor is deactivated, or the actor
    /// already heads another department.
    pub async fn appoint_head(
        &self,
        context: &RequestContext,
        department_id: DepartmentId,
        actor_id: ActorId,
    ) -> DirectoryServiceResult<Department> {
        let caller = self.membership.authenticate(context).await?;
        ensure_permitted(Operation::ManageDirectory, &AccessFacts::for_actor(&caller))?;

        let mut department = self.require_department(department_id).await?;
        let head = self.require_actor(actor_id).await?;
        department.appoint_head(&head, &*self.clock)?;
        self.directory.update_department(&department).await?;
        tracing::info!(
            %department_id,
            head_id = %actor_id,
            appointed_by = %caller.id(),
            "department head appointed"
        );
        Ok(department)
    }

    /// Deletes an empty department.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError::DepartmentNotFound`] when the
    /// department does not exist, [`AccessError::Forbidden`] unless the caller
    /// is an admin and the department has no active employees, or a repository
    /// error when persistence fails.
    pub async fn delete_department(
        &self,
        context: &RequestContext,
        department_id: DepartmentId,
    ) -> DirectoryServiceResult<Department> {
        let caller = self.membership.authenticate(context).await?;
        let department = self.require_department(department_id).await?;
        let employee_count = self.directory.count_active_members(department_id).await?;

        let facts = AccessFacts::for_actor(&caller).employee_count(employee_count);
        ensure_permitted(Operation::DeleteDepartment, &facts)?;

        self.directory.delete_department(department_id).await?;
        tracing::info!(%department_id, deleted_by = %caller.id(), "department deleted");
        Ok(department)
    }

    /// Soft-deletes an employee and clears any headship they held.
    ///
    /// The headship is released before the employee is written, so repeating
    /// the call after a failed write finishes the job. Deactivating an already
    /// deactivated employee who heads nothing changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError::ActorNotFound`] when the employee does
    /// not exist, [`AccessError::Forbidden`] unless the caller is an admin, or
    /// a repository error when persistence fails.
    pub async fn deactivate_employee(
        &self,
        context: &RequestContext,
        actor_id: ActorId,
    ) -> DirectoryServiceResult<Actor> {
        let caller = self.membership.authenticate(context).await?;
        let mut target = self.require_actor(actor_id).await?;
        ensure_permitted(
            Operation::DeactivateEmployee,
            &AccessFacts::for_actor(&caller),
        )?;

        if let Some(mut headed) = self.directory.find_department_headed_by(actor_id).await? {
            headed.clear_head(&*self.clock);
            self.directory.update_department(&headed).await?;
            tracing::info!(%actor_id, department_id = %headed.id(), "headship cleared");
        }

        if !target.deactivate(&*self.clock) {
            tracing::debug!(%actor_id, "employee already deactivated");
            return Ok(target);
        }
        self.directory.update_actor(&target).await?;

        tracing::info!(%actor_id, deactivated_by = %caller.id(), "employee deactivated");
        Ok(target)
    }

    /// Replaces an employee's profile fields.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError::ActorNotFound`] when the employee does
    /// not exist, [`AccessError::Forbidden`] unless the caller edits their own
    /// profile or is an admin, a domain error for invalid fields, or a
    /// repository error when persistence fails.
    pub async fn edit_profile(
        &self,
        context: &RequestContext,
        actor_id: ActorId,
        request: EditProfileRequest,
    ) -> DirectoryServiceResult<Actor> {
        let caller = self.membership.authenticate(context).await?;
        let mut target = self.require_actor(actor_id).await?;
        let facts = AccessFacts::for_actor(&caller).own_record(caller.id() == target.id());
        ensure_permitted(Operation::EditProfile, &facts)?;

        let EditProfileRequest {
            name,
            email,
            position,
        } = request;
        let profile = Profile::new(PersonName::new(name)?, EmailAddress::new(email)?, position);
        target.update_profile(profile, &*self.clock);
        self.directory.update_actor(&target).await?;
        Ok(target)
    }

    /// Finds an employee by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError::ActorNotFound`] when the employee does
    /// not exist.
    pub async fn find_employee(
        &self,
        context: &RequestContext,
        actor_id: ActorId,
    ) -> DirectoryServiceResult<Actor> {
        self.membership.authenticate(context).await?;
        self.require_actor(actor_id).await
    }

    /// Returns the caller's effective department.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError`] when the caller is unauthenticated or
    /// the lookup fails.
    pub async fn effective_department(
        &self,
        context: &RequestContext,
    ) -> DirectoryServiceResult<Option<DepartmentId>> {
        let caller = self.membership.authenticate(context).await?;
        Ok(self.membership.effective_department(&caller).await?)
    }

    /// Lists active members of the caller's effective department.
    ///
    /// Returns an empty list when the caller has no effective department.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError`] when the caller is unauthenticated or
    /// the lookup fails.
    pub async fn list_department_members(
        &self,
        context: &RequestContext,
    ) -> DirectoryServiceResult<Vec<Actor>> {
        let Some(department_id) = self.effective_department(context).await? else {
            return Ok(Vec::new());
        };
        Ok(self.directory.list_active_members(department_id).await?)
    }

    async fn require_actor(&self, actor_id: ActorId) -> DirectoryServiceResult<Actor> {
        self.directory
            .find_actor(actor_id)
            .await?
            .ok_or(DirectoryServiceError::ActorNotFound(actor_id))
    }

    async fn require_department(
        &self,
        department_id: DepartmentId,
    ) -> DirectoryServiceResult<Department> {
        self.directory
            .find_department(department_id)
            .await?
            .ok_or(DirectoryServiceError::DepartmentNotFound(department_id))
    }
}
