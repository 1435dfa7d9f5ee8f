//! Service layer for the task and milestone lifecycle.
//!
//! Every operation resolves the caller from the request context, loads the
//! target, gathers [`AccessFacts`] and consults the permission table before
//! writing.

use crate::access::{AccessError, AccessFacts, Operation, RequestContext, ensure_permitted};
use crate::action::{ActionFailure, ErrorKind};
use crate::directory::{
    domain::{Actor, ActorId, DepartmentId},
    ports::{Directory, DirectoryRepositoryError},
    services::{MembershipError, MembershipResolver, directory_repository_kind},
};
use crate::workflow::{
    domain::{
        NewWorkItem, RejectionNote, WorkItem, WorkItemId, WorkItemKind, WorkItemTitle,
        WorkflowDomainError,
    },
    ports::{WorkItemRepository, WorkItemRepositoryError},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task or milestone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateWorkItemRequest {
    kind: WorkItemKind,
    title: String,
    description: Option<String>,
    due_date: Option<NaiveDate>,
    assignee: Option<ActorId>,
    department_id: Option<DepartmentId>,
}

impl CreateWorkItemRequest {
    /// Creates a request with the required fields.
    ///
    /// Without [`Self::in_department`] the item is scoped to the creator's
    /// effective department.
    #[must_use]
    pub fn new(kind: WorkItemKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            description: None,
            due_date: None,
            assignee: None,
            department_id: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee: ActorId) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Scopes the item to an explicit department.
    #[must_use]
    pub const fn in_department(mut self, department_id: DepartmentId) -> Self {
        self.department_id = Some(department_id);
        self
    }
}

/// Service-level errors for workflow operations.
#[derive(Debug, Error)]
pub enum WorkflowServiceError {
    /// The caller is unauthenticated or not permitted.
    #[error(transparent)]
    Access(#[from] AccessError),
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] WorkflowDomainError),
    /// Work item persistence failed.
    #[error(transparent)]
    Repository(#[from] WorkItemRepositoryError),
    /// Directory lookup failed.
    #[error(transparent)]
    Directory(#[from] DirectoryRepositoryError),
    /// The target work item does not exist.
    #[error("work item not found: {0}")]
    NotFound(WorkItemId),
    /// The requested assignee does not exist or is deactivated.
    #[error("assignee not found: {0}")]
    AssigneeNotFound(ActorId),
    /// The requested department does not exist.
    #[error("department not found: {0}")]
    DepartmentNotFound(DepartmentId),
}

impl From<MembershipError> for WorkflowServiceError {
    fn from(err: MembershipError) -> Self {
        match err {
            MembershipError::Access(access) => Self::Access(access),
            MembershipError::Repository(repository) => Self::Directory(repository),
        }
    }
}

impl ActionFailure for WorkflowServiceError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Access(err) => err.kind(),
            Self::Domain(_) => ErrorKind::InvalidArgument,
            Self::NotFound(_) | Self::AssigneeNotFound(_) | Self::DepartmentNotFound(_) => {
                ErrorKind::NotFound
            }
            Self::Repository(WorkItemRepositoryError::NotFound(_)) => ErrorKind::NotFound,
            Self::Repository(
                WorkItemRepositoryError::DuplicateItem(_) | WorkItemRepositoryError::Persistence(_),
            ) => ErrorKind::InternalError,
            Self::Directory(err) => directory_repository_kind(err),
        }
    }
}

/// Result type for workflow service operations.
pub type WorkflowServiceResult<T> = Result<T, WorkflowServiceError>;

/// Task and milestone lifecycle service.
#[derive(Clone)]
pub struct WorkflowService<W, D, C>
where
    W: WorkItemRepository,
    D: Directory,
    C: Clock + Send + Sync,
{
    items: Arc<W>,
    directory: Arc<D>,
    membership: MembershipResolver<D>,
    clock: Arc<C>,
}

impl<W, D, C> WorkflowService<W, D, C>
where
    W: WorkItemRepository,
    D: Directory,
    C: Clock + Send + Sync,
{
    /// Creates a new workflow service.
    #[must_use]
    pub fn new(items: Arc<W>, directory: Arc<D>, clock: Arc<C>) -> Self {
        let membership = MembershipResolver::new(Arc::clone(&directory));
        Self {
            items,
            directory,
            membership,
            clock,
        }
    }

    /// Creates a pending task or milestone owned by the caller.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError`] when the caller may not create work
    /// items, the title is blank, the department or assignee cannot be found,
    /// or persistence fails.
    pub async fn create(
        &self,
        context: &RequestContext,
        request: CreateWorkItemRequest,
    ) -> WorkflowServiceResult<WorkItem> {
        let caller = self.membership.authenticate(context).await?;
        ensure_permitted(Operation::CreateWorkItem, &AccessFacts::for_actor(&caller))?;

        let CreateWorkItemRequest {
            kind,
            title,
            description,
            due_date,
            assignee,
            department_id,
        } = request;
        let validated_title = WorkItemTitle::new(title)?;
        let scope = match department_id {
            Some(id) => Some(self.require_department(id).await?),
            None => self.membership.effective_department(&caller).await?,
        };
        if let Some(assignee_id) = assignee {
            self.require_active_assignee(assignee_id).await?;
        }

        let item = WorkItem::new(
            NewWorkItem {
                kind,
                title: validated_title,
                description,
                due_date,
                created_by: caller.id(),
                assignee,
                department_id: scope,
            },
            &*self.clock,
        );
        self.items.store(&item).await?;
        tracing::info!(
            item_id = %item.id(),
            kind = %item.kind(),
            created_by = %caller.id(),
            "work item created"
        );
        Ok(item)
    }

    /// Marks a work item complete.
    ///
    /// Completing an already completed item keeps the original completion
    /// time and writes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError::NotFound`] when the item does not
    /// exist, [`AccessError::Forbidden`] unless the caller is the assignee,
    /// the creator, the head of the item's department or an admin, or a
    /// repository error when persistence fails.
    pub async fn complete(
        &self,
        context: &RequestContext,
        item_id: WorkItemId,
    ) -> WorkflowServiceResult<WorkItem> {
        let caller = self.membership.authenticate(context).await?;
        let mut item = self.require_item(item_id).await?;
        let heads_department = self
            .membership
            .heads_department(caller.id(), item.department_id())
            .await?;
        let facts = item_facts(&caller, &item).department_head(heads_department);
        ensure_permitted(Operation::CompleteWorkItem, &facts)?;

        if !item.complete(&*self.clock) {
            tracing::debug!(%item_id, actor_id = %caller.id(), "work item already completed");
            return Ok(item);
        }
        self.items.update(&item).await?;
        tracing::info!(%item_id, completed_by = %caller.id(), "work item completed");
        Ok(item)
    }

    /// Approves a work item, clearing any rejection note.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError::NotFound`] when the item does not
    /// exist, [`AccessError::Forbidden`] unless the caller is the creator or
    /// an admin, or a repository error when persistence fails.
    pub async fn approve(
        &self,
        context: &RequestContext,
        item_id: WorkItemId,
    ) -> WorkflowServiceResult<WorkItem> {
        let caller = self.membership.authenticate(context).await?;
        let mut item = self.require_item(item_id).await?;
        ensure_permitted(Operation::ApproveWorkItem, &item_facts(&caller, &item))?;

        item.approve(caller.id(), &*self.clock);
        self.items.update(&item).await?;
        tracing::info!(%item_id, approved_by = %caller.id(), "work item approved");
        Ok(item)
    }

    /// Rejects a work item with a note, clearing any approval.
    ///
    /// The note is validated before the item is looked up, so a blank note
    /// fails the same way whether or not the item exists.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowDomainError::EmptyRejectionNote`] for a blank note,
    /// [`WorkflowServiceError::NotFound`] when the item does not exist,
    /// [`AccessError::Forbidden`] unless the caller is the creator or an
    /// admin, or a repository error when persistence fails.
    pub async fn reject(
        &self,
        context: &RequestContext,
        item_id: WorkItemId,
        note: &str,
    ) -> WorkflowServiceResult<WorkItem> {
        let caller = self.membership.authenticate(context).await?;
        let validated_note = RejectionNote::new(note)?;
        let mut item = self.require_item(item_id).await?;
        ensure_permitted(Operation::RejectWorkItem, &item_facts(&caller, &item))?;

        item.reject(validated_note, &*self.clock);
        self.items.update(&item).await?;
        tracing::info!(%item_id, rejected_by = %caller.id(), "work item rejected");
        Ok(item)
    }

    /// Replaces the assignee of a work item.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError::NotFound`] when the item does not
    /// exist, [`AccessError::Forbidden`] unless the caller is an admin or a
    /// full-power creator, [`WorkflowServiceError::AssigneeNotFound`] when the
    /// new assignee is unknown or deactivated, or a repository error when
    /// persistence fails.
    pub async fn reassign(
        &self,
        context: &RequestContext,
        item_id: WorkItemId,
        assignee: Option<ActorId>,
    ) -> WorkflowServiceResult<WorkItem> {
        let caller = self.membership.authenticate(context).await?;
        let mut item = self.require_item(item_id).await?;
        ensure_permitted(Operation::ReassignWorkItem, &item_facts(&caller, &item))?;
        if let Some(assignee_id) = assignee {
            self.require_active_assignee(assignee_id).await?;
        }

        item.reassign(assignee, &*self.clock);
        self.items.update(&item).await?;
        tracing::info!(
            %item_id,
            assignee = ?assignee,
            reassigned_by = %caller.id(),
            "work item reassigned"
        );
        Ok(item)
    }

    /// Finds a work item by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError::NotFound`] when the item does not
    /// exist.
    pub async fn find(
        &self,
        context: &RequestContext,
        item_id: WorkItemId,
    ) -> WorkflowServiceResult<WorkItem> {
        self.membership.authenticate(context).await?;
        self.require_item(item_id).await
    }

    /// Lists items scoped to the caller's effective department.
    ///
    /// Returns an empty list when the caller has no effective department.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError`] when the caller is unauthenticated or
    /// a lookup fails.
    pub async fn list_department_items(
        &self,
        context: &RequestContext,
        kind: Option<WorkItemKind>,
    ) -> WorkflowServiceResult<Vec<WorkItem>> {
        let caller = self.membership.authenticate(context).await?;
        let Some(department_id) = self.membership.effective_department(&caller).await? else {
            return Ok(Vec::new());
        };
        Ok(self.items.list_by_department(department_id, kind).await?)
    }

    /// Lists items assigned to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError`] when the caller is unauthenticated or
    /// the lookup fails.
    pub async fn list_assigned(
        &self,
        context: &RequestContext,
    ) -> WorkflowServiceResult<Vec<WorkItem>> {
        let caller = self.membership.authenticate(context).await?;
        Ok(self.items.list_by_assignee(caller.id()).await?)
    }

    async fn require_item(&self, item_id: WorkItemId) -> WorkflowServiceResult<WorkItem> {
        self.items
            .find_by_id(item_id)
            .await?
            .ok_or(WorkflowServiceError::NotFound(item_id))
    }

    async fn require_department(
        &self,
        department_id: DepartmentId,
    ) -> WorkflowServiceResult<DepartmentId> {
        self.directory
            .find_department(department_id)
            .await?
            .map(|department| department.id())
            .ok_or(WorkflowServiceError::DepartmentNotFound(department_id))
    }

    async fn require_active_assignee(&self, actor_id: ActorId) -> WorkflowServiceResult<()> {
        let found = self.directory.find_actor(actor_id).await?;
        if found.as_ref().is_some_and(Actor::is_active) {
            Ok(())
        } else {
            Err(WorkflowServiceError::AssigneeNotFound(actor_id))
        }
    }
}

fn item_facts(caller: &Actor, item: &WorkItem) -> AccessFacts {
    AccessFacts::for_actor(caller)
        .creator(item.created_by() == caller.id())
        .assignee(item.assignee() == Some(caller.id()))
}
