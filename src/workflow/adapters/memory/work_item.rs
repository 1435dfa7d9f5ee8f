//! In-memory work item repository for tests and embedding.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::directory::{
    adapters::memory::InMemoryDirectory,
    domain::{ActorId, DepartmentId},
};
use crate::workflow::{
    domain::{WorkItem, WorkItemId, WorkItemKind},
    ports::{WorkItemRepository, WorkItemRepositoryError, WorkItemRepositoryResult},
};

type ItemMap = HashMap<WorkItemId, WorkItem>;

/// Thread-safe in-memory work item repository.
///
/// When linked to an [`InMemoryDirectory`], items whose department has been
/// deleted are read back without a department, as the relational schema's
/// `ON DELETE SET NULL` does.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkItemRepository {
    state: Arc<RwLock<ItemMap>>,
    directory: Option<Arc<InMemoryDirectory>>,
}

impl InMemoryWorkItemRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty repository whose department references follow
    /// `directory`.
    #[must_use]
    pub fn with_directory(directory: Arc<InMemoryDirectory>) -> Self {
        Self {
            state: Arc::default(),
            directory: Some(directory),
        }
    }

    fn read(&self) -> WorkItemRepositoryResult<RwLockReadGuard<'_, ItemMap>> {
        self.state.read().map_err(|err| {
            WorkItemRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> WorkItemRepositoryResult<RwLockWriteGuard<'_, ItemMap>> {
        self.state.write().map_err(|err| {
            WorkItemRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn resolve(&self, mut item: WorkItem) -> WorkItemRepositoryResult<WorkItem> {
        let (Some(directory), Some(department_id)) = (&self.directory, item.department_id()) else {
            return Ok(item);
        };
        let exists = directory
            .contains_department(department_id)
            .map_err(WorkItemRepositoryError::persistence)?;
        if !exists {
            item.detach_department();
        }
        Ok(item)
    }

    fn collect_sorted(
        &self,
        predicate: impl Fn(&WorkItem) -> bool,
    ) -> WorkItemRepositoryResult<Vec<WorkItem>> {
        let snapshot: Vec<WorkItem> = self.read()?.values().cloned().collect();
        let mut matching = Vec::new();
        for stored in snapshot {
            let item = self.resolve(stored)?;
            if predicate(&item) {
                matching.push(item);
            }
        }
        matching.sort_by_key(|item| (item.created_at(), item.id().into_inner()));
        Ok(matching)
    }
}

#[async_trait]
impl WorkItemRepository for InMemoryWorkItemRepository {
    async fn store(&self, item: &WorkItem) -> WorkItemRepositoryResult<()> {
        let mut items = self.write()?;
        if items.contains_key(&item.id()) {
            return Err(WorkItemRepositoryError::DuplicateItem(item.id()));
        }
        items.insert(item.id(), item.clone());
        Ok(())
    }

    async fn update(&self, item: &WorkItem) -> WorkItemRepositoryResult<()> {
        let mut items = self.write()?;
        let slot = items
            .get_mut(&item.id())
            .ok_or(WorkItemRepositoryError::NotFound(item.id()))?;
        *slot = item.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: WorkItemId) -> WorkItemRepositoryResult<Option<WorkItem>> {
        let stored = self.read()?.get(&id).cloned();
        stored.map(|item| self.resolve(item)).transpose()
    }

    async fn list_by_department(
        &self,
        department_id: DepartmentId,
        kind: Option<WorkItemKind>,
    ) -> WorkItemRepositoryResult<Vec<WorkItem>> {
        self.collect_sorted(|item| {
            item.department_id() == Some(department_id)
                && kind.is_none_or(|wanted| item.kind() == wanted)
        })
    }

    async fn list_by_assignee(
        &self,
        assignee: ActorId,
    ) -> WorkItemRepositoryResult<Vec<WorkItem>> {
        self.collect_sorted(|item| item.assignee() == Some(assignee))
    }
}
