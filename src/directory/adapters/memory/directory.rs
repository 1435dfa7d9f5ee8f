//! In-memory directory repository for tests and embedding.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::directory::{
    domain::{Actor, ActorId, Department, DepartmentId, EmailAddress},
    ports::{
        ActorRepository, DepartmentRepository, DirectoryRepositoryError, DirectoryRepositoryResult,
    },
};

/// Thread-safe in-memory store for actors and departments.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    state: Arc<RwLock<InMemoryDirectoryState>>,
}

#[derive(Debug, Default)]
struct InMemoryDirectoryState {
    actors: HashMap<ActorId, Actor>,
    email_index: HashMap<EmailAddress, ActorId>,
    departments: HashMap<DepartmentId, Department>,
    head_index: HashMap<ActorId, DepartmentId>,
}

impl InMemoryDirectory {
    /// Creates an empty in-memory directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> DirectoryRepositoryResult<RwLockReadGuard<'_, InMemoryDirectoryState>> {
        self.state.read().map_err(|err| {
            DirectoryRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> DirectoryRepositoryResult<RwLockWriteGuard<'_, InMemoryDirectoryState>> {
        self.state.write().map_err(|err| {
            DirectoryRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    /// Reports whether a department with `id` is currently stored.
    pub(crate) fn contains_department(&self, id: DepartmentId) -> DirectoryRepositoryResult<bool> {
        Ok(self.read()?.departments.contains_key(&id))
    }
}

fn active_members(
    state: &InMemoryDirectoryState,
    department_id: DepartmentId,
) -> impl Iterator<Item = &Actor> {
    state
        .actors
        .values()
        .filter(move |actor| actor.is_active() && actor.department_id() == Some(department_id))
}

#[async_trait]
impl ActorRepository for InMemoryDirectory {
    async fn store_actor(&self, actor: &Actor) -> DirectoryRepositoryResult<()> {
        let mut state = self.write()?;
        if state.actors.contains_key(&actor.id()) {
            return Err(DirectoryRepositoryError::DuplicateActor(actor.id()));
        }
        let email = actor.profile().email().clone();
        if state.email_index.contains_key(&email) {
            return Err(DirectoryRepositoryError::DuplicateEmail(email.to_string()));
        }

        state.email_index.insert(email, actor.id());
        state.actors.insert(actor.id(), actor.clone());
        Ok(())
    }

    async fn update_actor(&self, actor: &Actor) -> DirectoryRepositoryResult<()> {
        let mut state = self.write()?;
        let old_email = state
            .actors
            .get(&actor.id())
            .ok_or(DirectoryRepositoryError::ActorNotFound(actor.id()))?
            .profile()
            .email()
            .clone();

        let new_email = actor.profile().email();
        if *new_email != old_email {
            if let Some(&owner) = state.email_index.get(new_email)
                && owner != actor.id()
            {
                return Err(DirectoryRepositoryError::DuplicateEmail(
                    new_email.to_string(),
                ));
            }
            state.email_index.remove(&old_email);
            state.email_index.insert(new_email.clone(), actor.id());
        }

        state.actors.insert(actor.id(), actor.clone());
        Ok(())
    }

    async fn find_actor(&self, id: ActorId) -> DirectoryRepositoryResult<Option<Actor>> {
        let state = self.read()?;
        Ok(state.actors.get(&id).cloned())
    }

    async fn list_active_members(
        &self,
        department_id: DepartmentId,
    ) -> DirectoryRepositoryResult<Vec<Actor>> {
        let state = self.read()?;
        let mut members: Vec<Actor> = active_members(&state, department_id).cloned().collect();
        members.sort_by(|a, b| a.profile().name().as_str().cmp(b.profile().name().as_str()));
        Ok(members)
    }

    async fn count_active_members(
        &self,
        department_id: DepartmentId,
    ) -> DirectoryRepositoryResult<u64> {
        let state = self.read()?;
        let count = active_members(&state, department_id).count();
        u64::try_from(count).map_err(DirectoryRepositoryError::persistence)
    }
}

#[async_trait]
impl DepartmentRepository for InMemoryDirectory {
    async fn store_department(&self, department: &Department) -> DirectoryRepositoryResult<()> {
        let mut state = self.write()?;
        if state.departments.contains_key(&department.id()) {
            return Err(DirectoryRepositoryError::DuplicateDepartment(
                department.id(),
            ));
        }
        if let Some(head_id) = department.head_id() {
            if state.head_index.contains_key(&head_id) {
                return Err(DirectoryRepositoryError::DuplicateHead(head_id));
            }
            state.head_index.insert(head_id, department.id());
        }
        state.departments.insert(department.id(), department.clone());
        Ok(())
    }

    async fn update_department(&self, department: &Department) -> DirectoryRepositoryResult<()> {
        let mut state = self.write()?;
        let old_head = state
            .departments
            .get(&department.id())
            .ok_or(DirectoryRepositoryError::DepartmentNotFound(
                department.id(),
            ))?
            .head_id();

        if old_head != department.head_id() {
            if let Some(new_head) = department.head_id()
                && state
                    .head_index
                    .get(&new_head)
                    .is_some_and(|&headed| headed != department.id())
            {
                return Err(DirectoryRepositoryError::DuplicateHead(new_head));
            }
            if let Some(previous) = old_head {
                state.head_index.remove(&previous);
            }
            if let Some(new_head) = department.head_id() {
                state.head_index.insert(new_head, department.id());
            }
        }

        state.departments.insert(department.id(), department.clone());
        Ok(())
    }

    async fn delete_department(&self, id: DepartmentId) -> DirectoryRepositoryResult<()> {
        let mut state = self.write()?;
        let removed = state
            .departments
            .remove(&id)
            .ok_or(DirectoryRepositoryError::DepartmentNotFound(id))?;
        if let Some(head_id) = removed.head_id() {
            state.head_index.remove(&head_id);
        }
        state
            .actors
            .values_mut()
            .filter(|actor| actor.department_id() == Some(id))
            .for_each(Actor::detach_department);
        Ok(())
    }

    async fn find_department(
        &self,
        id: DepartmentId,
    ) -> DirectoryRepositoryResult<Option<Department>> {
        let state = self.read()?;
        Ok(state.departments.get(&id).cloned())
    }

    async fn find_department_headed_by(
        &self,
        actor_id: ActorId,
    ) -> DirectoryRepositoryResult<Option<Department>> {
        let state = self.read()?;
        let department = state
            .head_index
            .get(&actor_id)
            .and_then(|id| state.departments.get(id))
            .cloned();
        Ok(department)
    }
}
