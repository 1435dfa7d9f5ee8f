//! Shared test helpers for in-memory service integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use ::workboard::access::{RequestContext, Session};
use ::workboard::directory::{
    adapters::memory::InMemoryDirectory,
    domain::{Actor, DepartmentId, EmailAddress, PersonName, Power, Profile, Role},
    ports::ActorRepository,
    services::{DirectoryService, RegisterEmployeeRequest},
};
use ::workboard::workflow::{
    adapters::memory::InMemoryWorkItemRepository, services::WorkflowService,
};

/// Directory service over the in-memory adapter.
pub type People = DirectoryService<InMemoryDirectory, DefaultClock>;

/// Workflow service over the in-memory adapters.
pub type Work = WorkflowService<InMemoryWorkItemRepository, InMemoryDirectory, DefaultClock>;

/// Both services sharing one in-memory directory.
pub struct Workboard {
    pub directory: Arc<InMemoryDirectory>,
    pub items: Arc<InMemoryWorkItemRepository>,
    pub people: People,
    pub work: Work,
}

/// Provides a fresh, empty workboard for each test.
#[fixture]
pub fn workboard() -> Workboard {
    let directory = Arc::new(InMemoryDirectory::new());
    let clock = Arc::new(DefaultClock);
    let items = Arc::new(InMemoryWorkItemRepository::with_directory(Arc::clone(
        &directory,
    )));
    let people = DirectoryService::new(Arc::clone(&directory), Arc::clone(&clock));
    let work = WorkflowService::new(Arc::clone(&items), Arc::clone(&directory), clock);
    Workboard {
        directory,
        items,
        people,
        work,
    }
}

impl Workboard {
    /// Stores the first administrator directly, bypassing the service.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile is invalid or the actor cannot be
    /// stored.
    pub async fn bootstrap_admin(&self) -> eyre::Result<Actor> {
        let profile = Profile::new(
            PersonName::new("Root Admin")?,
            EmailAddress::new("root@example.com")?,
            None,
        );
        let admin = Actor::new(profile, Role::Admin, Power::Full, None, &DefaultClock);
        self.directory.store_actor(&admin).await?;
        Ok(admin)
    }

    /// Registers an employee through the directory service as `admin`.
    ///
    /// # Errors
    ///
    /// Returns an error if registration fails.
    pub async fn hire(
        &self,
        admin: &Actor,
        name: &str,
        role: Role,
        department_id: Option<DepartmentId>,
    ) -> eyre::Result<Actor> {
        let email = format!("{}@example.com", name.to_ascii_lowercase().replace(' ', "."));
        let mut request = RegisterEmployeeRequest::new(name, email, role);
        if let Some(id) = department_id {
            request = request.in_department(id);
        }
        Ok(self.people.register_employee(&context_for(admin), request).await?)
    }
}

/// Builds an authenticated request context for `actor`.
#[must_use]
pub fn context_for(actor: &Actor) -> RequestContext {
    RequestContext::authenticated(Session::new(actor.id(), actor.role()))
}
