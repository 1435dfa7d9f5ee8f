//! Shared fixtures for `PostgreSQL` integration tests.

pub use super::cluster::{BoxError, PostgresCluster, postgres_cluster};
use super::cluster::TemporaryDatabase;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;
use workboard::config::DatabaseConfig;
use workboard::directory::{
    adapters::postgres::PostgresDirectory,
    domain::{
        Actor, Department, DepartmentId, DepartmentName, EmailAddress, PersonName, Power, Profile,
        Role,
    },
    ports::{ActorRepository, DepartmentRepository},
    services::DirectoryService,
};
use workboard::workflow::{
    adapters::postgres::PostgresWorkItemRepository, services::WorkflowService,
};

/// SQL creating the department and actor tables.
pub const CREATE_DIRECTORY_SQL: &str =
    include_str!("../../migrations/2026-10-01-000000_create_directory/up.sql");

/// SQL creating the work item table.
pub const CREATE_WORK_ITEMS_SQL: &str =
    include_str!("../../migrations/2026-10-01-000100_create_work_items/up.sql");

/// Template database name for the pre-migrated schema.
pub const TEMPLATE_DB: &str = "workboard_test_template";

fn apply_migrations(url: &str) -> Result<(), BoxError> {
    let mut connection = PgConnection::establish(url)?;
    connection.batch_execute(CREATE_DIRECTORY_SQL)?;
    connection.batch_execute(CREATE_WORK_ITEMS_SQL)?;
    Ok(())
}

/// Repositories and services over one scratch database.
///
/// `_database` is declared last so every pool is released before the
/// database is dropped.
pub struct PostgresStores {
    pub directory: Arc<PostgresDirectory>,
    pub items: Arc<PostgresWorkItemRepository>,
    pub people: DirectoryService<PostgresDirectory, DefaultClock>,
    pub work: WorkflowService<PostgresWorkItemRepository, PostgresDirectory, DefaultClock>,
    database_url: String,
    _database: TemporaryDatabase,
}

impl PostgresStores {
    /// Opens a direct connection for raw SQL against the scratch database.
    pub fn connection(&self) -> Result<PgConnection, BoxError> {
        Ok(PgConnection::establish(&self.database_url)?)
    }

    /// Stores an active actor directly through the repository.
    pub async fn seed_actor(
        &self,
        name: &str,
        role: Role,
        department_id: Option<DepartmentId>,
    ) -> Result<Actor, BoxError> {
        let email = format!("{}@example.com", name.to_ascii_lowercase().replace(' ', "."));
        let profile = Profile::new(PersonName::new(name)?, EmailAddress::new(email)?, None);
        let actor = Actor::new(profile, role, Power::Full, department_id, &DefaultClock);
        self.directory.store_actor(&actor).await?;
        Ok(actor)
    }

    /// Stores a department, headed by `head` when given.
    pub async fn seed_department(
        &self,
        name: &str,
        head: Option<&Actor>,
    ) -> Result<Department, BoxError> {
        let mut department = Department::new(DepartmentName::new(name)?, &DefaultClock);
        if let Some(actor) = head {
            department.appoint_head(actor, &DefaultClock)?;
        }
        self.directory.store_department(&department).await?;
        Ok(department)
    }
}

/// Migrates the template once, copies it into a scratch database and wires
/// the adapters to a pool built by [`workboard::database::connect`].
#[fixture]
pub async fn stores(
    postgres_cluster: Result<PostgresCluster, BoxError>,
) -> Result<PostgresStores, BoxError> {
    let cluster = postgres_cluster?;
    let (database, pool) = tokio::task::spawn_blocking(move || {
        cluster.ensure_template(TEMPLATE_DB, apply_migrations)?;
        let database = cluster.temporary_database(TEMPLATE_DB)?;
        let pool = workboard::database::connect(&DatabaseConfig {
            url: Some(database.url().to_owned()),
            max_connections: 2,
        })?;
        Ok::<_, BoxError>((database, pool))
    })
    .await??;

    let directory = Arc::new(PostgresDirectory::new(pool.clone()));
    let items = Arc::new(PostgresWorkItemRepository::new(pool));
    let clock = Arc::new(DefaultClock);
    Ok(PostgresStores {
        people: DirectoryService::new(Arc::clone(&directory), Arc::clone(&clock)),
        work: WorkflowService::new(Arc::clone(&items), Arc::clone(&directory), clock),
        directory,
        items,
        database_url: database.url().to_owned(),
        _database: database,
    })
}
