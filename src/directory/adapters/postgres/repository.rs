//! `PostgreSQL` repository implementation for the directory.

use super::{
    models::{ActorRow, DepartmentRow, NewActorRow, NewDepartmentRow},
    schema::{actors, departments},
};
use crate::database::PgPool;
use crate::directory::{
    domain::{
        Actor, ActorId, ActorStatus, Department, DepartmentId, DepartmentName, EmailAddress,
        PersistedActorData, PersistedDepartmentData, PersonName, Power, Profile, Role,
    },
    ports::{
        ActorRepository, DepartmentRepository, DirectoryRepositoryError, DirectoryRepositoryResult,
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

const ACTIVE_STATUS: &str = "active";

/// `PostgreSQL`-backed actor and department repository.
#[derive(Debug, Clone)]
pub struct PostgresDirectory {
    pool: PgPool,
}

impl PostgresDirectory {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> DirectoryRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> DirectoryRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(DirectoryRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(DirectoryRepositoryError::persistence)?
    }
}

#[async_trait]
impl ActorRepository for PostgresDirectory {
    async fn store_actor(&self, actor: &Actor) -> DirectoryRepositoryResult<()> {
        let actor_id = actor.id();
        let email = actor.profile().email().to_string();
        let new_row = to_new_actor_row(actor);

        self.run_blocking(move |connection| {
            diesel::insert_into(actors::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_constraint(info.as_ref(), "idx_actors_email_unique") =>
                    {
                        DirectoryRepositoryError::DuplicateEmail(email.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        DirectoryRepositoryError::DuplicateActor(actor_id)
                    }
                    _ => DirectoryRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update_actor(&self, actor: &Actor) -> DirectoryRepositoryResult<()> {
        let actor_id = actor.id();
        let row = to_new_actor_row(actor);

        self.run_blocking(move |connection| {
            let email = row.email.clone();
            let updated_count =
                diesel::update(actors::table.filter(actors::id.eq(actor_id.into_inner())))
                    .set((
                        actors::name.eq(&row.name),
                        actors::email.eq(&row.email),
                        actors::position.eq(&row.position),
                        actors::role.eq(&row.role),
                        actors::power.eq(&row.power),
                        actors::department_id.eq(row.department_id),
                        actors::status.eq(&row.status),
                        actors::updated_at.eq(row.updated_at),
                    ))
                    .execute(connection)
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                            DirectoryRepositoryError::DuplicateEmail(email)
                        }
                        _ => DirectoryRepositoryError::persistence(err),
                    })?;

            if updated_count == 0 {
                return Err(DirectoryRepositoryError::ActorNotFound(actor_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_actor(&self, id: ActorId) -> DirectoryRepositoryResult<Option<Actor>> {
        self.run_blocking(move |connection| {
            let row = actors::table
                .filter(actors::id.eq(id.into_inner()))
                .select(ActorRow::as_select())
                .first::<ActorRow>(connection)
                .optional()
                .map_err(DirectoryRepositoryError::persistence)?;
            row.map(row_to_actor).transpose()
        })
        .await
    }

    async fn list_active_members(
        &self,
        department_id: DepartmentId,
    ) -> DirectoryRepositoryResult<Vec<Actor>> {
        self.run_blocking(move |connection| {
            let rows = actors::table
                .filter(actors::department_id.eq(department_id.into_inner()))
                .filter(actors::status.eq(ACTIVE_STATUS))
                .order(actors::name.asc())
                .select(ActorRow::as_select())
                .load::<ActorRow>(connection)
                .map_err(DirectoryRepositoryError::persistence)?;
            rows.into_iter().map(row_to_actor).collect()
        })
        .await
    }

    async fn count_active_members(
        &self,
        department_id: DepartmentId,
    ) -> DirectoryRepositoryResult<u64> {
        self.run_blocking(move |connection| {
            let count: i64 = actors::table
                .filter(actors::department_id.eq(department_id.into_inner()))
                .filter(actors::status.eq(ACTIVE_STATUS))
                .count()
                .get_result(connection)
                .map_err(DirectoryRepositoryError::persistence)?;
            u64::try_from(count).map_err(DirectoryRepositoryError::persistence)
        })
        .await
    }
}

#[async_trait]
impl DepartmentRepository for PostgresDirectory {
    async fn store_department(&self, department: &Department) -> DirectoryRepositoryResult<()> {
        let department_id = department.id();
        let head_id = department.head_id();
        let new_row = to_new_department_row(department);

        self.run_blocking(move |connection| {
            diesel::insert_into(departments::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| map_department_write_error(err, department_id, head_id))?;
            Ok(())
        })
        .await
    }

    async fn update_department(&self, department: &Department) -> DirectoryRepositoryResult<()> {
        let department_id = department.id();
        let head_id = department.head_id();
        let row = to_new_department_row(department);

        self.run_blocking(move |connection| {
            let updated_count = diesel::update(
                departments::table.filter(departments::id.eq(department_id.into_inner())),
            )
            .set((
                departments::name.eq(&row.name),
                departments::head_id.eq(row.head_id),
                departments::updated_at.eq(row.updated_at),
            ))
            .execute(connection)
            .map_err(|err| map_department_write_error(err, department_id, head_id))?;

            if updated_count == 0 {
                return Err(DirectoryRepositoryError::DepartmentNotFound(department_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete_department(&self, id: DepartmentId) -> DirectoryRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted_count =
                diesel::delete(departments::table.filter(departments::id.eq(id.into_inner())))
                    .execute(connection)
                    .map_err(DirectoryRepositoryError::persistence)?;
            if deleted_count == 0 {
                return Err(DirectoryRepositoryError::DepartmentNotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_department(
        &self,
        id: DepartmentId,
    ) -> DirectoryRepositoryResult<Option<Department>> {
        self.run_blocking(move |connection| {
            let row = departments::table
                .filter(departments::id.eq(id.into_inner()))
                .select(DepartmentRow::as_select())
                .first::<DepartmentRow>(connection)
                .optional()
                .map_err(DirectoryRepositoryError::persistence)?;
            row.map(row_to_department).transpose()
        })
        .await
    }

    async fn find_department_headed_by(
        &self,
        actor_id: ActorId,
    ) -> DirectoryRepositoryResult<Option<Department>> {
        self.run_blocking(move |connection| {
            let row = departments::table
                .filter(departments::head_id.eq(actor_id.into_inner()))
                .select(DepartmentRow::as_select())
                .first::<DepartmentRow>(connection)
                .optional()
                .map_err(DirectoryRepositoryError::persistence)?;
            row.map(row_to_department).transpose()
        })
        .await
    }
}

fn to_new_actor_row(actor: &Actor) -> NewActorRow {
    let profile = actor.profile();
    NewActorRow {
        id: actor.id().into_inner(),
        name: profile.name().as_str().to_owned(),
        email: profile.email().as_str().to_owned(),
        position: profile.position().map(str::to_owned),
        role: actor.role().as_str().to_owned(),
        power: actor.power().as_str().to_owned(),
        department_id: actor.department_id().map(DepartmentId::into_inner),
        status: actor.status().as_str().to_owned(),
        created_at: actor.created_at(),
        updated_at: actor.updated_at(),
    }
}

fn row_to_actor(row: ActorRow) -> DirectoryRepositoryResult<Actor> {
    let ActorRow {
        id,
        name,
        email,
        position,
        role,
        power,
        department_id,
        status,
        created_at,
        updated_at,
    } = row;

    let profile = Profile::new(
        PersonName::new(name).map_err(DirectoryRepositoryError::persistence)?,
        EmailAddress::new(email).map_err(DirectoryRepositoryError::persistence)?,
        position,
    );
    let data = PersistedActorData {
        id: ActorId::from_uuid(id),
        profile,
        role: Role::try_from(role.as_str()).map_err(DirectoryRepositoryError::persistence)?,
        power: Power::try_from(power.as_str()).map_err(DirectoryRepositoryError::persistence)?,
        department_id: department_id.map(DepartmentId::from_uuid),
        status: ActorStatus::try_from(status.as_str())
            .map_err(DirectoryRepositoryError::persistence)?,
        created_at,
        updated_at,
    };
    Ok(Actor::from_persisted(data))
}

fn to_new_department_row(department: &Department) -> NewDepartmentRow {
    NewDepartmentRow {
        id: department.id().into_inner(),
        name: department.name().as_str().to_owned(),
        head_id: department.head_id().map(ActorId::into_inner),
        created_at: department.created_at(),
        updated_at: department.updated_at(),
    }
}

fn row_to_department(row: DepartmentRow) -> DirectoryRepositoryResult<Department> {
    let DepartmentRow {
        id,
        name,
        head_id,
        created_at,
        updated_at,
    } = row;

    let data = PersistedDepartmentData {
        id: DepartmentId::from_uuid(id),
        name: DepartmentName::new(name).map_err(DirectoryRepositoryError::persistence)?,
        head_id: head_id.map(ActorId::from_uuid),
        created_at,
        updated_at,
    };
    Ok(Department::from_persisted(data))
}

fn map_department_write_error(
    err: DieselError,
    department_id: DepartmentId,
    head_id: Option<ActorId>,
) -> DirectoryRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
            if is_constraint(info.as_ref(), "idx_departments_head_unique") =>
        {
            head_id.map_or(
                DirectoryRepositoryError::DuplicateDepartment(department_id),
                DirectoryRepositoryError::DuplicateHead,
            )
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            DirectoryRepositoryError::DuplicateDepartment(department_id)
        }
        _ => DirectoryRepositoryError::persistence(err),
    }
}

fn is_constraint(info: &dyn DatabaseErrorInformation, constraint: &str) -> bool {
    info.constraint_name().is_some_and(|name| name == constraint)
}
