//! `PostgreSQL` repository implementation for work item storage.

use super::{
    models::{NewWorkItemRow, WorkItemRow},
    schema::work_items,
};
use crate::database::PgPool;
use crate::directory::domain::{ActorId, DepartmentId};
use crate::workflow::{
    domain::{PersistedWorkItemData, WorkItem, WorkItemId, WorkItemKind, WorkItemTitle},
    ports::{WorkItemRepository, WorkItemRepositoryError, WorkItemRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed work item repository.
#[derive(Debug, Clone)]
pub struct PostgresWorkItemRepository {
    pool: PgPool,
}

impl PostgresWorkItemRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> WorkItemRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> WorkItemRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(WorkItemRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(WorkItemRepositoryError::persistence)?
    }
}

#[async_trait]
impl WorkItemRepository for PostgresWorkItemRepository {
    async fn store(&self, item: &WorkItem) -> WorkItemRepositoryResult<()> {
        let item_id = item.id();
        let new_row = to_row(item);

        self.run_blocking(move |connection| {
            diesel::insert_into(work_items::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        WorkItemRepositoryError::DuplicateItem(item_id)
                    }
                    _ => WorkItemRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, item: &WorkItem) -> WorkItemRepositoryResult<()> {
        let item_id = item.id();
        let row = to_row(item);

        self.run_blocking(move |connection| {
            let updated_count = diesel::update(work_items::table.find(item_id.into_inner()))
                .set(&row)
                .execute(connection)
                .map_err(WorkItemRepositoryError::persistence)?;
            if updated_count == 0 {
                return Err(WorkItemRepositoryError::NotFound(item_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: WorkItemId) -> WorkItemRepositoryResult<Option<WorkItem>> {
        self.run_blocking(move |connection| {
            let row = work_items::table
                .find(id.into_inner())
                .select(WorkItemRow::as_select())
                .first::<WorkItemRow>(connection)
                .optional()
                .map_err(WorkItemRepositoryError::persistence)?;
            row.map(row_to_item).transpose()
        })
        .await
    }

    async fn list_by_department(
        &self,
        department_id: DepartmentId,
        kind: Option<WorkItemKind>,
    ) -> WorkItemRepositoryResult<Vec<WorkItem>> {
        self.run_blocking(move |connection| {
            let mut query = work_items::table
                .filter(work_items::department_id.eq(department_id.into_inner()))
                .into_boxed();
            if let Some(wanted) = kind {
                query = query.filter(work_items::kind.eq(wanted.as_str()));
            }
            let rows = query
                .order((work_items::created_at.asc(), work_items::id.asc()))
                .select(WorkItemRow::as_select())
                .load::<WorkItemRow>(connection)
                .map_err(WorkItemRepositoryError::persistence)?;
            rows.into_iter().map(row_to_item).collect()
        })
        .await
    }

    async fn list_by_assignee(
        &self,
        assignee: ActorId,
    ) -> WorkItemRepositoryResult<Vec<WorkItem>> {
        self.run_blocking(move |connection| {
            let rows = work_items::table
                .filter(work_items::assignee_id.eq(assignee.into_inner()))
                .order((work_items::created_at.asc(), work_items::id.asc()))
                .select(WorkItemRow::as_select())
                .load::<WorkItemRow>(connection)
                .map_err(WorkItemRepositoryError::persistence)?;
            rows.into_iter().map(row_to_item).collect()
        })
        .await
    }
}

fn to_row(item: &WorkItem) -> NewWorkItemRow {
    NewWorkItemRow {
        id: item.id().into_inner(),
        kind: item.kind().as_str().to_owned(),
        title: item.title().as_str().to_owned(),
        description: item.description().map(str::to_owned),
        due_date: item.due_date(),
        created_by: item.created_by().into_inner(),
        assignee_id: item.assignee().map(ActorId::into_inner),
        department_id: item.department_id().map(DepartmentId::into_inner),
        is_completed: item.is_completed(),
        completed_at: item.completed_at(),
        is_approved: item.is_approved(),
        approved_by: item.approved_by().map(ActorId::into_inner),
        approved_at: item.approved_at(),
        rejection_note: item.rejection_note().map(|note| note.as_str().to_owned()),
        created_at: item.created_at(),
        updated_at: item.updated_at(),
    }
}

fn row_to_item(row: WorkItemRow) -> WorkItemRepositoryResult<WorkItem> {
    let WorkItemRow {
        id,
        kind,
        title,
        description,
        due_date,
        created_by,
        assignee_id,
        department_id,
        is_completed,
        completed_at,
        is_approved,
        approved_by,
        approved_at,
        rejection_note,
        created_at,
        updated_at,
    } = row;

    let data = PersistedWorkItemData {
        id: WorkItemId::from_uuid(id),
        kind: WorkItemKind::try_from(kind.as_str())
            .map_err(WorkItemRepositoryError::persistence)?,
        title: WorkItemTitle::new(title).map_err(WorkItemRepositoryError::persistence)?,
        description,
        due_date,
        created_by: ActorId::from_uuid(created_by),
        assignee: assignee_id.map(ActorId::from_uuid),
        department_id: department_id.map(DepartmentId::from_uuid),
        is_completed,
        completed_at,
        is_approved,
        approved_by: approved_by.map(ActorId::from_uuid),
        approved_at,
        rejection_note,
        created_at,
        updated_at,
    };
    WorkItem::from_persisted(data).map_err(WorkItemRepositoryError::persistence)
}
