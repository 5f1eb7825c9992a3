//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::config::DatabaseConfig;
use crate::task::{
    domain::{PageRequest, PersistedTaskData, Task, TaskDescription, TaskId, TaskTitle},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::Error as DieselError;
use tracing::debug;

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// Builds a connection pool from database configuration.
///
/// # Errors
///
/// Returns [`TaskRepositoryError::Persistence`] when the pool cannot open
/// its initial connections within the configured timeout.
pub fn build_pool(config: &DatabaseConfig) -> TaskRepositoryResult<TaskPgPool> {
    let manager = ConnectionManager::<PgConnection>::new(config.url());
    Pool::builder()
        .max_size(config.pool_size())
        .connection_timeout(config.connect_timeout())
        .build(manager)
        .map_err(TaskRepositoryError::persistence)
}

/// `PostgreSQL`-backed task repository.
///
/// Every call checks a connection out of the pool inside a blocking task and
/// returns it when the closure exits, on success or failure alike. Mutations
/// run in a transaction that rolls back on any error.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

impl From<DieselError> for TaskRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn find_page(&self, page: PageRequest) -> TaskRepositoryResult<Vec<Task>> {
        let page_size = i64::from(page.page_size());
        let first_row =
            i64::try_from(page.first_row()).map_err(TaskRepositoryError::persistence)?;

        self.run_blocking(move |connection| {
            let rows = tasks::table
                .order((tasks::created_at.desc(), tasks::id.desc()))
                .limit(page_size)
                .offset(first_row)
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.value())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn exists_by_id(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let exists = diesel::select(diesel::dsl::exists(tasks::table.find(id.value())))
                .get_result::<bool>(connection)?;
            Ok(exists)
        })
        .await
    }

    async fn insert(&self, task: &Task) -> TaskRepositoryResult<Task> {
        let new_row = to_new_row(task);

        self.run_blocking(move |connection| {
            let row = connection.transaction::<_, TaskRepositoryError, _>(|tx_conn| {
                let inserted = diesel::insert_into(tasks::table)
                    .values(&new_row)
                    .returning(TaskRow::as_returning())
                    .get_result::<TaskRow>(tx_conn)?;
                Ok(inserted)
            })?;
            debug!(task_id = row.id, "inserted task row");
            row_to_task(row)
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<Task> {
        let id = task.id().ok_or(TaskRepositoryError::MissingIdentity)?;
        let changeset = to_changeset(task);

        self.run_blocking(move |connection| {
            let row = connection.transaction::<_, TaskRepositoryError, _>(|tx_conn| {
                diesel::update(tasks::table.find(id.value()))
                    .set(&changeset)
                    .returning(TaskRow::as_returning())
                    .get_result::<TaskRow>(tx_conn)
                    .optional()?
                    .ok_or(TaskRepositoryError::NotFound(id))
            })?;
            debug!(task_id = row.id, "updated task row");
            row_to_task(row)
        })
        .await
    }

    async fn delete_by_id(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = connection.transaction::<_, TaskRepositoryError, _>(|tx_conn| {
                let count = diesel::delete(tasks::table.find(id.value())).execute(tx_conn)?;
                Ok(count)
            })?;
            debug!(task_id = id.value(), deleted, "deleted task rows");
            Ok(())
        })
        .await
    }
}

fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        title: task.title().as_str().to_owned(),
        description: task.description().map(|value| value.as_str().to_owned()),
        completed: task.completed(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn to_changeset(task: &Task) -> TaskChangeset {
    TaskChangeset {
        title: task.title().as_str().to_owned(),
        description: task.description().map(|value| value.as_str().to_owned()),
        completed: task.completed(),
        updated_at: task.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title: persisted_title,
        description: persisted_description,
        completed,
        created_at,
        updated_at,
    } = row;

    let title = TaskTitle::new(persisted_title).map_err(TaskRepositoryError::persistence)?;
    let description = persisted_description
        .map(TaskDescription::new)
        .transpose()
        .map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::new(id),
        title,
        description,
        completed,
        created_at,
        updated_at,
    }))
}
