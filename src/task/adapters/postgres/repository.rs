//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{NewTask, Recurrence, Task, TaskId, TaskPatch},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
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

    /// Builds a pool for `database_url` and wraps it in a repository.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the pool cannot
    /// establish its initial connections.
    pub fn connect(database_url: &str) -> TaskRepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = Pool::builder()
            .build(manager)
            .map_err(TaskRepositoryError::persistence)?;
        Ok(Self::new(pool))
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

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn create(&self, fields: NewTask) -> TaskRepositoryResult<Task> {
        let new_row = to_new_row(fields);
        self.run_blocking(move |connection| {
            let row = diesel::insert_into(tasks::table)
                .values(&new_row)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            row_to_task(row)
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.value())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(|connection| {
            let rows = tasks::table
                .order(tasks::id.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn update(&self, id: TaskId, patch: TaskPatch) -> TaskRepositoryResult<Task> {
        let changeset = to_changeset(patch);
        self.run_blocking(move |connection| {
            // Diesel rejects empty changesets, so a no-op update is a lookup.
            let lookup = if changeset == TaskChangeset::default() {
                tasks::table
                    .find(id.value())
                    .select(TaskRow::as_select())
                    .first::<TaskRow>(connection)
                    .optional()
            } else {
                diesel::update(tasks::table.find(id.value()))
                    .set(&changeset)
                    .returning(TaskRow::as_returning())
                    .get_result::<TaskRow>(connection)
                    .optional()
            };
            let row = lookup.map_err(TaskRepositoryError::persistence)?;

            row.map_or(Err(TaskRepositoryError::NotFound(id)), row_to_task)
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            diesel::delete(tasks::table.find(id.value()))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }
}

fn recurrence_column(recurring: Recurrence) -> Option<String> {
    recurring.to_optional_str().map(str::to_owned)
}

fn to_new_row(fields: NewTask) -> NewTaskRow {
    let NewTask {
        title,
        description,
        due_date,
        priority,
        status,
        recurring,
        reminder,
        to,
    } = fields;
    NewTaskRow {
        title,
        description,
        due_date,
        priority,
        status,
        recurring: recurrence_column(recurring),
        reminder,
        recipient: to,
    }
}

fn to_changeset(patch: TaskPatch) -> TaskChangeset {
    let TaskPatch {
        title,
        description,
        due_date,
        priority,
        status,
        recurring,
        reminder,
        to,
    } = patch;
    TaskChangeset {
        title,
        description,
        due_date,
        priority,
        status,
        recurring: recurring.map(recurrence_column),
        reminder,
        recipient: to,
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title,
        description,
        due_date,
        priority,
        status,
        recurring: persisted_recurring,
        reminder,
        recipient,
    } = row;

    let recurring = Recurrence::parse_optional(persisted_recurring.as_deref())
        .map_err(TaskRepositoryError::persistence)?;

    let fields = NewTask {
        title,
        description,
        due_date,
        priority,
        status,
        recurring,
        reminder,
        to: recipient,
    };
    Ok(Task::from_new(TaskId::new(id), fields))
}
