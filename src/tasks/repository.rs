use async_trait::async_trait;
use sqlx::PgPool;

use crate::tasks::{CreateTask, Task, TaskError, TaskPatch};

/// Storage boundary for tasks
///
/// Every mutating operation is atomic for the affected row. Lookups of an
/// unknown id return `Ok(None)`; callers decide how to report it.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Insert a task; id and created_at are assigned by the store
    async fn create(&self, task: &CreateTask) -> Result<Task, TaskError>;

    /// All tasks, oldest first (ties broken by id)
    async fn list(&self) -> Result<Vec<Task>, TaskError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Task>, TaskError>;

    /// Apply only the fields present in `patch`; returns the updated record
    async fn update(&self, id: i32, patch: &TaskPatch) -> Result<Option<Task>, TaskError>;

    /// Remove a task, returning the record as it was before deletion
    async fn delete(&self, id: i32) -> Result<Option<Task>, TaskError>;
}

/// PostgreSQL-backed task store
#[derive(Clone)]
pub struct PgTaskRepository {
    pool: PgPool,
}

impl PgTaskRepository {
    /// Create a new PgTaskRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStore for PgTaskRepository {
    async fn create(&self, task: &CreateTask) -> Result<Task, TaskError> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO todo_db.tasks (title, is_completed, notes)
            VALUES ($1, $2, $3)
            RETURNING id, title, notes, is_completed, created_at
            "#,
        )
        .bind(&task.title)
        .bind(task.is_completed)
        .bind(&task.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    async fn list(&self) -> Result<Vec<Task>, TaskError> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, notes, is_completed, created_at
            FROM todo_db.tasks
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Task>, TaskError> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, notes, is_completed, created_at
            FROM todo_db.tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    async fn update(&self, id: i32, patch: &TaskPatch) -> Result<Option<Task>, TaskError> {
        // One statement, so the read-modify-write is atomic per row; each
        // column is only overwritten when its flag is set
        let completed = patch.is_completed.as_change();
        let notes = patch.notes.as_change();

        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE todo_db.tasks
            SET is_completed = CASE WHEN $2 THEN $3 ELSE is_completed END,
                notes = CASE WHEN $4 THEN $5 ELSE notes END
            WHERE id = $1
            RETURNING id, title, notes, is_completed, created_at
            "#,
        )
        .bind(id)
        .bind(completed.is_some())
        .bind(completed.flatten().copied())
        .bind(notes.is_some())
        .bind(notes.flatten().cloned())
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    async fn delete(&self, id: i32) -> Result<Option<Task>, TaskError> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            DELETE FROM todo_db.tasks
            WHERE id = $1
            RETURNING id, title, notes, is_completed, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }
}
