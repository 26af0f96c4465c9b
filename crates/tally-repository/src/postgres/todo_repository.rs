//! PostgreSQL todo repository implementation.

use crate::{traits::TodoRepository, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tally_core::{TallyResult, Todo, TodoId, TodoStats};
use tracing::debug;
use uuid::Uuid;

/// PostgreSQL todo repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = TodoRepository)]
pub struct PgTodoRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl PgTodoRepository {
    /// Creates a new PostgreSQL todo repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a todo.
#[derive(Debug, FromRow)]
struct TodoRow {
    id: Uuid,
    title: String,
    description: String,
    completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Self {
            id: TodoId::from_uuid(row.id),
            title: row.title,
            description: row.description,
            completed: row.completed,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Database row representation of the stats aggregate.
#[derive(Debug, FromRow)]
struct StatsRow {
    total: i64,
    completed: i64,
    pending: i64,
}

impl From<StatsRow> for TodoStats {
    fn from(row: StatsRow) -> Self {
        Self {
            total: row.total,
            completed: row.completed,
            pending: row.pending,
        }
    }
}

#[async_trait]
impl TodoRepository for PgTodoRepository {
    async fn find_all(&self) -> TallyResult<Vec<Todo>> {
        debug!("Finding all todos");

        let rows = sqlx::query_as::<_, TodoRow>(
            r#"
            SELECT id, title, description, completed, created_at, updated_at
            FROM todos
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(Todo::from).collect())
    }

    async fn save(&self, todo: &Todo) -> TallyResult<Todo> {
        debug!("Saving todo: {}", todo.id);

        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            INSERT INTO todos (id, title, description, completed, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, description, completed, created_at, updated_at
            "#,
        )
        .bind(todo.id.into_inner())
        .bind(&todo.title)
        .bind(&todo.description)
        .bind(todo.completed)
        .bind(todo.created_at)
        .bind(todo.updated_at)
        .fetch_one(self.pool.inner())
        .await?;

        Ok(Todo::from(row))
    }

    async fn set_completed(&self, id: TodoId, completed: bool) -> TallyResult<Option<Todo>> {
        debug!("Updating todo {} completed={}", id, completed);

        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            UPDATE todos
            SET completed = $1, updated_at = $2
            WHERE id = $3
            RETURNING id, title, description, completed, created_at, updated_at
            "#,
        )
        .bind(completed)
        .bind(Utc::now())
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(Todo::from))
    }

    async fn delete(&self, id: TodoId) -> TallyResult<bool> {
        debug!("Deleting todo: {}", id);

        let deleted: Option<Uuid> =
            sqlx::query_scalar("DELETE FROM todos WHERE id = $1 RETURNING id")
                .bind(id.into_inner())
                .fetch_optional(self.pool.inner())
                .await?;

        Ok(deleted.is_some())
    }

    async fn stats(&self) -> TallyResult<TodoStats> {
        debug!("Computing todo stats");

        let row = sqlx::query_as::<_, StatsRow>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE completed) AS completed,
                COUNT(*) FILTER (WHERE NOT completed) AS pending
            FROM todos
            "#,
        )
        .fetch_one(self.pool.inner())
        .await?;

        Ok(TodoStats::from(row))
    }
}

impl std::fmt::Debug for PgTodoRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgTodoRepository").finish_non_exhaustive()
    }
}
