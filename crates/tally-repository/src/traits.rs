//! Repository trait definitions.

use async_trait::async_trait;
use tally_core::{Interface, TallyResult, Todo, TodoId, TodoStats};

/// Todo repository trait.
#[async_trait]
pub trait TodoRepository: Interface + Send + Sync {
    /// Finds all todos ordered by creation time descending.
    async fn find_all(&self) -> TallyResult<Vec<Todo>>;

    /// Saves a new todo.
    async fn save(&self, todo: &Todo) -> TallyResult<Todo>;

    /// Sets the completion flag and refreshes `updated_at` for the matching
    /// record. Returns `None` when no record matches.
    async fn set_completed(&self, id: TodoId, completed: bool) -> TallyResult<Option<Todo>>;

    /// Deletes a todo by ID. Returns `true` if a record was removed.
    async fn delete(&self, id: TodoId) -> TallyResult<bool>;

    /// Computes aggregate counts over all todos.
    async fn stats(&self) -> TallyResult<TodoStats>;
}
