//! Todo service trait definition.

use crate::dto::{CreateTodoRequest, TodoListResponse, TodoResponse, UpdateTodoRequest};
use async_trait::async_trait;
use tally_core::{Interface, TallyResult, TodoId, TodoStats};

/// Todo service trait.
#[async_trait]
pub trait TodoService: Interface + Send + Sync {
    /// Lists all todos, serving from the cache when a fresh snapshot exists.
    async fn list_todos(&self) -> TallyResult<TodoListResponse>;

    /// Creates a new todo.
    async fn create_todo(&self, request: CreateTodoRequest) -> TallyResult<TodoResponse>;

    /// Updates a todo's completion status.
    async fn update_todo(
        &self,
        id: TodoId,
        request: UpdateTodoRequest,
    ) -> TallyResult<TodoResponse>;

    /// Deletes a todo.
    async fn delete_todo(&self, id: TodoId) -> TallyResult<()>;

    /// Computes aggregate counts over all todos. Never cached.
    async fn stats(&self) -> TallyResult<TodoStats>;
}
