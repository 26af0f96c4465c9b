//! Todo service implementation.
//!
//! Carries the cache-aside read path (probe, miss, populate) and the
//! write-path invalidation of the list snapshot. Trait definition lives
//! in `todo_service.rs`.

use crate::cache::{cache_keys, CacheExt, CacheInterface, DEFAULT_TTL};
use crate::dto::{
    CreateTodoRequest, ListSource, TodoListResponse, TodoResponse, UpdateTodoRequest,
};
use crate::todo_service::TodoService;
use async_trait::async_trait;
use shaku::Component;
use std::sync::Arc;
use tally_core::{TallyError, TallyResult, Todo, TodoId, TodoStats, ValidateExt};
use tally_repository::TodoRepository;
use tracing::{debug, info};

/// Todo service component.
///
/// Holds no mutable state of its own; all shared state lives in the
/// injected repository and cache.
#[derive(Component)]
#[shaku(interface = TodoService)]
pub struct TodoServiceComponent {
    #[shaku(inject)]
    repository: Arc<dyn TodoRepository>,
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
}

impl TodoServiceComponent {
    /// Creates a new todo service.
    #[must_use]
    pub fn new(repository: Arc<dyn TodoRepository>, cache: Arc<dyn CacheInterface>) -> Self {
        Self { repository, cache }
    }
}

#[async_trait]
impl TodoService for TodoServiceComponent {
    async fn list_todos(&self) -> TallyResult<TodoListResponse> {
        debug!("Listing todos");

        let key = cache_keys::todo_list();

        // Try cache first
        if let Some(todos) = self.cache.get::<Vec<TodoResponse>>(key).await? {
            debug!("Serving todo list from cache");
            return Ok(TodoListResponse {
                source: ListSource::Cache,
                todos,
            });
        }

        // Cache miss: read the store and populate the snapshot
        let todos: Vec<TodoResponse> = self
            .repository
            .find_all()
            .await?
            .into_iter()
            .map(TodoResponse::from)
            .collect();

        self.cache.set(key, &todos, DEFAULT_TTL).await?;

        Ok(TodoListResponse {
            source: ListSource::Database,
            todos,
        })
    }

    async fn create_todo(&self, request: CreateTodoRequest) -> TallyResult<TodoResponse> {
        debug!("Creating todo: {}", request.title);

        // Validate before any store interaction
        request.validate_request()?;

        let todo = Todo::new(request.title, request.description, request.completed);
        let saved = self.repository.save(&todo).await?;

        // Invalidate the whole snapshot rather than patching it
        self.cache.delete(cache_keys::todo_list()).await?;

        info!("Todo created: {}", saved.id);
        Ok(TodoResponse::from(saved))
    }

    async fn update_todo(
        &self,
        id: TodoId,
        request: UpdateTodoRequest,
    ) -> TallyResult<TodoResponse> {
        debug!("Updating todo: {} -> completed={}", id, request.completed);

        let updated = self
            .repository
            .set_completed(id, request.completed)
            .await?
            .ok_or_else(|| TallyError::not_found("Todo", id))?;

        self.cache.delete(cache_keys::todo_list()).await?;

        info!("Todo updated: {}", id);
        Ok(TodoResponse::from(updated))
    }

    async fn delete_todo(&self, id: TodoId) -> TallyResult<()> {
        debug!("Deleting todo: {}", id);

        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(TallyError::not_found("Todo", id));
        }

        self.cache.delete(cache_keys::todo_list()).await?;

        info!("Todo deleted: {}", id);
        Ok(())
    }

    async fn stats(&self) -> TallyResult<TodoStats> {
        debug!("Computing todo stats");
        self.repository.stats().await
    }
}

impl std::fmt::Debug for TodoServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoServiceComponent").finish_non_exhaustive()
    }
}
