//! Todo-related DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tally_core::{Todo, TodoId};
use utoipa::ToSchema;
use validator::Validate;

/// Request to create a new todo.
///
/// `completed` and `description` take their documented defaults when
/// omitted; a missing `title` deserializes to the empty string and is
/// rejected by validation before any store interaction.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateTodoRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Title is required"))]
    pub title: String,

    #[serde(default)]
    pub completed: bool,

    #[serde(default)]
    pub description: String,
}

fn not_blank(value: &str) -> Result<(), validator::ValidationError> {
    tally_core::validation::rules::not_blank(value)
}

/// Request to update a todo's completion status.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateTodoRequest {
    pub completed: bool,
}

/// Todo response DTO.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TodoResponse {
    #[schema(value_type = uuid::Uuid)]
    pub id: TodoId,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            description: todo.description,
            completed: todo.completed,
            created_at: todo.created_at,
            updated_at: todo.updated_at,
        }
    }
}

/// Where a list response was served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ListSource {
    /// Served from the cached snapshot.
    Cache,
    /// Served from a fresh store read.
    Database,
}

/// Full todo list tagged with its source.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TodoListResponse {
    pub source: ListSource,
    pub todos: Vec<TodoResponse>,
}
