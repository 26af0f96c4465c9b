//! OpenAPI documentation configuration.

use crate::controllers::health_controller::HealthResponse;
use crate::responses::{DataResponse, ListResponse, MessageResponse, StatsResponse};
use tally_core::{ErrorResponse, FieldError, TodoStats};
use tally_service::{CreateTodoRequest, ListSource, TodoResponse, UpdateTodoRequest};
use utoipa::OpenApi;

/// OpenAPI documentation for the Tally API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tally API",
        version = "0.1.0",
        description = "Cache-accelerated todo CRUD API",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    paths(
        crate::controllers::todo_controller::list_todos,
        crate::controllers::todo_controller::create_todo,
        crate::controllers::todo_controller::update_todo,
        crate::controllers::todo_controller::delete_todo,
        crate::controllers::todo_controller::stats,
        crate::controllers::health_controller::health_check,
    ),
    components(
        schemas(
            CreateTodoRequest,
            UpdateTodoRequest,
            TodoResponse,
            ListSource,
            TodoStats,
            DataResponse<TodoResponse>,
            ListResponse,
            MessageResponse,
            StatsResponse,
            HealthResponse,
            ErrorResponse,
            FieldError,
        )
    ),
    tags(
        (name = "todos", description = "Todo management endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;
