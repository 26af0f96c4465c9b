//! Todo management controller.

use crate::{
    responses::{ApiResult, AppError, DataResponse, ListResponse, MessageResponse, StatsResponse},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use tally_core::{TallyError, TodoId};
use tally_service::{CreateTodoRequest, TodoResponse, UpdateTodoRequest};
use tracing::debug;

/// Creates the todo router.
///
/// Paths are top-level (`/todos`, `/stats`) rather than nested under a
/// version prefix; they are part of the external contract.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/:id", patch(update_todo).delete(delete_todo))
        .route("/stats", get(stats))
}

/// List all todos, served from the cache when a fresh snapshot exists.
#[utoipa::path(
    get,
    path = "/todos",
    tag = "todos",
    responses(
        (status = 200, description = "Full todo list tagged with its source", body = ListResponse),
        (status = 500, description = "Backend failure", body = tally_core::ErrorResponse)
    )
)]
pub async fn list_todos(State(state): State<AppState>) -> ApiResult<ListResponse> {
    debug!("List todos request");

    let list = state.todo_service.list_todos().await?;
    Ok(Json(ListResponse {
        source: list.source,
        instance: state.instance_name,
        data: list.todos,
    }))
}

/// Create a new todo.
#[utoipa::path(
    post,
    path = "/todos",
    tag = "todos",
    request_body = CreateTodoRequest,
    responses(
        (status = 201, description = "Todo created", body = DataResponse<TodoResponse>),
        (status = 400, description = "Missing or blank title", body = tally_core::ErrorResponse),
        (status = 500, description = "Backend failure", body = tally_core::ErrorResponse)
    )
)]
pub async fn create_todo(
    State(state): State<AppState>,
    Json(request): Json<CreateTodoRequest>,
) -> Result<(StatusCode, Json<DataResponse<TodoResponse>>), AppError> {
    debug!("Create todo request: {}", request.title);

    let todo = state.todo_service.create_todo(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(state.instance_name, todo)),
    ))
}

/// Update a todo's completion status.
#[utoipa::path(
    patch,
    path = "/todos/{id}",
    tag = "todos",
    params(("id" = String, Path, description = "Todo ID")),
    request_body = UpdateTodoRequest,
    responses(
        (status = 200, description = "Todo updated", body = DataResponse<TodoResponse>),
        (status = 400, description = "Malformed ID", body = tally_core::ErrorResponse),
        (status = 404, description = "No todo with this ID", body = tally_core::ErrorResponse),
        (status = 500, description = "Backend failure", body = tally_core::ErrorResponse)
    )
)]
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateTodoRequest>,
) -> ApiResult<DataResponse<TodoResponse>> {
    debug!("Update todo request: {} -> completed={}", id, request.completed);

    let todo_id = parse_todo_id(&id)?;
    let todo = state.todo_service.update_todo(todo_id, request).await?;
    Ok(Json(DataResponse::new(state.instance_name, todo)))
}

/// Delete a todo.
#[utoipa::path(
    delete,
    path = "/todos/{id}",
    tag = "todos",
    params(("id" = String, Path, description = "Todo ID")),
    responses(
        (status = 200, description = "Todo deleted", body = MessageResponse),
        (status = 400, description = "Malformed ID", body = tally_core::ErrorResponse),
        (status = 404, description = "No todo with this ID", body = tally_core::ErrorResponse),
        (status = 500, description = "Backend failure", body = tally_core::ErrorResponse)
    )
)]
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<MessageResponse> {
    debug!("Delete todo request: {}", id);

    let todo_id = parse_todo_id(&id)?;
    state.todo_service.delete_todo(todo_id).await?;
    Ok(Json(MessageResponse {
        instance: state.instance_name,
        message: "Todo deleted successfully".to_string(),
    }))
}

/// Aggregate counts over all todos. Always computed store-side.
#[utoipa::path(
    get,
    path = "/stats",
    tag = "todos",
    responses(
        (status = 200, description = "Aggregate counts", body = StatsResponse),
        (status = 500, description = "Backend failure", body = tally_core::ErrorResponse)
    )
)]
pub async fn stats(State(state): State<AppState>) -> ApiResult<StatsResponse> {
    debug!("Stats request");

    let stats = state.todo_service.stats().await?;
    Ok(Json(StatsResponse {
        instance: state.instance_name,
        stats,
    }))
}

/// Helper to parse a todo ID from a path parameter.
fn parse_todo_id(id: &str) -> Result<TodoId, AppError> {
    TodoId::parse(id)
        .map_err(|_| AppError(TallyError::Validation(format!("Invalid todo ID: {}", id))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request};
    use http_body_util::BodyExt;
    use std::sync::{Arc, Mutex};
    use tally_core::{TallyResult, Todo, TodoStats, ValidateExt};
    use tally_service::{ListSource, TodoListResponse, TodoService};
    use tower::ServiceExt;

    /// In-memory stand-in for the real service; the cache-aside behavior
    /// itself is covered by the service layer tests, so this stub only
    /// reports the configured list source.
    struct StubTodoService {
        todos: Mutex<Vec<Todo>>,
        source: ListSource,
    }

    impl StubTodoService {
        fn new() -> Self {
            Self {
                todos: Mutex::new(Vec::new()),
                source: ListSource::Database,
            }
        }

        fn with_todos(todos: Vec<Todo>) -> Self {
            Self {
                todos: Mutex::new(todos),
                source: ListSource::Database,
            }
        }

        fn cached(todos: Vec<Todo>) -> Self {
            Self {
                todos: Mutex::new(todos),
                source: ListSource::Cache,
            }
        }

        fn len(&self) -> usize {
            self.todos.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl TodoService for StubTodoService {
        async fn list_todos(&self) -> TallyResult<TodoListResponse> {
            let todos = self.todos.lock().unwrap().clone();
            Ok(TodoListResponse {
                source: self.source,
                todos: todos.into_iter().map(TodoResponse::from).collect(),
            })
        }

        async fn create_todo(&self, request: CreateTodoRequest) -> TallyResult<TodoResponse> {
            request.validate_request()?;
            let todo = Todo::new(request.title, request.description, request.completed);
            self.todos.lock().unwrap().push(todo.clone());
            Ok(TodoResponse::from(todo))
        }

        async fn update_todo(
            &self,
            id: TodoId,
            request: UpdateTodoRequest,
        ) -> TallyResult<TodoResponse> {
            let mut todos = self.todos.lock().unwrap();
            let todo = todos
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or_else(|| TallyError::not_found("Todo", id))?;
            todo.completed = request.completed;
            todo.updated_at = chrono::Utc::now();
            Ok(TodoResponse::from(todo.clone()))
        }

        async fn delete_todo(&self, id: TodoId) -> TallyResult<()> {
            let mut todos = self.todos.lock().unwrap();
            let before = todos.len();
            todos.retain(|t| t.id != id);
            if todos.len() == before {
                return Err(TallyError::not_found("Todo", id));
            }
            Ok(())
        }

        async fn stats(&self) -> TallyResult<TodoStats> {
            let todos = self.todos.lock().unwrap();
            let total = todos.len() as i64;
            let completed = todos.iter().filter(|t| t.completed).count() as i64;
            Ok(TodoStats {
                total,
                completed,
                pending: total - completed,
            })
        }
    }

    /// Service whose every operation fails, for the 500 path.
    struct FailingTodoService;

    #[async_trait]
    impl TodoService for FailingTodoService {
        async fn list_todos(&self) -> TallyResult<TodoListResponse> {
            Err(TallyError::Database("connection refused".to_string()))
        }

        async fn create_todo(&self, _request: CreateTodoRequest) -> TallyResult<TodoResponse> {
            Err(TallyError::Database("connection refused".to_string()))
        }

        async fn update_todo(
            &self,
            _id: TodoId,
            _request: UpdateTodoRequest,
        ) -> TallyResult<TodoResponse> {
            Err(TallyError::Database("connection refused".to_string()))
        }

        async fn delete_todo(&self, _id: TodoId) -> TallyResult<()> {
            Err(TallyError::Database("connection refused".to_string()))
        }

        async fn stats(&self) -> TallyResult<TodoStats> {
            Err(TallyError::Database("connection refused".to_string()))
        }
    }

    fn test_app(service: Arc<dyn TodoService>) -> Router {
        Router::new()
            .merge(router())
            .with_state(AppState::new(service, "test-1"))
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_list_todos_database_sourced() {
        let service = Arc::new(StubTodoService::with_todos(vec![Todo::new(
            "buy milk".to_string(),
            String::new(),
            false,
        )]));
        let app = test_app(service);

        let response = app.oneshot(get_request("/todos")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["source"], "database");
        assert_eq!(body["instance"], "test-1");
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"][0]["title"], "buy milk");
    }

    #[tokio::test]
    async fn test_list_todos_cache_sourced() {
        let service = Arc::new(StubTodoService::cached(vec![Todo::new(
            "buy milk".to_string(),
            String::new(),
            false,
        )]));
        let app = test_app(service);

        let response = app.oneshot(get_request("/todos")).await.unwrap();
        let body = body_json(response).await;
        assert_eq!(body["source"], "cache");
    }

    #[tokio::test]
    async fn test_create_todo_returns_201_with_defaults() {
        let service = Arc::new(StubTodoService::new());
        let app = test_app(service.clone());

        let response = app
            .oneshot(json_request(
                "POST",
                "/todos",
                serde_json::json!({"title": "buy milk"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = body_json(response).await;
        assert_eq!(body["instance"], "test-1");
        assert_eq!(body["data"]["title"], "buy milk");
        assert_eq!(body["data"]["completed"], false);
        assert_eq!(body["data"]["description"], "");
        assert_eq!(body["data"]["created_at"], body["data"]["updated_at"]);
        assert_eq!(service.len(), 1);
    }

    #[tokio::test]
    async fn test_create_todo_blank_title_is_400() {
        let service = Arc::new(StubTodoService::new());
        let app = test_app(service.clone());

        for title in [serde_json::json!({}), serde_json::json!({"title": "  "})] {
            let response = app
                .clone()
                .oneshot(json_request("POST", "/todos", title))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);

            let body = body_json(response).await;
            assert_eq!(body["code"], "VALIDATION_ERROR");
        }

        // Nothing was persisted
        assert_eq!(service.len(), 0);
    }

    #[tokio::test]
    async fn test_create_todo_malformed_json_is_client_error() {
        let app = test_app(Arc::new(StubTodoService::new()));

        let request = Request::builder()
            .method("POST")
            .uri("/todos")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_update_todo_sets_completed() {
        let todo = Todo::new("buy milk".to_string(), String::new(), false);
        let id = todo.id;
        let app = test_app(Arc::new(StubTodoService::with_todos(vec![todo])));

        let response = app
            .oneshot(json_request(
                "PATCH",
                &format!("/todos/{}", id),
                serde_json::json!({"completed": true}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["data"]["completed"], true);
        assert_eq!(body["instance"], "test-1");
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_404() {
        let app = test_app(Arc::new(StubTodoService::new()));

        let response = app
            .oneshot(json_request(
                "PATCH",
                &format!("/todos/{}", TodoId::new()),
                serde_json::json!({"completed": true}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_update_malformed_id_is_400() {
        let app = test_app(Arc::new(StubTodoService::new()));

        let response = app
            .oneshot(json_request(
                "PATCH",
                "/todos/not-a-uuid",
                serde_json::json!({"completed": true}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_delete_todo_returns_confirmation() {
        let todo = Todo::new("buy milk".to_string(), String::new(), false);
        let id = todo.id;
        let service = Arc::new(StubTodoService::with_todos(vec![todo]));
        let app = test_app(service.clone());

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/todos/{}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Todo deleted successfully");
        assert_eq!(body["instance"], "test-1");
        assert_eq!(service.len(), 0);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_404() {
        let app = test_app(Arc::new(StubTodoService::new()));

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/todos/{}", TodoId::new()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_stats_shape() {
        let service = Arc::new(StubTodoService::with_todos(vec![
            Todo::new("done".to_string(), String::new(), true),
            Todo::new("open".to_string(), String::new(), false),
        ]));
        let app = test_app(service);

        let response = app.oneshot(get_request("/stats")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["instance"], "test-1");
        assert_eq!(body["stats"]["total"], 2);
        assert_eq!(body["stats"]["completed"], 1);
        assert_eq!(body["stats"]["pending"], 1);
    }

    #[tokio::test]
    async fn test_backend_failure_is_generic_500() {
        let app = test_app(Arc::new(FailingTodoService));

        for uri in ["/todos", "/stats"] {
            let response = app.clone().oneshot(get_request(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

            let body = body_json(response).await;
            // Detail stays server-side
            assert_eq!(body["message"], "Internal server error");
        }
    }
}
