//! API response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tally_core::{ErrorResponse, TallyError, TodoStats};
use tally_service::{ListSource, TodoResponse};
use tracing::error;
use utoipa::ToSchema;

/// Response envelope carrying a single record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DataResponse<T> {
    /// Instance label for multi-instance identification.
    pub instance: String,
    pub data: T,
}

impl<T> DataResponse<T> {
    /// Wraps a record in the instance envelope.
    pub fn new(instance: impl Into<String>, data: T) -> Self {
        Self {
            instance: instance.into(),
            data,
        }
    }
}

/// Response envelope for the todo list, tagged with its source.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListResponse {
    /// Whether the list was served from the cache or the database.
    pub source: ListSource,
    pub instance: String,
    pub data: Vec<TodoResponse>,
}

/// Response envelope carrying a confirmation message.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub instance: String,
    pub message: String,
}

/// Response envelope for aggregate counts.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatsResponse {
    pub instance: String,
    pub stats: TodoStats,
}

/// Application error type for Axum.
#[derive(Debug)]
pub struct AppError(pub TallyError);

impl From<TallyError> for AppError {
    fn from(err: TallyError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Backend failure detail stays server-side; callers get a generic
        // message.
        let error_response = if self.0.is_client_safe() {
            ErrorResponse::from_error(&self.0)
        } else {
            error!("Request failed: {}", self.0);
            ErrorResponse {
                code: self.0.error_code().to_string(),
                message: "Internal server error".to_string(),
                details: None,
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Result type for Axum handlers.
pub type ApiResult<T> = Result<Json<T>, AppError>;
