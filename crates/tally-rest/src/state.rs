//! Application state for Axum handlers.

use std::sync::Arc;
use tally_service::TodoService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub todo_service: Arc<dyn TodoService>,
    /// Instance label echoed in every response.
    pub instance_name: String,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(todo_service: Arc<dyn TodoService>, instance_name: impl Into<String>) -> Self {
        Self {
            todo_service,
            instance_name: instance_name.into(),
        }
    }
}
