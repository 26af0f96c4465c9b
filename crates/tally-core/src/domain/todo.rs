//! Todo entity.

use crate::TodoId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Todo entity, the system's only persisted record.
///
/// `title` is never empty for a persisted record, and
/// `updated_at >= created_at` always holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Todo {
    /// Unique identifier, assigned at creation and immutable thereafter.
    pub id: TodoId,

    /// Non-empty title.
    pub title: String,

    /// Free-form description, empty string when not provided.
    pub description: String,

    /// Completion flag.
    pub completed: bool,

    /// Creation timestamp, set once.
    pub created_at: DateTime<Utc>,

    /// Refreshed on every mutation.
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Creates a new todo with a fresh ID and identical creation/update
    /// timestamps.
    #[must_use]
    pub fn new(title: String, description: String, completed: bool) -> Self {
        let now = Utc::now();
        Self {
            id: TodoId::new(),
            title,
            description,
            completed,
            created_at: now,
            updated_at: now,
        }
    }

    /// Checks if the todo is still pending.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        !self.completed
    }
}

/// Aggregate counts over all todos, computed store-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TodoStats {
    /// Total number of records.
    pub total: i64,
    /// Records with `completed = true`.
    pub completed: i64,
    /// Records with `completed = false`.
    pub pending: i64,
}
