//! Cache key definitions.

/// Key holding the full unfiltered todo list snapshot.
///
/// The literal is part of the external cache contract and must not be
/// namespaced.
pub const TODO_LIST: &str = "todos:all";

/// Returns the cache key for the full todo list snapshot.
#[must_use]
pub const fn todo_list() -> &'static str {
    TODO_LIST
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_todo_list_key() {
        assert_eq!(todo_list(), "todos:all");
    }
}
