//! PostgreSQL repository implementations.

mod todo_repository;

pub use todo_repository::PgTodoRepository;
