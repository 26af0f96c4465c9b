//! # Tally Repository
//!
//! Repository layer for Tally backed by PostgreSQL via SQLx.
//! Provides the database pool lifecycle and the todo repository
//! implementation.

pub mod pool;
pub mod postgres;
pub mod traits;

pub use pool::*;
pub use postgres::*;
pub use traits::*;
