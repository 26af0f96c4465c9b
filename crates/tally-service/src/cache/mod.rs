//! Caching infrastructure for the service layer.
//!
//! This module provides a cache abstraction with a Redis implementation.
//! The todo list snapshot is the only cached value; it expires after
//! [`DEFAULT_TTL`] or is deleted explicitly on any mutation.

mod cache_interface;
pub mod cache_keys;
mod redis_cache;

pub use cache_interface::{CacheExt, CacheInterface};
pub use redis_cache::{RedisCacheService, RedisCacheServiceParameters, DEFAULT_TTL};
