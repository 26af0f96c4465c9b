//! # Tally Service
//!
//! Business logic service layer for Tally.
//! Coordinates the relational store and the read cache through a
//! cache-aside read path and write-path invalidation.

pub mod cache;
pub mod dto;
pub mod todo_service;
pub mod todo_service_impl;

pub use cache::*;
pub use dto::*;
pub use todo_service::*;
pub use todo_service_impl::*;
