//! Ordertrack Data Store — SQLite persistence layer.
//!
//! Owns the schema, the connection handle and the row-level queries
//! the domain crate builds on.

pub mod migrations;
pub mod pool;
pub mod queries;

pub use pool::{DbError, DbPool, DbResult};
