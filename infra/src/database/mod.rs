//! Database module - SQLite implementations using SQLx
//!
//! This module provides the database access layer:
//! - Connection pool management
//! - Idempotent schema setup
//! - The token repository implementation

pub mod connection;
pub mod sqlite;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use connection::{DatabasePool, TOKENS_SCHEMA};
pub use sqlite::SqliteTokenRepository;
