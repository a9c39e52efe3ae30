//! # Infrastructure Layer
//!
//! Concrete implementations of the interfaces declared in `vc_core`:
//!
//! - **Database**: SQLite connection pool, schema setup and the token
//!   repository, all through SQLx
//! - **Audio**: WAV decoding and re-encoding through `hound`

// Re-export core types for convenience
pub use vc_core::errors::*;

use vc_core::errors::DomainError;

/// Database module - SQLite implementations using SQLx
pub mod database;

/// Audio module - WAV conversion
pub mod audio;

pub use audio::WavTransformer;
pub use database::{DatabasePool, SqliteTokenRepository};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection or query error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Filesystem error while preparing the database location
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        DomainError::Storage {
            message: error.to_string(),
        }
    }
}
