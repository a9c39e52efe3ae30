//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

// Re-export all error types
pub use types::{AudioError, TokenError, ValidationError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    /// A uniqueness constraint rejected a write
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// The backing store failed; never retried by the service
    #[error("Storage failure: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),

    #[error(transparent)]
    Audio(#[from] AudioError),
}

impl DomainError {
    /// Whether the caller sent something unusable (400-class)
    ///
    /// Unknown and expired tokens count as client errors; storage and
    /// internal failures do not.
    pub fn is_client_error(&self) -> bool {
        match self {
            DomainError::ValidationErr(_) | DomainError::Audio(_) => true,
            DomainError::Token(token_error) => !matches!(token_error, TokenError::TokenGenerationFailed),
            DomainError::Conflict { .. } | DomainError::Storage { .. } | DomainError::Internal { .. } => false,
        }
    }
}
