//! Error types for token management and request validation
//!
//! The display strings of client-facing variants are the messages returned
//! in API error bodies.

use thiserror::Error;

/// Token-related errors
///
/// `TokenExpired` and `AccessDenied` cover both unknown and expired tokens
/// so callers cannot tell which case occurred.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Access token missing or not valid hex
    #[error("Invalid Access-Token")]
    InvalidAccessToken,

    /// Refresh token missing or not valid hex
    #[error("Invalid Refresh-Token")]
    InvalidRefreshToken,

    /// Refresh token unknown or past its expiry (refresh and revoke paths)
    #[error("Refresh-Token expired")]
    TokenExpired,

    /// Access token unknown or past its expiry (resource gate)
    #[error("Access-Token expired")]
    AccessDenied,

    /// No unique digest could be produced within the attempt budget
    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Validation errors for non-token request fields
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Payload too large: {field} (max: {max_bytes} bytes)")]
    PayloadTooLarge { field: String, max_bytes: usize },
}

/// Errors raised around the audio conversion endpoint
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    /// The upload carried no audio part
    #[error("Audio file not found")]
    MissingFile,

    /// The `params` field was not valid JSON or held out-of-range values
    #[error("Invalid conversion parameters")]
    InvalidParams,

    /// The audio part could not be decoded as WAV
    #[error("Invalid audio file")]
    InvalidAudio,
}
