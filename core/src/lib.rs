//! # VoiceChanger Core
//!
//! Core business logic and domain layer for the VoiceChanger API.
//! This crate contains the token entities, the token lifecycle service,
//! the repository interface it persists through, the audio conversion
//! collaborator interface, and the error types shared by every layer.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod errors;

// Re-export commonly used types for convenience
pub use domain::*;
pub use services::*;
pub use repositories::*;
pub use errors::*;
