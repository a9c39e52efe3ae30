//! Shared configuration and response types for the VoiceChanger server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Response bodies shared by every endpoint

pub mod config;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CorsConfig, DatabaseConfig, Environment, LoggingConfig, ServerConfig, TokenConfig,
};
pub use types::{ErrorResponse, HealthResponse};
