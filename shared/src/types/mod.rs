//! Type definitions shared by every endpoint
//!
//! - `response` - Error bodies and health checks

pub mod response;

pub use response::{ErrorResponse, HealthResponse, HealthStatus};
