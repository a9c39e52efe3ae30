//! API response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Error body returned by every failing endpoint
///
/// The body carries only a human-readable message so that clients cannot
/// distinguish an unknown token from an expired one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Health status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall health status
    pub status: HealthStatus,

    /// Service name
    pub service: String,

    /// Server version
    pub version: String,

    /// Server timestamp
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    /// Build a health response stamped with the current time
    pub fn new(status: HealthStatus, service: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            status,
            service: service.into(),
            version: version.into(),
            timestamp: Utc::now(),
        }
    }
}
