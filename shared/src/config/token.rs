//! Token lifecycle configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// Lifetimes and generation limits for access/refresh token pairs
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenConfig {
    /// Access token lifetime in minutes
    pub access_token_expiry_minutes: i64,

    /// Refresh token lifetime in days
    pub refresh_token_expiry_days: i64,

    /// Upper bound on regenerations when a candidate digest already exists
    #[serde(default = "default_max_generation_attempts")]
    pub max_generation_attempts: u32,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            access_token_expiry_minutes: 30,
            refresh_token_expiry_days: 7,
            max_generation_attempts: default_max_generation_attempts(),
        }
    }
}

impl TokenConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            access_token_expiry_minutes: env_or(
                "ACCESS_TOKEN_EXPIRY_MINUTES",
                defaults.access_token_expiry_minutes,
            ),
            refresh_token_expiry_days: env_or(
                "REFRESH_TOKEN_EXPIRY_DAYS",
                defaults.refresh_token_expiry_days,
            ),
            max_generation_attempts: env_or(
                "TOKEN_MAX_GENERATION_ATTEMPTS",
                defaults.max_generation_attempts,
            ),
        }
    }
}

fn default_max_generation_attempts() -> u32 {
    16
}
