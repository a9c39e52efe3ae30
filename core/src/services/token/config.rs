//! Configuration for the token service

use chrono::Duration;
use tracing::warn;
use vc_shared::config::TokenConfig;

use crate::domain::entities::token::{ACCESS_TOKEN_EXPIRY_MINUTES, REFRESH_TOKEN_EXPIRY_DAYS};

/// Default cap on digest regenerations per issuance
pub const DEFAULT_MAX_GENERATION_ATTEMPTS: u32 = 16;

/// Longest accepted access token lifetime (one year)
pub const MAX_ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 60 * 24 * 365;

/// Longest accepted refresh token lifetime (ten years)
pub const MAX_REFRESH_TOKEN_EXPIRY_DAYS: i64 = 365 * 10;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Access token expiry in minutes
    pub access_token_expiry_minutes: i64,
    /// Refresh token expiry in days
    pub refresh_token_expiry_days: i64,
    /// Candidate pairs tried before issuance gives up
    pub max_generation_attempts: u32,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            access_token_expiry_minutes: ACCESS_TOKEN_EXPIRY_MINUTES,
            refresh_token_expiry_days: REFRESH_TOKEN_EXPIRY_DAYS,
            max_generation_attempts: DEFAULT_MAX_GENERATION_ATTEMPTS,
        }
    }
}

impl TokenServiceConfig {
    /// Replaces lifetimes outside `1..=MAX_*` with the defaults
    ///
    /// A non-positive lifetime would issue tokens that are already expired,
    /// and an oversized one cannot be added to the current time.
    pub fn sanitized(mut self) -> Self {
        if !(1..=MAX_ACCESS_TOKEN_EXPIRY_MINUTES).contains(&self.access_token_expiry_minutes) {
            warn!(
                configured = self.access_token_expiry_minutes,
                fallback = ACCESS_TOKEN_EXPIRY_MINUTES,
                "Access token lifetime out of range, using default"
            );
            self.access_token_expiry_minutes = ACCESS_TOKEN_EXPIRY_MINUTES;
        }

        if !(1..=MAX_REFRESH_TOKEN_EXPIRY_DAYS).contains(&self.refresh_token_expiry_days) {
            warn!(
                configured = self.refresh_token_expiry_days,
                fallback = REFRESH_TOKEN_EXPIRY_DAYS,
                "Refresh token lifetime out of range, using default"
            );
            self.refresh_token_expiry_days = REFRESH_TOKEN_EXPIRY_DAYS;
        }

        self
    }

    pub fn access_ttl(&self) -> Duration {
        Duration::minutes(self.access_token_expiry_minutes)
    }

    pub fn refresh_ttl(&self) -> Duration {
        Duration::days(self.refresh_token_expiry_days)
    }

    /// Attempt budget, never below one
    pub fn attempts(&self) -> u32 {
        self.max_generation_attempts.max(1)
    }
}

impl From<&TokenConfig> for TokenServiceConfig {
    fn from(config: &TokenConfig) -> Self {
        Self {
            access_token_expiry_minutes: config.access_token_expiry_minutes,
            refresh_token_expiry_days: config.refresh_token_expiry_days,
            max_generation_attempts: config.max_generation_attempts,
        }
        .sanitized()
    }
}
