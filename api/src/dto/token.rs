use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use vc_core::domain::entities::token::IssuedTokens;

/// Upper bound on the length of a presented token string (kept in sync with the validators)
pub const MAX_TOKEN_LENGTH: u64 = 512;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    /// Hex-encoded refresh token; absent fields deserialize as empty
    #[serde(default)]
    #[validate(length(max = 512))]
    pub refresh_token: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct DestroyTokenRequest {
    #[serde(default)]
    #[validate(length(max = 512))]
    pub access_token: String,

    #[serde(default)]
    #[validate(length(max = 512))]
    pub refresh_token: String,
}

/// Body of a successful create or refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub access_token_expiry: DateTime<Utc>,
    pub refresh_token: String,
    pub refresh_token_expiry: DateTime<Utc>,
}

impl From<IssuedTokens> for TokenResponse {
    fn from(issued: IssuedTokens) -> Self {
        Self {
            access_token: issued.access_token,
            access_token_expiry: issued.access_token_expiry,
            refresh_token: issued.refresh_token,
            refresh_token_expiry: issued.refresh_token_expiry,
        }
    }
}
