//! Token entities for opaque bearer credentials.
//!
//! Raw tokens are 32 random bytes handed to the client as hex. Only the
//! SHA-256 digest of the raw bytes is ever persisted.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::errors::DomainError;

/// Access token expiration time (30 minutes)
pub const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 30;

/// Refresh token expiration time (7 days)
pub const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 7;

/// Number of random bytes in a freshly generated token (256 bits)
pub const TOKEN_BYTES: usize = 32;

/// Length of a hex-encoded SHA-256 digest
pub const TOKEN_HASH_LENGTH: usize = 64;

/// Hashes raw token bytes into the lowercase hex digest used for storage
pub fn hash_token(raw: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw);
    format!("{:x}", hasher.finalize())
}

/// Raw token bytes as generated by the service or presented by a client
///
/// Clients may present byte strings of any length; only freshly generated
/// secrets are guaranteed to be `TOKEN_BYTES` long.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenSecret(Vec<u8>);

impl TokenSecret {
    /// Generates a new token from the operating system's CSPRNG
    pub fn generate() -> Self {
        let mut bytes = vec![0u8; TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Parses a hex-encoded token
    ///
    /// # Returns
    ///
    /// `None` if the input is empty or not valid hex
    pub fn from_hex(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        hex::decode(value).ok().map(Self)
    }

    /// Lowercase hex encoding handed back to clients
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// SHA-256 digest of the raw bytes
    pub fn digest(&self) -> String {
        hash_token(&self.0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for TokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenSecret(<{} bytes redacted>)", self.0.len())
    }
}

fn expiry_after(issued_at: DateTime<Utc>, ttl: Duration) -> Result<DateTime<Utc>, DomainError> {
    issued_at
        .checked_add_signed(ttl)
        .ok_or_else(|| DomainError::Internal {
            message: format!("Token expiry overflows: {} + {}", issued_at, ttl),
        })
}

/// Persisted token pair, keyed by the access token digest
///
/// Records are written once by issuance and removed only by revocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    /// Digest of the access token (primary key)
    pub access_token_hash: String,

    /// The access token is valid while `now < access_token_expiry`
    pub access_token_expiry: DateTime<Utc>,

    /// Digest of the refresh token (unique)
    pub refresh_token_hash: String,

    /// The refresh token is valid while `now < refresh_token_expiry`
    pub refresh_token_expiry: DateTime<Utc>,
}

impl TokenRecord {
    /// Creates a record whose expiries are both measured from `issued_at`
    ///
    /// # Arguments
    ///
    /// * `access_token_hash` - Digest of the raw access token
    /// * `refresh_token_hash` - Digest of the raw refresh token
    /// * `issued_at` - Issuance instant shared by both tokens
    /// * `access_ttl` - Lifetime of the access token
    /// * `refresh_ttl` - Lifetime of the refresh token
    ///
    /// # Returns
    ///
    /// `DomainError::Internal` if either expiry falls outside the
    /// representable date range
    pub fn new(
        access_token_hash: String,
        refresh_token_hash: String,
        issued_at: DateTime<Utc>,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            access_token_hash,
            access_token_expiry: expiry_after(issued_at, access_ttl)?,
            refresh_token_hash,
            refresh_token_expiry: expiry_after(issued_at, refresh_ttl)?,
        })
    }

    /// Checks whether the access token is still usable at `now`
    pub fn is_access_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.access_token_expiry
    }

    /// Checks whether the refresh token is still usable at `now`
    pub fn is_refresh_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.refresh_token_expiry
    }
}

/// Raw token pair returned to the caller of issue/refresh
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedTokens {
    /// Hex-encoded raw access token
    pub access_token: String,

    /// Access token expiry
    pub access_token_expiry: DateTime<Utc>,

    /// Hex-encoded raw refresh token
    pub refresh_token: String,

    /// Refresh token expiry
    pub refresh_token_expiry: DateTime<Utc>,
}

impl IssuedTokens {
    /// Pairs the raw secrets with the expiries of the record stored for them
    pub fn new(access: &TokenSecret, refresh: &TokenSecret, record: &TokenRecord) -> Self {
        Self {
            access_token: access.to_hex(),
            access_token_expiry: record.access_token_expiry,
            refresh_token: refresh.to_hex(),
            refresh_token_expiry: record.refresh_token_expiry,
        }
    }
}

impl fmt::Debug for IssuedTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuedTokens")
            .field("access_token", &"<redacted>")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("refresh_token", &"<redacted>")
            .field("refresh_token_expiry", &self.refresh_token_expiry)
            .finish()
    }
}
