//! Main token service implementation

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::token::{IssuedTokens, TokenRecord, TokenSecret};
use crate::errors::{DomainError, TokenError};
use crate::repositories::TokenRepository;

use super::clock::{Clock, SystemClock};
use super::config::TokenServiceConfig;

/// Number of digest characters that may appear in logs
const LOGGED_DIGEST_CHARS: usize = 8;

fn digest_prefix(digest: &str) -> &str {
    digest.get(..LOGGED_DIGEST_CHARS).unwrap_or(digest)
}

/// Service for issuing, refreshing, revoking and checking token pairs
pub struct TokenService<R: TokenRepository> {
    pub(crate) repository: R,
    config: TokenServiceConfig,
    clock: Arc<dyn Clock>,
}

impl<R: TokenRepository> TokenService<R> {
    /// Creates a new token service reading wall-clock time
    ///
    /// # Arguments
    ///
    /// * `repository` - Token repository for persistence
    /// * `config` - Token service configuration
    pub fn new(repository: R, config: TokenServiceConfig) -> Self {
        Self::with_clock(repository, config, Arc::new(SystemClock))
    }

    /// Creates a new token service with an explicit time source
    pub fn with_clock(repository: R, config: TokenServiceConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            config: config.sanitized(),
            clock,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// Issues a brand new token pair
    ///
    /// Each token is regenerated while its digest is already stored. A
    /// uniqueness violation at insert time means a concurrent issuer took
    /// one of the digests, so the whole pair is regenerated. Both cases
    /// draw from the same attempt budget.
    ///
    /// # Returns
    ///
    /// * `Ok(IssuedTokens)` - Raw tokens and their expiries
    /// * `Err(TokenError::TokenGenerationFailed)` - Attempt budget exhausted
    /// * `Err(DomainError::Storage)` - The repository failed
    pub async fn issue(&self) -> Result<IssuedTokens, DomainError> {
        let now = self.clock.now();
        let mut access: Option<TokenSecret> = None;
        let mut refresh: Option<TokenSecret> = None;

        for attempt in 1..=self.config.attempts() {
            if access.is_none() {
                let candidate = TokenSecret::generate();
                let digest = candidate.digest();
                if self.repository.access_hash_exists(&digest).await? {
                    warn!(attempt, digest = digest_prefix(&digest), "Access token digest collision, regenerating");
                    continue;
                }
                access = Some(candidate);
            }

            if refresh.is_none() {
                let candidate = TokenSecret::generate();
                let digest = candidate.digest();
                if self.repository.refresh_hash_exists(&digest).await? {
                    warn!(attempt, digest = digest_prefix(&digest), "Refresh token digest collision, regenerating");
                    continue;
                }
                refresh = Some(candidate);
            }

            let (record, issued) = match (&access, &refresh) {
                (Some(access_secret), Some(refresh_secret)) => {
                    let record = TokenRecord::new(
                        access_secret.digest(),
                        refresh_secret.digest(),
                        now,
                        self.config.access_ttl(),
                        self.config.refresh_ttl(),
                    )?;
                    let issued = IssuedTokens::new(access_secret, refresh_secret, &record);
                    (record, issued)
                }
                _ => continue,
            };
            let access_digest = record.access_token_hash.clone();

            match self.repository.insert(record).await {
                Ok(()) => {
                    info!(
                        attempt,
                        access_digest = digest_prefix(&access_digest),
                        "Issued token pair"
                    );
                    return Ok(issued);
                }
                Err(DomainError::Conflict { message }) => {
                    warn!(attempt, %message, "Token pair insert conflicted, regenerating pair");
                    access = None;
                    refresh = None;
                }
                Err(e) => return Err(e),
            }
        }

        warn!(
            attempts = self.config.attempts(),
            "Exhausted token generation attempts"
        );
        Err(TokenError::TokenGenerationFailed.into())
    }

    /// Exchanges a live refresh token for a brand new pair
    ///
    /// Only the refresh expiry is checked. The presented pair stays stored
    /// and keeps working until its own expiries pass or it is revoked.
    ///
    /// # Returns
    ///
    /// * `Ok(IssuedTokens)` - The new pair
    /// * `Err(TokenError::InvalidRefreshToken)` - Empty or non-hex token
    /// * `Err(TokenError::TokenExpired)` - Unknown or expired refresh token
    pub async fn refresh(&self, refresh_token: &str) -> Result<IssuedTokens, DomainError> {
        let secret = TokenSecret::from_hex(refresh_token).ok_or(TokenError::InvalidRefreshToken)?;
        let digest = secret.digest();
        let now = self.clock.now();

        let record = self.repository.find_by_refresh_hash(&digest).await?;
        if !record.map_or(false, |r| r.is_refresh_valid_at(now)) {
            debug!(digest = digest_prefix(&digest), "Refresh rejected: unknown or expired");
            return Err(TokenError::TokenExpired.into());
        }

        self.issue().await
    }

    /// Deletes the pair that both tokens belong to
    ///
    /// The access token is parsed first, so a request with both tokens
    /// malformed reports the access token.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The pair was deleted
    /// * `Err(TokenError::InvalidAccessToken | InvalidRefreshToken)` - Malformed input
    /// * `Err(TokenError::TokenExpired)` - No live pair matches both tokens
    pub async fn revoke(&self, access_token: &str, refresh_token: &str) -> Result<(), DomainError> {
        let access = TokenSecret::from_hex(access_token).ok_or(TokenError::InvalidAccessToken)?;
        let refresh = TokenSecret::from_hex(refresh_token).ok_or(TokenError::InvalidRefreshToken)?;
        let access_digest = access.digest();
        let refresh_digest = refresh.digest();
        let now = self.clock.now();

        let record = self
            .repository
            .find_by_pair(&access_digest, &refresh_digest)
            .await?;
        if !record.map_or(false, |r| r.is_refresh_valid_at(now)) {
            debug!(
                access_digest = digest_prefix(&access_digest),
                "Revoke rejected: no live pair matches"
            );
            return Err(TokenError::TokenExpired.into());
        }

        // A concurrent revoke may have removed the row since the lookup
        if !self.repository.delete(&access_digest, &refresh_digest).await? {
            return Err(TokenError::TokenExpired.into());
        }

        info!(access_digest = digest_prefix(&access_digest), "Revoked token pair");
        Ok(())
    }

    /// Checks that an access token is known and unexpired
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Access granted
    /// * `Err(TokenError::InvalidAccessToken)` - Empty or non-hex token
    /// * `Err(TokenError::AccessDenied)` - Unknown or expired access token
    pub async fn validate_access(&self, access_token: &str) -> Result<(), DomainError> {
        let secret = TokenSecret::from_hex(access_token).ok_or(TokenError::InvalidAccessToken)?;
        let digest = secret.digest();
        let now = self.clock.now();

        let record = self.repository.find_by_access_hash(&digest).await?;
        if record.map_or(false, |r| r.is_access_valid_at(now)) {
            Ok(())
        } else {
            debug!(digest = digest_prefix(&digest), "Access rejected: unknown or expired");
            Err(TokenError::AccessDenied.into())
        }
    }
}
