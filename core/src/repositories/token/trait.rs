//! Token repository trait defining the interface for token record persistence.

use async_trait::async_trait;

use crate::domain::entities::token::TokenRecord;
use crate::errors::DomainError;

/// Repository trait for TokenRecord persistence operations
///
/// Implementations own the `tokens` table exclusively. Both digest columns
/// must be unique in the backing store; that constraint is what closes the
/// race between the service's existence pre-check and its insert.
///
/// # Security Considerations
/// - Only digests are ever passed in; raw tokens never reach storage
/// - Records are never updated, only inserted and deleted
/// - Expired records are not swept and accumulate until revoked
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Insert a new token record
    ///
    /// # Arguments
    /// * `record` - The record to persist
    ///
    /// # Returns
    /// * `Ok(())` - Record stored
    /// * `Err(DomainError::Conflict)` - Either digest already exists
    /// * `Err(DomainError::Storage)` - The store failed
    ///
    /// # Example
    /// ```no_run
    /// # use chrono::{Duration, Utc};
    /// # use vc_core::repositories::TokenRepository;
    /// # use vc_core::domain::entities::token::{TokenRecord, TokenSecret};
    /// # async fn example(repo: &impl TokenRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// let access = TokenSecret::generate();
    /// let refresh = TokenSecret::generate();
    /// let record = TokenRecord::new(
    ///     access.digest(),
    ///     refresh.digest(),
    ///     Utc::now(),
    ///     Duration::minutes(30),
    ///     Duration::days(7),
    /// )?;
    ///
    /// repo.insert(record).await?;
    /// # Ok(())
    /// # }
    /// ```
    async fn insert(&self, record: TokenRecord) -> Result<(), DomainError>;

    /// Find a record by its access token digest
    ///
    /// # Returns
    /// * `Ok(Some(TokenRecord))` - Record found (expired or not)
    /// * `Ok(None)` - No record with that digest
    /// * `Err(DomainError)` - Storage error occurred
    async fn find_by_access_hash(&self, access_hash: &str) -> Result<Option<TokenRecord>, DomainError>;

    /// Find a record by its refresh token digest
    ///
    /// # Returns
    /// * `Ok(Some(TokenRecord))` - Record found (expired or not)
    /// * `Ok(None)` - No record with that digest
    /// * `Err(DomainError)` - Storage error occurred
    async fn find_by_refresh_hash(&self, refresh_hash: &str) -> Result<Option<TokenRecord>, DomainError>;

    /// Find the record matching both digests on the same row
    ///
    /// # Returns
    /// * `Ok(Some(TokenRecord))` - Both digests belong to one record
    /// * `Ok(None)` - No such record, including when each digest exists on a different row
    /// * `Err(DomainError)` - Storage error occurred
    async fn find_by_pair(
        &self,
        access_hash: &str,
        refresh_hash: &str,
    ) -> Result<Option<TokenRecord>, DomainError>;

    /// Delete the record matching both digests
    ///
    /// # Returns
    /// * `Ok(true)` - The record was deleted
    /// * `Ok(false)` - No record matched both digests
    /// * `Err(DomainError)` - Deletion failed
    async fn delete(&self, access_hash: &str, refresh_hash: &str) -> Result<bool, DomainError>;

    /// Count stored records, expired ones included
    async fn count(&self) -> Result<usize, DomainError>;

    /// Check whether any record uses the given access digest
    async fn access_hash_exists(&self, access_hash: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_access_hash(access_hash).await?.is_some())
    }

    /// Check whether any record uses the given refresh digest
    async fn refresh_hash_exists(&self, refresh_hash: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_refresh_hash(refresh_hash).await?.is_some())
    }
}
