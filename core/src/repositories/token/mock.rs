//! In-memory implementation of TokenRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::token::TokenRecord;
use crate::errors::DomainError;

use super::r#trait::TokenRepository;

/// Mock token repository keyed by access digest
///
/// Enforces the same uniqueness rules as the SQL schema so that service
/// tests exercise the conflict path.
#[derive(Clone)]
pub struct MockTokenRepository {
    records: Arc<RwLock<HashMap<String, TokenRecord>>>,
}

impl MockTokenRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Snapshot of every stored record
    pub async fn records(&self) -> Vec<TokenRecord> {
        self.records.read().await.values().cloned().collect()
    }
}

impl Default for MockTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenRepository for MockTokenRepository {
    async fn insert(&self, record: TokenRecord) -> Result<(), DomainError> {
        let mut records = self.records.write().await;

        if records.contains_key(&record.access_token_hash) {
            return Err(DomainError::Conflict {
                message: "access_token_hash already exists".to_string(),
            });
        }
        if records
            .values()
            .any(|r| r.refresh_token_hash == record.refresh_token_hash)
        {
            return Err(DomainError::Conflict {
                message: "refresh_token_hash already exists".to_string(),
            });
        }

        records.insert(record.access_token_hash.clone(), record);
        Ok(())
    }

    async fn find_by_access_hash(&self, access_hash: &str) -> Result<Option<TokenRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records.get(access_hash).cloned())
    }

    async fn find_by_refresh_hash(&self, refresh_hash: &str) -> Result<Option<TokenRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .find(|r| r.refresh_token_hash == refresh_hash)
            .cloned())
    }

    async fn find_by_pair(
        &self,
        access_hash: &str,
        refresh_hash: &str,
    ) -> Result<Option<TokenRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records
            .get(access_hash)
            .filter(|r| r.refresh_token_hash == refresh_hash)
            .cloned())
    }

    async fn delete(&self, access_hash: &str, refresh_hash: &str) -> Result<bool, DomainError> {
        let mut records = self.records.write().await;

        let matches = records
            .get(access_hash)
            .map(|r| r.refresh_token_hash == refresh_hash)
            .unwrap_or(false);
        if matches {
            records.remove(access_hash);
        }

        Ok(matches)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.records.read().await.len())
    }
}
