//! SQLite implementation of the TokenRepository trait.
//!
//! Rows hold only SHA-256 digests of the raw tokens plus the two expiry
//! instants. Expiry comparison happens in the service, not in SQL.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use vc_core::domain::entities::token::TokenRecord;
use vc_core::errors::DomainError;
use vc_core::repositories::TokenRepository;

const SELECT_COLUMNS: &str =
    "SELECT access_token_hash, access_token_expiry, refresh_token_hash, refresh_token_expiry FROM tokens";

/// SQLite implementation of TokenRepository
#[derive(Clone)]
pub struct SqliteTokenRepository {
    /// Database connection pool
    pool: SqlitePool,
}

impl SqliteTokenRepository {
    /// Create a new SQLite token repository
    ///
    /// The pool must already carry the `tokens` schema
    /// (see `DatabasePool::run_migrations`).
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Convert database row to TokenRecord entity
    fn row_to_record(row: &SqliteRow) -> Result<TokenRecord, DomainError> {
        Ok(TokenRecord {
            access_token_hash: row
                .try_get("access_token_hash")
                .map_err(|e| storage_error("read access_token_hash", e))?,
            access_token_expiry: row
                .try_get::<DateTime<Utc>, _>("access_token_expiry")
                .map_err(|e| storage_error("read access_token_expiry", e))?,
            refresh_token_hash: row
                .try_get("refresh_token_hash")
                .map_err(|e| storage_error("read refresh_token_hash", e))?,
            refresh_token_expiry: row
                .try_get::<DateTime<Utc>, _>("refresh_token_expiry")
                .map_err(|e| storage_error("read refresh_token_expiry", e))?,
        })
    }

    async fn fetch_optional(
        &self,
        query: &str,
        binds: &[&str],
        context: &str,
    ) -> Result<Option<TokenRecord>, DomainError> {
        let mut statement = sqlx::query(query);
        for value in binds {
            statement = statement.bind(*value);
        }

        let row = statement
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error(context, e))?;

        row.as_ref().map(Self::row_to_record).transpose()
    }
}

fn storage_error(context: &str, error: sqlx::Error) -> DomainError {
    tracing::error!(error = %error, "Failed to {}", context);
    DomainError::Storage {
        message: format!("Failed to {}: {}", context, error),
    }
}

#[async_trait]
impl TokenRepository for SqliteTokenRepository {
    async fn insert(&self, record: TokenRecord) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO tokens (
                access_token_hash, access_token_expiry, refresh_token_hash, refresh_token_expiry
            ) VALUES (?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(&record.access_token_hash)
            .bind(record.access_token_expiry)
            .bind(&record.refresh_token_hash)
            .bind(record.refresh_token_expiry)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                tracing::warn!("Token insert rejected by unique constraint");
                Err(DomainError::Conflict {
                    message: db_err.message().to_string(),
                })
            }
            Err(e) => Err(storage_error("insert token record", e)),
        }
    }

    async fn find_by_access_hash(&self, access_hash: &str) -> Result<Option<TokenRecord>, DomainError> {
        let query = format!("{} WHERE access_token_hash = ?", SELECT_COLUMNS);
        self.fetch_optional(&query, &[access_hash], "find token by access hash")
            .await
    }

    async fn find_by_refresh_hash(&self, refresh_hash: &str) -> Result<Option<TokenRecord>, DomainError> {
        let query = format!("{} WHERE refresh_token_hash = ?", SELECT_COLUMNS);
        self.fetch_optional(&query, &[refresh_hash], "find token by refresh hash")
            .await
    }

    async fn find_by_pair(
        &self,
        access_hash: &str,
        refresh_hash: &str,
    ) -> Result<Option<TokenRecord>, DomainError> {
        let query = format!(
            "{} WHERE access_token_hash = ? AND refresh_token_hash = ?",
            SELECT_COLUMNS
        );
        self.fetch_optional(&query, &[access_hash, refresh_hash], "find token pair")
            .await
    }

    async fn delete(&self, access_hash: &str, refresh_hash: &str) -> Result<bool, DomainError> {
        let result = sqlx::query(
            "DELETE FROM tokens WHERE access_token_hash = ? AND refresh_token_hash = ?",
        )
        .bind(access_hash)
        .bind(refresh_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| storage_error("delete token pair", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tokens")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| storage_error("count token records", e))?;

        Ok(usize::try_from(count).unwrap_or(0))
    }

    async fn access_hash_exists(&self, access_hash: &str) -> Result<bool, DomainError> {
        let exists: i64 =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM tokens WHERE access_token_hash = ?)")
                .bind(access_hash)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| storage_error("check access hash", e))?;

        Ok(exists != 0)
    }

    async fn refresh_hash_exists(&self, refresh_hash: &str) -> Result<bool, DomainError> {
        let exists: i64 =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM tokens WHERE refresh_token_hash = ?)")
                .bind(refresh_hash)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| storage_error("check refresh hash", e))?;

        Ok(exists != 0)
    }
}
