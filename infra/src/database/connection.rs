//! Database connection pool management
//!
//! This module provides SQLite connection pooling using SQLx, the schema
//! setup for the `tokens` table, and a connectivity check for health endpoints.

use log::LevelFilter;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    ConnectOptions, Row, SqlitePool,
};
use std::str::FromStr;
use std::time::Duration;

use vc_shared::config::DatabaseConfig;

use crate::InfrastructureError;

/// Schema of the only table the service owns
///
/// Both digest columns are unique so that concurrent issuers cannot store
/// the same digest twice, whatever the service-level pre-check saw.
pub const TOKENS_SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS tokens (
        access_token_hash    TEXT PRIMARY KEY NOT NULL,
        access_token_expiry  TEXT NOT NULL,
        refresh_token_hash   TEXT NOT NULL UNIQUE,
        refresh_token_expiry TEXT NOT NULL
    )
"#;

/// Database connection pool wrapper
///
/// Manages the SQLite connection pool with configurable settings
/// for connection limits, timeouts, and journaling.
#[derive(Clone)]
pub struct DatabasePool {
    /// SQLx SQLite connection pool
    pool: SqlitePool,
    /// Configuration used to create this pool
    config: DatabaseConfig,
}

impl DatabasePool {
    /// Create a new database connection pool
    ///
    /// File databases are created when missing and use WAL journaling.
    /// In-memory databases are pinned to one long-lived connection, since
    /// each new connection to `:memory:` would see an empty database.
    ///
    /// # Arguments
    /// * `config` - Database configuration settings
    ///
    /// # Example
    /// ```no_run
    /// use vc_infra::database::DatabasePool;
    /// use vc_shared::config::DatabaseConfig;
    ///
    /// async fn create_pool() -> Result<DatabasePool, Box<dyn std::error::Error>> {
    ///     let pool = DatabasePool::new(DatabaseConfig::new("sqlite://vchapi.db")).await?;
    ///     pool.run_migrations().await?;
    ///     Ok(pool)
    /// }
    /// ```
    pub async fn new(config: DatabaseConfig) -> Result<Self, InfrastructureError> {
        let in_memory = config.is_in_memory();
        tracing::info!(
            max_connections = config.max_connections,
            in_memory,
            "Creating database connection pool"
        );

        let mut connect_options = SqliteConnectOptions::from_str(&config.url)
            .map_err(|e| InfrastructureError::Config(format!("Invalid database URL: {}", e)))?
            .busy_timeout(Duration::from_secs(config.busy_timeout));

        if !in_memory {
            connect_options = connect_options
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal);
        }

        connect_options = if config.enable_logging {
            connect_options
                .log_statements(LevelFilter::Debug)
                .log_slow_statements(
                    LevelFilter::Warn,
                    Duration::from_millis(config.slow_query_threshold),
                )
        } else {
            connect_options.disable_statement_logging()
        };

        let (max_connections, idle_timeout, max_lifetime) = if in_memory {
            (1, None, None)
        } else {
            (
                config.max_connections.max(1),
                Some(Duration::from_secs(config.idle_timeout)),
                Some(Duration::from_secs(config.max_lifetime)),
            )
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(idle_timeout)
            .max_lifetime(max_lifetime)
            .connect_with(connect_options)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to create database pool");
                InfrastructureError::Database(e)
            })?;

        tracing::info!("Database connection pool created successfully");

        Ok(Self { pool, config })
    }

    /// Create a pool and make sure the schema exists
    pub async fn initialize(config: DatabaseConfig) -> Result<Self, InfrastructureError> {
        let pool = Self::new(config).await?;
        pool.run_migrations().await?;
        Ok(pool)
    }

    /// Get a reference to the underlying SQLx pool
    pub fn get_pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Create the `tokens` table if it does not exist yet
    pub async fn run_migrations(&self) -> Result<(), InfrastructureError> {
        tracing::info!("Running database migrations");

        sqlx::query(TOKENS_SCHEMA).execute(&self.pool).await?;

        tracing::info!("Database migrations completed");
        Ok(())
    }

    /// Check if the database connection is healthy
    ///
    /// # Returns
    /// * `Ok(true)` - `SELECT 1` round-tripped
    /// * `Ok(false)` - The query returned something unexpected
    /// * `Err(InfrastructureError)` - The database could not be reached
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        tracing::debug!("Performing database health check");

        let row = sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Database health check failed");
                InfrastructureError::Database(e)
            })?;

        let value: i64 = row.try_get(0)?;
        if value != 1 {
            tracing::warn!(value, "Database health check returned unexpected value");
        }
        Ok(value == 1)
    }

    /// Close all connections in the pool
    ///
    /// This should be called during application shutdown.
    pub async fn close(&self) {
        tracing::info!("Closing database connection pool");
        self.pool.close().await;
    }
}
