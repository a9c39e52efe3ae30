//! Unit tests for database connection pool

use vc_shared::config::DatabaseConfig;

use crate::database::connection::DatabasePool;

#[tokio::test]
async fn test_pool_creation_with_invalid_url() {
    let config = DatabaseConfig {
        connect_timeout: 2,
        ..DatabaseConfig::new("sqlite:///nonexistent-directory/tokens.db")
    };

    let result = DatabasePool::new(config).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_in_memory_pool_health_check() {
    let pool = DatabasePool::new(DatabaseConfig::in_memory()).await.unwrap();

    assert!(pool.health_check().await.unwrap());
}

#[tokio::test]
async fn test_migrations_are_idempotent() {
    let pool = DatabasePool::initialize(DatabaseConfig::in_memory()).await.unwrap();

    pool.run_migrations().await.unwrap();

    let tables: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'tokens'",
    )
    .fetch_one(pool.get_pool())
    .await
    .unwrap();
    assert_eq!(tables, 1);
}

#[tokio::test]
async fn test_in_memory_pool_shares_one_database() {
    let config = DatabaseConfig::in_memory().with_max_connections(8);
    let pool = DatabasePool::initialize(config).await.unwrap();

    // a second connection to :memory: would not see the table
    for _ in 0..4 {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tokens")
            .fetch_one(pool.get_pool())
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
    assert_eq!(pool.get_pool().options().get_max_connections(), 1);
}
