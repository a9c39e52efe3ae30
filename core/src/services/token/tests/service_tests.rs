//! Unit tests for token issuance

use std::collections::HashSet;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};

use crate::domain::entities::token::{hash_token, TokenSecret};
use crate::errors::{DomainError, TokenError};
use crate::repositories::{MockTokenRepository, TokenRepository};
use crate::services::token::{Clock, ManualClock, TokenService, TokenServiceConfig};

use super::mocks::ScriptedRepository;

fn fixed_clock() -> ManualClock {
    ManualClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap())
}

fn create_test_token_service<R: TokenRepository>(
    repository: R,
    clock: &ManualClock,
) -> TokenService<R> {
    TokenService::with_clock(
        repository,
        TokenServiceConfig::default(),
        Arc::new(clock.clone()),
    )
}

#[tokio::test]
async fn test_issue_returns_hex_tokens_with_expiries() {
    let clock = fixed_clock();
    let service = create_test_token_service(MockTokenRepository::new(), &clock);

    let issued = service.issue().await.unwrap();

    assert_eq!(issued.access_token.len(), 64);
    assert_eq!(issued.refresh_token.len(), 64);
    assert!(issued.access_token.chars().all(|c| c.is_ascii_hexdigit()));
    assert_ne!(issued.access_token, issued.refresh_token);
    assert_eq!(issued.access_token_expiry, clock.now() + Duration::minutes(30));
    assert_eq!(issued.refresh_token_expiry, clock.now() + Duration::days(7));
}

#[tokio::test]
async fn test_issue_stores_digests_only() {
    let clock = fixed_clock();
    let service = create_test_token_service(MockTokenRepository::new(), &clock);

    let issued = service.issue().await.unwrap();

    let records = service.repository().records().await;
    assert_eq!(records.len(), 1);
    let record = &records[0];

    let access = TokenSecret::from_hex(&issued.access_token).unwrap();
    let refresh = TokenSecret::from_hex(&issued.refresh_token).unwrap();
    assert_eq!(record.access_token_hash, hash_token(access.as_bytes()));
    assert_eq!(record.refresh_token_hash, hash_token(refresh.as_bytes()));
    assert_ne!(record.access_token_hash, issued.access_token);
    assert_ne!(record.refresh_token_hash, issued.refresh_token);
    assert_eq!(record.access_token_expiry, issued.access_token_expiry);
    assert_eq!(record.refresh_token_expiry, issued.refresh_token_expiry);
}

#[tokio::test]
async fn test_issue_uses_configured_lifetimes() {
    let clock = fixed_clock();
    let config = TokenServiceConfig {
        access_token_expiry_minutes: 5,
        refresh_token_expiry_days: 1,
        ..TokenServiceConfig::default()
    };
    let service = TokenService::with_clock(MockTokenRepository::new(), config, Arc::new(clock.clone()));

    let issued = service.issue().await.unwrap();

    assert_eq!(issued.access_token_expiry, clock.now() + Duration::minutes(5));
    assert_eq!(issued.refresh_token_expiry, clock.now() + Duration::days(1));
}

#[tokio::test]
async fn test_issue_retries_after_digest_collision() {
    let clock = fixed_clock();
    let repository = ScriptedRepository::new().with_collisions(3);
    let service = create_test_token_service(repository, &clock);

    let issued = service.issue().await;

    assert!(issued.is_ok());
    assert_eq!(service.repository().count().await.unwrap(), 1);
    // three forced hits plus one clean check per token
    assert_eq!(service.repository().exists_checks.load(Ordering::SeqCst), 5);
    assert_eq!(service.repository().insert_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_issue_regenerates_pair_after_insert_conflict() {
    let clock = fixed_clock();
    let repository = ScriptedRepository::new().with_conflicts(2);
    let service = create_test_token_service(repository, &clock);

    let issued = service.issue().await;

    assert!(issued.is_ok());
    assert_eq!(service.repository().count().await.unwrap(), 1);
    assert_eq!(service.repository().insert_calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_issue_gives_up_after_attempt_budget() {
    let clock = fixed_clock();
    let repository = ScriptedRepository::new().with_collisions(u32::MAX);
    let service = create_test_token_service(repository, &clock);

    let result = service.issue().await;

    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::TokenGenerationFailed))
    ));
    assert!(!result.unwrap_err().is_client_error());
    assert_eq!(service.repository().count().await.unwrap(), 0);
    assert_eq!(service.repository().exists_checks.load(Ordering::SeqCst), 16);
}

#[tokio::test]
async fn test_issue_attempt_budget_never_zero() {
    let clock = fixed_clock();
    let config = TokenServiceConfig {
        max_generation_attempts: 0,
        ..TokenServiceConfig::default()
    };
    let service = TokenService::with_clock(MockTokenRepository::new(), config, Arc::new(clock));

    assert!(service.issue().await.is_ok());
}

#[tokio::test]
async fn test_issue_propagates_storage_failure() {
    let clock = fixed_clock();
    let repository = ScriptedRepository::new().with_storage_down();
    let service = create_test_token_service(repository, &clock);

    let result = service.issue().await;

    assert!(matches!(result, Err(DomainError::Storage { .. })));
    // storage failures are not retried
    assert_eq!(service.repository().insert_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_issue_yields_distinct_pairs() {
    let service = Arc::new(TokenService::new(
        MockTokenRepository::new(),
        TokenServiceConfig::default(),
    ));

    let handles: Vec<_> = (0..50)
        .map(|_| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.issue().await })
        })
        .collect();

    let mut tokens = HashSet::new();
    for handle in handles {
        let issued = handle.await.unwrap().unwrap();
        assert!(tokens.insert(issued.access_token));
        assert!(tokens.insert(issued.refresh_token));
    }

    assert_eq!(tokens.len(), 100);
    assert_eq!(service.repository().count().await.unwrap(), 50);
}

#[tokio::test]
async fn test_zero_refresh_lifetime_falls_back_to_default() {
    let clock = fixed_clock();
    let config = TokenServiceConfig {
        refresh_token_expiry_days: 0,
        ..TokenServiceConfig::default()
    };
    let service = TokenService::with_clock(MockTokenRepository::new(), config, Arc::new(clock.clone()));

    let issued = service.issue().await.unwrap();

    assert_eq!(issued.refresh_token_expiry, clock.now() + Duration::days(7));
    assert!(service.refresh(&issued.refresh_token).await.is_ok());
}

#[tokio::test]
async fn test_huge_refresh_lifetime_does_not_panic() {
    let clock = fixed_clock();
    let config = TokenServiceConfig {
        refresh_token_expiry_days: 1_000_000_000,
        ..TokenServiceConfig::default()
    };
    let service = TokenService::with_clock(MockTokenRepository::new(), config, Arc::new(clock.clone()));

    let issued = service.issue().await.unwrap();

    assert_eq!(service.config().refresh_token_expiry_days, 7);
    assert_eq!(issued.refresh_token_expiry, clock.now() + Duration::days(7));
}

#[tokio::test]
async fn test_expiry_past_calendar_end_is_internal_error() {
    let clock = ManualClock::new(chrono::DateTime::<Utc>::MAX_UTC - Duration::minutes(1));
    let repository = MockTokenRepository::new();
    let service = create_test_token_service(repository.clone(), &clock);

    let error = service.issue().await.unwrap_err();

    assert!(matches!(error, DomainError::Internal { .. }));
    assert!(!error.is_client_error());
    assert_eq!(repository.count().await.unwrap(), 0);
}
