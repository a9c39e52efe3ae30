//! Refresh, revoke and access checks driven by a manual clock

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};

use crate::errors::{DomainError, TokenError};
use crate::repositories::{MockTokenRepository, TokenRepository};
use crate::services::token::{ManualClock, TokenService, TokenServiceConfig};

fn setup() -> (TokenService<MockTokenRepository>, ManualClock) {
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap());
    let service = TokenService::with_clock(
        MockTokenRepository::new(),
        TokenServiceConfig::default(),
        Arc::new(clock.clone()),
    );
    (service, clock)
}

fn is_token_error(result: &Result<impl Sized, DomainError>, expected: TokenError) -> bool {
    matches!(result, Err(DomainError::Token(actual)) if *actual == expected)
}

// ValidateAccess

#[tokio::test]
async fn test_fresh_access_token_is_valid() {
    let (service, _clock) = setup();
    let issued = service.issue().await.unwrap();

    assert!(service.validate_access(&issued.access_token).await.is_ok());
}

#[tokio::test]
async fn test_access_token_expiry_boundary() {
    let (service, clock) = setup();
    let issued = service.issue().await.unwrap();

    clock.advance(Duration::minutes(30) - Duration::seconds(1));
    assert!(service.validate_access(&issued.access_token).await.is_ok());

    clock.advance(Duration::seconds(1));
    let result = service.validate_access(&issued.access_token).await;
    assert!(is_token_error(&result, TokenError::AccessDenied));
}

#[tokio::test]
async fn test_access_rejects_unknown_and_malformed_tokens() {
    let (service, _clock) = setup();
    let issued = service.issue().await.unwrap();

    let unknown = "ab".repeat(32);
    assert!(is_token_error(&service.validate_access(&unknown).await, TokenError::AccessDenied));

    // a refresh token is not an access token
    let result = service.validate_access(&issued.refresh_token).await;
    assert!(is_token_error(&result, TokenError::AccessDenied));

    assert!(is_token_error(&service.validate_access("").await, TokenError::InvalidAccessToken));
    assert!(is_token_error(&service.validate_access("not-hex").await, TokenError::InvalidAccessToken));
}

#[tokio::test]
async fn test_access_accepts_uppercase_hex() {
    let (service, _clock) = setup();
    let issued = service.issue().await.unwrap();

    let upper = issued.access_token.to_uppercase();
    assert!(service.validate_access(&upper).await.is_ok());
}

// Refresh

#[tokio::test]
async fn test_refresh_issues_new_pair_and_keeps_old() {
    let (service, _clock) = setup();
    let first = service.issue().await.unwrap();

    let second = service.refresh(&first.refresh_token).await.unwrap();

    assert_ne!(second.access_token, first.access_token);
    assert_ne!(second.refresh_token, first.refresh_token);
    assert_eq!(service.repository().count().await.unwrap(), 2);
    assert!(service.validate_access(&first.access_token).await.is_ok());
    assert!(service.validate_access(&second.access_token).await.is_ok());

    // the old refresh token remains usable
    assert!(service.refresh(&first.refresh_token).await.is_ok());
    assert_eq!(service.repository().count().await.unwrap(), 3);
}

#[tokio::test]
async fn test_refresh_ignores_access_expiry() {
    let (service, clock) = setup();
    let issued = service.issue().await.unwrap();

    clock.advance(Duration::hours(2));
    assert!(service.validate_access(&issued.access_token).await.is_err());

    let renewed = service.refresh(&issued.refresh_token).await.unwrap();
    assert!(service.validate_access(&renewed.access_token).await.is_ok());
}

#[tokio::test]
async fn test_refresh_expiry_boundary() {
    let (service, clock) = setup();
    let issued = service.issue().await.unwrap();

    clock.advance(Duration::days(7) - Duration::seconds(1));
    assert!(service.refresh(&issued.refresh_token).await.is_ok());

    clock.advance(Duration::seconds(1));
    let result = service.refresh(&issued.refresh_token).await;
    assert!(is_token_error(&result, TokenError::TokenExpired));
}

#[tokio::test]
async fn test_refresh_rejects_bad_input() {
    let (service, _clock) = setup();

    assert!(is_token_error(&service.refresh("").await, TokenError::InvalidRefreshToken));
    assert!(is_token_error(&service.refresh("zz").await, TokenError::InvalidRefreshToken));
    assert!(is_token_error(&service.refresh(&"00".repeat(32)).await, TokenError::TokenExpired));
    assert_eq!(service.repository().count().await.unwrap(), 0);
}

// Revoke

#[tokio::test]
async fn test_revoke_deletes_pair() {
    let (service, _clock) = setup();
    let issued = service.issue().await.unwrap();

    service
        .revoke(&issued.access_token, &issued.refresh_token)
        .await
        .unwrap();

    assert_eq!(service.repository().count().await.unwrap(), 0);
    let result = service.validate_access(&issued.access_token).await;
    assert!(is_token_error(&result, TokenError::AccessDenied));
    let result = service.refresh(&issued.refresh_token).await;
    assert!(is_token_error(&result, TokenError::TokenExpired));

    // a second revoke finds nothing
    let result = service.revoke(&issued.access_token, &issued.refresh_token).await;
    assert!(is_token_error(&result, TokenError::TokenExpired));
}

#[tokio::test]
async fn test_revoke_requires_tokens_from_same_pair() {
    let (service, _clock) = setup();
    let a = service.issue().await.unwrap();
    let b = service.issue().await.unwrap();

    let result = service.revoke(&a.access_token, &b.refresh_token).await;

    assert!(is_token_error(&result, TokenError::TokenExpired));
    assert_eq!(service.repository().count().await.unwrap(), 2);
    assert!(service.validate_access(&a.access_token).await.is_ok());
    assert!(service.validate_access(&b.access_token).await.is_ok());
}

#[tokio::test]
async fn test_revoke_checks_access_token_first() {
    let (service, _clock) = setup();
    let issued = service.issue().await.unwrap();

    let result = service.revoke("bad", "bad").await;
    assert!(is_token_error(&result, TokenError::InvalidAccessToken));

    let result = service.revoke(&issued.access_token, "").await;
    assert!(is_token_error(&result, TokenError::InvalidRefreshToken));

    assert_eq!(service.repository().count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_revoke_after_refresh_expiry_leaves_row() {
    let (service, clock) = setup();
    let issued = service.issue().await.unwrap();

    clock.advance(Duration::days(7));
    let result = service.revoke(&issued.access_token, &issued.refresh_token).await;

    assert!(is_token_error(&result, TokenError::TokenExpired));
    assert_eq!(service.repository().count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_revoke_succeeds_with_expired_access_token() {
    let (service, clock) = setup();
    let issued = service.issue().await.unwrap();

    clock.advance(Duration::days(1));
    let result = service.revoke(&issued.access_token, &issued.refresh_token).await;

    assert!(result.is_ok());
    assert_eq!(service.repository().count().await.unwrap(), 0);
}
