//! Unit tests for domain error types

use crate::errors::{AudioError, DomainError, TokenError, ValidationError};

#[test]
fn test_token_error_messages() {
    assert_eq!(TokenError::InvalidAccessToken.to_string(), "Invalid Access-Token");
    assert_eq!(TokenError::InvalidRefreshToken.to_string(), "Invalid Refresh-Token");
    assert_eq!(TokenError::TokenExpired.to_string(), "Refresh-Token expired");
    assert_eq!(TokenError::AccessDenied.to_string(), "Access-Token expired");
}

#[test]
fn test_token_error_is_transparent_through_domain_error() {
    let error: DomainError = TokenError::TokenExpired.into();
    assert_eq!(error.to_string(), "Refresh-Token expired");
    assert!(matches!(error, DomainError::Token(TokenError::TokenExpired)));
}

#[test]
fn test_validation_error_with_fields() {
    let error: DomainError = ValidationError::PayloadTooLarge {
        field: "audio".to_string(),
        max_bytes: 1024,
    }
    .into();
    assert!(error.to_string().contains("1024"));
}

#[test]
fn test_client_error_classification() {
    assert!(DomainError::from(TokenError::InvalidAccessToken).is_client_error());
    assert!(DomainError::from(TokenError::AccessDenied).is_client_error());
    assert!(DomainError::from(TokenError::TokenExpired).is_client_error());
    assert!(DomainError::from(ValidationError::PayloadTooLarge {
        field: "audio".to_string(),
        max_bytes: 1024,
    })
    .is_client_error());

    assert!(!DomainError::from(TokenError::TokenGenerationFailed).is_client_error());
    assert!(!DomainError::Storage {
        message: "disk full".to_string(),
    }
    .is_client_error());
    assert!(!DomainError::Conflict {
        message: "duplicate".to_string(),
    }
    .is_client_error());
}

#[test]
fn test_audio_error_messages() {
    assert_eq!(AudioError::MissingFile.to_string(), "Audio file not found");
    assert_eq!(AudioError::InvalidParams.to_string(), "Invalid conversion parameters");

    let error: DomainError = AudioError::InvalidAudio.into();
    assert_eq!(error.to_string(), "Invalid audio file");
    assert!(error.is_client_error());
}
