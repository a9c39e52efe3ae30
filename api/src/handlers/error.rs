//! Mapping from domain errors to HTTP responses
//!
//! Every failure carries the `{ "message": ... }` body. Client errors are
//! answered with 400 whether the token was unknown or merely expired.

use actix_web::{http::StatusCode, HttpResponse};
use vc_core::errors::DomainError;

use crate::dto::{ErrorResponse, ErrorResponseExt};

/// Message returned for every server-side failure
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    if !error.is_client_error() {
        log::error!("Domain Error: {:?}", error);
        return ErrorResponse::new(INTERNAL_ERROR_MESSAGE)
            .to_response(StatusCode::INTERNAL_SERVER_ERROR);
    }

    log::debug!("Rejected request: {}", error);
    ErrorResponse::new(error.to_string()).to_response(StatusCode::BAD_REQUEST)
}

/// Default service for unknown routes
pub async fn not_found() -> HttpResponse {
    ErrorResponse::new("Not found").to_response(StatusCode::NOT_FOUND)
}
