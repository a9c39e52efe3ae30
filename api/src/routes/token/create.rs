use actix_web::{web, HttpResponse};

use crate::dto::TokenResponse;
use crate::handlers::handle_domain_error;

use vc_core::repositories::TokenRepository;
use vc_core::services::AudioTransformer;

use super::super::AppState;

/// Handler for POST /voicechange/api/token/create
///
/// Takes no body and issues a brand new token pair.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access_token": "9f2c...",
///     "access_token_expiry": "2024-03-01T12:30:00Z",
///     "refresh_token": "41ab...",
///     "refresh_token_expiry": "2024-03-08T12:00:00Z"
/// }
/// ```
///
/// ## Errors
/// - 500 Internal Server Error: No unique token within the attempt budget, or storage failure
pub async fn create_token<R, A>(state: web::Data<AppState<R, A>>) -> HttpResponse
where
    R: TokenRepository + 'static,
    A: AudioTransformer + 'static,
{
    match state.token_service.issue().await {
        Ok(issued) => HttpResponse::Ok().json(TokenResponse::from(issued)),
        Err(error) => handle_domain_error(error),
    }
}
