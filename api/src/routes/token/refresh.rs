use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::{RefreshTokenRequest, TokenResponse};
use crate::handlers::handle_domain_error;

use vc_core::errors::TokenError;
use vc_core::repositories::TokenRepository;
use vc_core::services::AudioTransformer;

use super::super::AppState;

/// Handler for POST /voicechange/api/token/refresh
///
/// Exchanges a live refresh token for a new pair. The presented pair is
/// left untouched.
///
/// # Request Body
///
/// ```json
/// {
///     "refresh_token": "41ab..."
/// }
/// ```
///
/// A missing or unparseable body is treated like an empty `refresh_token`.
///
/// # Response
///
/// ## Success (200 OK)
/// Same shape as `/token/create`.
///
/// ## Errors
/// - 400 Bad Request: `Invalid Refresh-Token` or `Refresh-Token expired`
/// - 500 Internal Server Error: Token generation or storage failure
pub async fn refresh_token<R, A>(
    state: web::Data<AppState<R, A>>,
    request: Option<web::Json<RefreshTokenRequest>>,
) -> HttpResponse
where
    R: TokenRepository + 'static,
    A: AudioTransformer + 'static,
{
    let request = request.map(web::Json::into_inner).unwrap_or_default();

    if let Err(errors) = request.validate() {
        log::debug!("Refresh request failed validation: {}", errors);
        return handle_domain_error(TokenError::InvalidRefreshToken.into());
    }

    match state.token_service.refresh(&request.refresh_token).await {
        Ok(issued) => HttpResponse::Ok().json(TokenResponse::from(issued)),
        Err(error) => handle_domain_error(error),
    }
}
