use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::DestroyTokenRequest;
use crate::handlers::handle_domain_error;

use vc_core::errors::TokenError;
use vc_core::repositories::TokenRepository;
use vc_core::services::AudioTransformer;

use super::super::AppState;

/// Handler for POST /voicechange/api/token/destroy
///
/// Revokes the pair both tokens belong to.
///
/// # Request Body
///
/// ```json
/// {
///     "access_token": "9f2c...",
///     "refresh_token": "41ab..."
/// }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// ```json
/// {}
/// ```
///
/// ## Errors
/// - 400 Bad Request: Malformed tokens, or no live pair matches both
pub async fn destroy_token<R, A>(
    state: web::Data<AppState<R, A>>,
    request: Option<web::Json<DestroyTokenRequest>>,
) -> HttpResponse
where
    R: TokenRepository + 'static,
    A: AudioTransformer + 'static,
{
    let request = request.map(web::Json::into_inner).unwrap_or_default();

    if let Err(errors) = request.validate() {
        log::debug!("Destroy request failed validation: {}", errors);
        let error = if errors.field_errors().contains_key("access_token") {
            TokenError::InvalidAccessToken
        } else {
            TokenError::InvalidRefreshToken
        };
        return handle_domain_error(error.into());
    }

    match state
        .token_service
        .revoke(&request.access_token, &request.refresh_token)
        .await
    {
        Ok(()) => HttpResponse::Created().json(serde_json::json!({})),
        Err(error) => handle_domain_error(error),
    }
}
