//! Route handlers
//!
//! - `token` - Issue, refresh and revoke token pairs
//! - `audio` - Token-gated audio conversion

pub mod audio;
pub mod token;

use std::sync::Arc;

use actix_web::HttpResponse;

use vc_core::repositories::TokenRepository;
use vc_core::services::{AudioTransformer, TokenService};
use vc_shared::types::{HealthResponse, HealthStatus};

/// Name reported by the health endpoint
pub const SERVICE_NAME: &str = "voicechanger-api";

/// Application state that holds shared services
pub struct AppState<R, A>
where
    R: TokenRepository,
    A: AudioTransformer,
{
    pub token_service: Arc<TokenService<R>>,
    pub audio_transformer: Arc<A>,
    /// Upper bound on the bytes accepted from one conversion upload
    pub max_audio_bytes: usize,
}

impl<R, A> AppState<R, A>
where
    R: TokenRepository,
    A: AudioTransformer,
{
    pub fn new(token_service: TokenService<R>, audio_transformer: A, max_audio_bytes: usize) -> Self {
        Self {
            token_service: Arc::new(token_service),
            audio_transformer: Arc::new(audio_transformer),
            max_audio_bytes,
        }
    }
}

/// Handler for GET /health
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::new(
        HealthStatus::Healthy,
        SERVICE_NAME,
        env!("CARGO_PKG_VERSION"),
    ))
}
