//! Application factory
//!
//! Builds the Actix-web application around an already initialized
//! `AppState`, so the binary and the integration tests share one routing
//! table.

use actix_web::{
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web, App, Error,
};

use vc_core::repositories::TokenRepository;
use vc_core::services::AudioTransformer;
use vc_shared::config::AppConfig;

use crate::handlers::not_found;
use crate::middleware::{cors::create_cors, security::SecurityMiddleware};
use crate::routes::{
    audio::convert_audio,
    health_check,
    token::{create_token, destroy_token, refresh_token},
    AppState,
};

/// Prefix shared by every API route
pub const API_SCOPE: &str = "/voicechange/api";

/// Create and configure the application with all dependencies
pub fn create_app<R, A>(
    app_state: web::Data<AppState<R, A>>,
    config: &AppConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl actix_web::body::MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    R: TokenRepository + 'static,
    A: AudioTransformer + 'static,
{
    let cors = create_cors(&config.cors);
    let security = SecurityMiddleware::for_environment(config.environment);
    let max_payload_size = config.server.max_payload_size;

    App::new()
        .app_data(app_state)
        .app_data(web::PayloadConfig::new(max_payload_size))
        .app_data(web::JsonConfig::default().limit(max_payload_size))
        // Order matters: security headers outermost, then CORS, then logging
        .wrap(Logger::default())
        .wrap(cors)
        .wrap(security)
        .route("/health", web::get().to(health_check))
        .service(
            web::scope(API_SCOPE)
                .service(
                    web::scope("/token")
                        .route("/create", web::post().to(create_token::<R, A>))
                        .route("/refresh", web::post().to(refresh_token::<R, A>))
                        .route("/destroy", web::post().to(destroy_token::<R, A>)),
                )
                .service(
                    web::scope("/audio").route("/convert", web::post().to(convert_audio::<R, A>)),
                ),
        )
        .default_service(web::route().to(not_found))
}
