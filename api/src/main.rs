use actix_web::{web, HttpServer};
use anyhow::Context;
use log::info;

use vc_api::app::create_app;
use vc_api::config::Config;
use vc_api::routes::AppState;
use vc_core::services::TokenService;
use vc_infra::{DatabasePool, SqliteTokenRepository, WavTransformer};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration (.env first, then the process environment)
    let config = Config::from_env();

    // Initialize logger; RUST_LOG overrides the configured default
    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::new().default_filter_or(config.log_filter()));
    if !config.log_timestamps() {
        logger.format_timestamp(None);
    }
    logger.init();

    info!(
        "Starting VoiceChanger API Server ({} environment)",
        config.app.environment
    );

    // Database and schema
    let db_pool = DatabasePool::initialize(config.app.database.clone())
        .await
        .context("failed to initialize the token database")?;

    let token_repository = SqliteTokenRepository::new(db_pool.get_pool().clone());
    let token_service = TokenService::new(token_repository, config.token_service_config());

    let app_state = web::Data::new(AppState::new(
        token_service,
        WavTransformer::new(),
        config.app.server.max_payload_size,
    ));

    let bind_address = config.bind_address();
    info!("Server will bind to: {}", bind_address);

    let app_config = config.app.clone();
    let mut server = HttpServer::new(move || create_app(app_state.clone(), &app_config))
        .keep_alive(std::time::Duration::from_secs(config.app.server.keep_alive));

    if config.app.server.workers > 0 {
        server = server.workers(config.app.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await
        .context("server terminated with an error")?;

    db_pool.close().await;
    info!("Server stopped");

    Ok(())
}
