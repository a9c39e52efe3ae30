//! Runtime configuration for the API binary

use vc_core::services::token::TokenServiceConfig;
use vc_shared::config::AppConfig;

/// Configuration assembled from `.env` and the process environment
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
}

impl Config {
    /// Load `.env` if present, then read every setting from the environment
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            app: AppConfig::from_env(),
        }
    }

    pub fn is_development(&self) -> bool {
        self.app.is_development()
    }

    pub fn is_production(&self) -> bool {
        self.app.is_production()
    }

    pub fn bind_address(&self) -> String {
        self.app.server.bind_address()
    }

    /// Default log filter for `env_logger`; `RUST_LOG` overrides it
    pub fn log_filter(&self) -> &str {
        &self.app.logging.level
    }

    pub fn log_timestamps(&self) -> bool {
        self.app.logging.timestamp
    }

    pub fn token_service_config(&self) -> TokenServiceConfig {
        TokenServiceConfig::from(&self.app.token)
    }
}

impl From<AppConfig> for Config {
    fn from(app: AppConfig) -> Self {
        Self { app }
    }
}
