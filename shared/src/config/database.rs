//! Database configuration module

use serde::{Deserialize, Serialize};

use super::env_or;

/// Database configuration for the SQLite token store
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Database connection URL (`sqlite://path/to/file.db` or `sqlite::memory:`)
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Connection timeout in seconds
    pub connect_timeout: u64,

    /// Idle connection timeout in seconds
    pub idle_timeout: u64,

    /// Maximum lifetime of a connection in seconds
    pub max_lifetime: u64,

    /// Busy timeout applied to every SQLite connection in seconds
    #[serde(default = "default_busy_timeout")]
    pub busy_timeout: u64,

    /// Enable SQL statement logging
    #[serde(default)]
    pub enable_logging: bool,

    /// Slow query threshold in milliseconds
    #[serde(default = "default_slow_query_threshold")]
    pub slow_query_threshold: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::from("sqlite://vchapi.db"),
            max_connections: 5,
            connect_timeout: 30,
            idle_timeout: 600,
            max_lifetime: 1800,
            busy_timeout: default_busy_timeout(),
            enable_logging: false,
            slow_query_threshold: default_slow_query_threshold(),
        }
    }
}

impl DatabaseConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let url = std::env::var("DATABASE_URL").unwrap_or(defaults.url);

        Self {
            url,
            max_connections: env_or("DATABASE_MAX_CONNECTIONS", defaults.max_connections),
            connect_timeout: env_or("DATABASE_CONNECT_TIMEOUT", defaults.connect_timeout),
            enable_logging: env_or("DATABASE_LOGGING", defaults.enable_logging),
            ..Self::default()
        }
    }

    /// Create a new database configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Configuration for a private in-memory database
    pub fn in_memory() -> Self {
        Self::new("sqlite::memory:")
    }

    /// Set the maximum number of connections
    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Enable SQL statement logging
    pub fn with_logging(mut self, enable: bool) -> Self {
        self.enable_logging = enable;
        self
    }

    /// Whether the URL points at an in-memory database
    ///
    /// Every connection to `:memory:` opens its own database, so callers
    /// must keep such pools at a single connection.
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

fn default_busy_timeout() -> u64 {
    5
}

fn default_slow_query_threshold() -> u64 {
    1000 // 1 second
}
