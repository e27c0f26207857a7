//! Service configuration

use shared::error::{AppError, AppResult};

/// Configuration read from the environment (and `.env` when present)
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,
    /// HTTP port (health endpoints)
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// Upper bound on pooled connections
    pub db_max_connections: u32,
}

impl Config {
    pub const DEFAULT_HTTP_PORT: u16 = 8080;
    pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

    /// Load configuration from environment variables
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                AppError::config("DATABASE_URL must be set").with_detail("variable", "DATABASE_URL")
            })?;

        Ok(Self {
            database_url,
            http_port: lookup("HTTP_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(Self::DEFAULT_HTTP_PORT),
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".into()),
            db_max_connections: lookup("DB_MAX_CONNECTIONS")
                .and_then(|n| n.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(Self::DEFAULT_MAX_CONNECTIONS),
        })
    }
}
