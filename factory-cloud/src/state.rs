//! Application state

use sqlx::PgPool;

use crate::config::Config;
use crate::db;
use crate::BoxError;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool
    pub pool: PgPool,
    pub environment: String,
}

impl AppState {
    /// Connect to the database and apply migrations
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = db::connect(&config.database_url, config.db_max_connections).await?;
        Ok(Self::with_pool(pool, &config.environment))
    }

    pub fn with_pool(pool: PgPool, environment: impl Into<String>) -> Self {
        Self {
            pool,
            environment: environment.into(),
        }
    }
}
