//! Health check endpoints

use std::time::Instant;

use axum::extract::State;
use serde::Serialize;
use shared::error::{ApiResponse, AppResult};

use crate::db::RepoError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub service: &'static str,
    pub version: &'static str,
    pub git_hash: &'static str,
}

impl ServiceInfo {
    fn current() -> Self {
        Self {
            service: "factory-cloud",
            version: env!("CARGO_PKG_VERSION"),
            git_hash: option_env!("GIT_HASH").unwrap_or("dev"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DetailedHealth {
    #[serde(flatten)]
    pub service: ServiceInfo,
    pub environment: String,
    pub database_latency_ms: u64,
}

pub async fn health_check() -> ApiResponse<ServiceInfo> {
    ApiResponse::success(ServiceInfo::current())
}

/// Includes a database round trip. An unreachable database answers with the
/// error envelope and a 503.
pub async fn health_detailed(State(state): State<AppState>) -> AppResult<ApiResponse<DetailedHealth>> {
    let started = Instant::now();
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.pool)
        .await
        .map_err(RepoError::from)?;

    Ok(ApiResponse::success(DetailedHealth {
        service: ServiceInfo::current(),
        environment: state.environment,
        database_latency_ms: started.elapsed().as_millis() as u64,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check_envelope() {
        let response = health_check().await;
        assert!(response.is_success());

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["data"]["service"], "factory-cloud");
        assert_eq!(json["data"]["version"], env!("CARGO_PKG_VERSION"));
    }
}
