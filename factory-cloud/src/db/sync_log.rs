//! External sync log queries
//!
//! Append-only: the schema rejects updates, and no delete is offered here.
//! Rows leave only when their order's dish is deleted.
//!
//! `synced_at` is stamped with `clock_timestamp()`, so attempts appended in one
//! transaction still get distinct times. Readers break any remaining tie on
//! `id` to keep "latest" deterministic.

use shared::models::{SyncLog, SyncLogCreate, SyncStatus};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use super::RepoResult;

pub async fn append<'e, E>(executor: E, data: &SyncLogCreate) -> RepoResult<SyncLog>
where
    E: PgExecutor<'e>,
{
    let log: SyncLog = sqlx::query_as(
        "INSERT INTO external_sync_log
            (order_id, sync_status, request_payload, response_payload, error_message)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING *",
    )
    .bind(data.order_id)
    .bind(data.sync_status.as_str())
    .bind(&data.request_payload)
    .bind(&data.response_payload)
    .bind(&data.error_message)
    .fetch_one(executor)
    .await?;

    if log.sync_status == SyncStatus::Failed {
        tracing::warn!(
            order_id = %log.order_id,
            error = log.error_message.as_deref().unwrap_or(""),
            "External sync failed"
        );
    }
    Ok(log)
}

/// Attempts for one order, newest first
pub async fn list_for_order(pool: &PgPool, order_id: Uuid) -> RepoResult<Vec<SyncLog>> {
    let logs = sqlx::query_as(
        "SELECT * FROM external_sync_log
         WHERE order_id = $1
         ORDER BY synced_at DESC, id DESC",
    )
    .bind(order_id)
    .fetch_all(pool)
    .await?;
    Ok(logs)
}

pub async fn latest_for_order(pool: &PgPool, order_id: Uuid) -> RepoResult<Option<SyncLog>> {
    let log = sqlx::query_as(
        "SELECT * FROM external_sync_log
         WHERE order_id = $1
         ORDER BY synced_at DESC, id DESC
         LIMIT 1",
    )
    .bind(order_id)
    .fetch_optional(pool)
    .await?;
    Ok(log)
}

/// Orders whose most recent attempt failed, oldest failure first.
/// One row per order; a later success or pending attempt clears it.
pub async fn retry_candidates(pool: &PgPool, limit: i64) -> RepoResult<Vec<SyncLog>> {
    let logs = sqlx::query_as(
        "SELECT * FROM (
            SELECT DISTINCT ON (order_id) *
            FROM external_sync_log
            ORDER BY order_id, synced_at DESC, id DESC
         ) latest
         WHERE sync_status = $1
         ORDER BY synced_at, id
         LIMIT $2",
    )
    .bind(SyncStatus::Failed.as_str())
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(logs)
}
