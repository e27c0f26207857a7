mod common;

use common::{date, dish, order};
use factory_cloud::db::{self, RepoError};
use shared::error::{AppError, ErrorCode};
use shared::models::{SyncLogCreate, SyncStatus};
use sqlx::PgPool;
use uuid::Uuid;

fn attempt(order_id: Uuid, sync_status: SyncStatus, error: Option<&str>) -> SyncLogCreate {
    SyncLogCreate {
        order_id,
        sync_status,
        request_payload: Some(serde_json::json!({ "order_id": order_id })),
        response_payload: None,
        error_message: error.map(String::from),
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn append_and_read_history(pool: PgPool) {
    let pool = &pool;

    let bread = dish(pool, "Bread", None).await;
    let o = order(pool, date(2024, 1, 1), bread.id, 50).await;

    assert!(db::sync_log::latest_for_order(pool, o.id).await.unwrap().is_none());

    let failed = db::sync_log::append(pool, &attempt(o.id, SyncStatus::Failed, Some("timeout")))
        .await
        .unwrap();
    assert_eq!(failed.request_payload.as_ref().unwrap()["order_id"], o.id.to_string());

    let mut ok = attempt(o.id, SyncStatus::Success, None);
    ok.response_payload = Some(serde_json::json!({ "accepted": true }));
    let success = db::sync_log::append(pool, &ok).await.unwrap();

    let history = db::sync_log::list_for_order(pool, o.id).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].id, success.id);
    assert_eq!(history[1].id, failed.id);

    let latest = db::sync_log::latest_for_order(pool, o.id).await.unwrap().unwrap();
    assert_eq!(latest.sync_status, SyncStatus::Success);
    assert_eq!(latest.response_payload.unwrap()["accepted"], true);
}

#[sqlx::test(migrations = "./migrations")]
async fn attempts_in_one_transaction_keep_their_order(pool: PgPool) {
    let pool = &pool;

    let bread = dish(pool, "Bread", None).await;
    let o = order(pool, date(2024, 1, 1), bread.id, 50).await;

    let mut tx = pool.begin().await.unwrap();
    let failed = db::sync_log::append(&mut *tx, &attempt(o.id, SyncStatus::Failed, Some("timeout")))
        .await
        .unwrap();
    let success = db::sync_log::append(&mut *tx, &attempt(o.id, SyncStatus::Success, None))
        .await
        .unwrap();
    tx.commit().await.unwrap();

    assert!(success.synced_at > failed.synced_at);

    let latest = db::sync_log::latest_for_order(pool, o.id).await.unwrap().unwrap();
    assert_eq!(latest.id, success.id);

    let history = db::sync_log::list_for_order(pool, o.id).await.unwrap();
    assert_eq!(
        history.iter().map(|l| l.id).collect::<Vec<_>>(),
        [success.id, failed.id]
    );
    assert!(db::sync_log::retry_candidates(pool, 10).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn rows_are_append_only(pool: PgPool) {
    let pool = &pool;

    let bread = dish(pool, "Bread", None).await;
    let o = order(pool, date(2024, 1, 1), bread.id, 50).await;
    let log = db::sync_log::append(pool, &attempt(o.id, SyncStatus::Failed, Some("timeout")))
        .await
        .unwrap();

    let err = sqlx::query("UPDATE external_sync_log SET sync_status = 'success' WHERE id = $1")
        .bind(log.id)
        .execute(pool)
        .await
        .map_err(RepoError::from)
        .unwrap_err();
    assert!(matches!(err, RepoError::Immutable(_)));
    assert_eq!(AppError::from(err).code, ErrorCode::SyncLogImmutable);

    let kept = db::sync_log::latest_for_order(pool, o.id).await.unwrap().unwrap();
    assert_eq!(kept, log);
}

#[sqlx::test(migrations = "./migrations")]
async fn invalid_rows_rejected(pool: PgPool) {
    let pool = &pool;

    let err = db::sync_log::append(pool, &attempt(Uuid::new_v4(), SyncStatus::Pending, None))
        .await
        .unwrap_err();
    assert_eq!(AppError::from(err).code, ErrorCode::SyncOrderNotFound);

    let bread = dish(pool, "Bread", None).await;
    let o = order(pool, date(2024, 1, 1), bread.id, 50).await;
    let err = sqlx::query("INSERT INTO external_sync_log (order_id, sync_status) VALUES ($1, 'ok')")
        .bind(o.id)
        .execute(pool)
        .await
        .map_err(RepoError::from)
        .unwrap_err();
    assert_eq!(AppError::from(err).code, ErrorCode::SyncInvalidStatus);
}

#[sqlx::test(migrations = "./migrations")]
async fn retry_candidates_are_latest_failures(pool: PgPool) {
    let pool = &pool;

    let bread = dish(pool, "Bread", None).await;
    let soup = dish(pool, "Soup", None).await;
    let salad = dish(pool, "Salad", None).await;
    let day = date(2024, 1, 1);
    let recovered = order(pool, day, bread.id, 50).await;
    let stuck = order(pool, day, soup.id, 5).await;
    let in_flight = order(pool, day, salad.id, 7).await;

    db::sync_log::append(pool, &attempt(recovered.id, SyncStatus::Failed, Some("timeout")))
        .await
        .unwrap();
    db::sync_log::append(pool, &attempt(stuck.id, SyncStatus::Failed, Some("timeout")))
        .await
        .unwrap();
    db::sync_log::append(pool, &attempt(recovered.id, SyncStatus::Success, None))
        .await
        .unwrap();
    db::sync_log::append(pool, &attempt(stuck.id, SyncStatus::Failed, Some("502")))
        .await
        .unwrap();
    db::sync_log::append(pool, &attempt(in_flight.id, SyncStatus::Pending, None))
        .await
        .unwrap();

    let candidates = db::sync_log::retry_candidates(pool, 10).await.unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].order_id, stuck.id);
    assert_eq!(candidates[0].error_message.as_deref(), Some("502"));

    assert!(db::sync_log::retry_candidates(pool, 0).await.unwrap().is_empty());
}
