//! Cook queries

use shared::models::{Cook, CookCreate, CookUpdate};
use sqlx::PgPool;
use uuid::Uuid;

use super::{RepoError, RepoResult};
use crate::validation::{validate_cook_create, validate_cook_update};

pub const ENTITY: &str = "Cook";

pub async fn create(pool: &PgPool, data: &CookCreate) -> RepoResult<Cook> {
    validate_cook_create(data)?;

    let cook: Cook = sqlx::query_as(
        "INSERT INTO cooks (name, floor, email, phone, specialty, is_active)
         VALUES ($1, $2, $3, $4, $5, COALESCE($6, TRUE))
         RETURNING *",
    )
    .bind(data.name.trim())
    .bind(data.floor)
    .bind(&data.email)
    .bind(&data.phone)
    .bind(&data.specialty)
    .bind(data.is_active)
    .fetch_one(pool)
    .await?;

    tracing::debug!(cook_id = %cook.id, name = %cook.name, "Cook created");
    Ok(cook)
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> RepoResult<Option<Cook>> {
    let cook = sqlx::query_as("SELECT * FROM cooks WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(cook)
}

/// Names are not unique; the earliest registered cook wins
pub async fn find_by_name(pool: &PgPool, name: &str) -> RepoResult<Option<Cook>> {
    let cook = sqlx::query_as(
        "SELECT * FROM cooks WHERE name = $1 ORDER BY created_at, id LIMIT 1",
    )
    .bind(name.trim())
    .fetch_optional(pool)
    .await?;
    Ok(cook)
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> RepoResult<Option<Cook>> {
    let cook = sqlx::query_as("SELECT * FROM cooks WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(cook)
}

pub async fn list(pool: &PgPool, active_only: bool) -> RepoResult<Vec<Cook>> {
    let cooks = sqlx::query_as(
        "SELECT * FROM cooks WHERE (NOT $1 OR is_active) ORDER BY name, created_at",
    )
    .bind(active_only)
    .fetch_all(pool)
    .await?;
    Ok(cooks)
}

/// Partial update; absent fields keep their stored value
pub async fn update(pool: &PgPool, id: Uuid, data: &CookUpdate) -> RepoResult<Cook> {
    validate_cook_update(data)?;

    let cook: Option<Cook> = sqlx::query_as(
        "UPDATE cooks SET
            name = COALESCE($2, name),
            floor = COALESCE($3, floor),
            email = COALESCE($4, email),
            phone = COALESCE($5, phone),
            specialty = COALESCE($6, specialty),
            is_active = COALESCE($7, is_active)
         WHERE id = $1
         RETURNING *",
    )
    .bind(id)
    .bind(data.name.as_deref().map(str::trim))
    .bind(data.floor)
    .bind(&data.email)
    .bind(&data.phone)
    .bind(&data.specialty)
    .bind(data.is_active)
    .fetch_optional(pool)
    .await?;

    cook.ok_or_else(|| RepoError::not_found(ENTITY, id))
}

/// Soft-deactivate or reactivate; dishes and orders keep their references
pub async fn set_active(pool: &PgPool, id: Uuid, is_active: bool) -> RepoResult<Cook> {
    let cook: Option<Cook> =
        sqlx::query_as("UPDATE cooks SET is_active = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(is_active)
            .fetch_optional(pool)
            .await?;

    let cook = cook.ok_or_else(|| RepoError::not_found(ENTITY, id))?;
    tracing::info!(cook_id = %id, is_active, "Cook activity changed");
    Ok(cook)
}

/// Hard delete. Dishes lose their default cook and orders lose their
/// assignee; neither is removed.
pub async fn delete(pool: &PgPool, id: Uuid) -> RepoResult<()> {
    let result = sqlx::query("DELETE FROM cooks WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RepoError::not_found(ENTITY, id));
    }
    tracing::info!(cook_id = %id, "Cook deleted");
    Ok(())
}
