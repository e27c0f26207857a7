//! Dish queries

use shared::models::{CookSummary, Dish, DishCreate, DishUpdate, DishWithCook};
use sqlx::PgPool;
use uuid::Uuid;

use super::{RepoError, RepoResult};
use crate::validation::{validate_dish_create, validate_dish_update};

pub const ENTITY: &str = "Dish";

const SELECT_WITH_COOK: &str = "SELECT d.*, c.name AS cook_name, c.floor AS cook_floor
     FROM dishes d
     LEFT JOIN cooks c ON c.id = d.default_cook_id";

#[derive(sqlx::FromRow)]
struct DishCookRow {
    #[sqlx(flatten)]
    dish: Dish,
    cook_name: Option<String>,
    cook_floor: Option<i32>,
}

impl From<DishCookRow> for DishWithCook {
    fn from(row: DishCookRow) -> Self {
        let default_cook = match (row.dish.default_cook_id, row.cook_name) {
            (Some(id), Some(name)) => Some(CookSummary {
                id,
                name,
                floor: row.cook_floor,
            }),
            _ => None,
        };
        DishWithCook {
            dish: row.dish,
            default_cook,
        }
    }
}

pub async fn create(pool: &PgPool, data: &DishCreate) -> RepoResult<Dish> {
    validate_dish_create(data)?;

    let dish: Dish = sqlx::query_as(
        "INSERT INTO dishes (name, description, category, default_cook_id, preparation_time, is_active)
         VALUES ($1, $2, $3, $4, $5, COALESCE($6, TRUE))
         RETURNING *",
    )
    .bind(data.name.trim())
    .bind(&data.description)
    .bind(&data.category)
    .bind(data.default_cook_id)
    .bind(data.preparation_time)
    .bind(data.is_active)
    .fetch_one(pool)
    .await?;

    tracing::debug!(dish_id = %dish.id, name = %dish.name, "Dish created");
    Ok(dish)
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> RepoResult<Option<Dish>> {
    let dish = sqlx::query_as("SELECT * FROM dishes WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(dish)
}

pub async fn find_with_cook(pool: &PgPool, id: Uuid) -> RepoResult<Option<DishWithCook>> {
    let row: Option<DishCookRow> = sqlx::query_as(&format!("{SELECT_WITH_COOK} WHERE d.id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Into::into))
}

/// Active dishes with their default cook, by name
pub async fn list_active_with_cooks(pool: &PgPool) -> RepoResult<Vec<DishWithCook>> {
    let rows: Vec<DishCookRow> = sqlx::query_as(&format!(
        "{SELECT_WITH_COOK} WHERE d.is_active ORDER BY d.name, d.created_at"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn update(pool: &PgPool, id: Uuid, data: &DishUpdate) -> RepoResult<Dish> {
    validate_dish_update(data)?;

    let dish: Option<Dish> = sqlx::query_as(
        "UPDATE dishes SET
            name = COALESCE($2, name),
            description = COALESCE($3, description),
            category = COALESCE($4, category),
            preparation_time = COALESCE($5, preparation_time),
            is_active = COALESCE($6, is_active)
         WHERE id = $1
         RETURNING *",
    )
    .bind(id)
    .bind(data.name.as_deref().map(str::trim))
    .bind(&data.description)
    .bind(&data.category)
    .bind(data.preparation_time)
    .bind(data.is_active)
    .fetch_optional(pool)
    .await?;

    dish.ok_or_else(|| RepoError::not_found(ENTITY, id))
}

/// Reassign the default cook, or clear it with `None`
pub async fn set_default_cook(pool: &PgPool, id: Uuid, cook_id: Option<Uuid>) -> RepoResult<Dish> {
    let dish: Option<Dish> =
        sqlx::query_as("UPDATE dishes SET default_cook_id = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(cook_id)
            .fetch_optional(pool)
            .await?;

    let dish = dish.ok_or_else(|| RepoError::not_found(ENTITY, id))?;
    tracing::info!(dish_id = %id, cook_id = ?cook_id, "Dish default cook changed");
    Ok(dish)
}

pub async fn set_active(pool: &PgPool, id: Uuid, is_active: bool) -> RepoResult<Dish> {
    let dish: Option<Dish> =
        sqlx::query_as("UPDATE dishes SET is_active = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(is_active)
            .fetch_optional(pool)
            .await?;

    dish.ok_or_else(|| RepoError::not_found(ENTITY, id))
}

/// Hard delete; the dish's orders and their sync history go with it
pub async fn delete(pool: &PgPool, id: Uuid) -> RepoResult<()> {
    let result = sqlx::query("DELETE FROM dishes WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RepoError::not_found(ENTITY, id));
    }
    tracing::info!(dish_id = %id, "Dish deleted with its orders");
    Ok(())
}
