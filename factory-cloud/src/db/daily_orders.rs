//! Daily order queries
//!
//! At most one row exists per `(order_date, dish_id)`. A second plain insert
//! for the same pair fails with `RepoError::Duplicate`; [`add_to_order`] is the
//! operation that merges into the existing row instead.

use chrono::NaiveDate;
use shared::models::{
    CookSummary, DailyOrder, DailyOrderCreate, DailyOrderUpdate, OrderLine, OrderStatus,
};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use super::{RepoError, RepoResult};
use crate::validation::{
    MAX_ORDER_QUANTITY, ValidationError, validate_order_create, validate_order_increment,
    validate_order_update,
};

pub const ENTITY: &str = "Daily order";

const SELECT_LINES: &str = "SELECT o.*,
        d.name AS dish_name, d.category AS dish_category,
        c.name AS cook_name, c.floor AS cook_floor
     FROM daily_orders o
     JOIN dishes d ON d.id = o.dish_id
     LEFT JOIN cooks c ON c.id = o.assigned_cook_id";

#[derive(sqlx::FromRow)]
struct OrderLineRow {
    #[sqlx(flatten)]
    order: DailyOrder,
    dish_name: String,
    dish_category: Option<String>,
    cook_name: Option<String>,
    cook_floor: Option<i32>,
}

impl From<OrderLineRow> for OrderLine {
    fn from(row: OrderLineRow) -> Self {
        let assigned_cook = match (row.order.assigned_cook_id, row.cook_name) {
            (Some(id), Some(name)) => Some(CookSummary {
                id,
                name,
                floor: row.cook_floor,
            }),
            _ => None,
        };
        OrderLine {
            order: row.order,
            dish_name: row.dish_name,
            dish_category: row.dish_category,
            assigned_cook,
        }
    }
}

/// Insert one order line. Without an explicit assignee the dish's default
/// cook at insert time is used.
pub async fn create<'e, E>(executor: E, data: &DailyOrderCreate) -> RepoResult<DailyOrder>
where
    E: PgExecutor<'e>,
{
    validate_order_create(data)?;

    let order: DailyOrder = sqlx::query_as(
        "INSERT INTO daily_orders (order_date, dish_id, assigned_cook_id, quantity, status, notes)
         VALUES (
            $1, $2,
            COALESCE($3, (SELECT default_cook_id FROM dishes WHERE id = $2)),
            $4, $5, $6
         )
         RETURNING *",
    )
    .bind(data.order_date)
    .bind(data.dish_id)
    .bind(data.assigned_cook_id)
    .bind(data.quantity)
    .bind(data.status.unwrap_or_default().as_str())
    .bind(&data.notes)
    .fetch_one(executor)
    .await?;

    tracing::debug!(
        order_id = %order.id,
        order_date = %order.order_date,
        dish_id = %order.dish_id,
        quantity = order.quantity,
        "Daily order created"
    );
    Ok(order)
}

/// Insert a day's lines in one transaction; any failing line rolls back all
pub async fn create_batch(pool: &PgPool, lines: &[DailyOrderCreate]) -> RepoResult<Vec<DailyOrder>> {
    if lines.is_empty() {
        return Err(RepoError::EmptyBatch);
    }

    let mut tx = pool.begin().await?;
    let mut created = Vec::with_capacity(lines.len());
    for line in lines {
        created.push(create(&mut *tx, line).await?);
    }
    tx.commit().await?;

    tracing::info!(count = created.len(), "Daily order batch created");
    Ok(created)
}

/// Add `data.quantity` portions to the line for `(order_date, dish_id)`,
/// creating it if absent. Runs as a single upsert so concurrent callers
/// cannot lose each other's increments. An existing row keeps its assignee
/// and status; new notes replace old ones only when given.
///
/// The merged quantity may not pass [`MAX_ORDER_QUANTITY`]; the guard sits in
/// the upsert itself, so a rejected increment leaves the line untouched.
pub async fn add_to_order(pool: &PgPool, data: &DailyOrderCreate) -> RepoResult<DailyOrder> {
    validate_order_increment(data.quantity)?;
    validate_order_create(data)?;

    let order: Option<DailyOrder> = sqlx::query_as(
        "INSERT INTO daily_orders (order_date, dish_id, assigned_cook_id, quantity, status, notes)
         VALUES (
            $1, $2,
            COALESCE($3, (SELECT default_cook_id FROM dishes WHERE id = $2)),
            $4, $5, $6
         )
         ON CONFLICT ON CONSTRAINT daily_orders_order_date_dish_id_key DO UPDATE SET
            quantity = daily_orders.quantity + EXCLUDED.quantity,
            notes = COALESCE(EXCLUDED.notes, daily_orders.notes)
         WHERE daily_orders.quantity + EXCLUDED.quantity <= $7
         RETURNING *",
    )
    .bind(data.order_date)
    .bind(data.dish_id)
    .bind(data.assigned_cook_id)
    .bind(data.quantity)
    .bind(data.status.unwrap_or_default().as_str())
    .bind(&data.notes)
    .bind(MAX_ORDER_QUANTITY)
    .fetch_optional(pool)
    .await?;

    // No row back: the line exists and the merge would pass the cap
    let Some(order) = order else {
        tracing::debug!(
            order_date = %data.order_date,
            dish_id = %data.dish_id,
            added = data.quantity,
            "Add to order rejected, line is full"
        );
        return Err(ValidationError::LineFull {
            added: data.quantity,
            max: MAX_ORDER_QUANTITY,
        }
        .into());
    };

    tracing::debug!(
        order_id = %order.id,
        added = data.quantity,
        quantity = order.quantity,
        "Daily order quantity added"
    );
    Ok(order)
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> RepoResult<Option<DailyOrder>> {
    let order = sqlx::query_as("SELECT * FROM daily_orders WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(order)
}

/// The production sheet for one date, by dish name
pub async fn list_for_date(pool: &PgPool, order_date: NaiveDate) -> RepoResult<Vec<OrderLine>> {
    let rows: Vec<OrderLineRow> =
        sqlx::query_as(&format!("{SELECT_LINES} WHERE o.order_date = $1 ORDER BY d.name, o.id"))
            .bind(order_date)
            .fetch_all(pool)
            .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

/// Lines assigned to a cook, optionally limited to one date
pub async fn list_for_cook(
    pool: &PgPool,
    cook_id: Uuid,
    order_date: Option<NaiveDate>,
) -> RepoResult<Vec<OrderLine>> {
    let rows: Vec<OrderLineRow> = sqlx::query_as(&format!(
        "{SELECT_LINES}
         WHERE o.assigned_cook_id = $1 AND ($2::date IS NULL OR o.order_date = $2)
         ORDER BY o.order_date, d.name"
    ))
    .bind(cook_id)
    .bind(order_date)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

/// Partial update. `status` is written as given, subject only to the
/// storage check; use [`transition`] for the production flow.
pub async fn update(pool: &PgPool, id: Uuid, data: &DailyOrderUpdate) -> RepoResult<DailyOrder> {
    validate_order_update(data)?;

    let order: Option<DailyOrder> = sqlx::query_as(
        "UPDATE daily_orders SET
            quantity = COALESCE($2, quantity),
            notes = COALESCE($3, notes),
            assigned_cook_id = COALESCE($4, assigned_cook_id),
            status = COALESCE($5, status)
         WHERE id = $1
         RETURNING *",
    )
    .bind(id)
    .bind(data.quantity)
    .bind(&data.notes)
    .bind(data.assigned_cook_id)
    .bind(data.status.map(|s| s.as_str()))
    .fetch_optional(pool)
    .await?;

    order.ok_or_else(|| RepoError::not_found(ENTITY, id))
}

/// Move an order along the production flow. Entering `in_progress` stamps
/// `started_at`; entering `completed` stamps `completed_at`.
pub async fn transition(pool: &PgPool, id: Uuid, next: OrderStatus) -> RepoResult<DailyOrder> {
    let mut tx = pool.begin().await?;

    let current: Option<DailyOrder> =
        sqlx::query_as("SELECT * FROM daily_orders WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
    let current = current.ok_or_else(|| RepoError::not_found(ENTITY, id))?;

    if !current.status.can_transition_to(next) {
        return Err(RepoError::InvalidTransition {
            from: current.status,
            to: next,
        });
    }

    let order: DailyOrder = sqlx::query_as(
        "UPDATE daily_orders SET
            status = $2,
            started_at = CASE WHEN $2 = 'in_progress' THEN COALESCE(started_at, NOW()) ELSE started_at END,
            completed_at = CASE WHEN $2 = 'completed' THEN NOW() ELSE completed_at END
         WHERE id = $1
         RETURNING *",
    )
    .bind(id)
    .bind(next.as_str())
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(order_id = %id, from = %current.status, to = %next, "Daily order status changed");
    Ok(order)
}
