//! Shared helpers for database-backed tests
//!
//! The tests use `#[sqlx::test]`, which creates a throwaway database per test
//! from `DATABASE_URL` and applies `./migrations` before handing over the pool.

#![allow(dead_code)]

use chrono::NaiveDate;
use factory_cloud::db;
use shared::models::{Cook, CookCreate, DailyOrder, DailyOrderCreate, Dish, DishCreate};
use sqlx::PgPool;
use uuid::Uuid;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub async fn cook(pool: &PgPool, name: &str) -> Cook {
    db::cooks::create(pool, &CookCreate::new(name))
        .await
        .expect("create cook")
}

pub async fn dish(pool: &PgPool, name: &str, default_cook_id: Option<Uuid>) -> Dish {
    let mut data = DishCreate::new(name);
    data.default_cook_id = default_cook_id;
    db::dishes::create(pool, &data).await.expect("create dish")
}

pub async fn order(pool: &PgPool, order_date: NaiveDate, dish_id: Uuid, quantity: i32) -> DailyOrder {
    db::daily_orders::create(pool, &DailyOrderCreate::new(order_date, dish_id, quantity))
        .await
        .expect("create order")
}
