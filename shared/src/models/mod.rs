//! Data models
//!
//! Shared between the store and anything that consumes it.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are UUIDs assigned by PostgreSQL.

pub mod cook;
pub mod daily_order;
pub mod dish;
pub mod sync_log;

// Re-exports
pub use cook::*;
pub use daily_order::*;
pub use dish::*;
pub use sync_log::*;
