//! factory-cloud: task-tracking store for a food factory
//!
//! - `db`: cooks, dishes, daily orders and the external sync log on PostgreSQL
//! - `validation`: input limits checked before writes
//! - `loader`: bulk upload of cooks and dishes from a JSON file
//! - `api`: health endpoints

pub mod api;
pub mod config;
pub mod db;
pub mod loader;
pub mod logger;
pub mod state;
pub mod validation;

pub use config::Config;
pub use db::{RepoError, RepoResult};
pub use state::AppState;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
