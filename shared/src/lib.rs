//! Shared types for the food-factory task tracker
//!
//! Entity models and the unified error system used by the store, the bulk
//! loader and any API or sync worker built on top of them.

pub mod error;
pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};
