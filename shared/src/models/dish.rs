//! Dish Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::cook::CookSummary;

/// Dish entity (menu item with an optional default preparer)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Dish {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    /// Nulled by the store when the cook is deleted
    pub default_cook_id: Option<Uuid>,
    /// Minutes
    pub preparation_time: Option<i32>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Dish with its default cook resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DishWithCook {
    #[serde(flatten)]
    pub dish: Dish,
    pub default_cook: Option<CookSummary>,
}

/// Create dish payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DishCreate {
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub default_cook_id: Option<Uuid>,
    pub preparation_time: Option<i32>,
    /// Defaults to true
    pub is_active: Option<bool>,
}

impl DishCreate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Update dish payload
///
/// The default cook is changed through its own operation because "absent"
/// and "clear" must be distinguishable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DishUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub preparation_time: Option<i32>,
    pub is_active: Option<bool>,
}
