//! Cook Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Cook entity (staff member who prepares dishes)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Cook {
    pub id: Uuid,
    pub name: String,
    /// Workspace floor
    pub floor: Option<i32>,
    /// Unique across cooks when present
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Free-text category (bakery, meat, dairy...)
    pub specialty: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Minimal cook projection embedded in dish / order joins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CookSummary {
    pub id: Uuid,
    pub name: String,
    pub floor: Option<i32>,
}

impl From<&Cook> for CookSummary {
    fn from(cook: &Cook) -> Self {
        Self {
            id: cook.id,
            name: cook.name.clone(),
            floor: cook.floor,
        }
    }
}

/// Create cook payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CookCreate {
    pub name: String,
    pub floor: Option<i32>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialty: Option<String>,
    /// Defaults to true
    pub is_active: Option<bool>,
}

impl CookCreate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Update cook payload (absent fields are left untouched)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CookUpdate {
    pub name: Option<String>,
    pub floor: Option<i32>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialty: Option<String>,
    pub is_active: Option<bool>,
}
