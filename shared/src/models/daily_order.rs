//! Daily Order Model
//!
//! One dish's production task for one calendar date. The store allows at most
//! one row per `(order_date, dish_id)`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

use super::cook::CookSummary;

/// Production status of a daily order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

/// Raised when a string is not one of the known status values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid status: {0}")]
pub struct InvalidStatus(pub String);

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::InProgress,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    /// Stored text form
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Completed and cancelled orders accept no further status change
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Forward-only production flow:
    /// pending → in_progress → completed, and any non-terminal → cancelled.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::InProgress)
                | (Self::Pending, Self::Cancelled)
                | (Self::InProgress, Self::Completed)
                | (Self::InProgress, Self::Cancelled)
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(InvalidStatus(other.to_string())),
        }
    }
}

impl TryFrom<String> for OrderStatus {
    type Error = InvalidStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Daily order entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DailyOrder {
    pub id: Uuid,
    pub order_date: NaiveDate,
    pub dish_id: Uuid,
    /// May differ from the dish's default cook
    pub assigned_cook_id: Option<Uuid>,
    pub quantity: i32,
    #[cfg_attr(feature = "db", sqlx(try_from = "String"))]
    pub status: OrderStatus,
    pub notes: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Order row joined with its dish and assigned cook, as shown on a day's sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    #[serde(flatten)]
    pub order: DailyOrder,
    pub dish_name: String,
    pub dish_category: Option<String>,
    pub assigned_cook: Option<CookSummary>,
}

/// Create daily order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyOrderCreate {
    pub order_date: NaiveDate,
    pub dish_id: Uuid,
    /// Falls back to the dish's default cook when absent
    pub assigned_cook_id: Option<Uuid>,
    pub quantity: i32,
    /// Defaults to pending
    pub status: Option<OrderStatus>,
    pub notes: Option<String>,
}

impl DailyOrderCreate {
    pub fn new(order_date: NaiveDate, dish_id: Uuid, quantity: i32) -> Self {
        Self {
            order_date,
            dish_id,
            assigned_cook_id: None,
            quantity,
            status: None,
            notes: None,
        }
    }
}

/// Update daily order payload
///
/// `status` here is a raw overwrite checked only against the enumeration;
/// use the transition operation for the validated production flow.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailyOrderUpdate {
    pub quantity: Option<i32>,
    pub notes: Option<String>,
    pub assigned_cook_id: Option<Uuid>,
    pub status: Option<OrderStatus>,
}
