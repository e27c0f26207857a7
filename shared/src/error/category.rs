//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Cook errors
/// - 2xxx: Dish errors
/// - 3xxx: Daily order errors
/// - 4xxx: Sync log errors
/// - 5xxx: Bulk upload errors
/// - 9xxx: System errors (also anything unassigned above 5xxx)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Cook errors (1xxx)
    Cook,
    /// Dish errors (2xxx)
    Dish,
    /// Daily order errors (3xxx)
    Order,
    /// Sync log errors (4xxx)
    Sync,
    /// Bulk upload errors (5xxx)
    Upload,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Cook,
            2000..3000 => Self::Dish,
            3000..4000 => Self::Order,
            4000..5000 => Self::Sync,
            5000..6000 => Self::Upload,
            _ => Self::System,
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}
