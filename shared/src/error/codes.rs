//! Unified error codes for the food-factory store
//!
//! This module defines all error codes used by the store, the loader and any
//! caller that consumes them. Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Cook errors
//! - 2xxx: Dish errors
//! - 3xxx: Daily order errors
//! - 4xxx: Sync log errors
//! - 5xxx: Bulk upload errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Cook ====================
    /// Cook not found
    CookNotFound = 1001,
    /// Another cook already uses this email
    CookEmailExists = 1002,

    // ==================== 2xxx: Dish ====================
    /// Dish not found
    DishNotFound = 2001,
    /// Default cook reference does not exist
    DishDefaultCookNotFound = 2002,

    // ==================== 3xxx: Daily order ====================
    /// Daily order not found
    OrderNotFound = 3001,
    /// An order for this dish already exists on this date
    OrderDuplicateForDate = 3002,
    /// Quantity must be strictly positive
    OrderInvalidQuantity = 3003,
    /// Status is not one of the known values
    OrderInvalidStatus = 3004,
    /// Status change not allowed from the current status
    OrderIllegalTransition = 3005,
    /// Referenced dish does not exist
    OrderDishNotFound = 3006,
    /// Referenced cook does not exist
    OrderCookNotFound = 3007,
    /// Batch contains no lines
    OrderEmpty = 3008,

    // ==================== 4xxx: Sync log ====================
    /// Sync status is not one of the known values
    SyncInvalidStatus = 4001,
    /// Referenced order does not exist
    SyncOrderNotFound = 4002,
    /// Sync log rows are append-only
    SyncLogImmutable = 4003,

    // ==================== 5xxx: Bulk upload ====================
    /// Upload file format not supported
    UnsupportedFileFormat = 5001,
    /// Upload file could not be read or parsed
    UploadFileUnreadable = 5002,
    /// Default cook name did not resolve to a cook
    UploadCookUnresolved = 5003,

    // ==================== 9xxx: System ====================
    /// Database error
    DatabaseError = 9002,
    /// Network error
    NetworkError = 9003,
    /// Operation timed out
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Cook
            ErrorCode::CookNotFound => "Cook not found",
            ErrorCode::CookEmailExists => "A cook with this email already exists",

            // Dish
            ErrorCode::DishNotFound => "Dish not found",
            ErrorCode::DishDefaultCookNotFound => "Default cook not found",

            // Daily order
            ErrorCode::OrderNotFound => "Daily order not found",
            ErrorCode::OrderDuplicateForDate => "An order for this dish already exists on this date",
            ErrorCode::OrderInvalidQuantity => "Quantity must be greater than zero",
            ErrorCode::OrderInvalidStatus => "Unknown order status",
            ErrorCode::OrderIllegalTransition => "Order status change not allowed",
            ErrorCode::OrderDishNotFound => "Dish for order not found",
            ErrorCode::OrderCookNotFound => "Assigned cook not found",
            ErrorCode::OrderEmpty => "Order contains no items",

            // Sync log
            ErrorCode::SyncInvalidStatus => "Unknown sync status",
            ErrorCode::SyncOrderNotFound => "Order for sync log not found",
            ErrorCode::SyncLogImmutable => "Sync log entries cannot be modified",

            // Bulk upload
            ErrorCode::UnsupportedFileFormat => "Unsupported file format",
            ErrorCode::UploadFileUnreadable => "Upload file could not be read",
            ErrorCode::UploadCookUnresolved => "Cook name could not be resolved",

            // System
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Cook
            1001 => Ok(ErrorCode::CookNotFound),
            1002 => Ok(ErrorCode::CookEmailExists),

            // Dish
            2001 => Ok(ErrorCode::DishNotFound),
            2002 => Ok(ErrorCode::DishDefaultCookNotFound),

            // Daily order
            3001 => Ok(ErrorCode::OrderNotFound),
            3002 => Ok(ErrorCode::OrderDuplicateForDate),
            3003 => Ok(ErrorCode::OrderInvalidQuantity),
            3004 => Ok(ErrorCode::OrderInvalidStatus),
            3005 => Ok(ErrorCode::OrderIllegalTransition),
            3006 => Ok(ErrorCode::OrderDishNotFound),
            3007 => Ok(ErrorCode::OrderCookNotFound),
            3008 => Ok(ErrorCode::OrderEmpty),

            // Sync log
            4001 => Ok(ErrorCode::SyncInvalidStatus),
            4002 => Ok(ErrorCode::SyncOrderNotFound),
            4003 => Ok(ErrorCode::SyncLogImmutable),

            // Bulk upload
            5001 => Ok(ErrorCode::UnsupportedFileFormat),
            5002 => Ok(ErrorCode::UploadFileUnreadable),
            5003 => Ok(ErrorCode::UploadCookUnresolved),

            // System
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
