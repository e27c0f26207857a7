//! Unified error system for the food-factory store
//!
//! This module provides:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ApiResponse`]: Response envelope for the HTTP endpoints
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Cook errors
//! - 2xxx: Dish errors
//! - 3xxx: Daily order errors
//! - 4xxx: Sync log errors
//! - 5xxx: Bulk upload errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! let err = AppError::new(ErrorCode::OrderDuplicateForDate)
//!     .with_detail("order_date", "2024-01-01");
//!
//! let response: ApiResponse<()> = err.into();
//! assert_eq!(response.code, 3002);
//! assert_eq!(response.details.unwrap()["order_date"], "2024-01-01");
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
