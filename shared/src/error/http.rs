//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::CookNotFound
            | Self::DishNotFound
            | Self::OrderNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists
            | Self::CookEmailExists
            | Self::OrderDuplicateForDate
            | Self::OrderIllegalTransition
            | Self::SyncLogImmutable => StatusCode::CONFLICT,

            // 422 Unprocessable (dangling references)
            Self::DishDefaultCookNotFound
            | Self::OrderDishNotFound
            | Self::OrderCookNotFound
            | Self::SyncOrderNotFound
            | Self::UploadCookUnresolved => StatusCode::UNPROCESSABLE_ENTITY,

            // 415 Unsupported Media Type
            Self::UnsupportedFileFormat => StatusCode::UNSUPPORTED_MEDIA_TYPE,

            // 503 Service Unavailable (transient errors, client can retry)
            Self::NetworkError | Self::TimeoutError => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            Self::DatabaseError | Self::ConfigError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (default for validation errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
