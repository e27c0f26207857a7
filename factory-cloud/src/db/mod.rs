//! Database access layer
//!
//! One module per table. Every write is a single statement or an explicit
//! transaction, so a failed write leaves no partial state behind. Integrity
//! rules (uniqueness, checks, foreign keys, `updated_at` stamping) live in the
//! schema; this layer only classifies the violations it gets back.

pub mod cooks;
pub mod daily_orders;
pub mod dishes;
pub mod sync_log;

use shared::error::{AppError, ErrorCode};
use shared::models::OrderStatus;
use sqlx::error::ErrorKind;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use crate::validation::ValidationError;

/// Constraint names declared in the schema migration
pub mod constraints {
    pub const COOK_EMAIL_UNIQUE: &str = "cooks_email_key";
    pub const DISH_DEFAULT_COOK_FK: &str = "dishes_default_cook_id_fkey";
    pub const ORDER_DISH_FK: &str = "daily_orders_dish_id_fkey";
    pub const ORDER_COOK_FK: &str = "daily_orders_assigned_cook_id_fkey";
    pub const ORDER_DATE_DISH_UNIQUE: &str = "daily_orders_order_date_dish_id_key";
    pub const ORDER_QUANTITY_CHECK: &str = "daily_orders_quantity_check";
    pub const ORDER_STATUS_CHECK: &str = "daily_orders_status_check";
    pub const SYNC_ORDER_FK: &str = "external_sync_log_order_id_fkey";
    pub const SYNC_STATUS_CHECK: &str = "external_sync_log_sync_status_check";
}

/// SQLSTATE raised by the append-only trigger on `external_sync_log`
const RESTRICT_VIOLATION: &str = "23001";

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// Unique constraint hit; carries the constraint name
    #[error("Duplicate: {0}")]
    Duplicate(String),

    /// Check / not-null constraint hit; carries the constraint name
    #[error("Constraint violated: {0}")]
    Constraint(String),

    /// Foreign key constraint hit; carries the constraint name
    #[error("Missing reference: {0}")]
    Reference(String),

    #[error("Immutable: {0}")]
    Immutable(String),

    #[error("Illegal status change: {from} -> {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Order batch is empty")]
    EmptyBatch,

    /// Pool could not hand out a connection in time
    #[error("Database timeout: {0}")]
    Timeout(String),

    /// Database unreachable or the pool is closed
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl RepoError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Classify a database-reported failure by SQLSTATE kind and constraint name
    fn from_database(
        kind: ErrorKind,
        code: Option<&str>,
        constraint: Option<&str>,
        message: &str,
    ) -> Self {
        let name = || constraint.unwrap_or(message).to_string();
        match kind {
            ErrorKind::UniqueViolation => Self::Duplicate(name()),
            ErrorKind::ForeignKeyViolation => Self::Reference(name()),
            ErrorKind::CheckViolation | ErrorKind::NotNullViolation => Self::Constraint(name()),
            _ if code == Some(RESTRICT_VIOLATION) => Self::Immutable(message.to_string()),
            _ => Self::Database(message.to_string()),
        }
    }

    /// True when the store rejected the write because of a declared rule
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            Self::Duplicate(_) | Self::Constraint(_) | Self::Reference(_) | Self::Immutable(_)
        )
    }
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => RepoError::from_database(
                db_err.kind(),
                db_err.code().as_deref(),
                db_err.constraint(),
                db_err.message(),
            ),
            timeout @ sqlx::Error::PoolTimedOut => RepoError::Timeout(timeout.to_string()),
            lost @ (sqlx::Error::Io(_) | sqlx::Error::Tls(_) | sqlx::Error::PoolClosed) => {
                RepoError::Connection(lost.to_string())
            }
            other => RepoError::Database(other.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        use constraints::*;

        match err {
            RepoError::NotFound { entity, id } => {
                let code = match entity {
                    cooks::ENTITY => ErrorCode::CookNotFound,
                    dishes::ENTITY => ErrorCode::DishNotFound,
                    daily_orders::ENTITY => ErrorCode::OrderNotFound,
                    _ => ErrorCode::NotFound,
                };
                AppError::with_message(code, format!("{entity} {id} not found"))
                    .with_detail("id", id)
            }
            RepoError::Duplicate(constraint) => {
                let code = match constraint.as_str() {
                    ORDER_DATE_DISH_UNIQUE => ErrorCode::OrderDuplicateForDate,
                    COOK_EMAIL_UNIQUE => ErrorCode::CookEmailExists,
                    _ => ErrorCode::AlreadyExists,
                };
                AppError::new(code).with_detail("constraint", constraint)
            }
            RepoError::Constraint(constraint) => {
                let code = match constraint.as_str() {
                    ORDER_QUANTITY_CHECK => ErrorCode::OrderInvalidQuantity,
                    ORDER_STATUS_CHECK => ErrorCode::OrderInvalidStatus,
                    SYNC_STATUS_CHECK => ErrorCode::SyncInvalidStatus,
                    _ => ErrorCode::ValidationFailed,
                };
                AppError::new(code).with_detail("constraint", constraint)
            }
            RepoError::Reference(constraint) => {
                let code = match constraint.as_str() {
                    DISH_DEFAULT_COOK_FK => ErrorCode::DishDefaultCookNotFound,
                    ORDER_DISH_FK => ErrorCode::OrderDishNotFound,
                    ORDER_COOK_FK => ErrorCode::OrderCookNotFound,
                    SYNC_ORDER_FK => ErrorCode::SyncOrderNotFound,
                    _ => ErrorCode::InvalidRequest,
                };
                AppError::new(code).with_detail("constraint", constraint)
            }
            RepoError::Immutable(msg) => {
                AppError::new(ErrorCode::SyncLogImmutable).with_detail("reason", msg)
            }
            RepoError::InvalidTransition { from, to } => AppError::with_message(
                ErrorCode::OrderIllegalTransition,
                format!("Cannot change status from {from} to {to}"),
            )
            .with_detail("from", from.as_str())
            .with_detail("to", to.as_str()),
            RepoError::Validation(err) => AppError::with_message(err.code(), err.to_string())
                .with_detail("field", err.field()),
            RepoError::EmptyBatch => AppError::new(ErrorCode::OrderEmpty),
            RepoError::Timeout(msg) => {
                tracing::warn!(error = %msg, "Store database timeout");
                AppError::new(ErrorCode::TimeoutError)
            }
            RepoError::Connection(msg) => {
                tracing::warn!(error = %msg, "Store database unreachable");
                AppError::new(ErrorCode::NetworkError)
            }
            RepoError::Database(msg) => {
                tracing::error!(error = %msg, "Store database error");
                AppError::new(ErrorCode::DatabaseError)
            }
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Open a pool and bring the schema up to date
pub async fn connect(database_url: &str, max_connections: u32) -> RepoResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    tracing::info!(max_connections, "Database connection established");

    migrate(&pool).await?;
    Ok(pool)
}

/// Apply pending schema migrations
pub async fn migrate(pool: &PgPool) -> RepoResult<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| RepoError::Database(format!("Failed to apply migrations: {e}")))?;
    tracing::info!("Database migrations applied");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use constraints::*;

    #[test]
    fn test_classify_unique_violation() {
        let err = RepoError::from_database(
            ErrorKind::UniqueViolation,
            Some("23505"),
            Some(ORDER_DATE_DISH_UNIQUE),
            "duplicate key value violates unique constraint",
        );
        assert!(matches!(&err, RepoError::Duplicate(c) if c == ORDER_DATE_DISH_UNIQUE));
        assert!(err.is_constraint_violation());

        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::OrderDuplicateForDate);
    }

    #[test]
    fn test_classify_check_violation() {
        let err = RepoError::from_database(
            ErrorKind::CheckViolation,
            Some("23514"),
            Some(ORDER_QUANTITY_CHECK),
            "new row violates check constraint",
        );
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::OrderInvalidQuantity);

        let err = RepoError::from_database(
            ErrorKind::CheckViolation,
            Some("23514"),
            Some(SYNC_STATUS_CHECK),
            "new row violates check constraint",
        );
        assert_eq!(AppError::from(err).code, ErrorCode::SyncInvalidStatus);
    }

    #[test]
    fn test_classify_foreign_key_violation() {
        let err = RepoError::from_database(
            ErrorKind::ForeignKeyViolation,
            Some("23503"),
            Some(ORDER_DISH_FK),
            "insert or update violates foreign key constraint",
        );
        assert!(matches!(err, RepoError::Reference(_)));
        assert_eq!(AppError::from(err).code, ErrorCode::OrderDishNotFound);
    }

    #[test]
    fn test_classify_append_only_trigger() {
        let err = RepoError::from_database(
            ErrorKind::Other,
            Some(RESTRICT_VIOLATION),
            None,
            "external_sync_log is append-only",
        );
        assert!(matches!(err, RepoError::Immutable(_)));
        assert_eq!(AppError::from(err).code, ErrorCode::SyncLogImmutable);
    }

    #[test]
    fn test_classify_other_database_error() {
        let err = RepoError::from_database(
            ErrorKind::Other,
            Some("57014"),
            None,
            "canceling statement due to statement timeout",
        );
        assert!(matches!(err, RepoError::Database(_)));
        assert!(!err.is_constraint_violation());
        assert_eq!(AppError::from(err).code, ErrorCode::DatabaseError);
    }

    #[test]
    fn test_row_not_found_is_database_error() {
        let err: RepoError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, RepoError::Database(_)));
    }

    #[test]
    fn test_not_found_maps_to_entity_code() {
        let app: AppError = RepoError::not_found(dishes::ENTITY, "abc").into();
        assert_eq!(app.code, ErrorCode::DishNotFound);
        assert_eq!(app.message, "Dish abc not found");

        let app: AppError = RepoError::not_found(daily_orders::ENTITY, "x").into();
        assert_eq!(app.code, ErrorCode::OrderNotFound);
    }

    #[test]
    fn test_transition_maps_to_conflict() {
        let app: AppError = RepoError::InvalidTransition {
            from: OrderStatus::Completed,
            to: OrderStatus::Pending,
        }
        .into();
        assert_eq!(app.code, ErrorCode::OrderIllegalTransition);
        assert_eq!(app.message, "Cannot change status from completed to pending");
    }

    #[test]
    fn test_pool_failures_map_to_unavailable() {
        let err: RepoError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, RepoError::Timeout(_)));
        assert_eq!(AppError::from(err).code, ErrorCode::TimeoutError);

        let err: RepoError = sqlx::Error::PoolClosed.into();
        assert!(matches!(err, RepoError::Connection(_)));
        assert_eq!(AppError::from(err).code, ErrorCode::NetworkError);
    }

    #[test]
    fn test_validation_and_empty_batch_codes() {
        let err: RepoError = ValidationError::OutOfRange {
            field: "floor",
            min: 1,
            max: 10,
            value: 12,
        }
        .into();
        let app = AppError::from(err);
        assert_eq!(app.code, ErrorCode::ValueOutOfRange);
        assert_eq!(app.details.unwrap()["field"], "floor");

        assert_eq!(AppError::from(RepoError::EmptyBatch).code, ErrorCode::OrderEmpty);
    }
}
