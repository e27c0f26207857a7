//! Input validation helpers
//!
//! Application-level limits checked before a write reaches the database.
//! The schema stays the authority for the integrity rules (positive quantity,
//! status values, uniqueness); these limits keep obviously bad input out.

use std::ops::RangeInclusive;

use shared::error::ErrorCode;
use shared::models::{CookCreate, CookUpdate, DailyOrderCreate, DailyOrderUpdate, DishCreate, DishUpdate};
use thiserror::Error;

use crate::db::RepoResult;

// ── Limits ──────────────────────────────────────────────────────────

pub const MIN_NAME_LEN: usize = 2;

/// Cook names
pub const MAX_COOK_NAME_LEN: usize = 100;

/// Dish names
pub const MAX_DISH_NAME_LEN: usize = 200;

/// Dish categories and cook specialties
pub const MAX_CATEGORY_LEN: usize = 50;
pub const MAX_SPECIALTY_LEN: usize = 100;

/// Notes and descriptions
pub const MAX_NOTE_LEN: usize = 500;

/// Phone numbers
pub const MAX_PHONE_LEN: usize = 32;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Factory floors
pub const FLOOR_RANGE: RangeInclusive<i32> = 1..=10;

/// Preparation time in minutes
pub const PREPARATION_TIME_RANGE: RangeInclusive<i32> = 1..=600;

/// Upper bound for one order line; the lower bound is a schema check
pub const MAX_ORDER_QUANTITY: i32 = 500;

// ── Errors ──────────────────────────────────────────────────────────

/// A payload value rejected before any write
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Required { field: &'static str },

    #[error("{field} is too short ({len} chars, min {min})")]
    TooShort { field: &'static str, len: usize, min: usize },

    #[error("{field} is too long ({len} chars, max {max})")]
    TooLong { field: &'static str, len: usize, max: usize },

    #[error("{field} must be between {min} and {max} (got {value})")]
    OutOfRange {
        field: &'static str,
        min: i32,
        max: i32,
        value: i32,
    },

    #[error("{field} is not valid: {value}")]
    InvalidFormat { field: &'static str, value: String },

    /// The merged line of an add-to-order would pass [`MAX_ORDER_QUANTITY`]
    #[error("adding {added} would take the line past the maximum of {max}")]
    LineFull { added: i32, max: i32 },
}

impl ValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::Required { field }
            | Self::TooShort { field, .. }
            | Self::TooLong { field, .. }
            | Self::OutOfRange { field, .. }
            | Self::InvalidFormat { field, .. } => *field,
            Self::LineFull { .. } => "quantity",
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Required { .. } => ErrorCode::RequiredField,
            Self::TooShort { .. } | Self::TooLong { .. } => ErrorCode::ValidationFailed,
            Self::OutOfRange { field: "quantity", .. } | Self::LineFull { .. } => {
                ErrorCode::OrderInvalidQuantity
            }
            Self::OutOfRange { .. } => ErrorCode::ValueOutOfRange,
            Self::InvalidFormat { .. } => ErrorCode::InvalidFormat,
        }
    }
}

// ── Primitive checks ────────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limits.
pub fn validate_required_text(
    value: &str,
    field: &'static str,
    min_len: usize,
    max_len: usize,
) -> RepoResult<()> {
    let len = value.trim().chars().count();
    if len == 0 {
        return Err(ValidationError::Required { field }.into());
    }
    if len < min_len {
        return Err(ValidationError::TooShort { field, len, min: min_len }.into());
    }
    if len > max_len {
        return Err(ValidationError::TooLong { field, len, max: max_len }.into());
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &'static str,
    max_len: usize,
) -> RepoResult<()> {
    if let Some(v) = value {
        let len = v.chars().count();
        if len > max_len {
            return Err(ValidationError::TooLong { field, len, max: max_len }.into());
        }
    }
    Ok(())
}

fn validate_range(value: i32, field: &'static str, range: &RangeInclusive<i32>) -> RepoResult<()> {
    if !range.contains(&value) {
        return Err(ValidationError::OutOfRange {
            field,
            min: *range.start(),
            max: *range.end(),
            value,
        }
        .into());
    }
    Ok(())
}

fn validate_optional_range(
    value: Option<i32>,
    field: &'static str,
    range: &RangeInclusive<i32>,
) -> RepoResult<()> {
    value.map_or(Ok(()), |v| validate_range(v, field, range))
}

fn validate_email(email: &Option<String>) -> RepoResult<()> {
    validate_optional_text(email, "email", MAX_EMAIL_LEN)?;
    if let Some(e) = email {
        let (local, domain) = e.split_once('@').unwrap_or_default();
        if local.is_empty() || domain.is_empty() || e.contains(char::is_whitespace) {
            return Err(ValidationError::InvalidFormat {
                field: "email",
                value: e.clone(),
            }
            .into());
        }
    }
    Ok(())
}

fn validate_quantity_cap(quantity: Option<i32>) -> RepoResult<()> {
    match quantity {
        Some(q) if q > MAX_ORDER_QUANTITY => Err(ValidationError::OutOfRange {
            field: "quantity",
            min: 1,
            max: MAX_ORDER_QUANTITY,
            value: q,
        }
        .into()),
        _ => Ok(()),
    }
}

// ── Payload checks ──────────────────────────────────────────────────

pub fn validate_cook_create(data: &CookCreate) -> RepoResult<()> {
    validate_required_text(&data.name, "name", MIN_NAME_LEN, MAX_COOK_NAME_LEN)?;
    validate_optional_range(data.floor, "floor", &FLOOR_RANGE)?;
    validate_email(&data.email)?;
    validate_optional_text(&data.phone, "phone", MAX_PHONE_LEN)?;
    validate_optional_text(&data.specialty, "specialty", MAX_SPECIALTY_LEN)
}

pub fn validate_cook_update(data: &CookUpdate) -> RepoResult<()> {
    if let Some(name) = &data.name {
        validate_required_text(name, "name", MIN_NAME_LEN, MAX_COOK_NAME_LEN)?;
    }
    validate_optional_range(data.floor, "floor", &FLOOR_RANGE)?;
    validate_email(&data.email)?;
    validate_optional_text(&data.phone, "phone", MAX_PHONE_LEN)?;
    validate_optional_text(&data.specialty, "specialty", MAX_SPECIALTY_LEN)
}

pub fn validate_dish_create(data: &DishCreate) -> RepoResult<()> {
    validate_required_text(&data.name, "name", MIN_NAME_LEN, MAX_DISH_NAME_LEN)?;
    validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&data.category, "category", MAX_CATEGORY_LEN)?;
    validate_optional_range(data.preparation_time, "preparation_time", &PREPARATION_TIME_RANGE)
}

pub fn validate_dish_update(data: &DishUpdate) -> RepoResult<()> {
    if let Some(name) = &data.name {
        validate_required_text(name, "name", MIN_NAME_LEN, MAX_DISH_NAME_LEN)?;
    }
    validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&data.category, "category", MAX_CATEGORY_LEN)?;
    validate_optional_range(data.preparation_time, "preparation_time", &PREPARATION_TIME_RANGE)
}

pub fn validate_order_create(data: &DailyOrderCreate) -> RepoResult<()> {
    validate_quantity_cap(Some(data.quantity))?;
    validate_optional_text(&data.notes, "notes", MAX_NOTE_LEN)
}

pub fn validate_order_update(data: &DailyOrderUpdate) -> RepoResult<()> {
    validate_quantity_cap(data.quantity)?;
    validate_optional_text(&data.notes, "notes", MAX_NOTE_LEN)
}

/// Increment for an add-to-order request; must add at least one portion
pub fn validate_order_increment(quantity: i32) -> RepoResult<()> {
    validate_range(quantity, "quantity", &(1..=MAX_ORDER_QUANTITY))
}
