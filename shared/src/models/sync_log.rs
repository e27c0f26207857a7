//! External Sync Log Model
//!
//! Append-only record of one attempt to push an order to an external system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::daily_order::InvalidStatus;

/// Outcome of a sync attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    Success,
    Failed,
    /// In flight or unknown
    Pending,
}

impl SyncStatus {
    pub const ALL: [SyncStatus; 3] = [SyncStatus::Success, SyncStatus::Failed, SyncStatus::Pending];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failed => "failed",
            Self::Pending => "pending",
        }
    }

    /// Failed attempts are the ones a sync worker should retry
    pub const fn is_retry_candidate(&self) -> bool {
        matches!(self, Self::Failed)
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SyncStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(Self::Success),
            "failed" => Ok(Self::Failed),
            "pending" => Ok(Self::Pending),
            other => Err(InvalidStatus(other.to_string())),
        }
    }
}

impl TryFrom<String> for SyncStatus {
    type Error = InvalidStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Sync log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct SyncLog {
    pub id: Uuid,
    pub order_id: Uuid,
    #[cfg_attr(feature = "db", sqlx(try_from = "String"))]
    pub sync_status: SyncStatus,
    pub request_payload: Option<serde_json::Value>,
    pub response_payload: Option<serde_json::Value>,
    pub error_message: Option<String>,
    pub synced_at: DateTime<Utc>,
}

/// Append sync log payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncLogCreate {
    pub order_id: Uuid,
    pub sync_status: SyncStatus,
    pub request_payload: Option<serde_json::Value>,
    pub response_payload: Option<serde_json::Value>,
    pub error_message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_status_text() {
        for status in SyncStatus::ALL {
            assert_eq!(status.as_str().parse::<SyncStatus>(), Ok(status));
        }
        assert!("ok".parse::<SyncStatus>().is_err());
    }

    #[test]
    fn test_retry_candidates() {
        assert!(SyncStatus::Failed.is_retry_candidate());
        assert!(!SyncStatus::Pending.is_retry_candidate());
        assert!(!SyncStatus::Success.is_retry_candidate());
    }

    #[test]
    fn test_sync_log_create_deserialize() {
        let json = r#"{
            "order_id": "7f1b0b7e-5d7c-4f39-9a43-1c1f2b9d8c11",
            "sync_status": "failed",
            "request_payload": {"total_dishes": 50},
            "response_payload": null,
            "error_message": "timeout"
        }"#;
        let create: SyncLogCreate = serde_json::from_str(json).unwrap();
        assert_eq!(create.sync_status, SyncStatus::Failed);
        assert_eq!(create.request_payload.unwrap()["total_dishes"], 50);
        assert!(create.response_payload.is_none());
    }
}
