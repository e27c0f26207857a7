//! Bulk upload of cooks and dishes
//!
//! Input is a JSON document or a spreadsheet with `cooks` and `dishes` sheets.
//! Cooks are written first so dishes can reference them by name. Every row is
//! its own write: a failing row is logged and counted, the rest continue.

mod records;
mod workbook;

pub use records::{CookRecord, DishRecord, UploadDocument};

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use shared::error::{AppError, ErrorCode};
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::db::{self, RepoError};

/// File extensions the loader accepts
pub const SUPPORTED_EXTENSIONS: &[&str] = &["json", "xlsx", "xlsm", "xls", "ods"];

/// What to do with a dish whose default cook name resolves to nobody
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum MissingCookPolicy {
    /// Insert the dish without a default cook and log a warning
    #[default]
    Unassigned,
    /// Skip the dish and record it as failed
    Fail,
}

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to open workbook {path}: {source}")]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("sheet '{sheet}' row {row}: {source}")]
    Row {
        sheet: String,
        row: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl From<LoaderError> for AppError {
    fn from(err: LoaderError) -> Self {
        let code = match &err {
            LoaderError::UnsupportedFormat(_) => ErrorCode::UnsupportedFileFormat,
            LoaderError::Io { .. }
            | LoaderError::Parse { .. }
            | LoaderError::Workbook { .. }
            | LoaderError::Row { .. } => ErrorCode::UploadFileUnreadable,
        };
        AppError::with_message(code, err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    Cook,
    Dish,
}

impl fmt::Display for RowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKind::Cook => f.write_str("cook"),
            RowKind::Dish => f.write_str("dish"),
        }
    }
}

/// One rejected row
#[derive(Debug, Clone, Serialize)]
pub struct RowFailure {
    pub kind: RowKind,
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UploadReport {
    pub cooks_inserted: usize,
    pub dishes_inserted: usize,
    /// Dishes inserted without the default cook their row named
    pub dishes_unassigned: usize,
    pub failures: Vec<RowFailure>,
}

impl UploadReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn fail(&mut self, kind: RowKind, name: &str, reason: impl Into<String>) {
        let reason = reason.into();
        tracing::warn!(%kind, name, reason = %reason, "Upload row rejected");
        self.failures.push(RowFailure {
            kind,
            name: name.to_string(),
            reason,
        });
    }
}

impl fmt::Display for UploadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "cooks inserted:  {}", self.cooks_inserted)?;
        writeln!(f, "dishes inserted: {}", self.dishes_inserted)?;
        if self.dishes_unassigned > 0 {
            writeln!(f, "  without default cook: {}", self.dishes_unassigned)?;
        }
        writeln!(f, "failed rows:     {}", self.failures.len())?;
        for failure in &self.failures {
            writeln!(f, "  {} '{}': {}", failure.kind, failure.name, failure.reason)?;
        }
        Ok(())
    }
}

/// Pick the reader by extension, then read and parse the document
pub fn read_document(path: &Path) -> Result<UploadDocument, LoaderError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(LoaderError::UnsupportedFormat(if ext.is_empty() {
            path.display().to_string()
        } else {
            ext
        }));
    }

    if ext == "json" {
        read_json(path)
    } else {
        workbook::read_workbook(path)
    }
}

fn read_json(path: &Path) -> Result<UploadDocument, LoaderError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoaderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| LoaderError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the document's cooks, then its dishes
pub async fn upload(pool: &PgPool, doc: &UploadDocument, policy: MissingCookPolicy) -> UploadReport {
    let mut report = UploadReport::default();
    let mut cook_ids: HashMap<String, Uuid> = HashMap::new();

    for record in &doc.cooks {
        match db::cooks::create(pool, &record.into()).await {
            Ok(cook) => {
                cook_ids.entry(cook.name.clone()).or_insert(cook.id);
                report.cooks_inserted += 1;
            }
            Err(e) => report.fail(RowKind::Cook, &record.name, e.to_string()),
        }
    }

    for record in &doc.dishes {
        let default_cook_id = match record.cook_name() {
            None => None,
            Some(name) => match resolve_cook(pool, &mut cook_ids, name).await {
                Ok(Some(id)) => Some(id),
                Ok(None) if policy == MissingCookPolicy::Unassigned => {
                    tracing::warn!(dish = %record.name, cook = name, "Default cook not found, dish left unassigned");
                    report.dishes_unassigned += 1;
                    None
                }
                Ok(None) => {
                    report.fail(
                        RowKind::Dish,
                        &record.name,
                        format!("{}: {name}", ErrorCode::UploadCookUnresolved.message()),
                    );
                    continue;
                }
                Err(e) => {
                    report.fail(RowKind::Dish, &record.name, e.to_string());
                    continue;
                }
            },
        };

        match db::dishes::create(pool, &record.to_create(default_cook_id)).await {
            Ok(_) => report.dishes_inserted += 1,
            Err(e) => report.fail(RowKind::Dish, &record.name, e.to_string()),
        }
    }

    tracing::info!(
        cooks = report.cooks_inserted,
        dishes = report.dishes_inserted,
        failed = report.failures.len(),
        "Upload finished"
    );
    report
}

/// Names from this upload first, then cooks already stored
async fn resolve_cook(
    pool: &PgPool,
    cook_ids: &mut HashMap<String, Uuid>,
    name: &str,
) -> Result<Option<Uuid>, RepoError> {
    if let Some(id) = cook_ids.get(name) {
        return Ok(Some(*id));
    }
    let found = db::cooks::find_by_name(pool, name).await?.map(|c| c.id);
    if let Some(id) = found {
        cook_ids.insert(name.to_string(), id);
    }
    Ok(found)
}
