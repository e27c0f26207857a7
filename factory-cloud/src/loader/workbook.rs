//! Spreadsheet input
//!
//! A workbook carries a `cooks` sheet and a `dishes` sheet; either may be
//! missing and other sheets are ignored. Sheet names match case-insensitively.
//! The first row names the columns, each later row becomes one record, and
//! blank cells read as absent values.

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};

use super::{LoaderError, UploadDocument};

pub const COOKS_SHEET: &str = "cooks";
pub const DISHES_SHEET: &str = "dishes";

/// Columns kept as text even when a cell holds a number
const COOK_TEXT_COLUMNS: &[&str] = &["name", "email", "phone", "specialty"];
const DISH_TEXT_COLUMNS: &[&str] = &["name", "description", "category", "default_cook_name"];

pub fn read_workbook(path: &Path) -> Result<UploadDocument, LoaderError> {
    let workbook_error = |source: calamine::Error| LoaderError::Workbook {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = open_workbook_auto(path).map_err(workbook_error)?;
    let mut doc = UploadDocument::default();

    for sheet in workbook.sheet_names() {
        let target = sheet.trim().to_ascii_lowercase();
        if target != COOKS_SHEET && target != DISHES_SHEET {
            tracing::debug!(%sheet, "Ignoring sheet");
            continue;
        }

        let range = workbook.worksheet_range(&sheet).map_err(workbook_error)?;
        if target == COOKS_SHEET {
            doc.cooks = sheet_records(&range, &sheet, COOK_TEXT_COLUMNS)?;
        } else {
            doc.dishes = sheet_records(&range, &sheet, DISH_TEXT_COLUMNS)?;
        }
    }

    tracing::debug!(
        path = %path.display(),
        cooks = doc.cooks.len(),
        dishes = doc.dishes.len(),
        "Workbook read"
    );
    Ok(doc)
}

/// Map every row under the header onto `T`, skipping blank rows
fn sheet_records<T: DeserializeOwned>(
    range: &Range<Data>,
    sheet: &str,
    text_columns: &[&str],
) -> Result<Vec<T>, LoaderError> {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Vec::new());
    };
    let columns: Vec<Option<String>> = header
        .iter()
        .map(|cell| match cell {
            Data::String(s) => Some(s.trim().to_ascii_lowercase()).filter(|s| !s.is_empty()),
            _ => None,
        })
        .collect();

    // 1-based sheet row of the first record
    let first_row = range.start().map_or(0, |(row, _)| row as usize) + 2;

    let mut records = Vec::new();
    for (offset, row) in rows.enumerate() {
        let mut fields = Map::new();
        for (column, cell) in columns.iter().zip(row) {
            let Some(column) = column else { continue };
            let as_text = text_columns.contains(&column.as_str());
            if let Some(value) = cell_value(cell, as_text) {
                fields.insert(column.clone(), value);
            }
        }
        if fields.is_empty() {
            continue;
        }

        let record = serde_json::from_value(Value::Object(fields)).map_err(|source| {
            LoaderError::Row {
                sheet: sheet.to_string(),
                row: first_row + offset,
                source,
            }
        })?;
        records.push(record);
    }
    Ok(records)
}

/// `None` for blank, error and NaN cells
fn cell_value(cell: &Data, as_text: bool) -> Option<Value> {
    let value = match cell {
        Data::Empty | Data::Error(_) => return None,
        Data::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            Value::String(s.to_string())
        }
        Data::Bool(b) => Value::Bool(*b),
        Data::Int(i) if as_text => Value::String(i.to_string()),
        Data::Int(i) => Value::from(*i),
        Data::Float(f) if f.is_nan() => return None,
        // Spreadsheets store every number as a float
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => {
            let whole = *f as i64;
            if as_text {
                Value::String(whole.to_string())
            } else {
                Value::from(whole)
            }
        }
        Data::Float(f) if as_text => Value::String(f.to_string()),
        Data::Float(f) => Value::Number(Number::from_f64(*f)?),
        other => Value::String(other.to_string()),
    };
    Some(value)
}
