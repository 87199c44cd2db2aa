//! Tabular data ingestion.
//!
//! CSV, Excel and JSON inputs all land in the same [`Dataset`] shape:
//! ordered column headers plus rows of typed JSON values. Downstream code
//! (schema inference, storage, chart building) never cares which format the
//! data arrived in.

mod csv;
mod excel;
mod json;

pub use csv::{read_csv, read_csv_bytes};
pub use excel::read_excel;
pub use json::{read_json, read_json_file};

use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for ingestion.
pub type IngestResult<T> = Result<T, IngestError>;

/// Errors that can occur while reading tabular input.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("failed to read workbook: {0}")]
    Excel(#[from] calamine::Error),

    #[error("workbook has no sheets")]
    EmptyWorkbook,

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no records found in JSON input")]
    NoRecords,

    #[error("input has no columns")]
    NoColumns,

    #[error("unsupported file extension: {0}")]
    UnsupportedFormat(String),
}

/// Uploaded tabular content, decoupled from its source format.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    /// Stem of the originating file or URL, used for table naming.
    pub name: String,
    /// Column headers in source order.
    pub columns: Vec<String>,
    /// Rows of cells, one per column. Missing cells are null.
    pub rows: Vec<Vec<Value>>,
}

impl Dataset {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a column by header.
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == header)
    }
}

/// Read a file, dispatching on its extension.
pub fn read_file(path: &Path) -> IngestResult<Dataset> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_lowercase();

    match extension.as_str() {
        "csv" | "tsv" => read_csv(path),
        "xlsx" | "xls" | "xlsm" => read_excel(path),
        "json" => read_json_file(path),
        other => Err(IngestError::UnsupportedFormat(other.to_string())),
    }
}

/// Stem of a path, for table naming.
pub(crate) fn file_stem(path: &Path) -> &str {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("upload")
}

/// Type a raw text cell by parse attempt: integer, float, boolean, else
/// text. Empty and conventional missing markers become null.
pub(crate) fn parse_cell(raw: &str) -> Value {
    let trimmed = raw.trim();
    if is_missing(trimmed) {
        return Value::Null;
    }
    if let Ok(int) = trimmed.parse::<i64>() {
        return Value::from(int);
    }
    if let Ok(float) = trimmed.parse::<f64>() {
        if float.is_finite() {
            return Value::from(float);
        }
    }
    match trimmed.to_lowercase().as_str() {
        "true" | "yes" => return Value::Bool(true),
        "false" | "no" => return Value::Bool(false),
        _ => {}
    }
    Value::String(trimmed.to_string())
}

fn is_missing(s: &str) -> bool {
    if s.is_empty() {
        return true;
    }
    matches!(
        s.to_lowercase().as_str(),
        "n/a" | "na" | "null" | "none" | "nan" | "-"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_cell_types() {
        assert_eq!(parse_cell("42"), json!(42));
        assert_eq!(parse_cell("3.25"), json!(3.25));
        assert_eq!(parse_cell("yes"), json!(true));
        assert_eq!(parse_cell(" widget "), json!("widget"));
        assert_eq!(parse_cell(""), Value::Null);
        assert_eq!(parse_cell("N/A"), Value::Null);
    }
}
