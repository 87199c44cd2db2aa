//! Excel ingestion via calamine.

use super::{file_stem, parse_cell, Dataset, IngestError, IngestResult};
use calamine::{open_workbook_auto, Data, Reader};
use serde_json::Value;
use std::path::Path;

/// Read the first worksheet of an `.xlsx`/`.xls` workbook; the first row
/// becomes the column list.
pub fn read_excel(path: &Path) -> IngestResult<Dataset> {
    let mut workbook = open_workbook_auto(path)?;

    let sheet_names = workbook.sheet_names().to_vec();
    let sheet = sheet_names.first().ok_or(IngestError::EmptyWorkbook)?;
    let range = workbook.worksheet_range(sheet)?;

    let mut rows_iter = range.rows();

    let columns: Vec<String> = rows_iter
        .next()
        .map(|row| row.iter().map(cell_to_header).collect())
        .unwrap_or_default();
    if columns.is_empty() {
        return Err(IngestError::NoColumns);
    }

    let rows = rows_iter
        .map(|row| {
            let mut cells: Vec<Value> = row.iter().map(cell_value).collect();
            cells.resize(columns.len(), Value::Null);
            cells
        })
        .collect();

    Ok(Dataset {
        name: file_stem(path).to_string(),
        columns,
        rows,
    })
}

fn cell_to_header(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        // text cells go through the same typing as CSV cells; spreadsheets
        // full of numbers-as-text are a fact of life
        Data::String(s) => parse_cell(s),
        Data::Int(i) => Value::from(*i),
        Data::Float(f) => Value::from(*f),
        Data::Bool(b) => Value::Bool(*b),
        Data::DateTime(dt) => Value::String(dt.to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Value::String(s.clone()),
        Data::Error(_) => Value::Null,
    }
}
