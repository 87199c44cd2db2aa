//! CSV ingestion.

use super::{file_stem, parse_cell, Dataset, IngestError, IngestResult};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Read a CSV file; the header row becomes the column list.
pub fn read_csv(path: &Path) -> IngestResult<Dataset> {
    let bytes = fs::read(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_csv_bytes(file_stem(path), &bytes)
}

/// Read CSV content from memory.
///
/// Cells are decoded lossily rather than rejected: Latin-1 exports from
/// spreadsheet tools are common enough that a hard UTF-8 requirement would
/// bounce real uploads.
pub fn read_csv_bytes(name: &str, bytes: &[u8]) -> IngestResult<Dataset> {
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let columns: Vec<String> = reader
        .byte_headers()?
        .iter()
        .map(|header| String::from_utf8_lossy(header).trim().to_string())
        .collect();
    if columns.is_empty() {
        return Err(IngestError::NoColumns);
    }

    let mut rows = Vec::new();
    for record in reader.byte_records() {
        let record = record?;
        let mut row: Vec<Value> = record
            .iter()
            .map(|cell| parse_cell(&String::from_utf8_lossy(cell)))
            .collect();
        row.resize(columns.len(), Value::Null);
        rows.push(row);
    }

    Ok(Dataset {
        name: name.to_string(),
        columns,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reads_headers_and_typed_rows() {
        let input = b"name,price,in_stock\nWidget,9.50,true\nGadget,12,false\n";
        let dataset = read_csv_bytes("products", input).unwrap();
        assert_eq!(dataset.columns, vec!["name", "price", "in_stock"]);
        assert_eq!(dataset.rows.len(), 2);
        assert_eq!(dataset.rows[0], vec![json!("Widget"), json!(9.5), json!(true)]);
        assert_eq!(dataset.rows[1][1], json!(12));
    }

    #[test]
    fn test_short_rows_are_padded() {
        let input = b"a,b,c\n1,2\n";
        let dataset = read_csv_bytes("t", input).unwrap();
        assert_eq!(dataset.rows[0], vec![json!(1), json!(2), Value::Null]);
    }

    #[test]
    fn test_non_utf8_cells_decode_lossily() {
        // "café" in Latin-1: é = 0xE9
        let input = b"city\ncaf\xe9\n";
        let dataset = read_csv_bytes("t", input).unwrap();
        assert_eq!(dataset.rows[0][0], json!("caf\u{fffd}"));
    }
}
