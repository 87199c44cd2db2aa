//! JSON ingestion.
//!
//! Accepts an array of record objects, or an envelope object whose first
//! array member holds the records (`{"products": [...], "total": 100}`
//! style API feeds). Column order and membership come from the first
//! record.

use super::{file_stem, Dataset, IngestError, IngestResult};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Read a JSON file of records.
pub fn read_json_file(path: &Path) -> IngestResult<Dataset> {
    let bytes = fs::read(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_slice(&bytes)?;
    read_json(file_stem(path), &value)
}

/// Build a dataset from parsed JSON.
///
/// Scalar members become columns; array members keep their array value
/// (they become child tables downstream); nested objects are kept as-is
/// and serialized at storage time.
pub fn read_json(name: &str, value: &Value) -> IngestResult<Dataset> {
    let records = unwrap_records(value)?;

    let first = records
        .iter()
        .find_map(Value::as_object)
        .ok_or(IngestError::NoRecords)?;
    let columns: Vec<String> = first.keys().cloned().collect();
    if columns.is_empty() {
        return Err(IngestError::NoColumns);
    }

    let rows = records
        .iter()
        .filter_map(Value::as_object)
        .map(|record| {
            columns
                .iter()
                .map(|column| record.get(column).cloned().unwrap_or(Value::Null))
                .collect()
        })
        .collect();

    Ok(Dataset {
        name: name.to_string(),
        columns,
        rows,
    })
}

fn unwrap_records(value: &Value) -> IngestResult<&[Value]> {
    match value {
        Value::Array(items) if !items.is_empty() => Ok(items),
        Value::Object(map) => map
            .values()
            .find_map(Value::as_array)
            .filter(|items| !items.is_empty())
            .map(Vec::as_slice)
            .ok_or(IngestError::NoRecords),
        _ => Err(IngestError::NoRecords),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_array_of_records() {
        let value = json!([
            {"title": "Widget", "price": 9.5},
            {"title": "Gadget", "price": 12.0},
        ]);
        let dataset = read_json("products", &value).unwrap();
        assert_eq!(dataset.columns, vec!["title", "price"]);
        assert_eq!(dataset.rows[1], vec![json!("Gadget"), json!(12.0)]);
    }

    #[test]
    fn test_envelope_object_is_unwrapped() {
        let value = json!({"products": [{"id": 1}], "total": 1});
        let dataset = read_json("feed", &value).unwrap();
        assert_eq!(dataset.columns, vec!["id"]);
        assert_eq!(dataset.rows.len(), 1);
    }

    #[test]
    fn test_missing_members_are_null() {
        let value = json!([{"a": 1, "b": 2}, {"a": 3}]);
        let dataset = read_json("t", &value).unwrap();
        assert_eq!(dataset.rows[1], vec![json!(3), Value::Null]);
    }

    #[test]
    fn test_scalar_input_is_rejected() {
        assert!(matches!(
            read_json("t", &json!(42)),
            Err(IngestError::NoRecords)
        ));
    }
}
