//! In-memory [`TableStore`] used by the CLI and tests.

use super::{Row, StoreError, StoreResult, TableStore, RESERVED_FIELDS};
use crate::schema::TableSpec;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: HashMap<String, StoredTable>,
}

#[derive(Debug)]
struct StoredTable {
    spec: TableSpec,
    rows: Vec<Row>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of the tables created so far.
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.keys().map(String::as_str).collect()
    }
}

impl TableStore for MemoryStore {
    fn create_table(&mut self, spec: &TableSpec) -> StoreResult<()> {
        if self.tables.contains_key(&spec.table) {
            return Err(StoreError::TableExists(spec.table.clone()));
        }
        self.tables.insert(
            spec.table.clone(),
            StoredTable {
                spec: spec.clone(),
                rows: Vec::new(),
            },
        );
        Ok(())
    }

    fn insert_row(&mut self, table: &str, row: Row) -> StoreResult<()> {
        let stored = self
            .tables
            .get_mut(table)
            .ok_or_else(|| StoreError::UnknownTable(table.to_string()))?;

        for field in row.keys() {
            let known = stored.spec.field(field).is_some()
                || RESERVED_FIELDS.contains(&field.as_str());
            if !known {
                return Err(StoreError::UnknownField {
                    table: table.to_string(),
                    field: field.clone(),
                });
            }
        }

        stored.rows.push(row);
        Ok(())
    }

    fn fetch_all(&self, table: &str) -> StoreResult<&[Row]> {
        self.tables
            .get(table)
            .map(|stored| stored.rows.as_slice())
            .ok_or_else(|| StoreError::UnknownTable(table.to_string()))
    }

    fn spec(&self, table: &str) -> StoreResult<&TableSpec> {
        self.tables
            .get(table)
            .map(|stored| &stored.spec)
            .ok_or_else(|| StoreError::UnknownTable(table.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldKind, FieldSpec};
    use serde_json::json;

    fn spec() -> TableSpec {
        TableSpec {
            table: "t".to_string(),
            fields: vec![FieldSpec {
                fieldname: "qty".to_string(),
                label: "Qty".to_string(),
                kind: FieldKind::Int,
                child: None,
            }],
        }
    }

    #[test]
    fn test_create_insert_fetch() {
        let mut store = MemoryStore::new();
        store.create_table(&spec()).unwrap();

        let mut row = Row::new();
        row.insert("qty".to_string(), json!(3));
        store.insert_row("t", row).unwrap();

        let rows = store.fetch_all("t").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["qty"], json!(3));
    }

    #[test]
    fn test_duplicate_table_rejected() {
        let mut store = MemoryStore::new();
        store.create_table(&spec()).unwrap();
        assert!(matches!(
            store.create_table(&spec()),
            Err(StoreError::TableExists(_))
        ));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let mut store = MemoryStore::new();
        store.create_table(&spec()).unwrap();

        let mut row = Row::new();
        row.insert("bogus".to_string(), json!(1));
        assert!(matches!(
            store.insert_row("t", row),
            Err(StoreError::UnknownField { .. })
        ));
    }

    #[test]
    fn test_reserved_fields_are_allowed() {
        let mut store = MemoryStore::new();
        store.create_table(&spec()).unwrap();

        let mut row = Row::new();
        row.insert("parent".to_string(), json!("other"));
        row.insert("qty".to_string(), json!(1));
        assert!(store.insert_row("t", row).is_ok());
    }
}
