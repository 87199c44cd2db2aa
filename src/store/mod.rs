//! Storage seam.
//!
//! Dynamic table creation, row insertion and query execution belong to the
//! hosting system. [`TableStore`] is the boundary this crate drives;
//! [`MemoryStore`] backs the CLI and tests. Executed-SQL result rows come
//! back to this crate only as [`Row`] values for chart projection.

mod memory;

pub use memory::MemoryStore;

use crate::schema::TableSpec;
use serde_json::{Map, Value};
use thiserror::Error;

/// Bookkeeping columns every stored row carries. Data fields can never take
/// these names; the sanitizer treats them as reserved.
pub const RESERVED_FIELDS: &[&str] = &[
    "name",
    "owner",
    "creation",
    "modified",
    "modified_by",
    "parent",
    "parentfield",
    "parenttype",
    "idx",
    "docstatus",
];

/// One stored or result row: fieldname to value.
pub type Row = Map<String, Value>;

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur at the storage boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("table already exists: {0}")]
    TableExists(String),

    #[error("unknown table: {0}")]
    UnknownTable(String),

    #[error("unknown field '{field}' on table '{table}'")]
    UnknownField { table: String, field: String },
}

/// The storage collaborator: create dynamically specified tables and fill
/// them row by row.
pub trait TableStore {
    fn create_table(&mut self, spec: &TableSpec) -> StoreResult<()>;

    fn insert_row(&mut self, table: &str, row: Row) -> StoreResult<()>;

    fn fetch_all(&self, table: &str) -> StoreResult<&[Row]>;

    fn spec(&self, table: &str) -> StoreResult<&TableSpec>;
}
