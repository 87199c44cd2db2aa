//! End-to-end flows: upload a dataset, ask a question.
//!
//! ```text
//! upload:  Dataset → sanitize headers → infer spec → create + fill tables
//!                  → ChartData (first column labels, one series per column)
//!
//! ask:     TableSpec → schema text → SQL via generator → classify
//!                    → { sql, suggestion }
//! ```
//!
//! The caller executes the suggested SQL against its own store and hands the
//! result rows to [`crate::chart::project_rows`] or
//! [`crate::chart::ChartData::from_rows`].

use log::debug;
use rand::Rng;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::chart::{ChartData, ChartSuggestion};
use crate::classify;
use crate::config::Settings;
use crate::identifier::IdentifierScope;
use crate::ingest::Dataset;
use crate::llm::{LlmError, SqlGenerator};
use crate::schema::{self, FieldKind, TableSpec};
use crate::store::{Row, StoreError, TableStore, RESERVED_FIELDS};

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Errors that can occur while running a pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Llm(#[from] LlmError),
}

/// Outcome of an upload: where the data landed and how to chart it.
#[derive(Debug, Clone, Serialize)]
pub struct UploadOutcome {
    pub table: String,
    pub spec: TableSpec,
    pub inserted: usize,
    pub chart: ChartData,
}

/// Outcome of a natural-language question.
#[derive(Debug, Clone, Serialize)]
pub struct AskOutcome {
    /// SQL exactly as the generator produced it.
    pub sql: String,
    /// Chart suggestion over the refined form of that SQL.
    pub suggestion: ChartSuggestion,
}

/// Derive a table spec for a dataset under the configured naming rules.
pub fn dataset_spec(dataset: &Dataset, table: &str, settings: &Settings) -> TableSpec {
    let mut scope = IdentifierScope::with_reserved(
        RESERVED_FIELDS
            .iter()
            .map(|name| name.to_string())
            .chain(settings.naming.reserved.iter().cloned()),
    );
    schema::infer_table_spec(table, &dataset.columns, &dataset.rows, &mut scope)
}

/// Ingest a dataset into the store and derive its default chart.
pub fn upload(
    dataset: &Dataset,
    store: &mut dyn TableStore,
    settings: &Settings,
) -> PipelineResult<UploadOutcome> {
    let table = table_name(&dataset.name, settings.naming.suffix_len);
    let spec = dataset_spec(dataset, &table, settings);
    debug!(
        "[UPLOAD] creating table '{}' with {} fields",
        table,
        spec.fields.len()
    );

    // child tables first so array cells have somewhere to land
    for field in &spec.fields {
        if let Some(child_spec) = field.child_spec() {
            store.create_table(&child_spec)?;
        }
    }
    store.create_table(&spec)?;

    let mut inserted = 0;
    for raw_row in &dataset.rows {
        let mut row = Row::new();
        for (field, cell) in spec.fields.iter().zip(raw_row) {
            match (field.kind, cell) {
                (FieldKind::Child, Value::Array(items)) => {
                    let child_table = field.child.as_deref().unwrap_or_default();
                    for item in items {
                        let mut child_row = Row::new();
                        child_row.insert("parent".to_string(), Value::String(table.clone()));
                        child_row.insert("value".to_string(), child_cell(item));
                        store.insert_row(child_table, child_row)?;
                    }
                    row.insert(field.fieldname.clone(), Value::Null);
                }
                (_, Value::Object(_)) => {
                    row.insert(field.fieldname.clone(), Value::String(cell.to_string()));
                }
                _ => {
                    row.insert(field.fieldname.clone(), cell.clone());
                }
            }
        }
        store.insert_row(&table, row)?;
        inserted += 1;
    }
    debug!("[UPLOAD] inserted {} rows into '{}'", inserted, table);

    let chart = ChartData::from_columns(&dataset.columns, &dataset.rows);

    Ok(UploadOutcome {
        table,
        spec,
        inserted,
        chart,
    })
}

/// Turn a question into SQL against the table's schema and classify it.
pub async fn ask(
    question: &str,
    spec: &TableSpec,
    generator: &dyn SqlGenerator,
) -> PipelineResult<AskOutcome> {
    let schema_text = schema::schema_text(spec);
    let sql = generator.generate_sql(question, &schema_text).await?;
    let suggestion = classify::classify(&sql);
    debug!(
        "[ASK] '{}' -> {} chart on x='{}' y='{}'",
        question, suggestion.chart_type, suggestion.x_axis, suggestion.y_axis
    );

    Ok(AskOutcome { sql, suggestion })
}

/// Generated table name: `data_<stem>_<suffix>`, sanitized like any other
/// identifier.
pub fn table_name(stem: &str, suffix_len: usize) -> String {
    let mut scope = IdentifierScope::new();
    let base = scope.sanitize(stem);
    format!("data_{}_{}", base, random_suffix(suffix_len))
}

fn child_cell(item: &Value) -> Value {
    match item {
        // list entries that are themselves records get serialized
        Value::Object(_) | Value::Array(_) => Value::String(item.to_string()),
        scalar => scalar.clone(),
    }
}

fn random_suffix(len: usize) -> String {
    const CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::rng();
    (0..len)
        .map(|_| CHARS[rng.random_range(0..CHARS.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_name_shape() {
        let name = table_name("Sales Report.2024", 5);
        assert!(name.starts_with("data_sales_report_2024_"));
        assert_eq!(name.len(), "data_sales_report_2024_".len() + 5);
    }

    #[test]
    fn test_random_suffix_charset() {
        let suffix = random_suffix(32);
        assert!(suffix
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }
}
