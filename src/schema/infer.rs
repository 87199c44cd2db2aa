//! Field-kind inference from sample cell values.

use chrono::{NaiveDate, NaiveDateTime};
use inflector::Inflector;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

use super::{FieldKind, FieldSpec, TableSpec};
use crate::identifier::IdentifierScope;

/// Headers that already look like snake_case identifiers get a title-cased
/// label; anything else keeps the user's original text.
static IDENT_LIKE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z0-9_]+$").unwrap());

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d-%m-%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Derive a table spec from a dataset's columns and rows.
///
/// Fieldnames come from the sanitizer (one scope per upload); kinds come
/// from scanning each column's cells. Array-valued columns become `Child`
/// fields pointing at a `<fieldname>_child` table.
pub fn infer_table_spec(
    table: &str,
    columns: &[String],
    rows: &[Vec<Value>],
    scope: &mut IdentifierScope,
) -> TableSpec {
    let fields = columns
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            let fieldname = scope.sanitize(column);
            let kind = infer_column_kind(rows.iter().filter_map(|row| row.get(idx)));
            let child = match kind {
                FieldKind::Child => Some(format!("{}_child", fieldname)),
                _ => None,
            };
            FieldSpec {
                fieldname,
                label: label_for(column),
                kind,
                child,
            }
        })
        .collect();

    TableSpec {
        table: table.to_string(),
        fields,
    }
}

fn label_for(column: &str) -> String {
    if IDENT_LIKE.is_match(column) {
        column.to_title_case()
    } else {
        column.to_string()
    }
}

/// Scan a column's cells and settle on a kind.
///
/// Int widens to Float when both appear; any other disagreement falls back
/// to Text. All-null columns are Text.
fn infer_column_kind<'a>(cells: impl Iterator<Item = &'a Value>) -> FieldKind {
    let mut kind: Option<FieldKind> = None;
    for cell in cells {
        let Some(observed) = cell_kind(cell) else {
            continue;
        };
        kind = Some(match kind {
            None => observed,
            Some(current) if current == observed => current,
            Some(FieldKind::Int) if observed == FieldKind::Float => FieldKind::Float,
            Some(FieldKind::Float) if observed == FieldKind::Int => FieldKind::Float,
            Some(_) => FieldKind::Text,
        });
        if kind == Some(FieldKind::Text) {
            break;
        }
    }
    kind.unwrap_or(FieldKind::Text)
}

fn cell_kind(cell: &Value) -> Option<FieldKind> {
    match cell {
        Value::Null => None,
        Value::Bool(_) => Some(FieldKind::Check),
        Value::Number(n) => {
            if n.is_f64() {
                Some(FieldKind::Float)
            } else {
                Some(FieldKind::Int)
            }
        }
        Value::String(s) => {
            if is_date_like(s) {
                Some(FieldKind::Date)
            } else {
                Some(FieldKind::Text)
            }
        }
        Value::Array(_) => Some(FieldKind::Child),
        // nested objects are stored as serialized JSON text
        Value::Object(_) => Some(FieldKind::Text),
    }
}

fn is_date_like(s: &str) -> bool {
    let trimmed = s.trim();
    DATE_FORMATS
        .iter()
        .any(|fmt| NaiveDate::parse_from_str(trimmed, fmt).is_ok())
        || DATETIME_FORMATS
            .iter()
            .any(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).is_ok())
}
