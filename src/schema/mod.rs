//! Table specifications derived from uploaded data.

mod describe;
mod infer;

pub use describe::schema_text;
pub use infer::infer_table_spec;

use serde::{Deserialize, Serialize};

// =============================================================================
// Field kinds
// =============================================================================

/// Storage type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Free text.
    Text,
    /// Whole numbers.
    Int,
    /// Floating point numbers.
    Float,
    /// Booleans, stored as a checkbox flag.
    Check,
    /// Calendar dates (and date-times).
    Date,
    /// Array-valued; rows land in a child table.
    Child,
}

impl FieldKind {
    /// SQL-ish type name used in prompt-facing schema descriptions.
    pub fn sql_name(&self) -> &'static str {
        match self {
            FieldKind::Text => "VARCHAR",
            FieldKind::Int => "INT",
            FieldKind::Float => "FLOAT",
            FieldKind::Check => "INT",
            FieldKind::Date => "DATE",
            FieldKind::Child => "TEXT",
        }
    }

    /// Whether values of this kind plot on a numeric axis.
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldKind::Int | FieldKind::Float)
    }
}

// =============================================================================
// Field and table specs
// =============================================================================

/// One field of a dynamically created table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Sanitized storage identifier.
    pub fieldname: String,
    /// Human-facing label, usually the original column header.
    pub label: String,
    pub kind: FieldKind,
    /// Child table name for array-valued fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub child: Option<String>,
}

impl FieldSpec {
    /// Spec of the child table backing an array-valued field: a single
    /// `value` text column.
    pub fn child_spec(&self) -> Option<TableSpec> {
        let child = self.child.as_ref()?;
        Some(TableSpec {
            table: child.clone(),
            fields: vec![FieldSpec {
                fieldname: "value".to_string(),
                label: "Value".to_string(),
                kind: FieldKind::Text,
                child: None,
            }],
        })
    }
}

/// A dynamically created table: name plus ordered fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSpec {
    pub table: String,
    pub fields: Vec<FieldSpec>,
}

impl TableSpec {
    /// Look up a field by its fieldname.
    pub fn field(&self, fieldname: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.fieldname == fieldname)
    }

    /// Fieldnames in declaration order.
    pub fn fieldnames(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.fieldname.as_str())
    }
}
