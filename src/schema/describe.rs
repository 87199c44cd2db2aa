//! Prompt-facing schema descriptions.

use super::TableSpec;

/// Render the schema block handed to the SQL generator.
///
/// ```text
/// Table: data_sales_k3f9x
/// Columns:
/// - region (VARCHAR)
/// - amount (FLOAT)
/// ```
pub fn schema_text(spec: &TableSpec) -> String {
    let mut out = format!("Table: {}\nColumns:", spec.table);
    for field in &spec.fields {
        out.push_str(&format!("\n- {} ({})", field.fieldname, field.kind.sql_name()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldKind, FieldSpec};

    #[test]
    fn test_schema_text_format() {
        let spec = TableSpec {
            table: "data_sales_k3f9x".to_string(),
            fields: vec![
                FieldSpec {
                    fieldname: "region".to_string(),
                    label: "Region".to_string(),
                    kind: FieldKind::Text,
                    child: None,
                },
                FieldSpec {
                    fieldname: "amount".to_string(),
                    label: "Amount".to_string(),
                    kind: FieldKind::Float,
                    child: None,
                },
            ],
        };
        assert_eq!(
            schema_text(&spec),
            "Table: data_sales_k3f9x\nColumns:\n- region (VARCHAR)\n- amount (FLOAT)"
        );
    }
}
