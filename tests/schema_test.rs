//! Integration tests for schema inference and description.

use facet::config::Settings;
use facet::identifier::IdentifierScope;
use facet::ingest::read_json;
use facet::pipeline::dataset_spec;
use facet::schema::{infer_table_spec, schema_text, FieldKind};
use serde_json::json;

#[test]
fn test_spec_from_json_feed() {
    let value = json!([
        {"title": "Widget", "price": 9.5, "stock": 4, "discounted": false, "added": "2024-03-01"},
        {"title": "Gadget", "price": 12, "stock": 9, "discounted": true, "added": "2024-03-02"},
    ]);
    let dataset = read_json("products", &value).unwrap();
    let spec = dataset_spec(&dataset, "data_products_x1y2z", &Settings::default());

    let kinds: Vec<(&str, FieldKind)> = spec
        .fields
        .iter()
        .map(|f| (f.fieldname.as_str(), f.kind))
        .collect();
    assert_eq!(
        kinds,
        vec![
            ("title", FieldKind::Text),
            ("price", FieldKind::Float),
            ("stock", FieldKind::Int),
            ("discounted", FieldKind::Check),
            ("added", FieldKind::Date),
        ]
    );
}

#[test]
fn test_schema_text_round_trip_to_prompt_format() {
    let columns = vec!["region".to_string(), "amount".to_string()];
    let rows = vec![vec![json!("north"), json!(12.5)]];
    let mut scope = IdentifierScope::new();
    let spec = infer_table_spec("data_sales_abc12", &columns, &rows, &mut scope);

    assert_eq!(
        schema_text(&spec),
        "Table: data_sales_abc12\nColumns:\n- region (VARCHAR)\n- amount (FLOAT)"
    );
}

#[test]
fn test_extra_reserved_names_from_settings() {
    let mut settings = Settings::default();
    settings.naming.reserved.push("status".to_string());

    let value = json!([{"status": "ok", "qty": 1}]);
    let dataset = read_json("t", &value).unwrap();
    let spec = dataset_spec(&dataset, "data_t_00000", &settings);

    assert_eq!(spec.fields[0].fieldname, "status_field");
    assert_eq!(spec.fields[1].fieldname, "qty");
}
