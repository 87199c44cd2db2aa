//! Integration tests for SQL shape classification.

use facet::chart::ChartType;
use facet::classify::{classify, refine};

#[test]
fn test_grouped_sum_is_bar() {
    let suggestion = classify("SELECT region, SUM(sales) AS total FROM orders GROUP BY region");
    assert_eq!(suggestion.chart_type, ChartType::Bar);
    assert_eq!(suggestion.x_axis, "region");
    assert_eq!(suggestion.y_axis, "total");
}

#[test]
fn test_ranked_top_n_is_bar() {
    let suggestion = classify(
        "SELECT region, SUM(sales) AS total FROM orders \
         GROUP BY region ORDER BY total DESC LIMIT 5",
    );
    assert_eq!(suggestion.chart_type, ChartType::Bar);
    assert_eq!(suggestion.x_axis, "region");
}

#[test]
fn test_time_grouping_is_line() {
    let suggestion = classify("SELECT month, AVG(price) AS avg_price FROM sales GROUP BY month");
    assert_eq!(suggestion.chart_type, ChartType::Line);
    assert_eq!(suggestion.x_axis, "month");
    assert_eq!(suggestion.y_axis, "avg_price");
}

#[test]
fn test_time_grouping_with_two_aggregations_is_multi_line() {
    let suggestion = classify(
        "SELECT month, SUM(qty) AS q, AVG(price) AS p FROM sales GROUP BY month",
    );
    assert_eq!(suggestion.chart_type, ChartType::MultiLine);
}

#[test]
fn test_two_aggregations_without_time_is_multi_bar() {
    let suggestion = classify(
        "SELECT region, SUM(qty) AS q, AVG(price) AS p FROM sales GROUP BY region",
    );
    assert_eq!(suggestion.chart_type, ChartType::MultiBar);
}

#[test]
fn test_ungrouped_aggregation_is_bar() {
    let suggestion = classify("SELECT product, COUNT(id) AS orders FROM sales");
    assert_eq!(suggestion.chart_type, ChartType::Bar);
    assert_eq!(suggestion.x_axis, "product");
    assert_eq!(suggestion.y_axis, "orders");
}

#[test]
fn test_plain_projection_is_scatter() {
    let suggestion = classify("SELECT name, price FROM products");
    assert_eq!(suggestion.chart_type, ChartType::Scatter);
    assert_eq!(suggestion.x_axis, "name");
    assert_eq!(suggestion.y_axis, "price");
}

#[test]
fn test_scatter_joins_trailing_columns() {
    let suggestion = classify("SELECT name, price, qty FROM products");
    assert_eq!(suggestion.chart_type, ChartType::Scatter);
    assert_eq!(suggestion.y_axis, "price, qty");
}

#[test]
fn test_single_column_projection_has_empty_y() {
    let suggestion = classify("SELECT name FROM products");
    assert_eq!(suggestion.chart_type, ChartType::Scatter);
    assert_eq!(suggestion.x_axis, "name");
    assert_eq!(suggestion.y_axis, "");
}

#[test]
fn test_grouping_without_aggregation_is_table() {
    let suggestion = classify("SELECT region, city FROM t GROUP BY region");
    assert_eq!(suggestion.chart_type, ChartType::Table);
    assert_eq!(suggestion.x_axis, "region");
    assert_eq!(suggestion.y_axis, "city");
}

#[test]
fn test_not_a_query_degenerates_to_table() {
    let suggestion = classify("not a query");
    assert_eq!(suggestion.chart_type, ChartType::Table);
    assert_eq!(suggestion.x_axis, "");
    assert_eq!(suggestion.y_axis, "");
    assert!(!suggestion.can_chart());
}

#[test]
fn test_select_without_from_degenerates_to_table() {
    let suggestion = classify("SELECT 1");
    assert_eq!(suggestion.chart_type, ChartType::Table);
    assert!(!suggestion.can_chart());
}

#[test]
fn test_llm_prose_is_stripped() {
    let suggestion = classify(
        "Sure! Here is the query you asked for:\n\n\
         select region, sum(sales) as total\nfrom orders\ngroup by region;\n\n\
         Let me know if you need anything else.",
    );
    assert_eq!(suggestion.chart_type, ChartType::Bar);
    assert_eq!(
        suggestion.sql,
        "SELECT region, sum(sales) AS total FROM orders GROUP BY region;"
    );
}

#[test]
fn test_classify_is_idempotent_over_its_own_sql() {
    let queries = [
        "select region, SUM(sales) as total from orders group by region order by total limit 3",
        "SELECT name, price FROM products",
        "select month, avg(x) as a from t group by month",
        "not a query",
    ];

    for query in queries {
        let first = classify(query);
        let second = classify(&first.sql);
        assert_eq!(first, second, "classification drifted for {:?}", query);
    }
}

#[test]
fn test_refine_truncates_at_statement_end() {
    let refined = refine("SELECT a FROM t; DROP TABLE t;");
    assert_eq!(refined, "SELECT a FROM t;");
}

#[test]
fn test_uppercase_aggregations_still_identify_y_axis() {
    // uppercase function names must match the same as lowercase ones
    let upper = classify("SELECT region, SUM(sales) AS total FROM o GROUP BY region");
    let lower = classify("SELECT region, sum(sales) AS total FROM o GROUP BY region");
    assert_eq!(upper.y_axis, lower.y_axis);
    assert_eq!(upper.y_axis, "total");
}
