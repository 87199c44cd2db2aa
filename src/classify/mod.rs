//! SQL shape classification.
//!
//! Given a SELECT statement (possibly wrapped in prose, as LLM output tends
//! to be), infer how to chart its result set: which chart type, and which
//! columns supply the x and y axes. The analysis is textual — aggregation
//! calls, GROUP BY, ORDER BY/LIMIT, time-like column names — not a SQL
//! parse. Subqueries, CTEs and multi-statement input are outside the
//! contract.
//!
//! Classification is total: input with no recognizable `SELECT ... FROM`
//! yields the degenerate table suggestion with empty axes, never an error.

mod features;
mod normalize;

pub use features::{ProjectionColumn, QueryFeatures};
pub use normalize::refine;

use crate::chart::{ChartSuggestion, ChartType};

/// Classify a SQL query into a chart suggestion.
///
/// The decision, in order:
/// - aggregation + GROUP BY + ORDER BY + LIMIT reads as a ranked top-N: bar;
/// - aggregation + GROUP BY over a time-like column: line (multi-series when
///   several aggregations project);
/// - aggregation + GROUP BY otherwise: bar (multi-series likewise);
/// - aggregation without grouping: bar over the first projected column;
/// - plain projection: scatter (one trailing column) or nothing to chart;
/// - GROUP BY without aggregation: table.
///
/// When no projected column carries an aggregation, the first `AS alias` in
/// the query backstops the y axis.
pub fn classify(sql: &str) -> ChartSuggestion {
    let refined = refine(sql);

    let Some(features) = QueryFeatures::extract(&refined) else {
        return ChartSuggestion::table(refined);
    };

    let (chart_type, x_axis, mut y_axis) = decide(&features);

    if y_axis.is_empty() {
        if let Some(alias) = features::first_alias(&refined) {
            y_axis = alias;
        }
    }

    ChartSuggestion {
        sql: refined,
        chart_type,
        x_axis,
        y_axis,
    }
}

fn decide(features: &QueryFeatures) -> (ChartType, String, String) {
    // extract() guarantees a non-empty projection
    let first = &features.projection[0];
    let has_aggregation = !features.aggregations.is_empty();

    match (&features.group_by, has_aggregation) {
        (Some(grouped), true) => {
            let multi = features.aggregations.len() > 1;
            let chart_type = if features.has_order_by && features.has_limit {
                ChartType::Bar
            } else if features.has_time_column {
                if multi {
                    ChartType::MultiLine
                } else {
                    ChartType::Line
                }
            } else if multi {
                ChartType::MultiBar
            } else {
                ChartType::Bar
            };

            let y_axis = features
                .first_aggregated()
                .map(|column| column.output_name().to_string())
                .unwrap_or_default();

            (chart_type, grouped.clone(), y_axis)
        }
        (None, true) => {
            let y_axis = features
                .first_aggregated()
                .or_else(|| features.projection.last())
                .map(|column| column.output_name().to_string())
                .unwrap_or_default();

            (ChartType::Bar, first.output_name().to_string(), y_axis)
        }
        (None, false) => (
            ChartType::Scatter,
            first.output_name().to_string(),
            features.trailing_columns(),
        ),
        (Some(_), false) => (
            ChartType::Table,
            first.output_name().to_string(),
            features.trailing_columns(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouped_aggregation_is_bar() {
        let suggestion = classify("SELECT region, SUM(sales) AS total FROM orders GROUP BY region");
        assert_eq!(suggestion.chart_type, ChartType::Bar);
        assert_eq!(suggestion.x_axis, "region");
        assert_eq!(suggestion.y_axis, "total");
    }

    #[test]
    fn test_degenerate_input() {
        let suggestion = classify("not a query");
        assert_eq!(suggestion.chart_type, ChartType::Table);
        assert!(suggestion.x_axis.is_empty());
        assert!(suggestion.y_axis.is_empty());
        assert!(!suggestion.can_chart());
    }

    #[test]
    fn test_alias_backstops_y_axis() {
        // projection splitter loses the aggregation inside a multi-arg call,
        // leaving y empty until the AS fallback picks up the alias
        let suggestion = classify("SELECT region FROM t GROUP BY region HAVING SUM(x) AS s");
        assert_eq!(suggestion.y_axis, "s");
    }
}
