//! Chart-facing output types.
//!
//! A [`ChartSuggestion`] says *how* to visualize a query's result set;
//! [`ChartData`] is the rendered payload (labels plus one series per value
//! column) that a chart widget consumes directly.

use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::store::Row;

// =============================================================================
// Chart type
// =============================================================================

/// How a result set should be visualized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartType {
    #[serde(rename = "table")]
    Table,
    #[serde(rename = "bar")]
    Bar,
    #[serde(rename = "multi-series bar")]
    MultiBar,
    #[serde(rename = "line")]
    Line,
    #[serde(rename = "multi-series line")]
    MultiLine,
    #[serde(rename = "scatter")]
    Scatter,
}

impl ChartType {
    /// Wire name used in JSON payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::Table => "table",
            ChartType::Bar => "bar",
            ChartType::MultiBar => "multi-series bar",
            ChartType::Line => "line",
            ChartType::MultiLine => "multi-series line",
            ChartType::Scatter => "scatter",
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Chart suggestion
// =============================================================================

/// The classifier's verdict on a SQL query.
///
/// `sql` carries the refined query text the verdict was derived from. Empty
/// `x_axis`/`y_axis` mean the query cannot be charted and raw rows should be
/// shown instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSuggestion {
    pub sql: String,
    pub chart_type: ChartType,
    pub x_axis: String,
    pub y_axis: String,
}

impl ChartSuggestion {
    /// Degenerate suggestion for queries with no recognizable shape.
    pub fn table(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            chart_type: ChartType::Table,
            x_axis: String::new(),
            y_axis: String::new(),
        }
    }

    /// Whether both axes were identified.
    pub fn can_chart(&self) -> bool {
        !self.x_axis.is_empty() && !self.y_axis.is_empty()
    }

    /// Result-set keys named by the x axis.
    pub fn x_keys(&self) -> Vec<&str> {
        split_keys(&self.x_axis)
    }

    /// Result-set keys named by the y axis.
    pub fn y_keys(&self) -> Vec<&str> {
        split_keys(&self.y_axis)
    }
}

fn split_keys(axis: &str) -> Vec<&str> {
    axis.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .collect()
}

// =============================================================================
// Chart data
// =============================================================================

/// One plotted series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub name: String,
    pub values: Vec<Value>,
    pub color: String,
}

/// Labels plus one series per value column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<Value>,
    pub datasets: Vec<ChartSeries>,
}

impl ChartData {
    /// Build chart data from raw columns: the first column supplies labels,
    /// every remaining column becomes a series.
    pub fn from_columns(columns: &[String], rows: &[Vec<Value>]) -> Self {
        let labels = rows
            .iter()
            .map(|row| row.first().cloned().unwrap_or(Value::Null))
            .collect();

        let datasets = columns
            .iter()
            .enumerate()
            .skip(1)
            .map(|(idx, column)| ChartSeries {
                name: column.clone(),
                values: rows
                    .iter()
                    .map(|row| row.get(idx).cloned().unwrap_or(Value::Null))
                    .collect(),
                color: random_color(),
            })
            .collect();

        ChartData { labels, datasets }
    }

    /// Build chart data from executed-query rows using the suggestion's axes:
    /// the first x key supplies labels, each y key becomes a series.
    pub fn from_rows(suggestion: &ChartSuggestion, rows: &[Row]) -> Self {
        let x_key = suggestion.x_keys().first().copied().unwrap_or_default();
        let labels = rows
            .iter()
            .map(|row| row.get(x_key).cloned().unwrap_or(Value::Null))
            .collect();

        let datasets = suggestion
            .y_keys()
            .iter()
            .map(|key| ChartSeries {
                name: (*key).to_string(),
                values: rows
                    .iter()
                    .map(|row| row.get(*key).cloned().unwrap_or(Value::Null))
                    .collect(),
                color: random_color(),
            })
            .collect();

        ChartData { labels, datasets }
    }
}

/// Keep only the suggestion's axis keys from each executed-query row.
///
/// Keys the row does not carry are skipped rather than nulled, matching the
/// "show what the query returned" behavior chart widgets expect.
pub fn project_rows(suggestion: &ChartSuggestion, rows: &[Row]) -> Vec<Row> {
    let mut keys = suggestion.x_keys();
    keys.extend(suggestion.y_keys());

    rows.iter()
        .map(|row| {
            let mut entry = Row::new();
            for key in &keys {
                if let Some(value) = row.get(*key) {
                    entry.insert((*key).to_string(), value.clone());
                }
            }
            entry
        })
        .collect()
}

/// Random translucent RGBA fill for a series.
pub fn random_color() -> String {
    let mut rng = rand::rng();
    format!(
        "rgba({}, {}, {}, 0.5)",
        rng.random_range(0..=255),
        rng.random_range(0..=255),
        rng.random_range(0..=255)
    )
}
