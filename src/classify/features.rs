//! Feature extraction from normalized SQL text.
//!
//! Pattern searches, not a parser: the extracted features describe the
//! textual shape of the query, which is all the decision table needs.

use regex::Regex;
use std::sync::LazyLock;

static AGGREGATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(sum|avg|count|max|min)\s*\(").unwrap());

static GROUP_BY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bgroup\s+by\s+(.+?)(?:\s+order\s+by\b|\s+limit\b|;|$)").unwrap()
});

static ORDER_BY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\border\s+by\b").unwrap());

static LIMIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\blimit\b").unwrap());

static TIME_COLUMN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(date|time|year|month|day)\b").unwrap());

static PROJECTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bselect\s+(.+?)\s+from\b").unwrap());

static AS_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(.+?)\s+as\s+(\S+)\s*$").unwrap());

static AS_ALIAS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bas\s+(\w+)").unwrap());

const QUOTES: &[char] = &['"', '`', '\''];

/// A single SELECT-list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionColumn {
    /// Expression text with any alias stripped.
    pub expr: String,
    /// Alias, when the entry carried `AS alias`.
    pub alias: Option<String>,
}

impl ProjectionColumn {
    /// Name this column carries in the executed result set.
    pub fn output_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.expr)
    }

    /// Whether the expression applies one of the captured aggregations.
    pub fn is_aggregated(&self, aggregations: &[String]) -> bool {
        let lowered = self.expr.to_lowercase();
        aggregations.iter().any(|agg| lowered.contains(agg.as_str()))
    }
}

/// Everything the decision table looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryFeatures {
    /// Aggregation function names found anywhere in the query, lowercased.
    pub aggregations: Vec<String>,
    /// Raw text of the GROUP BY clause, when present.
    pub group_by: Option<String>,
    pub has_order_by: bool,
    pub has_limit: bool,
    /// Whole-word `date|time|year|month|day` anywhere in the query.
    pub has_time_column: bool,
    /// SELECT-list entries in projection order. Never empty.
    pub projection: Vec<ProjectionColumn>,
}

impl QueryFeatures {
    /// Extract features from refined SQL. Returns `None` when the text has
    /// no `SELECT ... FROM` span or an empty projection list — the caller's
    /// degenerate case.
    pub fn extract(sql: &str) -> Option<QueryFeatures> {
        let projection_text = PROJECTION.captures(sql)?.get(1)?.as_str();
        let projection = split_projection(projection_text);
        if projection.is_empty() {
            return None;
        }

        let aggregations = AGGREGATION
            .captures_iter(sql)
            .map(|caps| caps[1].to_lowercase())
            .collect();

        let group_by = GROUP_BY
            .captures(sql)
            .map(|caps| caps[1].trim().trim_matches(QUOTES).to_string());

        Some(QueryFeatures {
            aggregations,
            group_by,
            has_order_by: ORDER_BY.is_match(sql),
            has_limit: LIMIT.is_match(sql),
            has_time_column: TIME_COLUMN.is_match(sql),
            projection,
        })
    }

    /// First projected column whose expression contains an aggregation.
    pub fn first_aggregated(&self) -> Option<&ProjectionColumn> {
        self.projection
            .iter()
            .find(|column| column.is_aggregated(&self.aggregations))
    }

    /// Output names of every projection after the first, comma-joined.
    /// Empty when the projection has a single column.
    pub fn trailing_columns(&self) -> String {
        self.projection
            .iter()
            .skip(1)
            .map(ProjectionColumn::output_name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// First `AS <alias>` anywhere in the query, the y-axis fallback.
pub(crate) fn first_alias(sql: &str) -> Option<String> {
    AS_ALIAS
        .captures(sql)
        .map(|caps| caps[1].to_string())
}

/// Split the SELECT list on commas. Each entry is trimmed, quote-stripped,
/// and separated from its `AS alias` when one is present.
///
/// Commas inside function calls are not protected; queries projecting
/// multi-argument calls mislead this splitter, the same way they mislead
/// every other pattern here.
fn split_projection(text: &str) -> Vec<ProjectionColumn> {
    text.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| match AS_SPLIT.captures(part) {
            Some(caps) => ProjectionColumn {
                expr: caps[1].trim().trim_matches(QUOTES).to_string(),
                alias: Some(caps[2].trim_matches(QUOTES).to_string()),
            },
            None => ProjectionColumn {
                expr: part.trim_matches(QUOTES).to_string(),
                alias: None,
            },
        })
        .collect()
}
