//! SQL text normalization ahead of shape analysis.
//!
//! Generated SQL often arrives wrapped in prose or code fences. Normalization
//! cuts the statement out, flattens whitespace, and re-cases the keyword set
//! the downstream patterns anchor on. Identifiers are left untouched.

use regex::Regex;
use std::sync::LazyLock;

/// Keywords re-cased to upper case during normalization.
const KEYWORDS: &[&str] = &[
    "SELECT",
    "FROM",
    "WHERE",
    "GROUP BY",
    "ORDER BY",
    "HAVING",
    "JOIN",
    "LEFT JOIN",
    "RIGHT JOIN",
    "INNER JOIN",
    "OUTER JOIN",
    "ON",
    "AND",
    "OR",
    "AS",
];

static SELECT_START: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bselect\b").unwrap());

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

static KEYWORD_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    KEYWORDS
        .iter()
        .map(|keyword| {
            let pattern = format!(r"(?i)\b{}\b", keyword.to_lowercase().replace(' ', r"\s+"));
            (Regex::new(&pattern).unwrap(), *keyword)
        })
        .collect()
});

/// Cut the first SELECT statement out of `sql` and canonicalize it.
///
/// The statement runs from the first case-insensitive `SELECT` to the first
/// `;` (kept) or the end of input. Whitespace runs collapse to single spaces
/// and the fixed keyword set is upper-cased. Input without a `SELECT` is
/// returned unchanged; the classifier treats it as unchartable.
///
/// Refining already-refined text is a no-op, so the operation is idempotent.
pub fn refine(sql: &str) -> String {
    let Some(start) = SELECT_START.find(sql) else {
        return sql.to_string();
    };

    let statement = &sql[start.start()..];
    let statement = match statement.find(';') {
        Some(end) => &statement[..=end],
        None => statement,
    };

    let mut refined = WHITESPACE.replace_all(statement.trim(), " ").into_owned();
    for (pattern, keyword) in KEYWORD_PATTERNS.iter() {
        refined = pattern.replace_all(&refined, *keyword).into_owned();
    }
    refined
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_surrounding_prose() {
        let sql = "Here is your query:\n  select a from t;\nHope that helps!";
        assert_eq!(refine(sql), "SELECT a FROM t;");
    }

    #[test]
    fn test_collapses_whitespace_and_recases_keywords() {
        let sql = "select  region,\n  sum(x)  as total\nfrom t\ngroup   by region";
        assert_eq!(
            refine(sql),
            "SELECT region, sum(x) AS total FROM t GROUP BY region"
        );
    }

    #[test]
    fn test_no_select_returns_input_unchanged() {
        assert_eq!(refine("not a query"), "not a query");
    }

    #[test]
    fn test_idempotent() {
        let once = refine("select a, b from t order by a limit 3;");
        assert_eq!(refine(&once), once);
    }

    #[test]
    fn test_identifiers_keep_their_case() {
        let refined = refine("select TotalSales from Orders");
        assert_eq!(refined, "SELECT TotalSales FROM Orders");
    }
}
