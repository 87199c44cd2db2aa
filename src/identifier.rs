//! Storage-safe identifier generation.
//!
//! Column headers in uploaded files are arbitrary text. Before they can be
//! used as fieldnames they are lowercased, squashed to `[a-z0-9_]`, kept
//! clear of the storage layer's reserved column names, and de-duplicated
//! within the batch they arrived in.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Labels longer than this are truncated before sanitization.
pub const MAX_LABEL_LEN: usize = 140;

/// Appended when a candidate collides with a reserved name.
const RESERVED_SUFFIX: &str = "_field";

/// Runs of anything outside `[a-z0-9_]` collapse to a single underscore.
static NON_IDENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9_]+").unwrap());

/// Naming scope for one batch of labels (a single upload).
///
/// Tracks which identifiers have been handed out so far, which names are
/// reserved by the storage layer, and the position of each label in the
/// batch (used for placeholder names when a label sanitizes to nothing).
///
/// # Examples
///
/// ```
/// use facet::identifier::IdentifierScope;
///
/// let mut scope = IdentifierScope::with_reserved(["name"]);
/// assert_eq!(scope.sanitize("2nd Quarter Sales"), "_2nd_quarter_sales");
/// assert_eq!(scope.sanitize("name"), "name_field");
/// assert_eq!(scope.sanitize("Total"), "total");
/// assert_eq!(scope.sanitize("total"), "total_1");
/// ```
#[derive(Debug, Clone, Default)]
pub struct IdentifierScope {
    reserved: HashSet<String>,
    used: HashSet<String>,
    position: usize,
}

impl IdentifierScope {
    /// Empty scope with no reserved names.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scope that keeps the given names off-limits.
    pub fn with_reserved<I, S>(reserved: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            reserved: reserved.into_iter().map(Into::into).collect(),
            used: HashSet::new(),
            position: 0,
        }
    }

    /// Sanitize the next label in the batch into a unique fieldname.
    ///
    /// The output always matches `[a-z_][a-z0-9_]*`, is never empty, and is
    /// unique within this scope. Given the same labels in the same order,
    /// the outputs are identical.
    pub fn sanitize(&mut self, label: &str) -> String {
        let position = self.position;
        self.position += 1;

        let truncated: String = label.chars().take(MAX_LABEL_LEN).collect();
        let lowered = truncated.to_lowercase();
        let mut candidate = NON_IDENT
            .replace_all(&lowered, "_")
            .trim_matches('_')
            .to_string();

        if candidate.is_empty() {
            candidate = format!("field_{}", position);
        }

        if candidate
            .chars()
            .next()
            .map_or(false, |c| c.is_ascii_digit())
        {
            candidate.insert(0, '_');
        }

        if self.reserved.contains(&candidate) {
            candidate.push_str(RESERVED_SUFFIX);
        }

        let mut unique = candidate.clone();
        let mut n = 0;
        while self.used.contains(&unique) {
            n += 1;
            unique = format!("{}_{}", candidate, n);
        }
        self.used.insert(unique.clone());
        unique
    }

    /// Names handed out so far.
    pub fn used(&self) -> &HashSet<String> {
        &self.used
    }
}

/// One-off sanitization against caller-owned `reserved`/`used` sets.
///
/// The positional placeholder for empty candidates is derived from the size
/// of `used`; batch callers should prefer [`IdentifierScope`], which tracks
/// positions explicitly.
pub fn sanitize(label: &str, reserved: &HashSet<String>, used: &mut HashSet<String>) -> String {
    let mut scope = IdentifierScope {
        reserved: reserved.clone(),
        used: used.clone(),
        position: used.len(),
    };
    let out = scope.sanitize(label);
    used.insert(out.clone());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_symbol_runs() {
        let mut scope = IdentifierScope::new();
        assert_eq!(scope.sanitize("Unit Price ($/kg)"), "unit_price_kg");
    }

    #[test]
    fn test_empty_label_gets_positional_placeholder() {
        let mut scope = IdentifierScope::new();
        scope.sanitize("ok");
        assert_eq!(scope.sanitize("!!!"), "field_1");
        assert_eq!(scope.sanitize(""), "field_2");
    }

    #[test]
    fn test_leading_digit_prefixed() {
        let mut scope = IdentifierScope::new();
        assert_eq!(scope.sanitize("2024"), "_2024");
    }

    #[test]
    fn test_case_collision_disambiguated() {
        let mut scope = IdentifierScope::new();
        assert_eq!(scope.sanitize("Total"), "total");
        assert_eq!(scope.sanitize("total"), "total_1");
        assert_eq!(scope.sanitize("TOTAL"), "total_2");
    }

    #[test]
    fn test_truncates_long_labels() {
        let mut scope = IdentifierScope::new();
        let long = "x".repeat(500);
        assert_eq!(scope.sanitize(&long).len(), MAX_LABEL_LEN);
    }
}
