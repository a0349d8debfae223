//! Match filter: decides which rows satisfy a [`Query`].
//!
//! Matching is a case-insensitive substring test against the target column
//! only. Keywords are lowercased once when the [`Matcher`] is built; each
//! row's value is lowercased as it is tested.

use crate::types::{MatchMode, Query, Row};

#[derive(Debug, Clone)]
pub struct Matcher {
    keywords: Vec<String>,
    mode: MatchMode,
    target_index: usize,
}

impl Matcher {
    pub fn new(query: &Query, target_index: usize) -> Self {
        Self {
            keywords: query.keywords().iter().map(|k| k.to_lowercase()).collect(),
            mode: query.mode(),
            target_index,
        }
    }

    /// Test a single value (already extracted from a row).
    pub fn matches_value(&self, value: &str) -> bool {
        let value = value.to_lowercase();
        match self.mode {
            MatchMode::All => self.keywords.iter().all(|k| value.contains(k.as_str())),
            MatchMode::Any => self.keywords.iter().any(|k| value.contains(k.as_str())),
        }
    }

    /// Test a row. Rows too short to have a target column never match.
    pub fn matches(&self, row: &Row) -> bool {
        row.field(self.target_index)
            .is_some_and(|value| self.matches_value(value))
    }

    /// Keep only matching rows, in input order.
    pub fn filter<'a, I>(&'a self, rows: I) -> impl Iterator<Item = Row> + 'a
    where
        I: IntoIterator<Item = Row>,
        I::IntoIter: 'a,
    {
        rows.into_iter().filter(move |row| self.matches(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn rows() -> Vec<Row> {
        vec![
            Row::new(2, vec!["1".into(), "The quick Fox".into(), "A".into()]),
            Row::new(3, vec!["2".into(), "A slow fox".into(), "B".into()]),
        ]
    }

    fn run(input: &str, mode: MatchMode) -> Vec<usize> {
        let query = Query::parse(input, mode).unwrap();
        let matcher = Matcher::new(&query, 1);
        matcher.filter(rows()).map(|r| r.line).collect()
    }

    #[rstest]
    #[case::any_fox("fox", MatchMode::Any, &[2, 3])]
    #[case::any_upper("FOX", MatchMode::Any, &[2, 3])]
    #[case::all_both("quick fox", MatchMode::All, &[2])]
    #[case::all_disjoint("quick slow", MatchMode::All, &[])]
    #[case::any_disjoint("quick slow", MatchMode::Any, &[2, 3])]
    #[case::any_none("zebra", MatchMode::Any, &[])]
    // "B" appears in the AUTHOR column of row 3 only.
    #[case::other_column_ignored("b", MatchMode::Any, &[])]
    #[case::substring("uic", MatchMode::Any, &[2])]
    fn filters_fox_rows(#[case] input: &str, #[case] mode: MatchMode, #[case] expected: &[usize]) {
        assert_eq!(run(input, mode), expected);
    }

    #[test]
    fn unicode_lowercase() {
        let query = Query::parse("ÄPFEL", MatchMode::Any).unwrap();
        let matcher = Matcher::new(&query, 0);
        assert!(matcher.matches(&Row::new(2, vec!["grüne äpfel".into()])));
    }

    #[test]
    fn short_row_never_matches() {
        let query = Query::parse("x", MatchMode::Any).unwrap();
        let matcher = Matcher::new(&query, 3);
        assert!(!matcher.matches(&Row::new(2, vec!["x".into()])));
    }

    #[test]
    fn duplicates_are_kept() {
        let dup = vec![
            Row::new(2, vec!["fox".into()]),
            Row::new(3, vec!["fox".into()]),
        ];
        let query = Query::parse("fox", MatchMode::All).unwrap();
        let matcher = Matcher::new(&query, 0);
        assert_eq!(matcher.filter(dup).count(), 2);
    }
}
