//! Core types for versed-core.
//!
//! This module defines the data structures shared between the reader, the
//! matcher and the presentation layers: the parsed [`Header`], a data [`Row`],
//! the user's [`Query`] and its [`MatchMode`].

use std::str::FromStr;

/// Ordered column names parsed from the first line of the corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    columns: Vec<String>,
}

impl Header {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Position of the column named exactly `name` (case-sensitive).
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

/// A single data line of the corpus, split into fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// 1-based line number in the source file. The header is line 1, so the
    /// first data row is line 2.
    pub line: usize,
    /// Fields in header order.
    pub fields: Vec<String>,
}

impl Row {
    pub fn new(line: usize, fields: Vec<String>) -> Self {
        Self { line, fields }
    }

    /// Field at `index`, or `None` when the row is too short.
    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }
}

/// How multiple keywords combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatchMode {
    /// Every keyword must be present ("AND").
    #[default]
    All,
    /// At least one keyword must be present ("OR").
    Any,
}

impl MatchMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            MatchMode::All => MatchMode::Any,
            MatchMode::Any => MatchMode::All,
        }
    }
}

impl std::fmt::Display for MatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchMode::All => write!(f, "AND"),
            MatchMode::Any => write!(f, "OR"),
        }
    }
}

impl FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "and" | "all" => Ok(MatchMode::All),
            "or" | "any" => Ok(MatchMode::Any),
            other => Err(format!("unknown match mode: {other} (expected AND or OR)")),
        }
    }
}

/// A parsed search request: one or more keywords plus a [`MatchMode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    keywords: Vec<String>,
    mode: MatchMode,
}

impl Query {
    /// Split `input` on whitespace into keywords.
    ///
    /// Returns `None` when the input holds no keyword at all; a query is never
    /// evaluated with an empty keyword set.
    pub fn parse(input: &str, mode: MatchMode) -> Option<Self> {
        let keywords: Vec<String> = input.split_whitespace().map(str::to_string).collect();
        if keywords.is_empty() {
            None
        } else {
            Some(Self { keywords, mode })
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_splits_on_whitespace() {
        let q = Query::parse("  quick\tfox \n", MatchMode::All).unwrap();
        assert_eq!(q.keywords(), ["quick", "fox"]);
        assert_eq!(q.mode(), MatchMode::All);
    }

    #[test]
    fn blank_query_is_rejected() {
        assert_eq!(Query::parse("", MatchMode::Any), None);
        assert_eq!(Query::parse(" \t ", MatchMode::Any), None);
    }

    #[test]
    fn mode_parses_both_vocabularies() {
        assert_eq!("AND".parse::<MatchMode>(), Ok(MatchMode::All));
        assert_eq!("all".parse::<MatchMode>(), Ok(MatchMode::All));
        assert_eq!("Or".parse::<MatchMode>(), Ok(MatchMode::Any));
        assert_eq!("any".parse::<MatchMode>(), Ok(MatchMode::Any));
        assert!("xor".parse::<MatchMode>().is_err());
    }

    #[test]
    fn mode_displays_as_form_labels() {
        assert_eq!(MatchMode::All.to_string(), "AND");
        assert_eq!(MatchMode::Any.to_string(), "OR");
        assert_eq!(MatchMode::All.toggled(), MatchMode::Any);
    }

    #[test]
    fn header_position_is_case_sensitive() {
        let h = Header::new(vec!["ID".into(), "VERS".into()]);
        assert_eq!(h.position("VERS"), Some(1));
        assert_eq!(h.position("vers"), None);
    }
}
