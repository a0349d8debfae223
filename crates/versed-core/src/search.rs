//! Search layer: runs a [`Query`] over a freshly opened corpus.
//!
//! Each call to [`search`] opens the source, streams every row through a
//! [`Matcher`], collects the survivors in source order and closes the file
//! again. Nothing is cached between queries.

use crate::error::SearchError;
use crate::highlight::{Highlighted, Highlighter};
use crate::matcher::Matcher;
use crate::reader::CorpusReader;
use crate::types::{Header, Query, Row};

/// Rows that satisfied a query, plus what it took to find them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    header: Header,
    target_index: usize,
    rows: Vec<Row>,
    scanned: usize,
    skipped: usize,
}

/// What the presentation layer should show for a completed search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome<'a> {
    /// A table of `rows` with `count == rows.len()`.
    Matches { rows: &'a [Row], count: usize },
    /// Nothing matched; show the empty-result notice.
    Empty,
}

impl SearchResult {
    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn target_index(&self) -> usize {
        self.target_index
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Data lines read, malformed ones included.
    pub fn scanned(&self) -> usize {
        self.scanned
    }

    /// Malformed data lines dropped during the scan.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// The searched column's value for `row`.
    pub fn target_value<'r>(&self, row: &'r Row) -> &'r str {
        row.field(self.target_index).unwrap_or_default()
    }

    /// Highlight the searched column of `row`.
    pub fn highlight_row(&self, row: &Row, highlighter: &Highlighter) -> Highlighted {
        highlighter.highlight(self.target_value(row))
    }

    pub fn outcome(&self) -> Outcome<'_> {
        if self.rows.is_empty() {
            Outcome::Empty
        } else {
            Outcome::Matches {
                rows: &self.rows,
                count: self.rows.len(),
            }
        }
    }
}

/// Scan the corpus behind `reader` for rows matching `query`.
///
/// The first read error aborts the scan; a missing target column aborts it
/// before any row is read.
pub fn search(reader: &CorpusReader, query: &Query) -> Result<SearchResult, SearchError> {
    let corpus = reader.open()?;
    let matcher = Matcher::new(query, corpus.target_index);
    let mut rows = corpus.rows;

    let mut matched = Vec::new();
    for row in rows.by_ref() {
        let row = row?;
        if matcher.matches(&row) {
            matched.push(row);
        }
    }

    tracing::info!(
        path = %reader.path().display(),
        keywords = ?query.keywords(),
        mode = %query.mode(),
        scanned = rows.scanned(),
        skipped = rows.skipped(),
        matched = matched.len(),
        "search complete"
    );

    Ok(SearchResult {
        header: corpus.header,
        target_index: corpus.target_index,
        rows: matched,
        scanned: rows.scanned(),
        skipped: rows.skipped(),
    })
}
