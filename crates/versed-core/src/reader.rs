//! Corpus reader: streams a delimited verse table one row at a time.
//!
//! [`CorpusReader::open`] reads the header line, resolves the target column
//! and hands back a [`Corpus`] whose [`Rows`] iterator owns the file handle.
//! Nothing beyond the current line is held in memory, and the handle is
//! released as soon as the iterator is dropped, whether it was drained or
//! abandoned halfway.
//!
//! Data lines that are too short to reach the target column are skipped and
//! counted (see [`Rows::skipped`]); they are not errors.

use crate::config::CorpusConfig;
use crate::error::SearchError;
use crate::types::{Header, Row};
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

const BOM: char = '\u{feff}';

// ---------------------------------------------------------------------------
// Reader
// ---------------------------------------------------------------------------

/// Opens a corpus described by a [`CorpusConfig`].
///
/// The reader itself holds no file handle; every [`open`](Self::open) starts
/// a fresh scan from the top of the file.
#[derive(Debug, Clone)]
pub struct CorpusReader {
    config: CorpusConfig,
}

impl CorpusReader {
    pub fn new(config: CorpusConfig) -> Self {
        Self { config }
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    pub fn column(&self) -> &str {
        &self.config.column
    }

    /// Open the source, parse the header and resolve the target column.
    ///
    /// Fails with [`SearchError::ColumnNotFound`] before any data row is read
    /// when the header lacks the configured column.
    pub fn open(&self) -> Result<Corpus, SearchError> {
        let path = &self.config.path;
        let file = File::open(path).map_err(|e| SearchError::io(path, e))?;
        let mut lines = BufReader::new(file).lines();

        let first = match lines.next() {
            Some(line) => line.map_err(|e| SearchError::io(path, e))?,
            None => return Err(SearchError::EmptyCorpus { path: path.clone() }),
        };
        let first = first.strip_prefix(BOM).unwrap_or(&first);
        let header = Header::new(split_line(first, self.config.delimiter));

        let target_index = header.position(&self.config.column).ok_or_else(|| {
            SearchError::ColumnNotFound {
                column: self.config.column.clone(),
                path: path.clone(),
            }
        })?;

        tracing::debug!(
            path = %path.display(),
            columns = header.len(),
            column = %self.config.column,
            target_index,
            "corpus opened"
        );

        Ok(Corpus {
            header,
            target_index,
            rows: Rows {
                lines,
                path: path.clone(),
                delimiter: self.config.delimiter,
                target_index,
                line_no: 1,
                scanned: 0,
                skipped: 0,
                failed: false,
            },
        })
    }
}

// ---------------------------------------------------------------------------
// Corpus
// ---------------------------------------------------------------------------

/// An opened corpus: the parsed header, the resolved target index and the
/// lazy row stream.
#[derive(Debug)]
pub struct Corpus {
    pub header: Header,
    pub target_index: usize,
    pub rows: Rows,
}

/// Lazy, single-pass iterator over the data rows of a corpus.
///
/// Yields `Err` once on a read failure and then ends.
#[derive(Debug)]
pub struct Rows {
    lines: Lines<BufReader<File>>,
    path: PathBuf,
    delimiter: char,
    target_index: usize,
    line_no: usize,
    scanned: usize,
    skipped: usize,
    failed: bool,
}

impl Rows {
    /// Data lines read so far, malformed ones included.
    pub fn scanned(&self) -> usize {
        self.scanned
    }

    /// Data lines dropped because they had no field at the target index.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl Iterator for Rows {
    type Item = Result<Row, SearchError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(SearchError::io(&self.path, e)));
                }
            };
            self.line_no += 1;
            self.scanned += 1;

            let fields = split_line(&line, self.delimiter);
            if fields.len() <= self.target_index {
                self.skipped += 1;
                tracing::trace!(
                    line = self.line_no,
                    fields = fields.len(),
                    "skipping malformed row"
                );
                continue;
            }
            return Some(Ok(Row::new(self.line_no, fields)));
        }
    }
}

/// Split one line into fields after dropping a trailing `\r` left by CRLF
/// files. `BufRead::lines` has already removed the `\n`.
fn split_line(line: &str, delimiter: char) -> Vec<String> {
    line.strip_suffix('\r')
        .unwrap_or(line)
        .split(delimiter)
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
