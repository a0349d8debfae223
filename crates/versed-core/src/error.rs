//! Error types for corpus reading and searching.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that end a query.
///
/// A data row that is too short to reach the target column is not an error;
/// the reader skips it and counts it instead.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The header has no column with the configured name.
    #[error("column {column:?} not found in {}", path.display())]
    ColumnNotFound { column: String, path: PathBuf },

    /// The source has no header line at all.
    #[error("corpus {} is empty (no header line)", path.display())]
    EmptyCorpus { path: PathBuf },

    /// Opening or reading the source failed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The highlight pattern could not be compiled.
    #[error("pattern error: {0}")]
    Pattern(#[from] regex::Error),
}

impl SearchError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SearchError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for [`SearchError::ColumnNotFound`].
    pub fn is_column_not_found(&self) -> bool {
        matches!(self, SearchError::ColumnNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_not_found_display() {
        let err = SearchError::ColumnNotFound {
            column: "VERS".to_string(),
            path: PathBuf::from("data.csv"),
        };
        assert_eq!(err.to_string(), "column \"VERS\" not found in data.csv");
        assert!(err.is_column_not_found());
    }

    #[test]
    fn io_error_keeps_source() {
        let err = SearchError::io(
            "missing.tsv",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        assert_eq!(err.to_string(), "failed to read missing.tsv: no such file");
        assert!(std::error::Error::source(&err).is_some());
        assert!(!err.is_column_not_found());
    }
}
