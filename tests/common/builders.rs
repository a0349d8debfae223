//! Test builders: corpus files on disk and readers pointing at them.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use std::io::Write;
use tempfile::NamedTempFile;
use versed_core::{config::CorpusConfig, CorpusReader};

/// Fluent builder for a temporary corpus file.
///
/// # Example
///
/// ```rust
/// let corpus = CorpusBuilder::new("BUCH\tVERS")
///     .row("Gen\tIn the beginning")
///     .build();
/// let reader = corpus.reader("VERS");
/// ```
pub struct CorpusBuilder {
    text: String,
}

impl CorpusBuilder {
    pub fn new(header: &str) -> Self {
        Self {
            text: format!("{header}\n"),
        }
    }

    pub fn row(mut self, line: &str) -> Self {
        self.text.push_str(line);
        self.text.push('\n');
        self
    }

    pub fn rows<'a>(self, lines: impl IntoIterator<Item = &'a str>) -> Self {
        lines.into_iter().fold(self, |b, line| b.row(line))
    }

    /// Build a row from fields joined by tabs.
    pub fn fields(self, fields: &[&str]) -> Self {
        self.row(&fields.join("\t"))
    }

    pub fn build(self) -> TempCorpus {
        TempCorpus::from_text(&self.text)
    }
}

/// A corpus file that is deleted when dropped.
pub struct TempCorpus {
    pub file: NamedTempFile,
}

impl TempCorpus {
    pub fn from_text(text: &str) -> Self {
        let mut file = NamedTempFile::new().expect("create temp corpus");
        file.write_all(text.as_bytes()).expect("write temp corpus");
        file.flush().expect("flush temp corpus");
        Self { file }
    }

    pub fn path(&self) -> &std::path::Path {
        self.file.path()
    }

    /// A reader for this file targeting `column`.
    pub fn reader(&self, column: &str) -> CorpusReader {
        CorpusReader::new(CorpusConfig {
            column: column.to_string(),
            ..CorpusConfig::for_path(self.path())
        })
    }
}

/// The fixture corpus from [`crate::common::fixtures::sample_corpus`] on disk.
pub fn sample() -> TempCorpus {
    TempCorpus::from_text(&super::fixtures::sample_corpus())
}
