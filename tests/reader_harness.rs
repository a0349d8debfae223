//! Corpus reader integration harness.
//!
//! # What this covers
//!
//! - **Header resolution**: the searched column is found by exact name and
//!   its index drives which rows count as malformed.
//! - **Line numbers**: every row carries its 1-based physical line, so
//!   skipped rows leave gaps instead of shifting later rows.
//! - **Single pass**: a stream can be abandoned part-way and a fresh
//!   `open()` starts again from the first data row.
//!
//! # Running
//!
//! ```sh
//! cargo test --test reader_harness
//! ```

mod common;
use common::*;

use pretty_assertions::assert_eq;
use versed_core::{config::CorpusConfig, CorpusReader, SearchError};

#[test]
fn sample_header_and_target_index() {
    let corpus = sample();
    let opened = corpus.reader("VERS").open().unwrap();
    assert_eq!(opened.header.columns(), ["BUCH", "KAP", "VERSNR", "VERS"]);
    assert_eq!(opened.target_index, 3);
}

#[test]
fn line_numbers_leave_gaps_for_skipped_rows() {
    let corpus = sample();
    let mut opened = corpus.reader("VERS").open().unwrap();
    let lines: Vec<usize> = opened.rows.by_ref().map(|r| r.unwrap().line).collect();
    assert_eq!(lines, vec![2, 3, 4, 5, 7, 8]);
    assert_eq!(opened.rows.skipped(), 1);
}

#[test]
fn earlier_target_column_keeps_short_rows() {
    // `KAP` is index 1, so the two-field row is well formed for it.
    let corpus = sample();
    let opened = corpus.reader("KAP").open().unwrap();
    assert_eq!(opened.rows.count(), SAMPLE_ROWS.len());
}

#[test]
fn abandoned_stream_can_be_reopened() {
    let corpus = sample();
    let reader = corpus.reader("VERS");

    let first = reader.open().unwrap().rows.next().unwrap().unwrap();
    let again = reader.open().unwrap().rows.next().unwrap().unwrap();
    assert_eq!(first, again);
    assert_eq!(first.line, 2);
}

#[test]
fn similar_column_names_do_not_match() {
    let corpus = sample();
    for name in ["vers", "VERS ", "VERSE"] {
        match corpus.reader(name).open() {
            Err(SearchError::ColumnNotFound { column, .. }) => assert_eq!(column, name),
            other => panic!("{name:?}: expected ColumnNotFound, got {other:?}"),
        }
    }
}

#[test]
fn semicolon_delimited_corpus() {
    let corpus = TempCorpus::from_text("ID;VERS\n1;Gott ist die Liebe\n2\n");
    let reader = CorpusReader::new(CorpusConfig {
        delimiter: ';',
        ..CorpusConfig::for_path(corpus.path())
    });
    let mut opened = reader.open().unwrap();
    let rows: Vec<_> = opened.rows.by_ref().collect::<Result<_, _>>().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].field(1), Some("Gott ist die Liebe"));
    assert_eq!(opened.rows.scanned(), 2);
}
