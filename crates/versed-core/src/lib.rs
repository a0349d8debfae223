//! versed-core: keyword search over tab-delimited verse corpora.
//!
//! This crate holds everything below the presentation layer: the streaming
//! corpus reader, the keyword matcher, the highlighter and the result export.
//!
//! # Architecture
//!
//! ```text
//! Reader ──► Matcher ──► SearchResult ──► UI / headless printer
//!                              │
//!                  Highlighter ┴──► Export
//! ```
//!
//! Every search re-reads the source from disk; nothing is indexed or cached.

pub mod config;
pub mod error;
pub mod export;
pub mod highlight;
pub mod matcher;
pub mod reader;
pub mod search;
pub mod types;

pub use error::SearchError;
pub use highlight::{highlight, Highlighted, Highlighter, Markup};
pub use matcher::Matcher;
pub use reader::{Corpus, CorpusReader, Rows};
pub use search::{search, Outcome, SearchResult};
pub use types::{Header, MatchMode, Query, Row};
