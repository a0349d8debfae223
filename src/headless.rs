//! One-shot search printed to stdout, for pipes and scripts.
//!
//! Matches go to stdout in the chosen [`ExportFormat`]; the match count (or
//! the empty notice) goes to stderr so it never pollutes piped output.

use crate::ColorMode;
use anyhow::Context;
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;
use versed_core::{
    config::Config, export, export::ExportFormat, CorpusReader, Highlighter, Markup, Outcome,
    Query,
};

const EMPTY_NOTICE: &str = "No matching verses found.";

/// Run `input` against the configured corpus.
///
/// Exits 0 when at least one row matched and 1 when none did, like `grep`.
/// Read failures and a missing column are returned as errors.
pub fn run(
    config: &Config,
    input: &str,
    format: ExportFormat,
    color: ColorMode,
) -> anyhow::Result<ExitCode> {
    let Some(query) = Query::parse(input, config.search.mode()) else {
        anyhow::bail!("--query needs at least one keyword");
    };

    let reader = CorpusReader::new(config.corpus.clone());
    let result = versed_core::search(&reader, &query)
        .with_context(|| format!("search for {input:?} failed"))?;

    let count = match result.outcome() {
        Outcome::Empty => {
            eprintln!("{EMPTY_NOTICE}");
            return Ok(ExitCode::FAILURE);
        }
        Outcome::Matches { count, .. } => count,
    };

    let stdout = io::stdout();
    let markup = if color.enabled(stdout.is_terminal()) {
        Markup::ANSI
    } else {
        Markup::NONE
    };
    let highlighter = Highlighter::new(query.keywords())?;

    let mut out = io::BufWriter::new(stdout.lock());
    export::write_results(&mut out, &result, &highlighter, format, &markup)?;
    out.flush()?;

    eprintln!("{count} matching verse(s), mode {}", query.mode());
    if result.skipped() > 0 {
        tracing::warn!(skipped = result.skipped(), "malformed rows skipped");
    }
    Ok(ExitCode::SUCCESS)
}
