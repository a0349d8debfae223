mod headless;

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use versed_core::{config::Config, export::ExportFormat, MatchMode};

#[derive(Parser)]
#[command(name = "versed", about = "Keyword search over tab-delimited verse corpora")]
struct Cli {
    /// Corpus file to search (overrides `corpus.path`).
    #[arg(long, value_name = "PATH")]
    corpus: Option<PathBuf>,

    /// Column searched and highlighted (overrides `corpus.column`).
    #[arg(long, value_name = "NAME")]
    column: Option<String>,

    /// Extra config file layered over ~/.config/versed/config.toml.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Run one search, print the matches and exit instead of opening the TUI.
    #[arg(long, value_name = "KEYWORDS")]
    query: Option<String>,

    /// Match mode: and|or (all|any also accepted).
    #[arg(long)]
    mode: Option<MatchMode>,

    /// Headless output format: tsv|jsonl.
    #[arg(long, default_value = "tsv")]
    format: ExportFormat,

    /// Highlight matches with ANSI escapes: auto|always|never.
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    color: ColorMode,

    /// Write debug logs to $TMPDIR/versed-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn enabled(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    if cli.debug {
        let path = std::env::temp_dir().join("versed-debug.log");
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!(path = %path.display(), "versed debug log started");
    } else if cli.query.is_some() {
        // Headless runs report warnings on stderr; the TUI owns the terminal.
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .init();
    }

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(path) = cli.corpus {
        config.corpus.path = path;
    }
    if let Some(column) = cli.column {
        config.corpus.column = column;
    }
    if let Some(mode) = cli.mode {
        config.search.default_mode = mode.to_string();
    }
    tracing::debug!(?config, "configuration resolved");

    match cli.query {
        Some(query) => headless::run(&config, &query, cli.format, cli.color),
        None => {
            versed_tui::run(config)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
