//! versed TUI: ratatui application shell.

pub mod app;
pub mod commands;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::App;

use versed_core::{config::Config, CorpusReader};

/// Start the TUI against the corpus named in `config`.
pub fn run(config: Config) -> anyhow::Result<()> {
    let reader = CorpusReader::new(config.corpus.clone());
    let theme = theme::Theme::by_name(&config.ui.theme);
    tracing::info!(
        corpus = %reader.path().display(),
        column = reader.column(),
        "starting TUI"
    );
    App::new(reader, config, theme).run()
}
