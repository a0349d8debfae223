//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic.

use crate::{
    commands::{execute_command, Command},
    event::{self, AppEvent, Direction, Keymap},
    theme::Theme,
    widgets::{
        command_bar::{CommandBar, CommandBarState},
        help::HelpPopup,
        query_bar::{QueryBar, QueryBarState},
        results_table::{ResultsState, ResultsTable, ResultsView},
    },
};
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    Frame, Terminal,
};
use std::{io, time::Duration};
use versed_core::{config::Config, CorpusReader, Highlighter, Query};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Results,
    QueryBar,
    /// Vim-style `:` command line is active.
    Command,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub reader: CorpusReader,
    pub query: QueryBarState,
    pub results: ResultsState,
    pub focus: Focus,
    /// Focus state before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub theme: Theme,
    pub config: Config,
    pub keymap: Keymap,
    pub show_help: bool,
    pub command_bar: CommandBarState,
    pub quit: bool,
}

impl AppState {
    /// Run the query bar's keywords against the corpus and replace the
    /// results view. A blank query resets the pane to its idle notice.
    pub fn run_search(&mut self) {
        let Some(query) = Query::parse(&self.query.query, self.query.mode) else {
            tracing::debug!("blank query, results cleared");
            self.results.set_view(ResultsView::Idle);
            return;
        };

        let view = match versed_core::search(&self.reader, &query) {
            Ok(result) if result.is_empty() => ResultsView::Empty {
                scanned: result.scanned(),
            },
            Ok(result) => match Highlighter::new(query.keywords()) {
                Ok(highlighter) => ResultsView::Matches {
                    result,
                    highlighter,
                },
                Err(err) => ResultsView::Error(err.to_string()),
            },
            Err(err) => {
                tracing::warn!(%err, "search failed");
                ResultsView::Error(err.to_string())
            }
        };
        self.results.set_view(view);
    }

    fn toggle_mode(&mut self) {
        self.query.toggle_mode();
        if !self.query.query.trim().is_empty() {
            self.run_search();
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
}

impl App {
    pub fn new(reader: CorpusReader, config: Config, theme: Theme) -> Self {
        let state = AppState {
            reader,
            query: QueryBarState::new(config.search.mode()),
            results: ResultsState::new(config.ui.show_line_numbers),
            focus: Focus::QueryBar,
            prev_focus: Focus::QueryBar,
            theme,
            keymap: Keymap::from_config(&config.keybindings),
            config,
            show_help: false,
            command_bar: CommandBarState::default(),
            quit: false,
        };

        App { state }
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                match ct_event::read()? {
                    Event::Key(key) if key.kind == crossterm::event::KeyEventKind::Press => {
                        let raw = Event::Key(key);
                        // Use insert-mode mapping when a text widget is focused
                        let app_event = if is_insert_mode(self.state.focus) {
                            event::to_app_event_insert(raw)
                        } else {
                            event::to_app_event(raw, &self.state.keymap)
                        };
                        if let Some(ev) = app_event {
                            tracing::debug!(
                                focus = ?self.state.focus,
                                event = ?ev,
                                "key event"
                            );
                            self.handle(ev);
                        }
                    }
                    other => {
                        if let Some(ev) = event::to_app_event(other, &self.state.keymap) {
                            self.handle(ev);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn handle(&mut self, event: AppEvent) {
        let s = &mut self.state;

        // Help popup intercepts all events; only close keys pass through.
        if s.show_help {
            match event {
                AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit => {
                    tracing::debug!("help popup closed");
                    s.show_help = false;
                }
                _ => {}
            }
            return;
        }

        // Command mode intercepts all events.
        if s.focus == Focus::Command {
            match event {
                AppEvent::Escape => {
                    tracing::debug!("command bar cancelled");
                    s.command_bar.clear();
                    s.focus = s.prev_focus;
                }
                AppEvent::Quit => s.quit = true,
                AppEvent::Enter => {
                    let input = s.command_bar.input.clone();
                    match Command::parse(&input) {
                        Ok(cmd) => {
                            tracing::debug!(command = ?cmd, "executing command");
                            s.command_bar.clear();
                            s.focus = s.prev_focus;
                            execute_command(s, cmd);
                        }
                        Err(msg) if msg.is_empty() => {
                            s.command_bar.clear();
                            s.focus = s.prev_focus;
                        }
                        Err(msg) => {
                            // Show the error; bar stays open
                            s.command_bar.error = Some(msg);
                        }
                    }
                }
                other => s.command_bar.handle(&other),
            }
            return;
        }

        match event {
            AppEvent::Char('?') if s.focus != Focus::QueryBar => {
                tracing::debug!("help popup opened");
                s.show_help = true;
            }

            AppEvent::Char(':') if s.focus != Focus::QueryBar => {
                tracing::debug!(prev_focus = ?s.focus, "entering command mode");
                s.prev_focus = s.focus;
                s.command_bar.clear();
                s.focus = Focus::Command;
            }

            AppEvent::Quit => {
                tracing::debug!("quit");
                s.quit = true;
            }

            AppEvent::Escape => {
                if s.focus == Focus::QueryBar {
                    tracing::debug!("focus: QueryBar -> Results");
                    s.focus = Focus::Results;
                }
            }

            AppEvent::Enter if s.focus == Focus::QueryBar => {
                tracing::debug!(query = %s.query.query, mode = %s.query.mode, "search submitted");
                s.run_search();
            }

            AppEvent::FocusNext => {
                let next = match s.focus {
                    Focus::Results => Focus::QueryBar,
                    Focus::QueryBar | Focus::Command => Focus::Results,
                };
                tracing::debug!(from = ?s.focus, to = ?next, "focus cycle");
                s.focus = next;
            }

            AppEvent::QueryFocus => {
                tracing::debug!("focus -> QueryBar");
                s.focus = Focus::QueryBar;
            }

            // Mode toggling works regardless of focus
            AppEvent::ToggleMode => s.toggle_mode(),

            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => {}

            other => dispatch_to_focused(s, other),
        }
    }
}

/// Returns true when the current focus is on a text-input widget, meaning
/// alphabetic keys should produce characters rather than trigger shortcuts.
fn is_insert_mode(focus: Focus) -> bool {
    matches!(focus, Focus::QueryBar | Focus::Command)
}

/// Route an event to the widget that owns the current focus.
fn dispatch_to_focused(s: &mut AppState, event: AppEvent) {
    match s.focus {
        // Vertical arrows still scroll the results while typing.
        Focus::QueryBar => match event {
            AppEvent::Nav(Direction::Up | Direction::Down) => s.results.handle(&event),
            other => s.query.handle(&other),
        },
        Focus::Results => s.results.handle(&event),
        Focus::Command => {} // handled before dispatch, should not reach here
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: results | 3-line query bar
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([Constraint::Fill(1), Constraint::Length(3)])
        .split(area);

    frame.render_widget(
        ResultsTable::new(
            &state.results,
            state.focus == Focus::Results,
            state.config.ui.max_column_width,
            &state.theme,
        ),
        vert[0],
    );
    frame.render_widget(
        QueryBar::new(&state.query, state.focus == Focus::QueryBar, &state.theme),
        vert[1],
    );

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = Rect {
            y: area.bottom().saturating_sub(1),
            height: 1,
            ..area
        };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
        return;
    }

    if state.focus == Focus::QueryBar {
        let qb = QueryBar::new(&state.query, true, &state.theme);
        frame.set_cursor_position(qb.cursor_position(vert[1]));
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use ratatui::{backend::TestBackend, Terminal};
    use std::io::Write;
    use versed_core::{config::CorpusConfig, MatchMode};

    const CORPUS: &str = "BUCH\tKAP\tVERS\n\
                          Gen\t1\tIn the beginning God created the heaven and the earth.\n\
                          Gen\t1\tAnd the earth was without form, and void.\n\
                          Joh\t1\tIn the beginning was the Word.\n";

    fn corpus_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn app_for(file: &tempfile::NamedTempFile, column: &str) -> App {
        let reader = CorpusReader::new(CorpusConfig {
            column: column.to_string(),
            ..CorpusConfig::for_path(file.path())
        });
        App::new(reader, Config::defaults(), Theme::load_default())
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle(AppEvent::Char(c));
        }
    }

    fn match_count(app: &App) -> Option<usize> {
        match &app.state.results.view {
            ResultsView::Matches { result, .. } => Some(result.len()),
            _ => None,
        }
    }

    #[test]
    fn starts_in_query_bar_with_configured_mode() {
        let file = corpus_file(CORPUS);
        let app = app_for(&file, "VERS");
        assert_eq!(app.state.focus, Focus::QueryBar);
        assert_eq!(app.state.query.mode, MatchMode::All);
        assert!(matches!(app.state.results.view, ResultsView::Idle));
    }

    #[test]
    fn enter_runs_search() {
        let file = corpus_file(CORPUS);
        let mut app = app_for(&file, "VERS");
        type_str(&mut app, "beginning earth");
        app.handle(AppEvent::Enter);
        assert_eq!(match_count(&app), Some(1));
    }

    #[test]
    fn toggle_mode_reruns_search() {
        let file = corpus_file(CORPUS);
        let mut app = app_for(&file, "VERS");
        type_str(&mut app, "beginning earth");
        app.handle(AppEvent::Enter);
        app.handle(AppEvent::ToggleMode);
        assert_eq!(app.state.query.mode, MatchMode::Any);
        assert_eq!(match_count(&app), Some(3));
    }

    #[test]
    fn zero_matches_shows_empty_notice() {
        let file = corpus_file(CORPUS);
        let mut app = app_for(&file, "VERS");
        type_str(&mut app, "serpent");
        app.handle(AppEvent::Enter);
        assert!(matches!(
            app.state.results.view,
            ResultsView::Empty { scanned: 3 }
        ));
    }

    #[test]
    fn missing_column_shows_error() {
        let file = corpus_file(CORPUS);
        let mut app = app_for(&file, "VERSE");
        type_str(&mut app, "earth");
        app.handle(AppEvent::Enter);
        match &app.state.results.view {
            ResultsView::Error(msg) => assert!(msg.contains("VERSE"), "{msg}"),
            _ => panic!("expected error view"),
        }
    }

    #[test]
    fn blank_query_resets_to_idle() {
        let file = corpus_file(CORPUS);
        let mut app = app_for(&file, "VERS");
        type_str(&mut app, "earth");
        app.handle(AppEvent::Enter);
        for _ in 0..5 {
            app.handle(AppEvent::Backspace);
        }
        app.handle(AppEvent::Enter);
        assert!(matches!(app.state.results.view, ResultsView::Idle));
    }

    #[test]
    fn q_types_in_query_bar_but_quits_from_results() {
        let file = corpus_file(CORPUS);
        let mut app = app_for(&file, "VERS");
        // The event loop maps `q` to Char in insert mode.
        app.handle(AppEvent::Char('q'));
        assert_eq!(app.state.query.query, "q");
        assert!(!app.state.quit);

        app.handle(AppEvent::Escape);
        assert_eq!(app.state.focus, Focus::Results);
        app.handle(AppEvent::Quit);
        assert!(app.state.quit);
    }

    #[test]
    fn command_mode_sets_mode_and_restores_focus() {
        let file = corpus_file(CORPUS);
        let mut app = app_for(&file, "VERS");
        type_str(&mut app, "beginning earth");
        app.handle(AppEvent::Enter);
        app.handle(AppEvent::Escape);

        app.handle(AppEvent::Char(':'));
        assert_eq!(app.state.focus, Focus::Command);
        type_str(&mut app, "mode or");
        app.handle(AppEvent::Enter);

        assert_eq!(app.state.focus, Focus::Results);
        assert_eq!(app.state.query.mode, MatchMode::Any);
        assert_eq!(match_count(&app), Some(3));
    }

    #[test]
    fn bad_command_keeps_bar_open() {
        let file = corpus_file(CORPUS);
        let mut app = app_for(&file, "VERS");
        app.handle(AppEvent::Escape);
        app.handle(AppEvent::Char(':'));
        type_str(&mut app, "nope");
        app.handle(AppEvent::Enter);
        assert_eq!(app.state.focus, Focus::Command);
        assert_eq!(
            app.state.command_bar.error.as_deref(),
            Some("unknown command: nope")
        );
    }

    #[test]
    fn reload_picks_up_file_changes() {
        let mut file = corpus_file(CORPUS);
        let mut app = app_for(&file, "VERS");
        type_str(&mut app, "word");
        app.handle(AppEvent::Enter);
        assert_eq!(match_count(&app), Some(1));

        writeln!(file, "Joh\t1\tThe Word was made flesh.").unwrap();
        file.flush().unwrap();

        app.handle(AppEvent::Escape);
        app.handle(AppEvent::Char(':'));
        type_str(&mut app, "reload");
        app.handle(AppEvent::Enter);
        assert_eq!(match_count(&app), Some(2));
    }

    #[test]
    fn help_popup_swallows_keys() {
        let file = corpus_file(CORPUS);
        let mut app = app_for(&file, "VERS");
        app.handle(AppEvent::Escape);
        app.handle(AppEvent::Char('?'));
        assert!(app.state.show_help);
        app.handle(AppEvent::Quit);
        assert!(!app.state.show_help);
        assert!(!app.state.quit);
    }

    #[test]
    fn draw_shows_count_and_mode() {
        let file = corpus_file(CORPUS);
        let mut app = app_for(&file, "VERS");
        type_str(&mut app, "beginning");
        app.handle(AppEvent::Enter);

        let mut terminal = Terminal::new(TestBackend::new(100, 12)).unwrap();
        terminal.draw(|frame| draw(frame, &app.state)).unwrap();

        let buf = terminal.backend().buffer();
        let text: String = (0..buf.area.height)
            .flat_map(|y| (0..buf.area.width).map(move |x| (x, y)))
            .map(|(x, y)| buf[(x, y)].symbol().to_string())
            .collect();
        assert!(text.contains("Results (2)"), "{text}");
        assert!(text.contains("AND"), "{text}");
    }
}
