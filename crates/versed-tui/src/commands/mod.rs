// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

use crate::{app::AppState, event::AppEvent, theme::Theme};
use versed_core::MatchMode;

/// A parsed, validated command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Close the app
    Quit,
    // Display help
    Help,
    // Change theme
    Theme(String),
    // Set the match mode; `None` flips it
    Mode(Option<MatchMode>),
    // Toggle the line-number column
    LineNumbers,
    // Jump to the first / last result
    Top,
    Bottom,
    // Re-run the current query against the file on disk
    Reload,
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    ///
    /// Returns `Ok(cmd)` on success, `Err(message)` on failure. An empty
    /// string returns `Err("")` as a sentinel meaning "close without acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "q" | "quit" => Ok(Command::Quit),
            "help" => Ok(Command::Help),
            "lines" => Ok(Command::LineNumbers),
            "top" => Ok(Command::Top),
            "bottom" => Ok(Command::Bottom),
            "reload" => Ok(Command::Reload),
            "theme" => {
                if rest.is_empty() {
                    Err("usage: theme <default|gruvbox>".to_string())
                } else {
                    Ok(Command::Theme(rest.to_string()))
                }
            }
            "mode" => {
                if rest.is_empty() {
                    Ok(Command::Mode(None))
                } else {
                    rest.parse::<MatchMode>()
                        .map(|m| Command::Mode(Some(m)))
                        .map_err(|_| "usage: mode <and|or>".to_string())
                }
            }
            other => Err(format!("unknown command: {other}")),
        }
    }
}

/// Execute a parsed [`Command`] against the application state.
pub fn execute_command(s: &mut AppState, cmd: Command) {
    match cmd {
        Command::Quit => {
            s.quit = true;
        }
        Command::Help => {
            s.show_help = !s.show_help;
        }
        Command::Theme(name) => {
            s.theme = Theme::by_name(&name);
        }
        Command::Mode(mode) => {
            let next = mode.unwrap_or_else(|| s.query.mode.toggled());
            if next != s.query.mode {
                s.query.mode = next;
                s.run_search();
            }
        }
        Command::LineNumbers => {
            s.results.show_line_numbers = !s.results.show_line_numbers;
        }
        Command::Top => s.results.handle(&AppEvent::ScrollToTop),
        Command::Bottom => s.results.handle(&AppEvent::ScrollToBottom),
        Command::Reload => s.run_search(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_words() {
        assert_eq!(Command::parse("q"), Ok(Command::Quit));
        assert_eq!(Command::parse("quit"), Ok(Command::Quit));
        assert_eq!(Command::parse("  lines "), Ok(Command::LineNumbers));
        assert_eq!(Command::parse("top"), Ok(Command::Top));
        assert_eq!(Command::parse("bottom"), Ok(Command::Bottom));
        assert_eq!(Command::parse("reload"), Ok(Command::Reload));
    }

    #[test]
    fn parse_mode() {
        assert_eq!(Command::parse("mode or"), Ok(Command::Mode(Some(MatchMode::Any))));
        assert_eq!(Command::parse("mode AND"), Ok(Command::Mode(Some(MatchMode::All))));
        assert_eq!(Command::parse("mode"), Ok(Command::Mode(None)));
        assert!(Command::parse("mode xor").is_err());
    }

    #[test]
    fn parse_theme_requires_name() {
        assert_eq!(
            Command::parse("theme gruvbox"),
            Ok(Command::Theme("gruvbox".to_string()))
        );
        assert!(Command::parse("theme").is_err());
    }

    #[test]
    fn empty_is_sentinel() {
        assert_eq!(Command::parse("   "), Err(String::new()));
    }

    #[test]
    fn unknown_reports_word() {
        assert_eq!(
            Command::parse("frobnicate now"),
            Err("unknown command: frobnicate".to_string())
        );
    }
}
