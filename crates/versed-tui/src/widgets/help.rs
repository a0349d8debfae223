//! Help popup: centred floating overlay listing all keybindings.
//!
//! Toggle with `?`; close with `?` or `Escape`.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget},
};

const BINDINGS: &[(&str, &str)] = &[
    ("q  /  Ctrl+c", "Quit"),
    ("Tab", "Switch focus: query ↔ results"),
    ("/", "Focus the keyword input"),
    ("Enter", "Run the search"),
    ("Escape", "Leave the keyword input"),
    ("m  /  Ctrl+t", "Toggle AND / OR matching"),
    ("↑ k  /  ↓ j", "Move the results cursor"),
    ("PageUp  /  Ctrl+u", "Page up"),
    ("PageDown / Ctrl+d", "Page down"),
    ("g  /  G", "First / last result"),
    (":", "Command line (:help lists commands)"),
    ("?", "Toggle this help popup"),
];

const COMMANDS: &[(&str, &str)] = &[
    (":mode and|or", "Set the match mode"),
    (":lines", "Toggle line numbers"),
    (":reload", "Re-run the current search"),
    (":theme <name>", "default | gruvbox"),
];

pub struct HelpPopup<'a> {
    theme: &'a Theme,
}

impl<'a> HelpPopup<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl Widget for HelpPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = (BINDINGS.len() + COMMANDS.len() + 3) as u16;
        let popup = centered_rect(64, height, area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(" versed keybindings (? to close) ")
            .border_style(self.theme.border_focused);

        let inner = block.inner(popup);
        block.render(popup, buf);

        let entry = |(key, desc): &(&str, &str)| {
            Line::from(vec![
                Span::styled(
                    format!("  {:<20}", key),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(desc.to_string()),
            ])
        };

        let mut lines: Vec<Line> = BINDINGS.iter().map(entry).collect();
        lines.push(Line::from(""));
        lines.extend(COMMANDS.iter().map(entry));

        Paragraph::new(lines).render(inner, buf);
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
