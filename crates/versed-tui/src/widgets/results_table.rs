//! Results pane: the matched rows as a table, or a notice.
//!
//! # Navigation (when pane is focused)
//!
//! | Key | Action |
//! |-----|--------|
//! | `↑` / `k` | Move cursor up one row |
//! | `↓` / `j` | Move cursor down one row |
//! | `PageUp` / `Ctrl+u` | Up one page |
//! | `PageDown` / `Ctrl+d` | Down one page |
//! | `g` / `G` | First / last row |
//!
//! # Scroll semantics
//!
//! `offset` = index of the first visible row, `cursor` = absolute index of the
//! selected row. Moving the cursor past either edge scrolls the window.

use std::cell::Cell;

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Cell as TableCell, Paragraph, Row as TableRow, Scrollbar, ScrollbarOrientation,
        ScrollbarState, StatefulWidget, Table, Widget, Wrap,
    },
};
use versed_core::{Highlighter, SearchResult};

const PAGE_STEP: usize = 10;

pub const EMPTY_NOTICE: &str = "No matching verses found.";

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// What the results pane is showing.
#[derive(Debug)]
pub enum ResultsView {
    /// No search has run yet (or the query was cleared).
    Idle,
    Matches {
        result: SearchResult,
        highlighter: Highlighter,
    },
    /// The search ran and matched nothing.
    Empty { scanned: usize },
    /// The search failed; no rows are shown.
    Error(String),
}

pub struct ResultsState {
    pub view: ResultsView,
    pub cursor: usize,
    pub offset: usize,
    pub show_line_numbers: bool,
    /// Visible body rows from the last render, so `handle()` can page.
    last_height: Cell<usize>,
}

impl ResultsState {
    pub fn new(show_line_numbers: bool) -> Self {
        Self {
            view: ResultsView::Idle,
            cursor: 0,
            offset: 0,
            show_line_numbers,
            last_height: Cell::new(20),
        }
    }

    /// Replace the view and reset scrolling to the top.
    pub fn set_view(&mut self, view: ResultsView) {
        self.view = view;
        self.cursor = 0;
        self.offset = 0;
    }

    /// Number of rows on display.
    pub fn len(&self) -> usize {
        match &self.view {
            ResultsView::Matches { result, .. } => result.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn height(&self) -> usize {
        self.last_height.get().max(1)
    }

    /// Pull the window so the cursor is visible.
    fn follow_cursor(&mut self) {
        let height = self.height();
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + height {
            self.offset = self.cursor + 1 - height;
        }
    }

    /// Handle a navigation event from the app shell.
    pub fn handle(&mut self, event: &AppEvent) {
        let total = self.len();
        if total == 0 {
            return;
        }
        let last = total - 1;

        match event {
            AppEvent::Nav(Direction::Up) => self.cursor = self.cursor.saturating_sub(1),
            AppEvent::Nav(Direction::Down) => self.cursor = (self.cursor + 1).min(last),
            AppEvent::ScrollUp => self.cursor = self.cursor.saturating_sub(PAGE_STEP),
            AppEvent::ScrollDown => self.cursor = (self.cursor + PAGE_STEP).min(last),
            AppEvent::ScrollToTop => self.cursor = 0,
            AppEvent::ScrollToBottom => self.cursor = last,
            _ => return,
        }
        self.follow_cursor();
        tracing::debug!(cursor = self.cursor, offset = self.offset, "results: moved");
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct ResultsTable<'a> {
    state: &'a ResultsState,
    focused: bool,
    max_column_width: u16,
    theme: &'a Theme,
}

impl<'a> ResultsTable<'a> {
    pub fn new(
        state: &'a ResultsState,
        focused: bool,
        max_column_width: u16,
        theme: &'a Theme,
    ) -> Self {
        Self {
            state,
            focused,
            max_column_width,
            theme,
        }
    }

    fn render_notice(&self, text: String, style: Style, area: Rect, buf: &mut Buffer) {
        Paragraph::new(Line::from(Span::styled(text, style)))
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }

    fn render_table(
        &self,
        result: &SearchResult,
        highlighter: &Highlighter,
        area: Rect,
        buf: &mut Buffer,
    ) {
        // One row is taken by the header.
        let height = (area.height as usize).saturating_sub(1);
        self.state.last_height.set(height);

        let total = result.len();
        let start = self.state.offset.min(total);
        let end = (start + height).min(total);
        let visible = &result.rows()[start..end];
        let target = result.target_index();
        let columns = result.header().columns();

        // Widths: searched column fills, the rest fit their visible content
        // up to the configured cap.
        let mut widths: Vec<Constraint> = Vec::with_capacity(columns.len() + 1);
        if self.state.show_line_numbers {
            let digits = visible.last().map_or(1, |r| r.line.to_string().len());
            widths.push(Constraint::Length(digits as u16));
        }
        for (i, name) in columns.iter().enumerate() {
            if i == target {
                widths.push(Constraint::Fill(1));
            } else {
                let content = visible
                    .iter()
                    .filter_map(|r| r.field(i))
                    .map(|f| f.chars().count())
                    .chain(std::iter::once(name.chars().count()))
                    .max()
                    .unwrap_or(0) as u16;
                widths.push(Constraint::Length(content.min(self.max_column_width)));
            }
        }

        let mut header_cells: Vec<TableCell> = Vec::with_capacity(widths.len());
        if self.state.show_line_numbers {
            header_cells.push(TableCell::from("#"));
        }
        header_cells.extend(columns.iter().map(|c| TableCell::from(c.as_str())));
        let header = TableRow::new(header_cells).style(self.theme.table_header);

        let rows: Vec<TableRow> = visible
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let mut cells: Vec<TableCell> = Vec::with_capacity(widths.len());
                if self.state.show_line_numbers {
                    cells.push(TableCell::from(Span::styled(
                        row.line.to_string(),
                        self.theme.table_line_number,
                    )));
                }
                for (col, field) in row.fields.iter().enumerate().take(columns.len()) {
                    if col == target {
                        cells.push(TableCell::from(highlighted_line(
                            highlighter,
                            field,
                            self.theme,
                        )));
                    } else {
                        cells.push(TableCell::from(Span::styled(
                            field.clone(),
                            self.theme.table_other,
                        )));
                    }
                }
                let mut table_row = TableRow::new(cells);
                if self.focused && start + i == self.state.cursor {
                    table_row = table_row.style(Style::default().add_modifier(Modifier::REVERSED));
                }
                table_row
            })
            .collect();

        let text_area = Rect { width: area.width.saturating_sub(1), ..area };
        let sb_area = Rect {
            x: area.right().saturating_sub(1),
            width: 1,
            ..area
        };

        Widget::render(
            Table::new(rows, widths).header(header).column_spacing(2),
            text_area,
            buf,
        );

        if total > height {
            let mut sb_state = ScrollbarState::new(total)
                .position(start)
                .viewport_content_length(height);
            StatefulWidget::render(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(None)
                    .end_symbol(None),
                sb_area,
                buf,
                &mut sb_state,
            );
        }
    }
}

/// The searched column as styled spans, keywords in the highlight style.
pub fn highlighted_line(highlighter: &Highlighter, text: &str, theme: &Theme) -> Line<'static> {
    let highlighted = highlighter.highlight(text);
    let spans: Vec<Span<'static>> = highlighted
        .segments()
        .into_iter()
        .map(|seg| {
            let style = if seg.matched {
                theme.search_highlight
            } else {
                theme.table_target
            };
            Span::styled(seg.text.to_string(), style)
        })
        .collect();
    Line::from(spans)
}

impl Widget for ResultsTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let title = match &self.state.view {
            ResultsView::Matches { result, .. } => format!("Results ({})", result.len()),
            ResultsView::Empty { .. } => "Results (0)".to_string(),
            _ => "Results".to_string(),
        };
        let block = Block::bordered().title(title).border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        match &self.state.view {
            ResultsView::Idle => self.render_notice(
                "Type keywords and press Enter. Ctrl+t switches AND/OR.".to_string(),
                self.theme.notice_hint,
                inner,
                buf,
            ),
            ResultsView::Empty { scanned } => self.render_notice(
                format!("{EMPTY_NOTICE} ({scanned} rows scanned)"),
                self.theme.notice_empty,
                inner,
                buf,
            ),
            ResultsView::Error(msg) => self.render_notice(
                format!("Error: {msg}"),
                self.theme.notice_error,
                inner,
                buf,
            ),
            ResultsView::Matches {
                result,
                highlighter,
            } => self.render_table(result, highlighter, inner, buf),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
