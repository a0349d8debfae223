//! Ratatui widgets for the versed TUI.

pub mod command_bar;
pub mod help;
pub mod query_bar;
pub mod results_table;
