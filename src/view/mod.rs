//! UI-agnostic view models.
//!
//! [`table::build_table_view`] turns a [`crate::table::TableState`] into a
//! [`common::TableViewModel`]. The TUI maps the view model to ratatui widgets,
//! print mode renders it with [`text::render_text`].

pub mod common;
pub mod table;
pub mod text;

/// Placeholder shown instead of an empty table.
pub const EMPTY_TEXT: &str = "暫無資料";
