//! Loading, error and empty-state panels.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::source::LoadError;
use crate::tui::style::Styles;

pub fn render_loading(frame: &mut Frame, area: Rect, file_name: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .style(Styles::default());
    let content = vec![
        Line::from(""),
        Line::from(Span::styled("Loading…", Styles::section_header())),
        Line::from(Span::styled(file_name.to_string(), Styles::dim())),
    ];
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(content)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

/// Warning panel; not-ready and parse failures read differently.
pub fn render_error(frame: &mut Frame, area: Rect, err: &LoadError, file_name: &str) {
    let block = Block::default()
        .title(format!(" ⚠ {} ", err.title()))
        .borders(Borders::ALL)
        .border_style(Styles::warning());
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(err.to_string(), Styles::warning())),
        Line::from(""),
        Line::from(err.hint()),
        Line::from(vec![
            Span::styled("File: ", Styles::dim()),
            Span::raw(file_name.to_string()),
        ]),
    ];
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(content)
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}

/// Neutral "no data" panel shown instead of an empty table.
pub fn render_empty(frame: &mut Frame, area: Rect, title: &str, message: &str) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .style(Styles::default());
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), Styles::section_header())),
        Line::from(Span::styled(
            "Results appear after the next screening run.",
            Styles::dim(),
        )),
    ];
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(content)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}
