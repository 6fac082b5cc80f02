//! Header widget showing time, data source, and view tabs.

use chrono::Local;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::fmt::format_timestamp;
use crate::tui::state::{AppState, View};
use crate::tui::style::{Styles, Theme};

/// Renders the header bar (time, source, status message).
pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::horizontal([
        Constraint::Length(21), // Time
        Constraint::Length(10), // Name
        Constraint::Min(20),    // Source
        Constraint::Length(42), // Status message
    ])
    .split(area);

    let time = Paragraph::new(format_timestamp(Local::now())).style(Styles::bar());
    frame.render_widget(time, chunks[0]);

    frame.render_widget(Paragraph::new(" tsboard ").style(Styles::bar()), chunks[1]);

    let source = Paragraph::new(format!(" {}", state.source_label)).style(Styles::bar());
    frame.render_widget(source, chunks[2]);

    let (message, style) = match &state.status_message {
        Some(msg) => (msg.clone(), Styles::warning().bg(Theme::BAR_BG)),
        None => ("?:help q:quit".to_string(), Styles::bar()),
    };
    frame.render_widget(Paragraph::new(message).style(style), chunks[3]);
}

/// Renders the view tab line.
pub fn render_tabs(frame: &mut Frame, area: Rect, state: &AppState) {
    let tabs: Vec<Span> = View::all()
        .into_iter()
        .flat_map(|view| {
            let style = Styles::tab(view == state.current_view);
            let num = match view.shortcut() {
                Some(c) => format!(" {}:", c),
                None => " ".to_string(),
            };
            vec![
                Span::styled(num, Styles::dim()),
                Span::styled(format!("{} ", view.name()), style),
            ]
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(tabs)), area);
}
