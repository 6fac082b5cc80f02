//! Home view: strategy list and update status.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use crate::source::status::UpdateInfo;
use crate::strategy::STRATEGIES;
use crate::tui::state::{AppState, StatusInfo};
use crate::tui::style::Styles;

pub fn render_home(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::vertical([
        Constraint::Length(4), // Update status
        Constraint::Min(3),    // Strategies
    ])
    .split(area);

    render_status(frame, chunks[0], &state.status);

    let items: Vec<ListItem> = STRATEGIES
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let key = if i < 9 {
                format!("{:>2} ", i + 1)
            } else {
                "   ".to_string()
            };
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(key, Styles::dim()),
                    Span::styled(s.title, Styles::key()),
                    Span::styled(format!("  {}", s.file_name), Styles::dim()),
                ]),
                Line::from(Span::styled(format!("   {}", s.description), Styles::dim())),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(" Strategies (Enter to open) ")
                .borders(Borders::ALL)
                .style(Styles::default()),
        )
        .highlight_style(Styles::selected());
    let mut list_state = ListState::default().with_selected(Some(state.home_selected));
    frame.render_stateful_widget(list, chunks[1], &mut list_state);
}

fn render_status(frame: &mut Frame, area: Rect, status: &StatusInfo) {
    let lines = match status {
        StatusInfo::Loading => vec![Line::from(Span::styled("Loading update status…", Styles::dim()))],
        StatusInfo::Loaded(info) => vec![
            status_line("Stock analysis", info.stock_analysis.as_ref()),
            status_line("Shareholder", info.shareholder.as_ref()),
        ],
        StatusInfo::Unknown(reason) => vec![
            Line::from(vec![
                Span::styled("Last update: ", Styles::key()),
                Span::styled("unknown", Styles::warning()),
            ]),
            Line::from(Span::styled(reason.clone(), Styles::dim())),
        ],
    };
    let block = Block::default()
        .title(" Update status ")
        .borders(Borders::ALL)
        .style(Styles::default());
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn status_line(label: &'static str, info: Option<&UpdateInfo>) -> Line<'static> {
    let value = match info {
        Some(info) => Span::raw(info.summary()),
        None => Span::styled("unknown", Styles::warning()),
    };
    Line::from(vec![Span::styled(format!("{:<16}", label), Styles::key()), value])
}
