//! Strategy table widget.
//! Thin TUI wrapper over [`crate::view::table::build_strategy_view`].

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState};

use crate::fmt::format_timestamp;
use crate::page::PageState;
use crate::tui::state::AppState;
use crate::tui::style::{Styles, Theme};
use crate::view::common::{StyleClass, TableViewModel};
use crate::view::table::build_strategy_view;

use super::panels::{render_empty, render_error, render_loading};

/// Renders the mounted strategy page: description, table or panel, footer.
pub fn render_strategy(frame: &mut Frame, area: Rect, state: &mut AppState) {
    let Some(page) = &state.page else {
        return;
    };
    let strategy = page.strategy;

    let vm = match &page.state {
        PageState::Ready(ready) => Some(build_strategy_view(strategy, &ready.table)),
        _ => None,
    };
    let summary = vm.as_ref().and_then(|vm| vm.level_summary());

    let chunks = Layout::vertical([
        Constraint::Length(if summary.is_some() { 3 } else { 2 }), // Description + timestamp
        Constraint::Min(3),                                        // Table
        Constraint::Length(1),                                     // Footer
    ])
    .split(area);

    let updated = match page.updated_at() {
        Some(ts) if strategy.shows_modified => format!("File updated: {}", format_timestamp(ts)),
        Some(ts) => format!("Loaded: {}", format_timestamp(ts)),
        None => String::new(),
    };
    let mut intro = vec![
        Line::from(Span::styled(strategy.description, Styles::dim())),
        Line::from(Span::styled(updated, Styles::dim())),
    ];
    if let Some(vm) = vm.as_ref().filter(|_| summary.is_some()) {
        intro.push(level_line(vm));
    }
    frame.render_widget(Paragraph::new(intro), chunks[0]);

    let (ready, vm) = match (&page.state, vm) {
        (PageState::Loading, _) => {
            render_loading(frame, chunks[1], strategy.file_name);
            return;
        }
        (PageState::Error(err), _) => {
            render_error(frame, chunks[1], err, strategy.file_name);
            return;
        }
        (PageState::Ready(ready), Some(vm)) => (ready, vm),
        (PageState::Ready(_), None) => return,
    };

    if vm.is_empty() {
        render_empty(frame, chunks[1], strategy.title, &vm.empty_message);
    } else {
        let selected = ready.table.selected.min(vm.rows.len().saturating_sub(1));
        state.ratatui_state.select(Some(selected));
        render_table(frame, chunks[1], &vm, &mut state.ratatui_state);
    }
    render_footer(frame, chunks[2], &vm);
}

/// Per-level counts drawn with the level badges.
fn level_line(vm: &TableViewModel) -> Line<'static> {
    let mut spans = vec![Span::styled(
        format!("{}: ", vm.filter_column.as_deref().unwrap_or_default()),
        Styles::dim(),
    )];
    for (i, (level, n)) in vm.level_counts.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        let badge = StyleClass::for_level(i).map_or_else(Styles::default, Styles::from_class);
        spans.push(Span::styled(format!(" {} ", level), badge));
        spans.push(Span::styled(format!(" {}", n), Styles::key()));
    }
    Line::from(spans)
}

fn render_table(
    frame: &mut Frame,
    area: Rect,
    vm: &TableViewModel,
    ratatui_state: &mut TableState,
) {
    let header = Row::new(vm.headers.iter().enumerate().map(|(i, h)| {
        let cell = Cell::from(h.clone()).style(Styles::bar());
        if vm.sort_column == Some(i) {
            cell.style(Styles::bar().fg(Theme::ATTENTION))
        } else {
            cell
        }
    }))
    .style(Styles::bar())
    .height(1);

    let rows: Vec<Row> = vm
        .rows
        .iter()
        .map(|vr| {
            let cells = vr.cells.iter().enumerate().map(|(i, c)| {
                let line = match c.style {
                    Some(s) => Line::from(Span::styled(c.text.clone(), Styles::from_class(s))),
                    None => Line::from(c.text.clone()),
                };
                let line = if vm.right_aligned.get(i).copied().unwrap_or(false) {
                    line.right_aligned()
                } else {
                    line
                };
                Cell::from(Text::from(line))
            });
            Row::new(cells).style(Styles::from_class(vr.style)).height(1)
        })
        .collect();

    let mut constraints: Vec<Constraint> = vm.widths.iter().map(|&w| Constraint::Length(w)).collect();
    constraints.push(Constraint::Fill(1));

    let table = Table::new(rows, constraints)
        .header(header)
        .block(
            Block::default()
                .title(vm.title.clone())
                .borders(Borders::ALL)
                .style(Styles::default()),
        )
        .column_spacing(2)
        .row_highlight_style(Styles::selected());

    frame.render_widget(Clear, area);
    frame.render_stateful_widget(table, area, ratatui_state);
}

fn render_footer(frame: &mut Frame, area: Rect, vm: &TableViewModel) {
    let mut spans = vec![Span::styled(vm.page.summary(), Styles::key())];
    if let Some(label) = &vm.filter_label {
        spans.push(Span::styled("  category: ", Styles::dim()));
        spans.push(Span::styled(label.clone(), Styles::warning()));
        spans.push(Span::styled(" (f)", Styles::dim()));
    }
    spans.push(Span::styled(
        "  ←→ page  <> sort  s reverse  Enter chart  r reload",
        Styles::dim(),
    ));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
