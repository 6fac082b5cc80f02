//! Help popup widget with the key bindings of the current view.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::tui::state::View;
use crate::tui::style::{Styles, Theme};
use crate::view::common::StyleClass;

use super::popup::{centered, popup_block};

/// Renders the key bindings of `view`; `scroll` is clamped to the content.
pub fn render_help(frame: &mut Frame, area: Rect, view: View, scroll: &mut usize) {
    let height = (area.height * 80 / 100).clamp(10, 30);
    let popup = centered(area, 60, 40, 80, height);
    let (title, content) = help_content(view);
    let inner = popup_block(frame, popup, title);

    let [body, footer] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

    let max_scroll = content.len().saturating_sub(body.height as usize);
    *scroll = (*scroll).min(max_scroll);

    frame.render_widget(
        Paragraph::new(content)
            .wrap(Wrap { trim: false })
            .scroll((*scroll as u16, 0)),
        body,
    );

    let mut hint = vec![
        Span::styled("?/Esc", Styles::warning()),
        Span::styled(" close  ", Styles::dim()),
        Span::styled("↑↓", Styles::warning()),
        Span::styled(" scroll", Styles::dim()),
    ];
    if max_scroll > 0 {
        hint.push(Span::styled(
            format!("  {}/{}", *scroll + 1, max_scroll + 1),
            Styles::dim(),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(hint)), footer);
}

fn section(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(title, Styles::section_header()))
}

fn key_line(keys: &'static str, what: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<14}", keys), Style::default().fg(Theme::LINK)),
        Span::raw(what),
    ])
}

fn help_content(view: View) -> (&'static str, Vec<Line<'static>>) {
    let mut lines = vec![
        section("Navigation:"),
        key_line("Tab / S-Tab", "next / previous view"),
        key_line("1-9 - =", "open strategy by number"),
        key_line("0 / h", "home"),
        key_line("?", "this help"),
        key_line("q", "quit"),
        Line::from(""),
    ];

    match view {
        View::Home => {
            lines.extend([
                section("Home:"),
                key_line("↑↓ / j k", "select strategy"),
                key_line("Enter", "open selected strategy"),
                key_line("r", "reload the update status"),
            ]);
            ("Home Help", lines)
        }
        View::Strategy(_) => {
            lines.extend([
                section("Table:"),
                key_line("↑↓ / j k", "select row"),
                key_line("g / G", "first / last row of the page"),
                key_line("← → / p n", "previous / next page"),
                key_line("PgUp PgDn", "previous / next page"),
                key_line("Home / End", "first / last page"),
                key_line("> / <", "sort by next / previous column"),
                key_line("s", "reverse sort direction"),
                key_line("f", "pick category (filtered tables)"),
                key_line("c", "next category (filtered tables)"),
                key_line("Enter / o", "open stock chart in browser"),
                key_line("r", "reload data"),
                Line::from(""),
                section("Colors:"),
                Line::from(vec![
                    Span::raw("  "),
                    Span::styled("red", Styles::from_class(StyleClass::Up)),
                    Span::raw(" rising, "),
                    Span::styled("green", Styles::from_class(StyleClass::Down)),
                    Span::raw(" falling"),
                ]),
                Line::from(Span::styled(
                    "  Sorting a new column starts descending (ascending for convertible bonds).",
                    Styles::dim(),
                )),
            ]);
            ("Strategy Help", lines)
        }
    }
}
