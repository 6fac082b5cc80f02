//! Popup placement and the quit confirmation.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::style::{Styles, Theme};

/// Rect of `width_pct` percent of `area` (bounded by `min_w..=max_w`) and
/// `height` rows, centered and never larger than `area`.
pub fn centered(area: Rect, width_pct: u16, min_w: u16, max_w: u16, height: u16) -> Rect {
    let width = (area.width * width_pct / 100)
        .clamp(min_w, max_w)
        .min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Bordered popup frame; clears what is underneath and returns the inner area.
pub fn popup_block(frame: &mut Frame, area: Rect, title: &str) -> Rect {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Theme::LINK));
    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);
    inner
}

fn choice(keys: &[&'static str], action: &'static str) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, key) in keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" / ", Styles::dim()));
        }
        spans.push(Span::styled(*key, Styles::warning()));
    }
    spans.push(Span::styled(format!("  {}", action), Styles::dim()));
    Line::from(spans)
}

pub fn render_quit_confirm(frame: &mut Frame, area: Rect) {
    let popup = centered(area, 40, 36, 56, 7);
    let inner = popup_block(frame, popup, "Exit tsboard");

    let content = vec![
        Line::from(Span::styled("Leave the dashboard?", Styles::key())),
        Line::from(""),
        choice(&["Enter", "q"], "quit"),
        choice(&["Esc", "n"], "stay"),
    ];
    frame.render_widget(
        Paragraph::new(content).alignment(Alignment::Center),
        inner,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_fits_inside_area() {
        let area = Rect::new(0, 0, 100, 30);
        let r = centered(area, 40, 36, 56, 7);
        assert_eq!((r.width, r.height), (40, 7));
        assert_eq!((r.x, r.y), (30, 11));

        let tiny = Rect::new(0, 0, 20, 4);
        let r = centered(tiny, 40, 36, 56, 7);
        assert_eq!((r.width, r.height), (20, 4));
        assert_eq!((r.x, r.y), (0, 0));
    }
}
