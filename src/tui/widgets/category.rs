//! Category picker popup for filtered tables.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::{List, ListItem, ListState};

use crate::table::CategoryFilter;
use crate::tui::style::Styles;

use super::popup::{centered, popup_block};

/// Renders the category list with `selected` highlighted; `active` is marked.
pub fn render_category_picker(
    frame: &mut Frame,
    area: Rect,
    categories: &[CategoryFilter],
    selected: usize,
    active: Option<&CategoryFilter>,
) {
    let height = (categories.len() as u16 + 2).clamp(5, area.height.saturating_sub(4).max(5));
    let popup = centered(area, 40, 30, 50, height);
    let inner = popup_block(frame, popup, "Category (Enter select, Esc cancel)");

    let items: Vec<ListItem> = categories
        .iter()
        .map(|c| {
            let marker = if Some(c) == active { "● " } else { "  " };
            ListItem::new(format!("{}{}", marker, c.label()))
        })
        .collect();

    let list = List::new(items).highlight_style(Styles::selected());
    let mut list_state = ListState::default().with_selected(Some(selected));
    frame.render_stateful_widget(list, inner, &mut list_state);
}
