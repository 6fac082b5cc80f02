//! UI-agnostic view model types.
//!
//! These types represent presentation data without any dependency on a specific
//! rendering framework. The TUI maps them to ratatui Styles, print mode renders
//! them as aligned plain text.

use crate::fmt::{FormattedCell, Trend};
use crate::table::SortDirection;

/// Cell-level style classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StyleClass {
    #[default]
    Normal,
    /// Rising value (TUI: red).
    Up,
    /// Falling value (TUI: green).
    Down,
    /// Unchanged value (TUI: gray).
    Neutral,
    /// Opens an external page (TUI: underlined cyan).
    Link,
    /// Dimmed (TUI: dark gray). E.g. footers, hints.
    Dimmed,
    /// Accent (TUI: yellow). E.g. active filter.
    Accent,
    /// Rank level badge, 0 is the highest (TUI: red, orange, yellow, green).
    Level(u8),
}

impl StyleClass {
    /// Badge class for a level position; levels past the palette stay plain.
    pub fn for_level(position: usize) -> Option<StyleClass> {
        u8::try_from(position).ok().filter(|&n| n < 4).map(StyleClass::Level)
    }
}

impl From<Trend> for StyleClass {
    fn from(trend: Trend) -> Self {
        match trend {
            Trend::Up => StyleClass::Up,
            Trend::Down => StyleClass::Down,
            Trend::Neutral => StyleClass::Neutral,
        }
    }
}

/// A single table cell with optional per-cell style override.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewCell {
    pub text: String,
    /// `None` = inherit row style.
    pub style: Option<StyleClass>,
    pub link: Option<String>,
}

impl ViewCell {
    pub fn plain(text: String) -> Self {
        Self {
            text,
            style: None,
            link: None,
        }
    }

    pub fn styled(text: String, style: StyleClass) -> Self {
        Self {
            text,
            style: Some(style),
            link: None,
        }
    }
}

impl From<FormattedCell> for ViewCell {
    fn from(cell: FormattedCell) -> Self {
        let style = match (&cell.link, cell.trend) {
            (Some(_), _) => Some(StyleClass::Link),
            (None, Some(trend)) => Some(trend.into()),
            (None, None) => None,
        };
        Self {
            text: cell.text,
            style,
            link: cell.link,
        }
    }
}

/// One table row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewRow {
    pub cells: Vec<ViewCell>,
    pub style: StyleClass,
}

impl ViewRow {
    /// First link target in the row.
    pub fn link(&self) -> Option<&str> {
        self.cells.iter().find_map(|c| c.link.as_deref())
    }
}

/// Page position shown under the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageInfo {
    pub page: usize,
    pub total_pages: usize,
    pub filtered_len: usize,
    /// 0-based index of the first visible row in the filtered set.
    pub first_index: usize,
}

impl PageInfo {
    /// `"Page 2/3 · rows 21-40 of 45"`.
    pub fn summary(&self) -> String {
        if self.filtered_len == 0 {
            return format!("Page {}/{} · 0 rows", self.page, self.total_pages);
        }
        let last = (self.first_index + crate::table::PAGE_SIZE).min(self.filtered_len);
        format!(
            "Page {}/{} · rows {}-{} of {}",
            self.page,
            self.total_pages,
            self.first_index + 1,
            last,
            self.filtered_len
        )
    }
}

/// Complete table ready to be rendered by any frontend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableViewModel {
    pub title: String,
    pub headers: Vec<String>,
    pub widths: Vec<u16>,
    pub right_aligned: Vec<bool>,
    pub rows: Vec<ViewRow>,
    pub sort_column: Option<usize>,
    pub sort_direction: SortDirection,
    pub page: PageInfo,
    /// Active category when the table has a filter column.
    pub filter_label: Option<String>,
    pub filter_column: Option<String>,
    /// Rows per level of a ranked filter column, over the whole dataset.
    pub level_counts: Vec<(String, usize)>,
    /// Text shown instead of the table when there are no rows.
    pub empty_message: String,
}

impl TableViewModel {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `"風險等級: 極高 2 · 高 0 · 中 1 · 低 1"`, or `None` without levels.
    pub fn level_summary(&self) -> Option<String> {
        let column = self.filter_column.as_deref()?;
        if self.level_counts.is_empty() {
            return None;
        }
        let parts: Vec<String> = self
            .level_counts
            .iter()
            .map(|(level, n)| format!("{} {}", level, n))
            .collect();
        Some(format!("{}: {}", column, parts.join(" · ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatted_cell_maps_to_style() {
        let up: ViewCell = FormattedCell {
            text: "+1.00%".into(),
            trend: Some(Trend::Up),
            link: None,
        }
        .into();
        assert_eq!(up.style, Some(StyleClass::Up));

        let link: ViewCell = FormattedCell {
            text: "2330".into(),
            trend: None,
            link: Some("https://example".into()),
        }
        .into();
        assert_eq!(link.style, Some(StyleClass::Link));

        let plain: ViewCell = FormattedCell::default().into();
        assert_eq!(plain.style, None);
    }

    #[test]
    fn level_classes_stop_at_palette() {
        assert_eq!(StyleClass::for_level(0), Some(StyleClass::Level(0)));
        assert_eq!(StyleClass::for_level(3), Some(StyleClass::Level(3)));
        assert_eq!(StyleClass::for_level(4), None);
    }

    #[test]
    fn level_summary_lists_counts() {
        let vm = TableViewModel {
            filter_column: Some("風險等級".into()),
            level_counts: vec![("極高".into(), 2), ("高".into(), 0)],
            ..Default::default()
        };
        assert_eq!(vm.level_summary().as_deref(), Some("風險等級: 極高 2 · 高 0"));
        assert_eq!(TableViewModel::default().level_summary(), None);
    }

    #[test]
    fn page_summary() {
        let info = PageInfo {
            page: 2,
            total_pages: 3,
            filtered_len: 45,
            first_index: 20,
        };
        assert_eq!(info.summary(), "Page 2/3 · rows 21-40 of 45");
        let empty = PageInfo {
            page: 1,
            total_pages: 1,
            filtered_len: 0,
            first_index: 0,
        };
        assert_eq!(empty.summary(), "Page 1/1 · 0 rows");
    }
}
