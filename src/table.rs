//! Generic table state: sorting, category filtering, pagination.
//!
//! The pure operations ([`apply_filter`], [`apply_sort`], [`paginate`]) work
//! on borrowed rows and never mutate the dataset. [`TableState`] owns one
//! dataset plus the interactive state of a single mounted view and
//! recomputes the visible page from scratch on every call.

use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions};
use icu_locid::locale;

use crate::dataset::{CellValue, Dataset, Row};
use crate::schema::{RankWeights, TableConfig};

/// Fixed number of rows per page.
pub const PAGE_SIZE: usize = 20;

/// Sort direction of the active column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Applies the direction to an ascending comparison.
    pub fn apply(self, ord: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

/// Sort key derived from a cell.
///
/// Numbers order before texts; within each class keys compare by value or
/// by collation, which makes the ordering total.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Number(f64),
    Text(String),
}

impl SortKey {
    /// Rank weight when the column has weights, else numeric coercion,
    /// else the cell text.
    pub fn for_cell(cell: &CellValue, ranks: Option<&RankWeights>) -> Self {
        if let Some(ranks) = ranks {
            return SortKey::Number(ranks.weight(cell.as_text().trim()));
        }
        match cell.coerce_number() {
            Some(v) => SortKey::Number(v),
            None => SortKey::Text(cell.as_text().into_owned()),
        }
    }

    /// Number keys are finite, so `-0.0` and `0.0` tie.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (SortKey::Text(a), SortKey::Text(b)) => collate(a, b),
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
        }
    }
}

thread_local! {
    /// Traditional Chinese collation; Latin text keeps the root order.
    static COLLATOR: Option<Collator> =
        Collator::try_new(&locale!("zh-Hant").into(), CollatorOptions::new())
            .inspect_err(|e| tracing::warn!(error = ?e, "collator unavailable, using code points"))
            .ok();
}

/// Locale-aware text comparison; identical collation keys fall back to
/// code point order.
pub fn collate(a: &str, b: &str) -> Ordering {
    let ord = COLLATOR.with(|c| match c {
        Some(collator) => collator.compare(a, b),
        None => a
            .chars()
            .flat_map(char::to_lowercase)
            .cmp(b.chars().flat_map(char::to_lowercase))
            .then_with(|| b.cmp(a)),
    });
    ord.then_with(|| a.cmp(b))
}

/// Active sort column (by name) and direction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortState {
    pub column: Option<String>,
    pub direction: SortDirection,
}

impl SortState {
    /// Same column flips direction, a new column starts at `default`.
    pub fn toggle(&mut self, column: &str, default: SortDirection) {
        if self.column.as_deref() == Some(column) {
            self.direction = self.direction.flip();
        } else {
            self.column = Some(column.to_string());
            self.direction = default;
        }
    }
}

/// Category filter value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Only(v) => v,
        }
    }
}

/// Rows whose `column` text equals the filter value exactly.
///
/// `All` or no filter column keeps every row. A specific value on a column
/// the dataset lacks matches nothing.
pub fn apply_filter<'a>(
    dataset: &'a Dataset,
    filter: &CategoryFilter,
    column: Option<&str>,
) -> Vec<&'a Row> {
    let (CategoryFilter::Only(value), Some(column)) = (filter, column) else {
        return dataset.rows().iter().collect();
    };
    let Some(idx) = dataset.column_index(column) else {
        return Vec::new();
    };
    dataset
        .rows()
        .iter()
        .filter(|row| row.get(idx).is_some_and(|c| c.as_text() == value.as_str()))
        .collect()
}

/// Stable sort of `rows` on column `column`; `None` keeps the input order.
pub fn apply_sort(
    rows: &mut [&Row],
    column: Option<usize>,
    direction: SortDirection,
    ranks: Option<&RankWeights>,
) {
    let Some(col) = column else {
        return;
    };
    let empty = CellValue::default();
    let mut keyed: Vec<(SortKey, &Row)> = rows
        .iter()
        .map(|row| (SortKey::for_cell(row.get(col).unwrap_or(&empty), ranks), *row))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| direction.apply(a.compare(b)));
    for (slot, (_, row)) in rows.iter_mut().zip(keyed) {
        *slot = row;
    }
}

pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// One page cut from a longer row list.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSlice<T> {
    pub items: Vec<T>,
    /// 1-based page actually served after clamping.
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

/// Returns page `page` (1-based, clamped into range) of `rows`.
pub fn paginate<T: Clone>(rows: &[T], page: usize, page_size: usize) -> PageSlice<T> {
    let size = page_size.max(1);
    let total = total_pages(rows.len(), size);
    let page = page.clamp(1, total);
    let start = ((page - 1) * size).min(rows.len());
    let end = (start + size).min(rows.len());
    PageSlice {
        items: rows[start..end].to_vec(),
        page,
        total_pages: total,
        total_items: rows.len(),
    }
}

/// Visible page produced by [`TableState::current_page`].
#[derive(Debug, Clone)]
pub struct TablePage<'a> {
    pub rows: Vec<&'a Row>,
    pub page: usize,
    pub total_pages: usize,
    pub filtered_len: usize,
    /// 0-based index of the first row within the filtered set.
    pub first_index: usize,
}

/// Interactive state of one table over an owned dataset.
#[derive(Debug, Clone)]
pub struct TableState {
    dataset: Dataset,
    config: TableConfig,
    pub sort: SortState,
    pub filter: CategoryFilter,
    /// 1-based current page.
    pub page: usize,
    /// Selected row within the current page.
    pub selected: usize,
}

impl TableState {
    pub fn new(dataset: Dataset, config: TableConfig) -> Self {
        let sort = match config.initial() {
            Some((column, direction)) => SortState {
                column: Some(column.to_string()),
                direction,
            },
            None => SortState {
                column: None,
                direction: config.direction_for_new_column(),
            },
        };
        Self {
            dataset,
            config,
            sort,
            filter: CategoryFilter::All,
            page: 1,
            selected: 0,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn toggle_sort(&mut self, column: &str) {
        let default = self.config.direction_for_new_column();
        self.sort.toggle(column, default);
        self.selected = 0;
    }

    /// Sorts on `column` without toggling; `None` picks the direction a new
    /// sort column starts with.
    pub fn set_sort(&mut self, column: &str, direction: Option<SortDirection>) {
        self.sort = SortState {
            column: Some(column.to_string()),
            direction: direction.unwrap_or(self.config.direction_for_new_column()),
        };
        self.selected = 0;
    }

    /// Toggles sort on the column at header position `idx`.
    pub fn sort_by_index(&mut self, idx: usize) {
        if let Some(name) = self.dataset.columns().get(idx).cloned() {
            self.toggle_sort(&name);
        }
    }

    /// Header position of the active sort column.
    pub fn sort_column_index(&self) -> Option<usize> {
        self.sort
            .column
            .as_deref()
            .and_then(|c| self.dataset.column_index(c))
    }

    /// Changing the filter returns to the first page.
    pub fn select_category(&mut self, filter: CategoryFilter) {
        self.filter = filter;
        self.page = 1;
        self.selected = 0;
    }

    /// `All` followed by the filter values.
    ///
    /// A ranked filter column lists every level highest first, present or
    /// not, then any unranked values; other columns list their distinct
    /// values in collation order.
    pub fn categories(&self) -> Vec<CategoryFilter> {
        let mut out = vec![CategoryFilter::All];
        let Some(column) = self.config.filter_column() else {
            return out;
        };
        let mut values = self.dataset.distinct_values(column);
        values.sort_by(|a, b| collate(a, b));
        if let Some(ranks) = self.config.filter_ranks() {
            out.extend(ranks.levels().map(|l| CategoryFilter::Only(l.to_string())));
            values.retain(|v| ranks.position(v).is_none());
        }
        out.extend(values.into_iter().map(CategoryFilter::Only));
        out
    }

    /// Row count per level of a ranked filter column over the whole
    /// dataset, highest level first. `None` when the filter is not ranked.
    pub fn level_counts(&self) -> Option<Vec<(String, usize)>> {
        let ranks = self.config.filter_ranks()?;
        let idx = self.config.filter_column().and_then(|c| self.dataset.column_index(c));
        let counts = ranks
            .levels()
            .map(|level| {
                let n = idx.map_or(0, |i| {
                    self.dataset
                        .rows()
                        .iter()
                        .filter(|r| r.get(i).is_some_and(|c| c.as_text() == level))
                        .count()
                });
                (level.to_string(), n)
            })
            .collect();
        Some(counts)
    }

    /// Advances to the next category, wrapping back to `All`.
    pub fn cycle_category(&mut self) {
        let categories = self.categories();
        let pos = categories
            .iter()
            .position(|c| *c == self.filter)
            .unwrap_or(0);
        let next = categories
            .get((pos + 1) % categories.len())
            .cloned()
            .unwrap_or_default();
        self.select_category(next);
    }

    pub fn has_filter(&self) -> bool {
        self.config.filter_column().is_some()
    }

    fn filtered_sorted(&self) -> Vec<&Row> {
        let mut rows = apply_filter(&self.dataset, &self.filter, self.config.filter_column());
        let ranks = self
            .sort
            .column
            .as_deref()
            .and_then(|c| self.config.ranks_for(c));
        apply_sort(&mut rows, self.sort_column_index(), self.sort.direction, ranks);
        rows
    }

    pub fn filtered_len(&self) -> usize {
        apply_filter(&self.dataset, &self.filter, self.config.filter_column()).len()
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered_len(), PAGE_SIZE)
    }

    /// Filtered and sorted rows, all pages.
    pub fn rows(&self) -> Vec<&Row> {
        self.filtered_sorted()
    }

    pub fn current_page(&self) -> TablePage<'_> {
        let rows = self.filtered_sorted();
        let slice = paginate(&rows, self.page, PAGE_SIZE);
        TablePage {
            first_index: (slice.page - 1) * PAGE_SIZE,
            rows: slice.items,
            page: slice.page,
            total_pages: slice.total_pages,
            filtered_len: slice.total_items,
        }
    }

    pub fn goto_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.total_pages());
        self.selected = 0;
    }

    pub fn next_page(&mut self) {
        self.goto_page(self.page.saturating_add(1));
    }

    pub fn prev_page(&mut self) {
        self.goto_page(self.page.saturating_sub(1));
    }

    pub fn first_page(&mut self) {
        self.goto_page(1);
    }

    pub fn last_page(&mut self) {
        self.goto_page(usize::MAX);
    }

    fn page_len(&self) -> usize {
        self.current_page().rows.len()
    }

    pub fn select_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_down(&mut self) {
        let max = self.page_len().saturating_sub(1);
        if self.selected < max {
            self.selected += 1;
        }
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.page_len().saturating_sub(1);
    }

    /// Selected row of the current page, if any.
    pub fn selected_row(&self) -> Option<&Row> {
        self.current_page().rows.get(self.selected).copied()
    }
}
