//! Declarative per-table column configuration.
//!
//! Each table declares the display kind of its columns explicitly; columns
//! that are not declared render as plain text.

use std::collections::HashMap;

use crate::table::SortDirection;

/// Display treatment assigned to a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SemanticKind {
    /// Text passed through unchanged.
    #[default]
    Plain,
    /// Number with thousands separators.
    Numeric,
    /// Signed percentage colored by market trend.
    Percent,
    /// Stock identifier linking to the external chart page.
    Link,
}

impl SemanticKind {
    /// Numeric-looking kinds are right-aligned in tables.
    pub fn is_right_aligned(self) -> bool {
        matches!(self, SemanticKind::Numeric | SemanticKind::Percent)
    }
}

/// Ordinal weights for a categorical column (e.g. risk levels).
/// Values without a weight sort as zero.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RankWeights {
    weights: Vec<(String, f64)>,
}

impl RankWeights {
    pub fn new(weights: &[(&str, f64)]) -> Self {
        Self {
            weights: weights
                .iter()
                .map(|(k, w)| (k.to_string(), *w))
                .collect(),
        }
    }

    /// Levels in declaration order, highest first.
    pub fn levels(&self) -> impl Iterator<Item = &str> {
        self.weights.iter().map(|(k, _)| k.as_str())
    }

    /// Position of `value` in [`RankWeights::levels`].
    pub fn position(&self, value: &str) -> Option<usize> {
        self.weights.iter().position(|(k, _)| k == value)
    }

    pub fn weight(&self, value: &str) -> f64 {
        self.weights
            .iter()
            .find(|(k, _)| k == value)
            .map(|(_, w)| *w)
            .unwrap_or(0.0)
    }
}

/// Column kinds, filter column and sort defaults for one table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableConfig {
    kinds: HashMap<String, SemanticKind>,
    ranks: HashMap<String, RankWeights>,
    filter_column: Option<String>,
    default_direction: SortDirection,
    initial_sort: Option<(String, SortDirection)>,
    numbered: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TableConfig {
    /// Plain columns, no filter, descending default direction, unsorted.
    pub fn new() -> Self {
        Self {
            kinds: HashMap::new(),
            ranks: HashMap::new(),
            filter_column: None,
            default_direction: SortDirection::Descending,
            initial_sort: None,
            numbered: false,
        }
    }

    pub fn column(mut self, name: &str, kind: SemanticKind) -> Self {
        self.kinds.insert(name.to_string(), kind);
        self
    }

    pub fn columns(mut self, names: &[&str], kind: SemanticKind) -> Self {
        for name in names {
            self.kinds.insert(name.to_string(), kind);
        }
        self
    }

    /// Sorts `name` by the given weights instead of its text.
    pub fn ranked(mut self, name: &str, weights: &[(&str, f64)]) -> Self {
        self.ranks.insert(name.to_string(), RankWeights::new(weights));
        self
    }

    pub fn filter_on(mut self, name: &str) -> Self {
        self.filter_column = Some(name.to_string());
        self
    }

    /// Direction used when a new column becomes the sort column.
    pub fn default_direction(mut self, direction: SortDirection) -> Self {
        self.default_direction = direction;
        self
    }

    pub fn initial_sort(mut self, name: &str, direction: SortDirection) -> Self {
        self.initial_sort = Some((name.to_string(), direction));
        self
    }

    /// Prefixes every row with its 1-based position in the sorted set.
    pub fn numbered(mut self) -> Self {
        self.numbered = true;
        self
    }

    pub fn kind_of(&self, column: &str) -> SemanticKind {
        self.kinds.get(column).copied().unwrap_or_default()
    }

    pub fn ranks_for(&self, column: &str) -> Option<&RankWeights> {
        self.ranks.get(column)
    }

    pub fn filter_column(&self) -> Option<&str> {
        self.filter_column.as_deref()
    }

    /// Weights of the filter column when it is ranked.
    pub fn filter_ranks(&self) -> Option<&RankWeights> {
        self.filter_column().and_then(|c| self.ranks_for(c))
    }

    pub fn is_numbered(&self) -> bool {
        self.numbered
    }

    pub fn direction_for_new_column(&self) -> SortDirection {
        self.default_direction
    }

    pub fn initial(&self) -> Option<(&str, SortDirection)> {
        self.initial_sort.as_ref().map(|(c, d)| (c.as_str(), *d))
    }
}
