//! TUI application state.

use ratatui::widgets::TableState as RatatuiTableState;

use crate::page::{Page, RequestId, RequestIds};
use crate::source::status::{LastUpdate, StatusError};
use crate::source::{LoadError, Loaded};
use crate::strategy::{STRATEGIES, Strategy};
use crate::table::CategoryFilter;

const VIEW_KEYS: [char; 12] = ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9', '-', '='];

/// Navigable views: Home plus one per strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Home,
    Strategy(usize),
}

impl View {
    pub fn all() -> Vec<View> {
        std::iter::once(View::Home)
            .chain((0..STRATEGIES.len()).map(View::Strategy))
            .collect()
    }

    /// Position in [`View::all`].
    pub fn position(self) -> usize {
        match self {
            View::Home => 0,
            View::Strategy(i) => i + 1,
        }
    }

    fn from_position(pos: usize) -> View {
        match pos {
            0 => View::Home,
            n => View::Strategy(n - 1),
        }
    }

    pub fn next(self) -> View {
        View::from_position((self.position() + 1) % (STRATEGIES.len() + 1))
    }

    pub fn prev(self) -> View {
        let count = STRATEGIES.len() + 1;
        View::from_position((self.position() + count - 1) % count)
    }

    /// Direct key: `0` for Home, `1`-`9` then `-` and `=` for strategies.
    pub fn shortcut(self) -> Option<char> {
        VIEW_KEYS.get(self.position()).copied()
    }

    pub fn from_shortcut(key: char) -> Option<View> {
        let pos = VIEW_KEYS.iter().position(|&k| k == key)?;
        (pos <= STRATEGIES.len()).then(|| View::from_position(pos))
    }

    pub fn strategy(self) -> Option<&'static Strategy> {
        match self {
            View::Home => None,
            View::Strategy(i) => STRATEGIES.get(i),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            View::Home => "首頁",
            View::Strategy(i) => STRATEGIES.get(i).map(|s| s.title).unwrap_or("?"),
        }
    }
}

/// Active popup. Only one popup can be open at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PopupState {
    #[default]
    None,
    Help {
        scroll: usize,
    },
    /// Category picker; `selected` indexes the category list.
    Category {
        selected: usize,
    },
    QuitConfirm,
}

/// Status file as last seen.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum StatusInfo {
    #[default]
    Loading,
    Loaded(LastUpdate),
    Unknown(String),
}

/// Load the App must start on a worker thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadRequest {
    pub file_name: &'static str,
    pub request_id: RequestId,
}

/// Main application state.
#[derive(Debug)]
pub struct AppState {
    pub current_view: View,
    /// Mounted strategy page; `None` on Home.
    pub page: Option<Page>,
    /// Selected strategy in the Home list.
    pub home_selected: usize,
    pub popup: PopupState,
    pub status: StatusInfo,
    /// Temporary message shown in the header (e.g. link opened).
    pub status_message: Option<String>,
    /// Data source description for the header.
    pub source_label: String,
    /// Ratatui table state for the strategy table (enables highlighting).
    pub ratatui_state: RatatuiTableState,
    ids: RequestIds,
}

impl AppState {
    pub fn new(source_label: String) -> Self {
        Self {
            current_view: View::Home,
            page: None,
            home_selected: 0,
            popup: PopupState::None,
            status: StatusInfo::Loading,
            status_message: None,
            source_label,
            ratatui_state: RatatuiTableState::default(),
            ids: RequestIds::default(),
        }
    }

    /// Switches views. Entering a strategy mounts a fresh page instance
    /// and returns the load to start.
    pub fn navigate(&mut self, view: View) -> Option<LoadRequest> {
        self.current_view = view;
        self.popup = PopupState::None;
        self.ratatui_state = RatatuiTableState::default();
        match view.strategy() {
            Some(strategy) => {
                let request_id = self.ids.next();
                self.page = Some(Page::mount(strategy, request_id));
                if let View::Strategy(i) = view {
                    self.home_selected = i;
                }
                Some(LoadRequest {
                    file_name: strategy.file_name,
                    request_id,
                })
            }
            None => {
                self.page = None;
                None
            }
        }
    }

    /// Returns the current page to `Loading` under a new request id.
    pub fn reload(&mut self) -> Option<LoadRequest> {
        let request_id = self.ids.next();
        let page = self.page.as_mut()?;
        page.reload(request_id);
        Some(LoadRequest {
            file_name: page.strategy.file_name,
            request_id,
        })
    }

    /// Delivers a load result to the mounted page.
    pub fn on_loaded(&mut self, request_id: RequestId, result: Result<Loaded, LoadError>) {
        match self.page.as_mut() {
            Some(page) => {
                if page.apply(request_id, result) {
                    self.ratatui_state = RatatuiTableState::default();
                }
            }
            None => tracing::debug!(request_id, "load result arrived after leaving the view"),
        }
    }

    pub fn on_status(&mut self, result: Result<LastUpdate, StatusError>) {
        self.status = match result {
            Ok(status) => StatusInfo::Loaded(status),
            Err(err) => {
                tracing::warn!(error = %err, "status file unavailable");
                StatusInfo::Unknown(err.to_string())
            }
        };
    }

    /// Categories of the mounted table, empty without a filter column.
    pub fn categories(&self) -> Vec<CategoryFilter> {
        self.page
            .as_ref()
            .and_then(|p| p.ready())
            .filter(|r| r.table.has_filter())
            .map(|r| r.table.categories())
            .unwrap_or_default()
    }

    /// Link of the selected row, if the row has one.
    pub fn selected_link(&self) -> Option<String> {
        let ready = self.page.as_ref()?.ready()?;
        let table = &ready.table;
        let row = table.selected_row()?;
        let config = table.config();
        table
            .dataset()
            .columns()
            .iter()
            .zip(row.cells())
            .map(|(name, cell)| crate::fmt::format_cell(cell, config.kind_of(name)))
            .find_map(|c| c.link)
    }
}
