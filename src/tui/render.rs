//! Main rendering logic for TUI.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use super::state::{AppState, PopupState, View};
use super::widgets::{
    render_category_picker, render_header, render_help, render_home, render_quit_confirm,
    render_strategy, render_tabs,
};

/// Main render function.
pub fn render(frame: &mut Frame, state: &mut AppState) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Length(1), // View tabs
        Constraint::Min(5),    // Content
    ])
    .split(area);

    render_header(frame, chunks[0], state);
    render_tabs(frame, chunks[1], state);

    match state.current_view {
        View::Home => render_home(frame, chunks[2], state),
        View::Strategy(_) => render_strategy(frame, chunks[2], state),
    }

    // Popups are rendered last to overlay everything.
    match state.popup.clone() {
        PopupState::None => {}
        PopupState::Help { mut scroll } => {
            render_help(frame, area, state.current_view, &mut scroll);
            state.popup = PopupState::Help { scroll };
        }
        PopupState::Category { selected } => {
            let categories = state.categories();
            let active = state
                .page
                .as_ref()
                .and_then(|p| p.ready())
                .map(|r| r.table.filter.clone());
            render_category_picker(frame, area, &categories, selected, active.as_ref());
        }
        PopupState::QuitConfirm => render_quit_confirm(frame, area),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::source::{LoadError, Loaded};
    use crate::strategy::index_of;
    use chrono::Local;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(state: &mut AppState) -> String {
        let backend = TestBackend::new(120, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn mounted(key: &str, result: Result<Loaded, LoadError>) -> AppState {
        let mut state = AppState::new("memory".into());
        let req = state
            .navigate(View::Strategy(index_of(key).unwrap()))
            .unwrap();
        state.on_loaded(req.request_id, result);
        state
    }

    fn loaded(csv: &str) -> Result<Loaded, LoadError> {
        Ok(Loaded {
            dataset: Dataset::from_csv(csv).unwrap(),
            modified: None,
            loaded_at: Local::now(),
        })
    }

    #[test]
    fn home_renders_status() {
        let mut state = AppState::new("memory".into());
        let screen = draw(&mut state);
        assert!(screen.contains("Strategies"));
        assert!(screen.contains("Loading update status"));
    }

    #[test]
    fn ready_table_renders_rows_and_pages() {
        let mut state = mounted("strong-stocks", loaded("code,price\n2330,1234567\n2317,89\n"));
        let screen = draw(&mut state);
        assert!(screen.contains("1,234,567"));
        assert!(screen.contains("Page 1/1"));
    }

    #[test]
    fn numbered_table_renders_positions() {
        let mut state = mounted(
            "disposal-alert",
            loaded("股票代碼,風險等級\n2330,高\n1101,極高\n"),
        );
        let screen = draw(&mut state);
        assert!(screen.contains("#1"));
        assert!(screen.contains("#2"));
        assert!(screen.contains("Page 1/1"));
    }

    #[test]
    fn empty_dataset_renders_placeholder_panel() {
        let mut state = mounted("strong-stocks", loaded("code,price\n"));
        let screen = draw(&mut state);
        assert!(screen.contains("Results appear after the next screening run."));
        assert!(!screen.contains("code"));
    }

    #[test]
    fn not_ready_renders_warning() {
        let mut state = mounted(
            "strong-stocks",
            Err(LoadError::NotReady {
                file: "x.csv".into(),
                status: Some(404),
            }),
        );
        let screen = draw(&mut state);
        assert!(screen.contains("Data not available"));
        assert!(screen.contains("(HTTP 404)"));
    }

    #[test]
    fn parse_failure_renders_distinct_warning() {
        let mut state = mounted("strong-stocks", Err(LoadError::Parse("bad quote".into())));
        let screen = draw(&mut state);
        assert!(screen.contains("Data could not be parsed"));
    }

    #[test]
    fn popups_render_over_content() {
        let mut state = AppState::new("memory".into());
        state.popup = PopupState::QuitConfirm;
        assert!(draw(&mut state).contains("Exit tsboard"));
        state.popup = PopupState::Help { scroll: 0 };
        assert!(draw(&mut state).contains("Home Help"));
    }
}
