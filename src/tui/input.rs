//! Input handling and keybindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::{AppState, PopupState, View};
use crate::strategy::STRATEGIES;

/// Result of handling a key event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// No action, continue.
    None,
    /// Quit the application.
    Quit,
    /// Switch to another view (remounts strategy pages).
    Navigate(View),
    /// Reload the current page.
    Reload,
    /// Open an external link in the browser.
    OpenLink(String),
}

/// Handles key input and updates state.
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> KeyAction {
    state.status_message = None;
    match state.popup {
        PopupState::QuitConfirm => handle_quit_confirm(state, key),
        PopupState::Help { .. } => handle_help(state, key),
        PopupState::Category { .. } => handle_category_picker(state, key),
        PopupState::None => handle_normal_mode(state, key),
    }
}

fn handle_quit_confirm(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('Q') => {
            state.popup = PopupState::None;
            KeyAction::Quit
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.popup = PopupState::None;
            KeyAction::Quit
        }
        KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
            state.popup = PopupState::None;
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

fn handle_help(state: &mut AppState, key: KeyEvent) -> KeyAction {
    if let PopupState::Help { scroll } = &mut state.popup {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => *scroll = scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => *scroll = scroll.saturating_add(1),
            KeyCode::PageUp => *scroll = scroll.saturating_sub(10),
            KeyCode::PageDown => *scroll = scroll.saturating_add(10),
            KeyCode::Home => *scroll = 0,
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::F(1) => {
                state.popup = PopupState::None
            }
            _ => {}
        }
    }
    KeyAction::None
}

fn handle_category_picker(state: &mut AppState, key: KeyEvent) -> KeyAction {
    let categories = state.categories();
    let PopupState::Category { selected } = &mut state.popup else {
        return KeyAction::None;
    };
    let last = categories.len().saturating_sub(1);
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => *selected = selected.saturating_sub(1),
        KeyCode::Down | KeyCode::Char('j') => *selected = (*selected + 1).min(last),
        KeyCode::Home => *selected = 0,
        KeyCode::End => *selected = last,
        KeyCode::Enter => {
            let choice = categories.get(*selected).cloned();
            state.popup = PopupState::None;
            if let (Some(choice), Some(table)) =
                (choice, state.page.as_mut().and_then(|p| p.table_mut()))
            {
                table.select_category(choice);
                state.ratatui_state.select(Some(0));
            }
        }
        KeyCode::Esc | KeyCode::Char('f') | KeyCode::Char('q') => state.popup = PopupState::None,
        _ => {}
    }
    KeyAction::None
}

/// Handles keys in normal mode.
fn handle_normal_mode(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            state.popup = PopupState::QuitConfirm;
            KeyAction::None
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,

        // View navigation
        KeyCode::Tab => KeyAction::Navigate(state.current_view.next()),
        KeyCode::BackTab => KeyAction::Navigate(state.current_view.prev()),
        KeyCode::Char('h') => KeyAction::Navigate(View::Home),
        KeyCode::Char(c @ ('0'..='9' | '-' | '=')) => {
            View::from_shortcut(c).map_or(KeyAction::None, KeyAction::Navigate)
        }

        KeyCode::Char('?') | KeyCode::F(1) => {
            state.popup = PopupState::Help { scroll: 0 };
            KeyAction::None
        }

        _ => match state.current_view {
            View::Home => handle_home(state, key),
            View::Strategy(_) => handle_table(state, key),
        },
    }
}

fn handle_home(state: &mut AppState, key: KeyEvent) -> KeyAction {
    let last = STRATEGIES.len().saturating_sub(1);
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            state.home_selected = state.home_selected.saturating_sub(1);
            KeyAction::None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.home_selected = (state.home_selected + 1).min(last);
            KeyAction::None
        }
        KeyCode::Enter => KeyAction::Navigate(View::Strategy(state.home_selected.min(last))),
        KeyCode::Char('r') => KeyAction::Reload,
        _ => KeyAction::None,
    }
}

fn handle_table(state: &mut AppState, key: KeyEvent) -> KeyAction {
    if key.code == KeyCode::Char('r') {
        return KeyAction::Reload;
    }
    let has_categories = !state.categories().is_empty();
    let Some(table) = state.page.as_mut().and_then(|p| p.table_mut()) else {
        return KeyAction::None;
    };

    match key.code {
        // Row selection
        KeyCode::Up | KeyCode::Char('k') => table.select_up(),
        KeyCode::Down | KeyCode::Char('j') => table.select_down(),
        KeyCode::Char('g') => table.select_first(),
        KeyCode::Char('G') => table.select_last(),

        // Pages
        KeyCode::Right | KeyCode::PageDown | KeyCode::Char('n') => table.next_page(),
        KeyCode::Left | KeyCode::PageUp | KeyCode::Char('p') => table.prev_page(),
        KeyCode::Home => table.first_page(),
        KeyCode::End => table.last_page(),

        // Sorting: </> move the sort column, s flips direction
        KeyCode::Char('>') | KeyCode::Char('.') => {
            let cols = table.dataset().columns().len();
            if cols > 0 {
                let next = table.sort_column_index().map(|i| (i + 1) % cols).unwrap_or(0);
                table.sort_by_index(next);
            }
        }
        KeyCode::Char('<') | KeyCode::Char(',') => {
            let cols = table.dataset().columns().len();
            if cols > 0 {
                let prev = table
                    .sort_column_index()
                    .map(|i| (i + cols - 1) % cols)
                    .unwrap_or(cols - 1);
                table.sort_by_index(prev);
            }
        }
        KeyCode::Char('s') => {
            let current = table.sort_column_index().unwrap_or(0);
            table.sort_by_index(current);
        }

        // Category filter
        KeyCode::Char('f') if has_categories => {
            let categories = table.categories();
            let selected = categories
                .iter()
                .position(|c| *c == table.filter)
                .unwrap_or(0);
            state.popup = PopupState::Category { selected };
        }
        KeyCode::Char('c') if has_categories => table.cycle_category(),

        KeyCode::Enter | KeyCode::Char('o') => {
            return match state.selected_link() {
                Some(url) => KeyAction::OpenLink(url),
                None => {
                    state.status_message = Some("No link on this row".to_string());
                    KeyAction::None
                }
            };
        }

        _ => return KeyAction::None,
    }

    if let Some(table) = state.page.as_ref().and_then(|p| p.ready()) {
        state.ratatui_state.select(Some(table.table.selected));
    }
    KeyAction::None
}
