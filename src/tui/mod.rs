//! Terminal User Interface for tsboard.
//!
//! Home screen with the update status and strategy list, plus one tab per
//! screening strategy showing its result table.

mod app;
mod event;
mod input;
mod render;
mod state;
mod style;
mod widgets;

pub use app::App;
pub use state::{AppState, View};
