//! TUI widgets.

mod category;
mod header;
mod help;
mod home;
mod panels;
mod popup;
mod table;

pub use category::render_category_picker;
pub use header::{render_header, render_tabs};
pub use help::render_help;
pub use home::render_home;
pub use popup::render_quit_confirm;
pub use table::render_strategy;
