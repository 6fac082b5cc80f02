//! tsboard - terminal dashboard for Taiwan stock screening results.
//!
//! The library holds everything shared by the interactive TUI and the
//! one-shot print mode of the `tsboard` binary:
//! - `dataset`, `table`, `fmt` - parsed CSV results and the sort/filter/page engine
//! - `strategy`, `schema` - the registry of screening strategies and their columns
//! - `source`, `page` - fetching result files and per-view load state
//! - `view`, `tui` - UI-agnostic view models and their terminal rendering

pub mod dataset;
pub mod fmt;
pub mod page;
pub mod schema;
pub mod source;
pub mod strategy;
pub mod table;
pub mod tui;
pub mod util;
pub mod view;
