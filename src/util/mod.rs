//! Utility modules for tsboard.

mod open;

pub use open::open_url;
