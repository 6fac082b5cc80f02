//! Board palette and ratatui styles.
//!
//! Taiwan market convention: rising values are red, falling values green.

use ratatui::style::{Color, Modifier, Style};

use crate::view::common::StyleClass;

pub struct Theme;

impl Theme {
    // Header bar and table header
    pub const BAR_BG: Color = Color::Blue;
    pub const BAR_FG: Color = Color::White;

    pub const TEXT: Color = Color::White;
    pub const MUTED: Color = Color::DarkGray;
    pub const CURSOR_BG: Color = Color::DarkGray;

    // Market direction
    pub const RISING: Color = Color::Red;
    pub const FALLING: Color = Color::Green;
    pub const UNCHANGED: Color = Color::Gray;

    pub const LINK: Color = Color::Cyan;
    pub const ATTENTION: Color = Color::Yellow;

    // Rank badges, highest level first
    pub const LEVELS: [Color; 4] = [Color::Red, Color::LightRed, Color::Yellow, Color::Green];
}

pub struct Styles;

impl Styles {
    pub fn default() -> Style {
        Style::default().fg(Theme::TEXT)
    }

    /// Header bar and table header.
    pub fn bar() -> Style {
        Style::default()
            .fg(Theme::BAR_FG)
            .bg(Theme::BAR_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Highlighted row in tables and lists.
    pub fn selected() -> Style {
        Style::default()
            .bg(Theme::CURSOR_BG)
            .add_modifier(Modifier::BOLD)
    }

    pub fn tab(active: bool) -> Style {
        if active {
            Style::default()
                .fg(Theme::LINK)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Theme::MUTED)
        }
    }

    pub fn dim() -> Style {
        Style::default().fg(Theme::MUTED)
    }

    /// Warnings, transient messages and key names in hints.
    pub fn warning() -> Style {
        Style::default().fg(Theme::ATTENTION)
    }

    pub fn section_header() -> Style {
        Style::default()
            .fg(Theme::ATTENTION)
            .add_modifier(Modifier::BOLD)
    }

    /// Emphasized labels (strategy titles, page position).
    pub fn key() -> Style {
        Style::default().fg(Theme::TEXT).add_modifier(Modifier::BOLD)
    }

    /// Maps a UI-agnostic [`StyleClass`] to a ratatui [`Style`].
    pub fn from_class(class: StyleClass) -> Style {
        match class {
            StyleClass::Normal => Self::default(),
            StyleClass::Up => Style::default().fg(Theme::RISING),
            StyleClass::Down => Style::default().fg(Theme::FALLING),
            StyleClass::Neutral => Style::default().fg(Theme::UNCHANGED),
            StyleClass::Link => Style::default()
                .fg(Theme::LINK)
                .add_modifier(Modifier::UNDERLINED),
            StyleClass::Dimmed => Self::dim(),
            StyleClass::Accent => Self::warning(),
            StyleClass::Level(n) => Self::level(n),
        }
    }

    /// Badge for rank level `n` (0 is the highest).
    pub fn level(n: u8) -> Style {
        let color = Theme::LEVELS
            .get(n as usize)
            .copied()
            .unwrap_or(Theme::UNCHANGED);
        let style = Style::default().fg(color);
        if n == 0 {
            style.add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            style.add_modifier(Modifier::REVERSED)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rising_is_red_falling_is_green() {
        assert_eq!(Styles::from_class(StyleClass::Up).fg, Some(Color::Red));
        assert_eq!(Styles::from_class(StyleClass::Down).fg, Some(Color::Green));
    }

    #[test]
    fn levels_have_distinct_badges() {
        assert_eq!(Styles::from_class(StyleClass::Level(0)).fg, Some(Color::Red));
        assert_eq!(Styles::from_class(StyleClass::Level(3)).fg, Some(Color::Green));
        assert_eq!(Styles::level(9).fg, Some(Theme::UNCHANGED));
        assert_ne!(Styles::level(1), Styles::level(2));
    }

    #[test]
    fn active_tab_stands_out() {
        assert_ne!(Styles::tab(true), Styles::tab(false));
    }
}
