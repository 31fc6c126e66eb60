//! Color themes for the UI.

use crate::config::Theme;
use ratatui::style::Color;

/// Theme color palette.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    /// Main background.
    pub bg0: Color,
    /// Bar background.
    pub bg1: Color,
    /// Border color.
    pub bg2: Color,
    /// Primary text color.
    pub fg0: Color,
    /// Secondary text color.
    pub fg1: Color,
    /// Muted text.
    pub gray: Color,
    /// Errors.
    pub red: Color,
    /// Headers and labels.
    pub green: Color,
    /// Cursor and titles.
    pub yellow: Color,
    /// Integer datasets.
    pub blue: Color,
    /// Text datasets and references.
    pub purple: Color,
    /// Values.
    pub aqua: Color,
}

impl ThemeColors {
    /// Create color palette from theme.
    pub fn from_theme(theme: &Theme) -> Self {
        match theme {
            Theme::GruvboxDark => Self {
                bg0: Color::Rgb(40, 40, 40),
                bg1: Color::Rgb(60, 56, 54),
                bg2: Color::Rgb(102, 92, 84),
                fg0: Color::Rgb(235, 219, 178),
                fg1: Color::Rgb(189, 174, 147),
                gray: Color::Rgb(146, 131, 116),
                red: Color::Rgb(251, 73, 52),
                green: Color::Rgb(184, 187, 38),
                yellow: Color::Rgb(250, 189, 47),
                blue: Color::Rgb(131, 165, 152),
                purple: Color::Rgb(211, 134, 155),
                aqua: Color::Rgb(142, 192, 124),
            },
            Theme::GruvboxLight => Self {
                bg0: Color::Rgb(251, 241, 199),
                bg1: Color::Rgb(235, 219, 178),
                bg2: Color::Rgb(213, 196, 161),
                fg0: Color::Rgb(60, 56, 54),
                fg1: Color::Rgb(80, 73, 69),
                gray: Color::Rgb(124, 111, 100),
                red: Color::Rgb(157, 0, 6),
                green: Color::Rgb(121, 116, 14),
                yellow: Color::Rgb(181, 118, 20),
                blue: Color::Rgb(7, 102, 120),
                purple: Color::Rgb(143, 63, 113),
                aqua: Color::Rgb(66, 123, 88),
            },
        }
    }
}
