//! Card colors

use ratatui::style::Color;

/// Receipt pink, headings and accents (#ff6b81)
pub const PINK: Color = Color::Rgb(255, 107, 129);
/// Dashed rules and soft borders (#ffb7c5)
pub const PINK_SOFT: Color = Color::Rgb(255, 183, 197);
/// Page backdrop (#ffe6eb)
pub const PINK_WASH: Color = Color::Rgb(255, 230, 235);
/// Card and receipt paper
pub const PAPER: Color = Color::Rgb(255, 250, 251);
/// Customer box on the receipt (#fff0f3)
pub const PINK_TINT: Color = Color::Rgb(255, 240, 243);
pub const TEXT: Color = Color::Rgb(85, 85, 85);
pub const TEXT_MUTED: Color = Color::Rgb(170, 170, 170);

pub const VALORANT_RED: Color = Color::Rgb(229, 62, 62);
pub const GENSHIN_PURPLE: Color = Color::Rgb(128, 90, 213);
pub const SERIES_TEAL: Color = Color::Rgb(49, 151, 149);
pub const MOVIES_ORANGE: Color = Color::Rgb(221, 107, 32);

pub const SUCCESS: Color = Color::Rgb(56, 161, 105);
pub const WARNING: Color = Color::Rgb(214, 158, 46);
pub const ERROR: Color = Color::Rgb(229, 62, 62);
