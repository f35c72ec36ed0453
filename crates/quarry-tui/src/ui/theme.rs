//! Dark color theme.

use ratatui::style::Color;

pub const BG_DARK: Color = Color::Rgb(18, 18, 24);
pub const BG_SURFACE: Color = Color::Rgb(24, 24, 32);
pub const BG_ELEVATED: Color = Color::Rgb(32, 32, 42);

/// Amber, used for focus and key hints.
pub const PRIMARY: Color = Color::Rgb(255, 179, 71);
/// Cyan, used for prompts and links.
pub const ACCENT: Color = Color::Rgb(103, 224, 227);

pub const TEXT_PRIMARY: Color = Color::Rgb(230, 230, 235);
pub const TEXT_SECONDARY: Color = Color::Rgb(160, 160, 170);
pub const TEXT_MUTED: Color = Color::Rgb(100, 100, 110);

pub const SUCCESS: Color = Color::Rgb(118, 218, 133);
pub const WARNING: Color = Color::Rgb(255, 193, 94);
pub const ERROR: Color = Color::Rgb(255, 108, 108);
pub const INFO: Color = Color::Rgb(130, 170, 255);

pub const BORDER_DIM: Color = Color::Rgb(48, 48, 58);
pub const BORDER_FOCUS: Color = PRIMARY;
