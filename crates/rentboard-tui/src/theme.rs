//! Color system for the rentboard TUI
//!
//! - Red: failed request, invalid field
//! - Yellow: focus, attention
//! - Magenta: the prediction
//! - Label colors: `#RRGGBB` strings from the feature palette

use ratatui::style::Color;

/// Semantic palette shared by every tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColor {
    /// Red: request failed, invalid field
    Error,
    /// Yellow: focused field, attention
    Warning,
    /// Magenta: headline values (the prediction)
    Important,
}

impl StatusColor {
    pub fn to_color(self) -> Color {
        match self {
            StatusColor::Error => Color::Red,
            StatusColor::Warning => Color::Yellow,
            StatusColor::Important => Color::Magenta,
        }
    }
}

/// Parse a `#RRGGBB` string into a terminal color.
/// Anything else renders gray rather than failing the frame.
pub fn hex_color(hex: &str) -> Color {
    parse_hex(hex).unwrap_or(Color::Gray)
}

fn parse_hex(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}
