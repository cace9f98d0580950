//! Node color assignment.
//!
//! Each node id maps to a stable color from a fixed palette so a reader can
//! follow one device through interleaved output. The assignment is a pure
//! function of the node id; nothing is remembered between messages.

use serde::{Deserialize, Serialize};

/// ANSI reset sequence appended after every emitted line.
pub const STYLE_RESET: &str = "\x1b[0m";

/// Terminal foreground colors available for the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
}

impl Color {
    /// ANSI escape sequence for this color.
    pub fn ansi(self) -> &'static str {
        match self {
            Self::Red => "\x1b[31m",
            Self::Green => "\x1b[32m",
            Self::Yellow => "\x1b[33m",
            Self::Blue => "\x1b[34m",
            Self::Magenta => "\x1b[35m",
            Self::Cyan => "\x1b[36m",
        }
    }
}

/// The default node palette. Red is reserved for diagnostics.
pub fn default_palette() -> Vec<Color> {
    vec![
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Magenta,
        Color::Cyan,
    ]
}

/// Stable color for a node id.
///
/// Node ids are 1-based by convention; the palette cycles for ids beyond its
/// length. Ids of zero or below still index safely via euclidean modulo, and
/// the subtraction is widened to `i128` so the extremes of the id range
/// cannot overflow. The palette must be non-empty; configuration validation
/// guarantees that before any message is processed.
pub fn color_for(node_id: i64, palette: &[Color]) -> Color {
    assert!(!palette.is_empty(), "color palette must not be empty");
    let index = (node_id as i128 - 1).rem_euclid(palette.len() as i128) as usize;
    palette[index]
}
