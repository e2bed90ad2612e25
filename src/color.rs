//! # Colors and Palettes
//!
//! Hex color helpers and the three-slot theming palette used by the
//! SVG compiler and the preview channel.
//!
//! The arithmetic here is pinned: `adjust_brightness` and `contrast_color`
//! feed rendered output, so their rounding and thresholds must stay
//! bit-exact across releases.

use serde::{Deserialize, Serialize};

use crate::error::SchabloneError;

/// Default primary theme color (warm bronze).
pub const DEFAULT_PRIMARY: &str = "#b76e22";
/// Default accent theme color (muted steel blue).
pub const DEFAULT_ACCENT: &str = "#8fa3b4";
/// Default decorative circle color (soft rose).
pub const DEFAULT_CIRCLE: &str = "#f4b4b7";

/// Light text color returned by [`contrast_color`] for dark backgrounds.
pub const LIGHT_TEXT: &str = "#ffffff";
/// Dark text color returned by [`contrast_color`] for light backgrounds.
pub const DARK_TEXT: &str = "#000000";

/// The three-slot theming palette.
///
/// Process-wide defaults come from [`Palette::default`]; sessions override
/// slots through the compiler and the preview channel, and reset by
/// replacing the value with a fresh default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    /// Primary theme color (headings, name, job title).
    pub primary: String,
    /// Accent color (sidebars, rules).
    pub accent: String,
    /// Decorative circle color.
    pub circle: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: DEFAULT_PRIMARY.to_string(),
            accent: DEFAULT_ACCENT.to_string(),
            circle: DEFAULT_CIRCLE.to_string(),
        }
    }
}

impl Palette {
    /// Merge a partial update into this palette. `None` slots are kept.
    pub fn merge(&mut self, primary: Option<&str>, accent: Option<&str>, circle: Option<&str>) {
        if let Some(p) = primary {
            self.primary = p.to_string();
        }
        if let Some(a) = accent {
            self.accent = a.to_string();
        }
        if let Some(c) = circle {
            self.circle = c.to_string();
        }
    }
}

/// Parse a `#rrggbb` (or bare `rrggbb`) hex color into RGB channels.
pub fn parse_hex(hex: &str) -> Result<[u8; 3], SchabloneError> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(SchabloneError::Parse(format!("invalid hex color '{hex}'")));
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .map_err(|e| SchabloneError::Parse(format!("invalid hex color '{hex}': {e}")))
    };
    Ok([channel(0..2)?, channel(2..4)?, channel(4..6)?])
}

/// Format RGB channels as a lowercase `#rrggbb` string.
pub fn format_hex(rgb: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}

/// Normalize a hex color to canonical lowercase `#rrggbb` form.
pub fn normalize_hex(hex: &str) -> Result<String, SchabloneError> {
    Ok(format_hex(parse_hex(hex)?))
}

/// Lighten (positive percent) or darken (negative percent) a hex color.
///
/// Each RGB channel is shifted by `round(2.55 * percent)` — half-up
/// rounding — and clamped to `[0, 255]`. `percent = 0` is the identity;
/// the output is always a valid 6-digit hex color.
pub fn adjust_brightness(hex: &str, percent: i32) -> Result<String, SchabloneError> {
    let rgb = parse_hex(hex)?;
    let delta = (2.55 * percent as f64 + 0.5).floor() as i32;
    let shifted = rgb.map(|c| (c as i32 + delta).clamp(0, 255) as u8);
    Ok(format_hex(shifted))
}

/// Pick a readable text color for the given background.
///
/// Luminance is `0.299 R + 0.587 G + 0.114 B`; backgrounds at or below
/// 128 get [`LIGHT_TEXT`], brighter ones get [`DARK_TEXT`]. The weights
/// and the inclusive threshold are fixed for visual parity.
pub fn contrast_color(hex: &str) -> Result<&'static str, SchabloneError> {
    let [r, g, b] = parse_hex(hex)?;
    let luminance = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
    Ok(if luminance <= 128.0 { LIGHT_TEXT } else { DARK_TEXT })
}

/// Build a full palette from two seed colors.
///
/// The circle slot is derived by lightening the accent, which keeps
/// decorative shapes in the same hue family as the sidebar.
pub fn derive_palette(primary: &str, accent: &str) -> Result<Palette, SchabloneError> {
    let primary = normalize_hex(primary)?;
    let accent = normalize_hex(accent)?;
    let circle = adjust_brightness(&accent, 30)?;
    Ok(Palette {
        primary,
        accent,
        circle,
    })
}

// ============================================================================
// TESTS
// ============================================================================
