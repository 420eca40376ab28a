//! Palette building and animation step generation for Kraken X lighting.
//!
//! Colors come in as 6-hex-digit strings from the CLI, become an ordered
//! palette, and are expanded into per-step LED frames according to the
//! constraints of the selected mode.

use crate::error::{KrakenError, Result};
use crate::protocol::commands::{ColorMode, TOTAL_LEDS};

// =============================================================================
// Colors
// =============================================================================

/// An RGB triple. Constructed from a 6-hex-digit string, e.g. "FF0000".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Placeholder used for color-less modes and the logo slot of
    /// ring-only per-LED steps.
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Parse a color from exactly 6 hex digits (no leading `#`).
    pub fn from_hex(token: &str) -> Result<Self> {
        let malformed = || KrakenError::MalformedColor {
            token: token.into(),
        };

        // ASCII check up front: the fixed slice offsets below are byte
        // positions and must land on char boundaries.
        if token.len() != 6 || !token.is_ascii() {
            return Err(malformed());
        }

        let r = u8::from_str_radix(&token[0..2], 16).map_err(|_| malformed())?;
        let g = u8::from_str_radix(&token[2..4], 16).map_err(|_| malformed())?;
        let b = u8::from_str_radix(&token[4..6], 16).map_err(|_| malformed())?;

        Ok(Color { r, g, b })
    }
}

/// An ordered sequence of colors. Insertion order determines the step
/// sequence and, for per-LED modes, the per-LED assignment.
pub type Palette = Vec<Color>;

/// One LED-update frame: the colors the device shows at one point of an
/// animation sequence. The first entry addresses the logo slot.
pub type Step = Vec<Color>;

/// Build a palette from user-supplied hex strings.
///
/// The whole call fails on the first malformed token; no partial palette is
/// returned. An empty input yields an empty palette.
pub fn palette_from_hex(colors: &[String]) -> Result<Palette> {
    colors.iter().map(|c| Color::from_hex(c)).collect()
}

// =============================================================================
// Step Generation
// =============================================================================

/// Expand a palette into the ordered step sequence for a mode.
///
/// Too many colors are truncated and color-less modes discard their input;
/// both are warn-and-continue, not errors. Too few colors is an error, as is
/// an under-filled palette for a per-LED ("super") mode: those modes expect
/// one color per physical LED of their zone.
pub fn generate_steps(palette: Palette, mode: &ColorMode) -> Result<Vec<Step>> {
    let mut palette = palette;

    if palette.len() < mode.min_colors {
        return Err(KrakenError::InsufficientColors {
            mode: mode.name.into(),
            required: mode.min_colors,
            given: palette.len(),
        });
    } else if mode.max_colors == 0 {
        if !palette.is_empty() {
            eprintln!(
                "⚠️ Warning: too many colors for mode '{}', none needed",
                mode.name
            );
            // Discard the input but ensure at least one step
            palette = vec![Color::BLACK];
        }
    } else if palette.len() > mode.max_colors {
        eprintln!(
            "⚠️ Warning: too many colors for mode '{}', dropping to {}",
            mode.name, mode.max_colors
        );
        palette.truncate(mode.max_colors);
    }

    if palette.is_empty() {
        palette = vec![Color::BLACK];
    }

    if !mode.per_led {
        // One uniform step per palette entry.
        return Ok(palette.iter().map(|&c| vec![c; TOTAL_LEDS]).collect());
    }

    // Per-LED modes address every physical LED of their zone independently.
    if palette.len() < mode.max_colors {
        return Err(KrakenError::InsufficientColors {
            mode: mode.name.into(),
            required: mode.max_colors,
            given: palette.len(),
        });
    }

    if mode.ring_only {
        // The logo is controlled separately: black it out first.
        Ok(vec![vec![Color::BLACK; TOTAL_LEDS], palette])
    } else {
        Ok(vec![palette])
    }
}
