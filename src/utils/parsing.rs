//! Parsing utilities for CLI arguments.
//!
//! This module provides reusable parsing functions for common input formats
//! used throughout the application.

use crate::config::SpeedProfile;
use crate::error::{KrakenError, Result};

// =============================================================================
// Speed Profile Parsing
// =============================================================================

/// Parse a built-in speed profile name into a SpeedProfile enum.
///
/// # Arguments
/// * `name` - Profile name: "silent", "performance", or "fixed:XX"
///
/// # Example
/// ```
/// use nzxt_krakenx::utils::parsing::parse_speed_profile;
/// use nzxt_krakenx::config::SpeedProfile;
///
/// let profile = parse_speed_profile("silent").unwrap();
/// assert!(matches!(profile, SpeedProfile::Silent));
///
/// let fixed = parse_speed_profile("fixed:75").unwrap();
/// assert!(matches!(fixed, SpeedProfile::Fixed(75)));
/// ```
pub fn parse_speed_profile(name: &str) -> Result<SpeedProfile> {
    let lower = name.to_lowercase();

    if lower == "silent" {
        return Ok(SpeedProfile::Silent);
    }

    if lower == "performance" {
        return Ok(SpeedProfile::Performance);
    }

    if let Some(rest) = lower.strip_prefix("fixed:") {
        let duty: u8 = rest.parse().map_err(|_| {
            KrakenError::InvalidInput("Invalid duty value. Use 'fixed:XX' where XX is 0-100".into())
        })?;
        return Ok(SpeedProfile::Fixed(duty));
    }

    Err(KrakenError::InvalidInput(format!(
        "Unknown profile '{}'. Use: silent, performance, or fixed:XX",
        name
    )))
}

// =============================================================================
// Profile Text Assembly
// =============================================================================

/// Join raw CLI tokens into canonical profile text.
///
/// The shell splits `speed fan 20 25 35 25` into single tokens; the profile
/// parser wants pairs separated by a double space: `"20 25  35 25"`.
pub fn profile_text_from_args(args: &[String]) -> String {
    args.chunks(2)
        .map(|pair| pair.join(" "))
        .collect::<Vec<_>>()
        .join("  ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_speed_profile() {
        assert!(matches!(
            parse_speed_profile("silent").unwrap(),
            SpeedProfile::Silent
        ));
        assert!(matches!(
            parse_speed_profile("PERFORMANCE").unwrap(),
            SpeedProfile::Performance
        ));
        assert!(matches!(
            parse_speed_profile("fixed:50").unwrap(),
            SpeedProfile::Fixed(50)
        ));
        assert!(parse_speed_profile("fixed:no").is_err());
        assert!(parse_speed_profile("turbo").is_err());
    }

    #[test]
    fn test_profile_text_from_args() {
        let args: Vec<String> = ["20", "25", "35", "25", "60", "100"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(profile_text_from_args(&args), "20 25  35 25  60 100");

        // A dangling token is passed through; the parser rejects it.
        let args: Vec<String> = ["20", "25", "35"].iter().map(|s| s.to_string()).collect();
        assert_eq!(profile_text_from_args(&args), "20 25  35");
    }
}
