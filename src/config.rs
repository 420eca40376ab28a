//! Speed profile configurations for Kraken X coolers.
//!
//! Provides pre-defined profiles and custom profile building.

use crate::cooling::{CurvePoint, interpolate_profile, normalize_profile};
use crate::error::Result;
use crate::protocol::commands::CRITICAL_TEMPERATURE;

// =============================================================================
// Speed Profiles
// =============================================================================

/// Pre-defined speed profile.
#[derive(Debug, Clone, PartialEq)]
pub enum SpeedProfile {
    /// Silent mode - low speeds, ramps up only at high temps.
    Silent,
    /// Performance mode - aggressive cooling curve.
    Performance,
    /// Fixed speed for all temperatures.
    Fixed(u8),
    /// Custom temperature/duty curve.
    Custom(Vec<CurvePoint>),
}

impl SpeedProfile {
    /// Render this profile as a 21-point device curve (20°C to 60°C).
    pub fn to_curve(&self) -> Result<Vec<CurvePoint>> {
        let points = match self {
            SpeedProfile::Silent => PROFILE_SILENT.to_vec(),
            SpeedProfile::Performance => PROFILE_PERFORMANCE.to_vec(),
            SpeedProfile::Fixed(duty) => vec![(CRITICAL_TEMPERATURE - 1, *duty)],
            SpeedProfile::Custom(points) => points.clone(),
        };

        let normalized = normalize_profile(points, CRITICAL_TEMPERATURE);
        Ok(interpolate_profile(&normalized))
    }

    /// Get profile name for display.
    pub fn name(&self) -> &'static str {
        match self {
            SpeedProfile::Silent => "Silent",
            SpeedProfile::Performance => "Performance",
            SpeedProfile::Fixed(_) => "Fixed",
            SpeedProfile::Custom(_) => "Custom",
        }
    }
}

impl std::fmt::Display for SpeedProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpeedProfile::Fixed(duty) => write!(f, "Fixed ({}%)", duty),
            _ => write!(f, "{}", self.name()),
        }
    }
}

// =============================================================================
// Pre-defined Profile Curves
// =============================================================================

/// Silent fan profile - minimal noise, ramps at 50°C+.
pub const PROFILE_SILENT: [CurvePoint; 4] = [(20, 25), (35, 25), (50, 55), (60, 100)];

/// Performance fan profile - aggressive cooling.
pub const PROFILE_PERFORMANCE: [CurvePoint; 5] =
    [(20, 50), (30, 55), (40, 65), (50, 80), (60, 100)];

/// Pump Silent profile - maintains minimum flow.
pub const PROFILE_PUMP_SILENT: [CurvePoint; 4] = [(20, 60), (40, 70), (50, 85), (60, 100)];

/// Pump Performance profile - maximum cooling.
pub const PROFILE_PUMP_PERFORMANCE: [CurvePoint; 4] = [(20, 80), (40, 85), (50, 95), (60, 100)];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::commands::CURVE_POINTS;

    #[test]
    fn test_silent_profile() {
        let curve = SpeedProfile::Silent.to_curve().unwrap();
        assert_eq!(curve.len(), CURVE_POINTS);
        // At 20°C should be 25%
        assert_eq!(curve[0], (20, 25));
        // At 60°C should be 100%
        assert_eq!(curve[CURVE_POINTS - 1], (60, 100));
    }

    #[test]
    fn test_fixed_profile() {
        let curve = SpeedProfile::Fixed(60).to_curve().unwrap();
        // Fixed duty everywhere except the forced 100% terminator.
        assert!(curve[..CURVE_POINTS - 1].iter().all(|&(_, d)| d == 60));
        assert_eq!(curve[CURVE_POINTS - 1], (60, 100));
    }

    #[test]
    fn test_custom_profile() {
        let custom = SpeedProfile::Custom(vec![(20, 30), (40, 50), (60, 100)]);
        let curve = custom.to_curve().unwrap();
        assert_eq!(curve[0], (20, 30));
        assert_eq!(curve[10], (40, 50));
        assert_eq!(curve[CURVE_POINTS - 1], (60, 100));
    }
}
