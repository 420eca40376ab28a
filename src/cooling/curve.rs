//! Temperature/duty curve pipeline for Kraken X speed control.
//!
//! A user curve moves through three stages, each a pure transform:
//! parse (text to points), normalize (sorted, terminated at the critical
//! temperature) and interpolate (one duty per 2°C grid step). The
//! interpolated points map one-to-one onto device speed frames.

use crate::error::{KrakenError, Result};
use crate::protocol::commands::{
    CRITICAL_TEMPERATURE, CURVE_POINTS, CURVE_TEMP_STEP, MIN_CURVE_TEMP,
};

/// One (temperature, duty) point of a speed curve.
pub type CurvePoint = (u8, u8);

/// Parse a profile description into raw curve points.
///
/// Pairs are separated by a double space, the temperature and duty within a
/// pair by a single space: `"20 25  35 25  50 55  60 100"`.
///
/// # Errors
/// Returns `InvalidProfileSyntax` naming the offending segment when a pair
/// is incomplete or a token is not an integer. Tokens are parsed as `u8`,
/// so values beyond 255 (say `"60 300"`) are rejected here rather than
/// clamped later; no valid temperature or duty exceeds 100.
pub fn parse_profile(text: &str) -> Result<Vec<CurvePoint>> {
    text.split("  ")
        .map(|pair| {
            let mut tokens = pair.split(' ');
            let temp = tokens.next().unwrap_or("");
            let duty = tokens
                .next()
                .ok_or_else(|| KrakenError::InvalidProfileSyntax(pair.into()))?;

            let temp: u8 = temp
                .parse()
                .map_err(|_| KrakenError::InvalidProfileSyntax(pair.into()))?;
            let duty: u8 = duty
                .parse()
                .map_err(|_| KrakenError::InvalidProfileSyntax(pair.into()))?;

            Ok((temp, duty))
        })
        .collect()
}

/// Normalize a curve: sort by temperature and force it to terminate at the
/// critical temperature with 100% duty.
///
/// If the highest point already sits at the critical temperature or at 100%
/// duty without satisfying both, it is replaced; otherwise the terminator is
/// appended. The result never holds two points at the maximum temperature,
/// and normalizing twice yields the same curve.
pub fn normalize_profile(points: Vec<CurvePoint>, critical_temp: u8) -> Vec<CurvePoint> {
    let mut points = points;
    points.sort_by_key(|&(temp, _)| temp);

    if let Some(&(last_temp, last_duty)) = points.last() {
        if last_temp < critical_temp || last_duty != 100 {
            if last_temp == critical_temp || last_duty == 100 {
                points.pop();
            }
            points.push((critical_temp, 100));
        }
    }

    points
}

/// Interpolate a normalized curve onto the fixed 20..=60 step-2 grid.
///
/// For each grid temperature the bracketing points are the greatest point at
/// or below it and the least point above it (falling back to the first and
/// last points of the curve). Duty between brackets is linear, rounded half
/// away from zero.
///
/// # Panics
/// Panics on an empty curve; `parse_profile` guarantees at least one point.
pub fn interpolate_profile(points: &[CurvePoint]) -> Vec<CurvePoint> {
    let mut curve = Vec::with_capacity(CURVE_POINTS);
    let (mut lower, mut upper) = (points[0], points[points.len() - 1]);

    for step in 0..CURVE_POINTS {
        let grid_temp = MIN_CURVE_TEMP + step as u8 * CURVE_TEMP_STEP;

        for &point in points {
            if point.0 <= grid_temp {
                lower = point;
            } else {
                upper = point;
                break;
            }
        }

        let duty = if lower.0 == upper.0 {
            lower.1
        } else {
            // The brackets may sit in either order near the top of the grid,
            // so the arithmetic stays in f64 end to end.
            let ratio =
                (grid_temp as f64 - lower.0 as f64) / (upper.0 as f64 - lower.0 as f64);
            (lower.1 as f64 + ratio * (upper.1 as f64 - lower.1 as f64)).round() as u8
        };

        curve.push((grid_temp, duty));
    }

    curve
}

/// Run the full pipeline on a profile description.
pub fn curve_from_text(text: &str) -> Result<Vec<CurvePoint>> {
    let raw = parse_profile(text)?;
    let normalized = normalize_profile(raw, CRITICAL_TEMPERATURE);
    Ok(interpolate_profile(&normalized))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_profile() {
        let points = parse_profile("20 25  35 25  50 55  60 100").unwrap();
        assert_eq!(points, vec![(20, 25), (35, 25), (50, 55), (60, 100)]);
    }

    #[test]
    fn test_parse_profile_invalid() {
        assert!(matches!(
            parse_profile("20 25  35"),
            Err(KrakenError::InvalidProfileSyntax(seg)) if seg == "35"
        ));
        assert!(parse_profile("20 hot  35 25").is_err());
        assert!(parse_profile("").is_err());
    }

    #[test]
    fn test_parse_profile_rejects_out_of_range_values() {
        // Values that overflow u8 fail at parse time instead of being
        // clamped downstream.
        assert!(matches!(
            parse_profile("60 300"),
            Err(KrakenError::InvalidProfileSyntax(seg)) if seg == "60 300"
        ));
        assert!(parse_profile("300 100").is_err());
    }

    #[test]
    fn test_normalize_profile() {
        let cases = [
            // Highest point at the critical temp but below 100%: replaced.
            ("35 25  20 25  50 55  50 100", vec![(20, 25), (35, 25), (50, 55), (60, 100)]),
            ("35 25  20 25  50 55  60 90", vec![(20, 25), (35, 25), (50, 55), (60, 100)]),
            // Highest point below the critical temp and below 100%: appended.
            ("35 25  20 25  50 55  50 90", vec![(20, 25), (35, 25), (50, 55), (50, 90), (60, 100)]),
        ];

        for (text, expected) in cases {
            let points = parse_profile(text).unwrap();
            assert_eq!(
                normalize_profile(points, CRITICAL_TEMPERATURE),
                expected,
                "{}",
                text
            );
        }
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let points = parse_profile("35 25  20 25  50 55  50 90").unwrap();
        let once = normalize_profile(points, CRITICAL_TEMPERATURE);
        let twice = normalize_profile(once.clone(), CRITICAL_TEMPERATURE);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_interpolate_profile() {
        let points = parse_profile("20 25  35 25  50 55  60 100").unwrap();
        assert_eq!(
            interpolate_profile(&points),
            vec![
                (20, 25),
                (22, 25),
                (24, 25),
                (26, 25),
                (28, 25),
                (30, 25),
                (32, 25),
                (34, 25),
                (36, 27),
                (38, 31),
                (40, 35),
                (42, 39),
                (44, 43),
                (46, 47),
                (48, 51),
                (50, 55),
                (52, 64),
                (54, 73),
                (56, 82),
                (58, 91),
                (60, 100),
            ]
        );
    }

    #[test]
    fn test_interpolate_single_point() {
        // A flat curve: every grid point takes the only duty available.
        let curve = interpolate_profile(&[(60, 100)]);
        assert_eq!(curve.len(), CURVE_POINTS);
        assert!(curve.iter().all(|&(_, duty)| duty == 100));
    }

    #[test]
    fn test_curve_from_text() {
        let curve = curve_from_text("30 40  50 90").unwrap();
        assert_eq!(curve.len(), CURVE_POINTS);
        assert_eq!(curve.first(), Some(&(20, 40)));
        assert_eq!(curve.last(), Some(&(60, 100)));
    }
}
