//! Cooling control module.
//!
//! Provides the temperature/duty curve pipeline used for fan and pump
//! speed profiles.

mod curve;

pub use curve::{
    CurvePoint, curve_from_text, interpolate_profile, normalize_profile, parse_profile,
};
