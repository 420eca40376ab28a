//! Profile storage and persistence module.
//!
//! Handles saving and loading named cooling profiles and lighting presets
//! to/from disk.

pub mod profiles;

pub use profiles::*;
