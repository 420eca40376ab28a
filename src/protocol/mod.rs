//! Wire protocol implementation for NZXT Kraken X devices.
//!
//! This module contains the mode/channel catalogs, frame builders, step
//! generation and response parsing logic, based on the reverse-engineered
//! protocol from liquidctl.

pub mod commands;
pub mod lighting;
pub mod status;

pub use commands::*;
pub use lighting::*;
pub use status::*;
