//! Device abstraction layer for NZXT Kraken X coolers.
//!
//! Provides high-level device discovery and control interfaces.

pub mod kraken;

pub use kraken::KrakenX;
