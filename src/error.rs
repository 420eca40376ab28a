//! Custom error types for NZXT Kraken X devices.
//!
//! This module provides fine-grained error handling for device communication,
//! protocol parsing, and input validation.

use thiserror::Error;

/// Main error type for Kraken X operations.
#[derive(Error, Debug)]
pub enum KrakenError {
    /// Device not found during enumeration.
    #[error("Kraken X (X42, X52, X62 or X72) not found. Check USB connection and permissions.")]
    DeviceNotFound,

    /// HID communication error.
    #[error("HID communication error: {0}")]
    HidError(#[from] hidapi::HidError),

    /// Color string is not exactly 3 bytes of hexadecimal.
    #[error("Malformed color '{token}'. Expected 6 hex digits, e.g. FF0000")]
    MalformedColor { token: String },

    /// Color channel name not in the catalog.
    #[error("Unknown color channel '{0}'. Use: sync, logo or ring")]
    UnknownChannel(String),

    /// Color mode name not in the catalog.
    #[error("Unknown color mode '{0}'")]
    UnknownMode(String),

    /// Fewer colors supplied than the mode requires.
    #[error("Not enough colors for mode '{mode}': {required} required, got {given}")]
    InsufficientColors {
        mode: String,
        required: usize,
        given: usize,
    },

    /// Ring-only mode applied to a non-ring channel.
    #[error("Mode '{mode}' is only supported on the ring channel, not '{channel}'")]
    RingOnlyMode { mode: String, channel: String },

    /// Speed profile text could not be parsed.
    #[error("Invalid speed profile segment '{0}'. Expected pairs like '20 25  35 25  60 100'")]
    InvalidProfileSyntax(String),

    /// Status packet shorter than the protocol minimum.
    #[error("Status packet too short: {len} bytes, expected at least {expected}")]
    ShortPacket { len: usize, expected: usize },

    /// Firmware too old for temperature/duty curves.
    #[error("Firmware {firmware} does not support cooling profiles (3.0.0 or newer required)")]
    CoolingProfilesUnsupported { firmware: String },

    /// Stored profile missing or unreadable.
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    /// Timeout waiting for device response.
    #[error("Timeout waiting for device response")]
    Timeout,

    /// Generic invalid input error.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for Kraken operations.
pub type Result<T> = std::result::Result<T, KrakenError>;
