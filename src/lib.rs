//! NZXT Kraken X Library
//!
//! A Rust driver for NZXT Kraken X-series (X42, X52, X62, X72) liquid coolers.
//!
//! # Features
//!
//! - Read device status (temperature, fan/pump RPM, firmware version)
//! - Control logo/ring lighting with the full mode catalog
//! - Apply temperature/duty speed curves or instantaneous speeds
//!
//! # Example
//!
//! ```no_run
//! use nzxt_krakenx::device::KrakenX;
//! use nzxt_krakenx::protocol::{AnimationSpeed, ColorChannel, ColorMode, SpeedChannel};
//! use nzxt_krakenx::protocol::lighting::palette_from_hex;
//! use nzxt_krakenx::cooling::curve_from_text;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let kraken = KrakenX::open()?;
//!
//!     // Read current status
//!     let status = kraken.get_status()?;
//!     println!("{}", status);
//!
//!     // Fade the ring between two colors
//!     let mode = ColorMode::lookup("fading")?;
//!     let palette = palette_from_hex(&["FF0000".into(), "0000FF".into()])?;
//!     kraken.set_color(ColorChannel::Ring, mode, palette, AnimationSpeed::Normal)?;
//!
//!     // Apply a fan curve
//!     let curve = curve_from_text("20 25  35 25  50 55  60 100")?;
//!     kraken.set_speed_profile(SpeedChannel::Fan, &curve)?;
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod cooling;
pub mod device;
pub mod error;
pub mod protocol;
pub mod storage;
pub mod utils;

// Re-exports for convenience
pub use device::KrakenX;
pub use error::{KrakenError, Result};
pub use protocol::{AnimationSpeed, ColorChannel, ColorMode, DeviceStatus, SpeedChannel};
