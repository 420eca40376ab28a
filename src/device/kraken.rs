//! NZXT Kraken X device implementation.
//!
//! High-level interface for communicating with Kraken X42/X52/X62/X72
//! coolers over their HID endpoint.

use hidapi::{HidApi, HidDevice};

use crate::cooling::CurvePoint;
use crate::error::{KrakenError, Result};
use crate::protocol::{
    AnimationSpeed, ColorChannel, ColorMode, DeviceStatus, KRAKEN_X2_PID, NZXT_VID, Palette,
    READ_LENGTH, SpeedChannel, WRITE_LENGTH, build_color_frame, build_instant_speed_frame,
    build_speed_point_frame, generate_steps,
};

// =============================================================================
// Constants
// =============================================================================

/// Default HID read timeout in milliseconds.
const READ_TIMEOUT_MS: i32 = 2000;

// =============================================================================
// KrakenX
// =============================================================================

/// NZXT Kraken X device handle.
///
/// Provides methods for reading status, controlling lighting and setting
/// fan/pump speeds. The device streams a status report periodically on its
/// own; commands are 65-byte outbound reports.
///
/// A handle owns exclusive access to one physical device; operations are
/// synchronous and never retried here. Aborting between the frames of a
/// multi-step sequence is safe for the device but leaves it partially
/// updated.
///
/// # Example
///
/// ```no_run
/// use nzxt_krakenx::device::KrakenX;
///
/// let kraken = KrakenX::open()?;
/// let status = kraken.get_status()?;
/// println!("{}", status);
///
/// kraken.set_instant_speed(nzxt_krakenx::protocol::SpeedChannel::Fan, 60)?;
/// # Ok::<(), nzxt_krakenx::error::KrakenError>(())
/// ```
pub struct KrakenX {
    device: HidDevice,
    read_timeout_ms: i32,
}

impl KrakenX {
    /// Open the first available Kraken X device.
    ///
    /// # Errors
    /// Returns `DeviceNotFound` if no Kraken X is connected.
    pub fn open() -> Result<Self> {
        let api = HidApi::new().map_err(KrakenError::HidError)?;

        for info in api.device_list() {
            if info.vendor_id() == NZXT_VID && info.product_id() == KRAKEN_X2_PID {
                let device = info.open_device(&api).map_err(KrakenError::HidError)?;
                return Ok(Self {
                    device,
                    read_timeout_ms: READ_TIMEOUT_MS,
                });
            }
        }

        Err(KrakenError::DeviceNotFound)
    }

    /// Open a Kraken X by path.
    ///
    /// Useful when multiple devices are connected.
    pub fn open_path(path: &std::ffi::CStr) -> Result<Self> {
        let api = HidApi::new().map_err(KrakenError::HidError)?;
        let device = api.open_path(path).map_err(KrakenError::HidError)?;

        Ok(Self {
            device,
            read_timeout_ms: READ_TIMEOUT_MS,
        })
    }

    /// List all connected Kraken X devices.
    ///
    /// Returns a vector of (path, serial_number) tuples.
    pub fn list_devices() -> Result<Vec<(String, Option<String>)>> {
        let api = HidApi::new().map_err(KrakenError::HidError)?;

        let devices: Vec<_> = api
            .device_list()
            .filter(|info| info.vendor_id() == NZXT_VID && info.product_id() == KRAKEN_X2_PID)
            .map(|info| {
                (
                    info.path().to_string_lossy().into_owned(),
                    info.serial_number().map(String::from),
                )
            })
            .collect();

        Ok(devices)
    }

    /// Override the read timeout (milliseconds).
    pub fn set_read_timeout(&mut self, timeout_ms: i32) {
        self.read_timeout_ms = timeout_ms;
    }

    /// Get the current device status.
    ///
    /// The device pushes a status report on its own; this blocks until the
    /// next one arrives or the read timeout expires.
    pub fn get_status(&self) -> Result<DeviceStatus> {
        let buf = self.read()?;
        DeviceStatus::parse(&buf)
    }

    /// Set the color of a lighting channel.
    ///
    /// Expands the palette into animation steps for the mode and writes one
    /// frame per step.
    ///
    /// # Errors
    /// Returns `RingOnlyMode` when a ring-only mode is applied to another
    /// channel, and surfaces the step generator's palette validation errors.
    pub fn set_color(
        &self,
        channel: ColorChannel,
        mode: &ColorMode,
        palette: Palette,
        speed: AnimationSpeed,
    ) -> Result<()> {
        if mode.ring_only && channel != ColorChannel::Ring {
            return Err(KrakenError::RingOnlyMode {
                mode: mode.name.into(),
                channel: channel.to_string(),
            });
        }

        let steps = generate_steps(palette, mode)?;

        for (seq, step) in steps.iter().enumerate() {
            let frame = build_color_frame(channel, mode, speed, seq as u8, step);
            self.write(&frame)?;
        }

        Ok(())
    }

    /// Apply a temperature/duty curve to a speed channel.
    ///
    /// Writes one frame per curve point. Curves are only understood by
    /// firmware 3.0.0 and newer; the capability is checked against a fresh
    /// status read before anything is sent.
    ///
    /// # Arguments
    /// * `channel` - The channel to configure (Fan or Pump)
    /// * `curve` - Interpolated grid points from the cooling pipeline
    pub fn set_speed_profile(&self, channel: SpeedChannel, curve: &[CurvePoint]) -> Result<()> {
        let status = self.get_status()?;
        if !status.firmware.supports_cooling_profiles() {
            return Err(KrakenError::CoolingProfilesUnsupported {
                firmware: status.firmware.to_string(),
            });
        }

        for (index, &(temp, duty)) in curve.iter().enumerate() {
            let frame = build_speed_point_frame(channel, index as u8, temp, duty);
            self.write(&frame)?;
        }

        Ok(())
    }

    /// Set an instantaneous speed, bypassing the curve grid.
    ///
    /// Works on all firmware versions. The duty is clamped into the
    /// channel's accepted range.
    pub fn set_instant_speed(&self, channel: SpeedChannel, duty: u8) -> Result<()> {
        let frame = build_instant_speed_frame(channel, duty);
        self.write(&frame)
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn write(&self, frame: &[u8; WRITE_LENGTH]) -> Result<()> {
        self.device.write(frame).map_err(KrakenError::HidError)?;
        Ok(())
    }

    fn read(&self) -> Result<Vec<u8>> {
        let mut buf = [0u8; READ_LENGTH];
        let read = self
            .device
            .read_timeout(&mut buf, self.read_timeout_ms)
            .map_err(KrakenError::HidError)?;

        if read == 0 {
            return Err(KrakenError::Timeout);
        }

        // Only the bytes actually received; a truncated report must surface
        // as ShortPacket from the decoder, not be zero-extended.
        Ok(buf[..read].to_vec())
    }
}

impl std::fmt::Debug for KrakenX {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KrakenX")
            .field("read_timeout_ms", &self.read_timeout_ms)
            .finish_non_exhaustive()
    }
}
