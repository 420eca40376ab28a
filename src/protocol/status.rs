//! Device status parsing for Kraken X series.
//!
//! Parses the 64-byte inbound report into structured status data.
//! Offsets taken from the liquidctl kraken2 driver.

use byteorder::{BigEndian, ByteOrder};

use crate::error::{KrakenError, Result};

// =============================================================================
// Response Parsing Offsets
// =============================================================================

/// Offset for liquid temperature integer part.
const OFFSET_TEMP_INT: usize = 1;
/// Offset for liquid temperature decimal part.
const OFFSET_TEMP_DEC: usize = 2;
/// Offset for fan RPM (big-endian u16).
const OFFSET_FAN_RPM: usize = 3;
/// Offset for pump RPM (big-endian u16).
const OFFSET_PUMP_RPM: usize = 5;
/// Offset for firmware major version.
const OFFSET_FW_MAJOR: usize = 0x0B;
/// Offset for firmware minor version (big-endian u16).
const OFFSET_FW_MINOR: usize = 0x0C;
/// Offset for firmware patch version.
const OFFSET_FW_PATCH: usize = 0x0E;

/// Smallest packet that still carries every status field.
const MIN_STATUS_LENGTH: usize = 15;

// =============================================================================
// Firmware Version
// =============================================================================

/// Firmware version triple. The minor component is two bytes on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FirmwareVersion {
    pub major: u8,
    pub minor: u16,
    pub patch: u8,
}

impl FirmwareVersion {
    /// Whether the firmware accepts temperature/duty curve frames.
    ///
    /// Only firmware 3.0.0 and newer understands them; older firmware is
    /// limited to instantaneous speeds.
    pub const fn supports_cooling_profiles(&self) -> bool {
        self.major >= 3
    }
}

impl std::fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

// =============================================================================
// Device Status
// =============================================================================

/// Device status readings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceStatus {
    /// Liquid coolant temperature as a "major.minor" decimal string. Each
    /// byte on the wire is its own decimal component, so this is not a
    /// base-10 fixed-point value.
    pub liquid_temp: String,
    /// Fan speed in RPM.
    pub fan_rpm: u16,
    /// Pump speed in RPM.
    pub pump_rpm: u16,
    /// Firmware version reported alongside every status message.
    pub firmware: FirmwareVersion,
}

impl DeviceStatus {
    /// Parse a status report from the device.
    ///
    /// # Arguments
    /// * `buf` - 64-byte inbound report
    ///
    /// # Errors
    /// Returns `ShortPacket` if the buffer cannot hold every status field;
    /// a truncated read is a transport-contract violation, never decoded
    /// partially.
    pub fn parse(buf: &[u8]) -> Result<Self> {
        if buf.len() < MIN_STATUS_LENGTH {
            return Err(KrakenError::ShortPacket {
                len: buf.len(),
                expected: MIN_STATUS_LENGTH,
            });
        }

        let liquid_temp = format!("{}.{}", buf[OFFSET_TEMP_INT], buf[OFFSET_TEMP_DEC]);
        let fan_rpm = BigEndian::read_u16(&buf[OFFSET_FAN_RPM..OFFSET_FAN_RPM + 2]);
        let pump_rpm = BigEndian::read_u16(&buf[OFFSET_PUMP_RPM..OFFSET_PUMP_RPM + 2]);

        let firmware = FirmwareVersion {
            major: buf[OFFSET_FW_MAJOR],
            minor: BigEndian::read_u16(&buf[OFFSET_FW_MINOR..OFFSET_FW_MINOR + 2]),
            patch: buf[OFFSET_FW_PATCH],
        };

        Ok(DeviceStatus {
            liquid_temp,
            fan_rpm,
            pump_rpm,
            firmware,
        })
    }
}

impl std::fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "+-----------------------------------+")?;
        writeln!(f, "|       NZXT Kraken X Status        |")?;
        writeln!(f, "+-----------------------------------+")?;
        writeln!(f, "|  Liquid Temp:    {:>5} C          |", self.liquid_temp)?;
        writeln!(f, "|  Fan Speed:      {:>5} RPM        |", self.fan_rpm)?;
        writeln!(f, "|  Pump Speed:     {:>5} RPM        |", self.pump_rpm)?;
        writeln!(
            f,
            "|  Firmware:       {:>5}            |",
            self.firmware.to_string()
        )?;
        writeln!(f, "+-----------------------------------+")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_buf() -> [u8; 64] {
        let mut buf = [0u8; 64];
        // Temperature: 25.4°C
        buf[1] = 25;
        buf[2] = 4;
        // Fan RPM: 600 (big-endian 0x0258)
        buf[3] = 0x02;
        buf[4] = 0x58;
        // Pump RPM: 300 (big-endian 0x012C)
        buf[5] = 0x01;
        buf[6] = 0x2C;
        // Firmware 3.0.0
        buf[0x0B] = 3;
        buf
    }

    #[test]
    fn test_parse_status() {
        let status = DeviceStatus::parse(&status_buf()).unwrap();
        assert_eq!(status.liquid_temp, "25.4");
        assert_eq!(status.fan_rpm, 600);
        assert_eq!(status.pump_rpm, 300);
        assert_eq!(
            status.firmware,
            FirmwareVersion {
                major: 3,
                minor: 0,
                patch: 0
            }
        );
        assert!(status.firmware.supports_cooling_profiles());
    }

    #[test]
    fn test_temperature_is_not_fixed_point() {
        let mut buf = status_buf();
        buf[2] = 12;
        let status = DeviceStatus::parse(&buf).unwrap();
        assert_eq!(status.liquid_temp, "25.12");
    }

    #[test]
    fn test_short_packet() {
        let buf = [0u8; 14];
        assert!(matches!(
            DeviceStatus::parse(&buf),
            Err(KrakenError::ShortPacket { len: 14, .. })
        ));
    }

    #[test]
    fn test_firmware_minor_is_two_bytes() {
        let mut buf = status_buf();
        buf[0x0B] = 4;
        buf[0x0C] = 0x01;
        buf[0x0D] = 0x02;
        buf[0x0E] = 7;

        let fw = DeviceStatus::parse(&buf).unwrap().firmware;
        assert_eq!(fw.major, 4);
        assert_eq!(fw.minor, 258);
        assert_eq!(fw.patch, 7);
        assert_eq!(fw.to_string(), "4.258.7");
    }

    #[test]
    fn test_supports_cooling_profiles() {
        let cases = [
            ((2, 9, 9), false),
            ((2, 0, 0), false),
            ((3, 0, 0), true),
            ((6, 0, 0), true),
            ((6, 0, 2), true),
        ];

        for ((major, minor, patch), expected) in cases {
            let fw = FirmwareVersion {
                major,
                minor,
                patch,
            };
            assert_eq!(fw.supports_cooling_profiles(), expected, "{}", fw);
        }
    }
}
