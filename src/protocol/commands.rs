//! Protocol constants, catalogs and frame builders for Kraken X series.
//!
//! Protocol based on reverse-engineering from the liquidctl project:
//! https://github.com/liquidctl/liquidctl/blob/main/liquidctl/driver/kraken2.py

use crate::error::{KrakenError, Result};
use crate::protocol::lighting::Color;

// =============================================================================
// Constants
// =============================================================================

/// Outbound HID report length (report id included).
pub const WRITE_LENGTH: usize = 65;

/// Inbound HID report length.
pub const READ_LENGTH: usize = 64;

/// NZXT Vendor ID.
pub const NZXT_VID: u16 = 0x1E71;

/// Kraken X42/X52/X62/X72 Product ID.
pub const KRAKEN_X2_PID: u16 = 0x170E;

/// Total number of addressable LEDs (1 logo + 8 ring).
pub const TOTAL_LEDS: usize = 9;

/// Critical temperature: every normalized curve terminates here at 100% duty.
pub const CRITICAL_TEMPERATURE: u8 = 60;

/// Lowest temperature of the device speed curve grid.
pub const MIN_CURVE_TEMP: u8 = 20;

/// Grid spacing of the device speed curve in degrees Celsius.
pub const CURVE_TEMP_STEP: u8 = 2;

/// Number of points in a device speed curve (20°C to 60°C, step 2).
pub const CURVE_POINTS: usize = 21;

/// HID report id, first byte of every outbound frame.
pub const REPORT_ID: u8 = 0x02;

/// Color-set opcode (second byte of a color frame).
pub const CMD_SET_COLOR: u8 = 0x4C;

/// Speed-set opcode (second byte of a speed frame).
pub const CMD_SET_SPEED: u8 = 0x4D;

// =============================================================================
// Color Channels
// =============================================================================

/// Lighting zone identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChannel {
    /// Logo and ring together.
    Sync,
    /// CPU block logo (1 LED).
    Logo,
    /// Outer ring (8 LEDs).
    Ring,
}

impl ColorChannel {
    /// Get the 2-bit channel code used in byte 2 of a color frame.
    pub const fn code(&self) -> u8 {
        match self {
            ColorChannel::Sync => 0x0,
            ColorChannel::Logo => 0x1,
            ColorChannel::Ring => 0x2,
        }
    }

    /// Look up a channel by its CLI name.
    pub fn lookup(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "sync" => Ok(ColorChannel::Sync),
            "logo" => Ok(ColorChannel::Logo),
            "ring" => Ok(ColorChannel::Ring),
            _ => Err(KrakenError::UnknownChannel(name.into())),
        }
    }
}

impl std::fmt::Display for ColorChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColorChannel::Sync => write!(f, "sync"),
            ColorChannel::Logo => write!(f, "logo"),
            ColorChannel::Ring => write!(f, "ring"),
        }
    }
}

// =============================================================================
// Speed Channels
// =============================================================================

/// Cooling zone identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedChannel {
    /// Fan channel - minimum 25%, maximum 100%.
    Fan,
    /// Pump channel - minimum 50%, maximum 100%.
    Pump,
}

impl SpeedChannel {
    /// Protocol base address for curve point frames (byte 2 = base + index).
    pub const fn base_address(&self) -> u8 {
        match self {
            SpeedChannel::Fan => 0x80,
            SpeedChannel::Pump => 0xC0,
        }
    }

    /// Get the minimum duty cycle accepted by this channel.
    pub const fn min_duty(&self) -> u8 {
        match self {
            SpeedChannel::Fan => 25,
            SpeedChannel::Pump => 50,
        }
    }

    /// Get the maximum duty cycle accepted by this channel.
    pub const fn max_duty(&self) -> u8 {
        100
    }

    /// Clamp a duty value into this channel's accepted range.
    pub const fn clamp_duty(&self, duty: u8) -> u8 {
        if duty < self.min_duty() {
            self.min_duty()
        } else if duty > self.max_duty() {
            self.max_duty()
        } else {
            duty
        }
    }

    /// Look up a channel by its CLI name.
    pub fn lookup(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "fan" => Ok(SpeedChannel::Fan),
            "pump" => Ok(SpeedChannel::Pump),
            _ => Err(KrakenError::UnknownChannel(name.into())),
        }
    }
}

impl std::fmt::Display for SpeedChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpeedChannel::Fan => write!(f, "fan"),
            SpeedChannel::Pump => write!(f, "pump"),
        }
    }
}

// =============================================================================
// Animation Speeds
// =============================================================================

/// Animation speed for lighting modes (low bits of byte 4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationSpeed {
    Slowest,
    Slower,
    #[default]
    Normal,
    Faster,
    Fastest,
}

impl AnimationSpeed {
    pub const fn value(&self) -> u8 {
        match self {
            AnimationSpeed::Slowest => 0x0,
            AnimationSpeed::Slower => 0x1,
            AnimationSpeed::Normal => 0x2,
            AnimationSpeed::Faster => 0x3,
            AnimationSpeed::Fastest => 0x4,
        }
    }

    /// Look up an animation speed by its CLI name.
    pub fn lookup(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "slowest" => Ok(AnimationSpeed::Slowest),
            "slower" => Ok(AnimationSpeed::Slower),
            "normal" => Ok(AnimationSpeed::Normal),
            "faster" => Ok(AnimationSpeed::Faster),
            "fastest" => Ok(AnimationSpeed::Fastest),
            _ => Err(KrakenError::InvalidInput(format!(
                "Unknown animation speed '{}'. Use: slowest, slower, normal, faster or fastest",
                name
            ))),
        }
    }
}

// =============================================================================
// Color Modes
// =============================================================================

/// Protocol parameters for a named lighting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorMode {
    /// Mode name as accepted on the CLI.
    pub name: &'static str,
    /// Mode byte (byte 3 of a color frame).
    pub value: u8,
    /// Reverse-direction bits, OR-ed into byte 2.
    pub reverse: u8,
    /// Step-count modifier bits, OR-ed into byte 4.
    pub modifier: u8,
    /// Minimum number of colors the mode accepts.
    pub min_colors: usize,
    /// Maximum number of colors the mode accepts. 0 = mode ignores colors.
    pub max_colors: usize,
    /// Mode is only valid on the ring channel.
    pub ring_only: bool,
    /// "Super" variant: independent per-LED colors instead of one per step.
    pub per_led: bool,
}

/// Static lighting mode catalog, mirroring the device firmware's mode table.
pub const COLOR_MODES: &[ColorMode] = &[
    mode("off", 0x00, 0x00, 0x00, 0, 0, false, false),
    mode("fixed", 0x00, 0x00, 0x00, 1, 1, false, false),
    // independent logo + ring leds
    mode("super-fixed", 0x00, 0x00, 0x00, 1, 9, false, true),
    mode("fading", 0x01, 0x00, 0x00, 2, 8, false, false),
    mode("spectrum-wave", 0x02, 0x00, 0x00, 0, 0, false, false),
    mode("backwards-spectrum-wave", 0x02, 0x10, 0x00, 0, 0, false, false),
    mode("marquee-3", 0x03, 0x00, 0x00, 1, 1, true, false),
    mode("marquee-4", 0x03, 0x00, 0x08, 1, 1, true, false),
    mode("marquee-5", 0x03, 0x00, 0x10, 1, 1, true, false),
    mode("marquee-6", 0x03, 0x00, 0x18, 1, 1, true, false),
    mode("backwards-marquee-3", 0x03, 0x10, 0x00, 1, 1, true, false),
    mode("backwards-marquee-4", 0x03, 0x10, 0x08, 1, 1, true, false),
    mode("backwards-marquee-5", 0x03, 0x10, 0x10, 1, 1, true, false),
    mode("backwards-marquee-6", 0x03, 0x10, 0x18, 1, 1, true, false),
    mode("covering-marquee", 0x04, 0x00, 0x00, 1, 8, true, false),
    mode("covering-backwards-marquee", 0x04, 0x10, 0x00, 1, 8, true, false),
    mode("alternating", 0x05, 0x00, 0x00, 2, 2, true, false),
    mode("moving-alternating", 0x05, 0x08, 0x00, 2, 2, true, false),
    mode("backwards-moving-alternating", 0x05, 0x18, 0x00, 2, 2, true, false),
    // one color per animation step
    mode("breathing", 0x06, 0x00, 0x00, 1, 8, false, false),
    // one step, independent logo + ring leds
    mode("super-breathing", 0x06, 0x00, 0x00, 1, 9, false, true),
    mode("pulse", 0x07, 0x00, 0x00, 1, 8, false, false),
    mode("tai-chi", 0x08, 0x00, 0x00, 2, 2, true, false),
    mode("water-cooler", 0x09, 0x00, 0x00, 0, 0, true, false),
    mode("loading", 0x0A, 0x00, 0x00, 1, 1, true, false),
    mode("wings", 0x0C, 0x00, 0x00, 1, 1, true, false),
    // independent ring leds
    mode("super-wave", 0x0D, 0x00, 0x00, 1, 8, true, true),
    mode("backwards-super-wave", 0x0D, 0x10, 0x00, 1, 8, true, true),
];

#[allow(clippy::too_many_arguments)]
const fn mode(
    name: &'static str,
    value: u8,
    reverse: u8,
    modifier: u8,
    min_colors: usize,
    max_colors: usize,
    ring_only: bool,
    per_led: bool,
) -> ColorMode {
    ColorMode {
        name,
        value,
        reverse,
        modifier,
        min_colors,
        max_colors,
        ring_only,
        per_led,
    }
}

impl ColorMode {
    /// Look up a mode by its CLI name.
    pub fn lookup(name: &str) -> Result<&'static ColorMode> {
        let lower = name.to_lowercase();
        COLOR_MODES
            .iter()
            .find(|m| m.name == lower)
            .ok_or_else(|| KrakenError::UnknownMode(name.into()))
    }
}

// =============================================================================
// Frame Builders
// =============================================================================

/// Build a color frame for one animation step.
///
/// Layout:
/// `[0x02, 0x4c, reverse|channel, mode, speed|seq<<5|modifier, colors...]`
///
/// The lead color (logo slot) is serialized G,R,B; the remaining LED entries
/// are serialized R,G,B. This asymmetry is a firmware quirk and must be
/// preserved exactly.
///
/// # Arguments
/// * `channel` - Lighting zone to address
/// * `mode` - Mode catalog entry
/// * `speed` - Animation speed
/// * `seq` - Zero-based step index; must fit in 3 bits (0-7), which every
///   mode/step-count combination in the catalog guarantees
/// * `step` - Colors of this step (1 to 9 entries)
///
/// # Returns
/// A 65-byte HID report, zero-padded, ready to send to the device.
pub fn build_color_frame(
    channel: ColorChannel,
    mode: &ColorMode,
    speed: AnimationSpeed,
    seq: u8,
    step: &[Color],
) -> [u8; WRITE_LENGTH] {
    let mut buf = [0u8; WRITE_LENGTH];

    buf[0] = REPORT_ID;
    buf[1] = CMD_SET_COLOR;
    buf[2] = mode.reverse | channel.code();
    buf[3] = mode.value;
    buf[4] = speed.value() | (seq << 5) | mode.modifier;

    if let Some((lead, rest)) = step.split_first() {
        buf[5] = lead.g;
        buf[6] = lead.r;
        buf[7] = lead.b;

        for (i, led) in rest.iter().enumerate() {
            let off = 8 + i * 3;
            buf[off] = led.r;
            buf[off + 1] = led.g;
            buf[off + 2] = led.b;
        }
    }

    buf
}

/// Build a speed frame for one curve point.
///
/// Layout: `[0x02, 0x4d, base+index, temperature, duty]`, zero-padded.
/// The duty is clamped into the channel's accepted range.
pub fn build_speed_point_frame(
    channel: SpeedChannel,
    index: u8,
    temp: u8,
    duty: u8,
) -> [u8; WRITE_LENGTH] {
    let mut buf = [0u8; WRITE_LENGTH];

    buf[0] = REPORT_ID;
    buf[1] = CMD_SET_SPEED;
    buf[2] = channel.base_address() + index;
    buf[3] = temp;
    buf[4] = channel.clamp_duty(duty);

    buf
}

/// Build an instantaneous speed frame.
///
/// Uses only the channel nibble of the base address (point index forced to 0)
/// and a zero temperature, which the firmware treats as "apply now".
pub fn build_instant_speed_frame(channel: SpeedChannel, duty: u8) -> [u8; WRITE_LENGTH] {
    let mut buf = [0u8; WRITE_LENGTH];

    buf[0] = REPORT_ID;
    buf[1] = CMD_SET_SPEED;
    buf[2] = channel.base_address() & 0x70;
    buf[3] = 0;
    buf[4] = channel.clamp_duty(duty);

    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_codes() {
        assert_eq!(ColorChannel::Sync.code(), 0x0);
        assert_eq!(ColorChannel::Logo.code(), 0x1);
        assert_eq!(ColorChannel::Ring.code(), 0x2);
    }

    #[test]
    fn test_channel_lookup() {
        assert_eq!(ColorChannel::lookup("RING").unwrap(), ColorChannel::Ring);
        assert!(ColorChannel::lookup("strip").is_err());
        assert_eq!(SpeedChannel::lookup("pump").unwrap(), SpeedChannel::Pump);
        assert!(SpeedChannel::lookup("blower").is_err());
    }

    #[test]
    fn test_speed_channel_parameters() {
        assert_eq!(SpeedChannel::Fan.base_address(), 0x80);
        assert_eq!(SpeedChannel::Pump.base_address(), 0xC0);
        assert_eq!(SpeedChannel::Fan.min_duty(), 25);
        assert_eq!(SpeedChannel::Pump.min_duty(), 50);
    }

    #[test]
    fn test_duty_clamping() {
        assert_eq!(SpeedChannel::Fan.clamp_duty(0), 25);
        assert_eq!(SpeedChannel::Fan.clamp_duty(60), 60);
        assert_eq!(SpeedChannel::Pump.clamp_duty(10), 50);
        assert_eq!(SpeedChannel::Pump.clamp_duty(110), 100);
    }

    #[test]
    fn test_mode_lookup() {
        let fading = ColorMode::lookup("fading").unwrap();
        assert_eq!(fading.value, 0x01);
        assert_eq!(fading.min_colors, 2);
        assert_eq!(fading.max_colors, 8);
        assert!(!fading.ring_only);
        assert!(!fading.per_led);

        let wave = ColorMode::lookup("backwards-super-wave").unwrap();
        assert_eq!(wave.value, 0x0D);
        assert_eq!(wave.reverse, 0x10);
        assert!(wave.ring_only);
        assert!(wave.per_led);

        assert!(ColorMode::lookup("disco").is_err());
    }

    #[test]
    fn test_marquee_modifiers() {
        assert_eq!(ColorMode::lookup("marquee-3").unwrap().modifier, 0x00);
        assert_eq!(ColorMode::lookup("marquee-4").unwrap().modifier, 0x08);
        assert_eq!(ColorMode::lookup("marquee-5").unwrap().modifier, 0x10);
        assert_eq!(ColorMode::lookup("marquee-6").unwrap().modifier, 0x18);
    }

    #[test]
    fn test_color_frame_layout() {
        let mode = ColorMode::lookup("fading").unwrap();
        let step = vec![Color::new(0x11, 0x22, 0x33); TOTAL_LEDS];
        let buf = build_color_frame(ColorChannel::Ring, mode, AnimationSpeed::Normal, 1, &step);

        assert_eq!(buf.len(), WRITE_LENGTH);
        assert_eq!(buf[0], REPORT_ID);
        assert_eq!(buf[1], CMD_SET_COLOR);
        assert_eq!(buf[2], 0x02); // no reverse bit, ring channel
        assert_eq!(buf[3], 0x01);
        assert_eq!(buf[4], 0x02 | (1 << 5)); // normal speed, seq 1

        // Lead color is G,R,B
        assert_eq!(&buf[5..8], &[0x22, 0x11, 0x33]);
        // Remaining LEDs are R,G,B
        assert_eq!(&buf[8..11], &[0x11, 0x22, 0x33]);
        // 8 trailing LEDs * 3 bytes end at offset 32; rest is padding
        assert_eq!(&buf[8 + 8 * 3..], &[0u8; WRITE_LENGTH - 32]);
    }

    #[test]
    fn test_color_frame_reverse_bit() {
        let mode = ColorMode::lookup("backwards-spectrum-wave").unwrap();
        let buf = build_color_frame(
            ColorChannel::Sync,
            mode,
            AnimationSpeed::Normal,
            0,
            &[Color::BLACK],
        );
        assert_eq!(buf[2], 0x10);
        assert_eq!(buf[3], 0x02);
    }

    #[test]
    fn test_speed_point_frame() {
        let buf = build_speed_point_frame(SpeedChannel::Fan, 3, 26, 25);
        assert_eq!(buf[..5], [0x02, 0x4D, 0x83, 26, 25]);
        assert_eq!(&buf[5..], &[0u8; WRITE_LENGTH - 5]);

        // Duty below the pump floor gets clamped
        let buf = build_speed_point_frame(SpeedChannel::Pump, 0, 20, 30);
        assert_eq!(buf[..5], [0x02, 0x4D, 0xC0, 20, 50]);
    }

    #[test]
    fn test_instant_speed_frame() {
        let buf = build_instant_speed_frame(SpeedChannel::Fan, 60);
        assert_eq!(buf[..5], [0x02, 0x4D, 0x00, 0, 60]);

        let buf = build_instant_speed_frame(SpeedChannel::Pump, 75);
        assert_eq!(buf[..5], [0x02, 0x4D, 0x40, 0, 75]);
    }
}
