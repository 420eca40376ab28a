//! NZXT Kraken X Control CLI
//!
//! Command-line interface for monitoring and controlling NZXT Kraken
//! X-series coolers.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use nzxt_krakenx::config::{PROFILE_PUMP_PERFORMANCE, PROFILE_PUMP_SILENT, SpeedProfile};
use nzxt_krakenx::device::KrakenX;
use nzxt_krakenx::protocol::{AnimationSpeed, ColorChannel, ColorMode, SpeedChannel};
use nzxt_krakenx::protocol::lighting::palette_from_hex;
use nzxt_krakenx::storage;
use nzxt_krakenx::utils::parsing::{parse_speed_profile, profile_text_from_args};

// =============================================================================
// CLI Arguments
// =============================================================================

/// NZXT Kraken X Control Tool
#[derive(Parser, Debug)]
#[command(name = "nzxt-krakenx-cli")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show current device status
    Status,

    /// Continuously monitor device status
    Monitor {
        /// Update interval in seconds
        #[arg(short, long, default_value = "1")]
        interval: u64,
    },

    /// Set the color of the logo, ring or sync channel
    Color {
        /// Color channel: sync, logo or ring
        channel: String,

        /// Color mode, e.g. fixed, fading, breathing
        mode: String,

        /// Colors as 6-hex-digit strings, e.g. FF0000
        colors: Vec<String>,

        /// Animation speed: slowest, slower, normal, faster, fastest
        #[arg(short, long, default_value = "normal")]
        speed: String,
    },

    /// Apply a temperature/duty curve to the fan or pump
    Speed {
        /// Speed channel: fan or pump
        channel: String,

        /// Curve as alternating temperature and duty values,
        /// e.g. 20 25 35 25 50 55 60 100
        #[arg(required = true, num_args = 2..)]
        points: Vec<String>,
    },

    /// Set fixed fan speed
    SetFan {
        /// Duty cycle percentage (25-100)
        #[arg(value_parser = clap::value_parser!(u8).range(25..=100))]
        duty: u8,
    },

    /// Set fixed pump speed
    SetPump {
        /// Duty cycle percentage (50-100)
        #[arg(value_parser = clap::value_parser!(u8).range(50..=100))]
        duty: u8,
    },

    /// Apply a speed profile (built-in or stored)
    Profile {
        /// Profile name: silent, performance, fixed:XX, or a stored name
        name: String,

        /// Channel for built-in profiles: fan or pump
        #[arg(short, long, default_value = "fan")]
        channel: String,
    },

    /// Apply a stored lighting preset
    Lighting {
        /// Preset name from the config file
        name: String,
    },

    /// List connected Kraken X devices
    List,

    /// Show device firmware version and capabilities
    Info,
}

// =============================================================================
// Main
// =============================================================================

fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Command::Status => cmd_status(),
        Command::Monitor { interval } => cmd_monitor(interval),
        Command::Color {
            channel,
            mode,
            colors,
            speed,
        } => cmd_color(&channel, &mode, &colors, &speed),
        Command::Speed { channel, points } => cmd_speed(&channel, &points),
        Command::SetFan { duty } => cmd_set_speed(SpeedChannel::Fan, duty),
        Command::SetPump { duty } => cmd_set_speed(SpeedChannel::Pump, duty),
        Command::Profile { name, channel } => cmd_profile(&name, &channel),
        Command::Lighting { name } => cmd_lighting(&name),
        Command::List => cmd_list(),
        Command::Info => cmd_info(),
    }
}

// =============================================================================
// Command Implementations
// =============================================================================

fn cmd_status() -> Result<()> {
    let kraken = KrakenX::open().context("Failed to open Kraken X")?;
    let status = kraken.get_status().context("Failed to read status")?;
    println!("{}", status);
    Ok(())
}

fn cmd_monitor(interval: u64) -> Result<()> {
    let kraken = KrakenX::open().context("Failed to open Kraken X")?;

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .context("Failed to install Ctrl-C handler")?;

    println!("Monitoring (Ctrl-C to stop)...");
    while running.load(Ordering::SeqCst) {
        match kraken.get_status() {
            Ok(status) => println!(
                "Liquid {:>5} C  |  Fan {:>4} RPM  |  Pump {:>4} RPM",
                status.liquid_temp, status.fan_rpm, status.pump_rpm
            ),
            Err(e) => eprintln!("⚠️ Read failed: {}", e),
        }
        std::thread::sleep(Duration::from_secs(interval));
    }

    println!("Stopped.");
    Ok(())
}

fn cmd_color(channel: &str, mode: &str, colors: &[String], speed: &str) -> Result<()> {
    let channel = ColorChannel::lookup(channel)?;
    let mode = ColorMode::lookup(mode)?;
    let speed = AnimationSpeed::lookup(speed)?;
    let palette = palette_from_hex(colors)?;

    let kraken = KrakenX::open().context("Failed to open Kraken X")?;
    kraken
        .set_color(channel, mode, palette, speed)
        .context("Failed to set color")?;

    println!("✅ {}: {} {:?}", channel, mode.name, colors);
    Ok(())
}

fn cmd_speed(channel: &str, points: &[String]) -> Result<()> {
    let channel = SpeedChannel::lookup(channel)?;
    let text = profile_text_from_args(points);
    let curve = nzxt_krakenx::cooling::curve_from_text(&text)?;

    let kraken = KrakenX::open().context("Failed to open Kraken X")?;
    kraken
        .set_speed_profile(channel, &curve)
        .context("Failed to set speed profile")?;

    println!("✅ {} curve applied: {}", channel, text);
    Ok(())
}

fn cmd_set_speed(channel: SpeedChannel, duty: u8) -> Result<()> {
    let kraken = KrakenX::open().context("Failed to open Kraken X")?;
    kraken
        .set_instant_speed(channel, duty)
        .context("Failed to set speed")?;

    println!("✅ {} speed set to {}%", channel, duty);
    Ok(())
}

fn cmd_profile(name: &str, channel: &str) -> Result<()> {
    let kraken = KrakenX::open().context("Failed to open Kraken X")?;

    // Built-in names first, then the stored profiles from config.json.
    if let Ok(profile) = parse_speed_profile(name) {
        let channel = SpeedChannel::lookup(channel)?;
        apply_profile(&kraken, channel, preset_for_channel(profile, channel))?;
        return Ok(());
    }

    let stored = storage::get_cooling_profile(name)?;
    if let Some(fan) = &stored.fan {
        apply_profile(&kraken, SpeedChannel::Fan, fan.to_speed_profile()?)?;
    }
    if let Some(pump) = &stored.pump {
        apply_profile(&kraken, SpeedChannel::Pump, pump.to_speed_profile()?)?;
    }

    Ok(())
}

/// Silent/Performance carry separate point tables for the pump.
fn preset_for_channel(profile: SpeedProfile, channel: SpeedChannel) -> SpeedProfile {
    if channel != SpeedChannel::Pump {
        return profile;
    }

    match profile {
        SpeedProfile::Silent => SpeedProfile::Custom(PROFILE_PUMP_SILENT.to_vec()),
        SpeedProfile::Performance => SpeedProfile::Custom(PROFILE_PUMP_PERFORMANCE.to_vec()),
        other => other,
    }
}

fn apply_profile(kraken: &KrakenX, channel: SpeedChannel, profile: SpeedProfile) -> Result<()> {
    match profile {
        // Fixed speeds work on all firmware versions.
        SpeedProfile::Fixed(duty) => {
            kraken
                .set_instant_speed(channel, duty)
                .context("Failed to set speed")?;
            println!("✅ {}: fixed {}%", channel, duty);
        }
        profile => {
            let curve = profile.to_curve()?;
            kraken
                .set_speed_profile(channel, &curve)
                .context("Failed to set speed profile")?;
            println!("✅ {}: {} profile applied", channel, profile);
        }
    }
    Ok(())
}

fn cmd_lighting(name: &str) -> Result<()> {
    let preset = storage::get_lighting_preset(name)?;

    let channel = ColorChannel::lookup(&preset.channel)?;
    let mode = ColorMode::lookup(&preset.mode)?;
    let speed = match &preset.speed {
        Some(s) => AnimationSpeed::lookup(s)?,
        None => AnimationSpeed::Normal,
    };
    let palette = palette_from_hex(&preset.colors)?;

    let kraken = KrakenX::open().context("Failed to open Kraken X")?;
    kraken
        .set_color(channel, mode, palette, speed)
        .context("Failed to set color")?;

    println!("✅ Lighting preset '{}' applied to {}", name, channel);
    Ok(())
}

fn cmd_list() -> Result<()> {
    let devices = KrakenX::list_devices().context("Failed to enumerate devices")?;

    if devices.is_empty() {
        println!("No Kraken X devices found.");
        return Ok(());
    }

    for (path, serial) in devices {
        match serial {
            Some(serial) => println!("{}  (serial: {})", path, serial),
            None => println!("{}", path),
        }
    }
    Ok(())
}

fn cmd_info() -> Result<()> {
    let kraken = KrakenX::open().context("Failed to open Kraken X")?;
    let status = kraken.get_status().context("Failed to read status")?;

    println!("Firmware version: {}", status.firmware);
    println!(
        "Cooling profiles: {}",
        if status.firmware.supports_cooling_profiles() {
            "supported"
        } else {
            "not supported (firmware 3.0.0+ required)"
        }
    );
    Ok(())
}
