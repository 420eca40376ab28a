//! Profile storage and persistence.
//!
//! Handles saving and loading named profiles to/from disk.
//! Cross-platform: uses appropriate config directories for each OS.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::config::SpeedProfile;
use crate::error::{KrakenError, Result};

// =============================================================================
// Config Path
// =============================================================================

const APP_NAME: &str = "nzxt-krakenx";
const CONFIG_FILE: &str = "config.json";

/// Get the configuration directory path.
/// - Linux: ~/.config/nzxt-krakenx/
/// - Windows: %APPDATA%\nzxt-krakenx\
pub fn get_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|p| p.join(APP_NAME))
        .ok_or_else(|| KrakenError::InvalidProfile("Could not find config directory".into()))
}

/// Get the full path to the config file.
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join(CONFIG_FILE))
}

// =============================================================================
// Storage Structures
// =============================================================================

/// Main configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Cooling profiles by name.
    #[serde(default)]
    pub profiles: HashMap<String, StoredCoolingProfile>,
    /// Lighting presets by name.
    #[serde(default)]
    pub lighting: HashMap<String, StoredLighting>,
}

/// Stored cooling profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCoolingProfile {
    pub fan: Option<StoredChannel>,
    pub pump: Option<StoredChannel>,
}

/// Stored channel configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredChannel {
    /// "fixed" or "curve".
    pub mode: String,
    pub fixed: Option<u8>,
    #[serde(default)]
    pub curve: Vec<(u8, u8)>,
}

impl StoredChannel {
    /// Convert this stored channel into an applicable speed profile.
    pub fn to_speed_profile(&self) -> Result<SpeedProfile> {
        match self.mode.to_lowercase().as_str() {
            "fixed" => {
                let duty = self.fixed.ok_or_else(|| {
                    KrakenError::InvalidProfile("Fixed channel is missing a duty value".into())
                })?;
                Ok(SpeedProfile::Fixed(duty))
            }
            "curve" => {
                if self.curve.is_empty() {
                    return Err(KrakenError::InvalidProfile(
                        "Curve channel has no points".into(),
                    ));
                }
                Ok(SpeedProfile::Custom(self.curve.clone()))
            }
            other => Err(KrakenError::InvalidProfile(format!(
                "Unknown channel mode '{}'. Use: fixed or curve",
                other
            ))),
        }
    }
}

/// Stored lighting preset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredLighting {
    /// Color channel: "sync", "logo" or "ring".
    pub channel: String,
    /// Mode name, e.g. "fading".
    pub mode: String,
    /// Hex color strings, e.g. ["FF0000", "0000FF"].
    #[serde(default)]
    pub colors: Vec<String>,
    /// Animation speed name; "normal" when absent.
    #[serde(default)]
    pub speed: Option<String>,
}

// =============================================================================
// Storage Functions
// =============================================================================

/// Load configuration from disk.
pub fn load_config() -> Result<AppConfig> {
    load_config_from(&get_config_path()?)
}

fn load_config_from(path: &std::path::Path) -> Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| KrakenError::InvalidProfile(format!("Failed to read config: {}", e)))?;

    let config: AppConfig = serde_json::from_str(&content)
        .map_err(|e| KrakenError::InvalidProfile(format!("Failed to parse config: {}", e)))?;

    // Keys are matched case-insensitively; normalize once here.
    Ok(AppConfig {
        profiles: lowercase_keys(config.profiles),
        lighting: lowercase_keys(config.lighting),
    })
}

fn lowercase_keys<V>(map: HashMap<String, V>) -> HashMap<String, V> {
    map.into_iter().map(|(k, v)| (k.to_lowercase(), v)).collect()
}

/// Save configuration to disk.
pub fn save_config(config: &AppConfig) -> Result<()> {
    save_config_to(&get_config_path()?, config)
}

fn save_config_to(path: &std::path::Path, config: &AppConfig) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| {
            KrakenError::InvalidProfile(format!("Failed to create config dir: {}", e))
        })?;
    }

    let content = serde_json::to_string_pretty(config)
        .map_err(|e| KrakenError::InvalidProfile(format!("Failed to serialize config: {}", e)))?;

    std::fs::write(path, content)
        .map_err(|e| KrakenError::InvalidProfile(format!("Failed to write config: {}", e)))?;

    Ok(())
}

/// Ensure that the configuration file exists.
/// If it doesn't exist, create it with an empty profile/preset skeleton for
/// the user to fill in.
pub fn ensure_config_exists() -> Result<()> {
    let path = get_config_path()?;
    if path.exists() {
        return Ok(());
    }

    println!("Config file not found. Creating default at {:?}", path);
    save_config(&AppConfig::default())
}

/// Get a stored cooling profile by name. Case-insensitive.
pub fn get_cooling_profile(name: &str) -> Result<StoredCoolingProfile> {
    ensure_config_exists()?;

    let config = load_config()?;
    config
        .profiles
        .get(&name.to_lowercase())
        .cloned()
        .ok_or_else(|| KrakenError::InvalidProfile(format!("Profile '{}' not found", name)))
}

/// Get a stored lighting preset by name. Case-insensitive.
pub fn get_lighting_preset(name: &str) -> Result<StoredLighting> {
    ensure_config_exists()?;

    let config = load_config()?;
    config
        .lighting
        .get(&name.to_lowercase())
        .cloned()
        .ok_or_else(|| KrakenError::InvalidProfile(format!("Lighting preset '{}' not found", name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_roundtrip() {
        let json = r#"{
            "profiles": {
                "quiet-night": {
                    "fan": { "mode": "curve", "fixed": null, "curve": [[20, 25], [50, 60], [60, 100]] },
                    "pump": { "mode": "fixed", "fixed": 60 }
                }
            },
            "lighting": {
                "lava": { "channel": "ring", "mode": "fading", "colors": ["FF0000", "FF6600"] }
            }
        }"#;

        let config: AppConfig = serde_json::from_str(json).unwrap();
        let profile = &config.profiles["quiet-night"];
        assert_eq!(profile.fan.as_ref().unwrap().curve.len(), 3);
        assert_eq!(profile.pump.as_ref().unwrap().fixed, Some(60));

        let preset = &config.lighting["lava"];
        assert_eq!(preset.channel, "ring");
        assert_eq!(preset.colors, vec!["FF0000", "FF6600"]);
        assert!(preset.speed.is_none());

        // Survives a serialize/deserialize cycle intact.
        let reparsed: AppConfig = serde_json::from_str(&serde_json::to_string(&config).unwrap())
            .unwrap();
        assert_eq!(reparsed.profiles.len(), 1);
        assert_eq!(reparsed.lighting.len(), 1);
    }

    #[test]
    fn test_save_and_load_from_disk() {
        let dir = std::env::temp_dir().join(format!("nzxt-krakenx-test-{}", std::process::id()));
        let path = dir.join(CONFIG_FILE);

        let mut config = AppConfig::default();
        config.lighting.insert(
            "lava".into(),
            StoredLighting {
                channel: "ring".into(),
                mode: "fading".into(),
                colors: vec!["FF0000".into(), "FF6600".into()],
                speed: None,
            },
        );

        save_config_to(&path, &config).unwrap();
        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.lighting["lava"].colors, vec!["FF0000", "FF6600"]);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_lowercases_stored_keys() {
        let dir = std::env::temp_dir().join(format!("nzxt-krakenx-keys-{}", std::process::id()));
        let path = dir.join(CONFIG_FILE);

        let mut config = AppConfig::default();
        config.profiles.insert(
            "QuietNight".into(),
            StoredCoolingProfile {
                fan: Some(StoredChannel {
                    mode: "fixed".into(),
                    fixed: Some(40),
                    curve: vec![],
                }),
                pump: None,
            },
        );

        save_config_to(&path, &config).unwrap();
        let loaded = load_config_from(&path).unwrap();

        // Lookups lowercase the query; stored keys must match after load.
        assert!(loaded.profiles.contains_key("quietnight"));
        assert!(!loaded.profiles.contains_key("QuietNight"));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_stored_channel_to_profile() {
        let fixed = StoredChannel {
            mode: "fixed".into(),
            fixed: Some(70),
            curve: vec![],
        };
        assert!(matches!(
            fixed.to_speed_profile().unwrap(),
            SpeedProfile::Fixed(70)
        ));

        let curve = StoredChannel {
            mode: "curve".into(),
            fixed: None,
            curve: vec![(20, 25), (60, 100)],
        };
        assert!(matches!(
            curve.to_speed_profile().unwrap(),
            SpeedProfile::Custom(_)
        ));

        let broken = StoredChannel {
            mode: "fixed".into(),
            fixed: None,
            curve: vec![],
        };
        assert!(broken.to_speed_profile().is_err());
    }
}
