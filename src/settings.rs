//! Driver settings with persistence
//!
//! Settings are saved to `~/.config/strider/settings.toml`

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use strider_core::ClockConfig;
use strider_game::LocomotionConfig;

/// All driver settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    pub locomotion: LocomotionConfig,
    pub clock: ClockConfig,
    pub world: WorldSettings,
}

/// Collision world settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSettings {
    /// Downward gravity magnitude in m/s²
    pub gravity: f32,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self { gravity: 9.81 }
    }
}

impl Settings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("strider"))
    }

    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory");
            return Self::default();
        };

        if !path.exists() {
            info!("No settings file found, using defaults");
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Save settings to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let Some(dir) = Self::config_dir() else {
            anyhow::bail!("Could not determine config directory");
        };

        let path = dir.join("settings.toml");

        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_toml_round_trip() {
        let settings = Settings::default();
        let text = toml::to_string_pretty(&settings).unwrap();
        let back: Settings = toml::from_str(&text).unwrap();

        assert_eq!(back.locomotion.mass, settings.locomotion.mass);
        assert_eq!(back.clock.fixed_timestep, settings.clock.fixed_timestep);
        assert_eq!(back.world.gravity, settings.world.gravity);
    }

    #[test]
    fn test_default_locomotion_is_valid() {
        assert!(Settings::default().locomotion.validate().is_ok());
    }
}
