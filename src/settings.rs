//! Host settings and preferences
//!
//! Persisted as JSON next to the executable, separately from high scores.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Host preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // === HUD ===
    /// Log the HUD line once per second
    pub hud_log: bool,

    // === Session ===
    /// Drive the session with the built-in autopilot; off feeds idle input
    pub autopilot: bool,
    /// Fixed seed for reproducible runs; None draws one from the clock
    pub seed: Option<u64>,

    // === Accessibility ===
    /// Skip explosion flicker in the render frame consumer
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            hud_log: true,
            autopilot: true,
            seed: None,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Settings file name
    const FILE_NAME: &'static str = "sky_siege_settings.json";

    fn path() -> PathBuf {
        Path::new(Self::FILE_NAME).to_path_buf()
    }

    /// Load settings from disk, falling back to defaults on any failure
    pub fn load() -> Self {
        match fs::read_to_string(Self::path()) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", Self::FILE_NAME);
                    settings
                }
                Err(err) => {
                    log::warn!("Settings file unreadable ({err}), using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to disk; failures are logged, not fatal
    pub fn save(&self) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(err) = fs::write(Self::path(), json) {
                    log::warn!("Could not save settings: {err}");
                } else {
                    log::info!("Settings saved");
                }
            }
            Err(err) => log::warn!("Could not serialize settings: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.hud_log);
        assert!(settings.autopilot);
        assert!(settings.seed.is_none());
        assert!(!settings.reduced_motion);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            hud_log: false,
            autopilot: true,
            seed: Some(42),
            reduced_motion: true,
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert!(!back.hud_log);
        assert!(back.autopilot);
        assert_eq!(back.seed, Some(42));
        assert!(back.reduced_motion);
    }
}
