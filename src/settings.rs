//! Runtime settings
//!
//! Loaded from an optional JSON file; every field falls back to the
//! compile-time defaults in [`crate::consts`].

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::error::Result;

/// Stage timing and demo scene parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed simulation timestep (seconds)
    pub fixed_dt: f32,
    /// Maximum ticks run for a single frame
    pub max_substeps: u32,
    /// Frame time clamp, so a long stall doesn't replay seconds of physics
    pub max_frame_dt: f32,

    // === Demo ===
    /// Seed for the generated scene
    pub seed: u64,
    /// Frames to simulate in headless mode
    pub frames: u32,
    /// Enemies in the generated scene
    pub enemies: u32,
    /// Wall blocks in the generated scene
    pub blocks: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fixed_dt: SIM_DT,
            max_substeps: MAX_SUBSTEPS,
            max_frame_dt: MAX_FRAME_DT,

            seed: 0x5eed,
            frames: 600,
            enemies: 24,
            blocks: 12,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let settings = Self::from_json(&fs::read_to_string(path)?)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings.sanitized())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path.as_ref(), self.to_json()?)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Replace values the stage can't run with by their defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.fixed_dt.is_finite() && self.fixed_dt > 0.0) {
            log::warn!("invalid fixed_dt {}, using {}", self.fixed_dt, defaults.fixed_dt);
            self.fixed_dt = defaults.fixed_dt;
        }
        if self.max_substeps == 0 {
            log::warn!("max_substeps must be at least 1, using {}", defaults.max_substeps);
            self.max_substeps = defaults.max_substeps;
        }
        if !(self.max_frame_dt.is_finite() && self.max_frame_dt >= self.fixed_dt) {
            self.max_frame_dt = defaults.max_frame_dt.max(self.fixed_dt);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 7, "frames": 10 }"#).unwrap();
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.frames, 10);
        assert_eq!(settings.fixed_dt, SIM_DT);
        assert_eq!(settings.max_substeps, MAX_SUBSTEPS);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Settings::from_json("{ not json").is_err());
    }

    #[test]
    fn test_sanitized_repairs_timing() {
        let settings = Settings {
            fixed_dt: -1.0,
            max_substeps: 0,
            max_frame_dt: f32::NAN,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(settings.fixed_dt, SIM_DT);
        assert_eq!(settings.max_substeps, MAX_SUBSTEPS);
        assert!(settings.max_frame_dt >= settings.fixed_dt);
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!("rtype-physics-settings-{}.json", std::process::id()));
        let settings = Settings {
            seed: 99,
            ..Default::default()
        };
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }
}
