//! Runner settings and preferences
//!
//! Loaded from an optional JSON file passed to the headless runner.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::FRAME_DT;
use crate::tuning::Tuning;

/// Headless runner settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Session seed (drives the demo autopilot)
    pub seed: u64,
    /// Fixed frame timestep (seconds)
    pub frame_dt: f32,
    /// Stop after this many frames
    pub max_frames: u64,
    /// Let the autopilot take shots
    pub demo_mode: bool,
    /// Log a snapshot summary every N frames (0 = never)
    pub snapshot_every: u64,
    /// Physics/gameplay overrides
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 12345,
            frame_dt: FRAME_DT,
            max_frames: 60 * 60 * 5,
            demo_mode: true,
            snapshot_every: 0,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a file, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read settings {}: {} - using defaults", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings.sanitized()
            }
            Err(e) => {
                log::warn!("Invalid settings {}: {} - using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Clamp values the runner cannot work with
    pub fn sanitized(mut self) -> Self {
        if !(self.frame_dt > 0.0 && self.frame_dt.is_finite()) {
            log::warn!("frame_dt {} is not usable, using {}", self.frame_dt, FRAME_DT);
            self.frame_dt = FRAME_DT;
        }
        self
    }
}
