//! Game settings and tuning
//!
//! Loaded from an optional JSON file next to the level data.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::catalog::DataLoadError;

/// Paddle widths as fractions of screen width
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaddleRatios {
    pub small: f32,
    pub normal: f32,
    pub large: f32,
}

impl Default for PaddleRatios {
    fn default() -> Self {
        Self {
            small: 0.15,
            normal: 0.25,
            large: 0.4,
        }
    }
}

/// Game settings/tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Screen ===
    /// Screen width in points
    pub screen_width: f32,
    /// Screen height in points
    pub screen_height: f32,

    // === Ball ===
    /// Per-axis impulse magnitude for launch and stall correction
    pub launch_impulse: f32,
    /// Axis speed at or below which the stall correction kicks in
    pub min_axis_speed: f32,

    // === Power-ups ===
    /// Downward impulse given to a dropped power-up
    pub power_up_impulse: f32,
    /// Paddle widths
    pub paddle: PaddleRatios,

    // === Cosmetic ===
    /// Lifetime of the white flash over a hit block (seconds)
    pub block_flash_secs: f32,
    /// Lifetime of the paddle hit texture (seconds)
    pub paddle_flash_secs: f32,

    /// Session RNG seed (None = caller picks one)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: 390.0,
            screen_height: 844.0,

            launch_impulse: 5.0,
            min_axis_speed: 10.0,

            power_up_impulse: 15.0,
            paddle: PaddleRatios::default(),

            block_flash_secs: 0.1,
            paddle_flash_secs: 0.1,

            seed: None,
        }
    }
}

impl Settings {
    /// Screen size as a vector
    pub fn screen(&self) -> Vec2 {
        Vec2::new(self.screen_width, self.screen_height)
    }

    pub fn from_json(json: &str) -> Result<Self, DataLoadError> {
        let settings: Self = serde_json::from_str(json)?;
        if settings.screen_width <= 0.0 || settings.screen_height <= 0.0 {
            return Err(DataLoadError::InvalidContent(format!(
                "screen size must be positive, got {}x{}",
                settings.screen_width, settings.screen_height
            )));
        }
        Ok(settings)
    }

    /// Load settings from a file, falling back to defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Using default settings ({}: {})", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings: {}", e);
                Self::default()
            }
        }
    }
}
