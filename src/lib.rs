//! Brick Breaker - A single-screen ball-and-paddle arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (collision rules, block tiers, power-ups, game phases)
//! - `catalog`: Level and power-up data loading
//! - `game`: Session driver (current level, scene reloads)
//! - `settings`: Data-driven game tuning

pub mod catalog;
pub mod game;
pub mod settings;
pub mod sim;

pub use catalog::{DataLoadError, Level, LevelCatalog, PowerUp, PowerUpCatalog};
pub use game::Game;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Host physics scale: impulses are divided by mass = area / PTM²
    pub const POINTS_PER_METER: f32 = 150.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    /// Ball spawn height as a fraction of the screen's half height
    pub const BALL_START_Y: f32 = 0.2;

    /// Paddle height as a fraction of screen height
    pub const PADDLE_HEIGHT: f32 = 0.025;
    /// Paddle height above the ground as a fraction of the screen's half height
    pub const PADDLE_START_Y: f32 = 0.1;

    /// Ground strip height as a fraction of screen height
    pub const GROUND_HEIGHT: f32 = 0.02;

    /// Block size as fractions of the screen
    pub const BLOCK_WIDTH: f32 = 0.15;
    pub const BLOCK_HEIGHT: f32 = 0.04;
    /// Horizontal step between block columns (fraction of screen width)
    pub const BLOCK_COLUMN_STEP: f32 = 0.16;
    /// Vertical step between block rows (fraction of screen height)
    pub const BLOCK_ROW_STEP: f32 = 0.045;
    /// Grid origin divisors applied to the screen's half extents
    pub const BLOCK_X_OFFSET_DIVISOR: f32 = 2.7;
    pub const BLOCK_Y_OFFSET_DIVISOR: f32 = 2.5;

    /// Falling power-up sprite size (same footprint as a block)
    pub const POWER_UP_WIDTH: f32 = 0.15;
    pub const POWER_UP_HEIGHT: f32 = 0.04;
}

/// Scale a (width, height) pair given as fractions of the screen into points
#[inline]
pub fn screen_fraction(screen: Vec2, fx: f32, fy: f32) -> Vec2 {
    Vec2::new(screen.x * fx, screen.y * fy)
}
