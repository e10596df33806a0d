//! Paddle sizing
//!
//! Three widths. `expand` moves one step toward large, `reduce` one step toward
//! small, anything else snaps back to normal.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::physics::BodyHandle;
use super::powerup::Effect;
use crate::settings::PaddleRatios;

/// Paddle width step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaddleWidth {
    Small,
    #[default]
    Normal,
    Large,
}

impl PaddleWidth {
    pub fn resize(self, effect: &Effect) -> Self {
        match effect {
            Effect::Expand => match self {
                PaddleWidth::Small => PaddleWidth::Normal,
                _ => PaddleWidth::Large,
            },
            Effect::Reduce => match self {
                PaddleWidth::Large => PaddleWidth::Normal,
                _ => PaddleWidth::Small,
            },
            Effect::Other(_) => PaddleWidth::Normal,
        }
    }

    /// Width in points for a given screen width
    pub fn points(self, screen_width: f32, ratios: &PaddleRatios) -> f32 {
        let ratio = match self {
            PaddleWidth::Small => ratios.small,
            PaddleWidth::Normal => ratios.normal,
            PaddleWidth::Large => ratios.large,
        };
        screen_width * ratio
    }
}

/// Texture shown while idle
pub const PADDLE_TEXTURE: &str = "paddle";
/// Texture shown briefly after the ball bounces off
pub const PADDLE_HIT_TEXTURE: &str = "paddle_texture";

/// The player's paddle
#[derive(Debug, Clone)]
pub struct Paddle {
    pub body: BodyHandle,
    pub pos: Vec2,
    pub width: PaddleWidth,
    /// Full size in points
    pub size: Vec2,
    /// Seconds left on the hit texture
    pub hit_flash: f32,
}

impl Paddle {
    /// Move horizontally by `dx`, keeping the paddle fully on screen
    pub fn slide(&mut self, dx: f32, screen_width: f32) {
        let half = self.size.x / 2.0;
        self.pos.x = (self.pos.x + dx).max(half).min(screen_width - half);
    }

    pub fn texture(&self) -> &'static str {
        if self.hit_flash > 0.0 {
            PADDLE_HIT_TEXTURE
        } else {
            PADDLE_TEXTURE
        }
    }
}
