//! Per-frame simulation tick
//!
//! Input first, then the stall correction, then one physics step whose
//! contact-begin events are classified and applied in order.

use glam::Vec2;

use super::block::HitOutcome;
use super::category::{ContactEvent, classify};
use super::physics::{BodyHandle, PhysicsWorld};
use super::powerup::FallingPowerUp;
use super::state::{GamePhase, GameState};

/// Input events gathered since the last tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Finger went down
    pub touch_began: bool,
    /// Horizontal finger movement since the last report (points)
    pub touch_moved: Option<f32>,
    /// Finger lifted
    pub touch_ended: bool,
}

/// Advance the scene by one frame
pub fn tick<W: PhysicsWorld>(state: &mut GameState<W>, input: &TickInput, dt: f32) {
    state.time_ticks += 1;

    // Cosmetic timers
    state.paddle.hit_flash = (state.paddle.hit_flash - dt).max(0.0);
    for flash in &mut state.flashes {
        flash.ttl -= dt;
    }
    state.flashes.retain(|f| f.ttl > 0.0);

    if input.touch_began {
        state.touch_began();
    }
    if let Some(dx) = input.touch_moved {
        state.touch_moved(dx);
    }
    if input.touch_ended {
        state.touch_ended();
    }

    if state.phase == GamePhase::Playing {
        state.keep_ball_moving();
    }

    for contact in state.world.step(dt) {
        match classify(contact.a, contact.b) {
            Some(event) => state.handle_contact(event),
            None => log::debug!("Ignored contact {:?} / {:?}", contact.a.0, contact.b.0),
        }
    }
}

impl<W: PhysicsWorld> GameState<W> {
    /// Tap: restarts after game over, otherwise nothing
    pub fn touch_began(&mut self) {
        match self.phase {
            GamePhase::GameOver => self.request_reload(),
            phase => log::debug!("Touch began in {}", phase.as_str()),
        }
    }

    /// Drag the paddle; before launch the ball rides along
    pub fn touch_moved(&mut self, dx: f32) {
        self.paddle.slide(dx, self.settings.screen_width);
        self.world.set_position(self.paddle.body, self.paddle.pos);

        if self.phase == GamePhase::WaitingForTap {
            if let Some(ball) = &self.ball {
                if let Some(pos) = self.world.position(ball.body) {
                    self.world
                        .set_position(ball.body, Vec2::new(self.paddle.pos.x, pos.y));
                }
            }
        }
    }

    /// Release: launch the ball (rejected unless waiting)
    pub fn touch_ended(&mut self) {
        self.enter(GamePhase::Playing);
    }

    /// Kick the ball on any axis whose speed has stalled, so it can't settle
    /// into a purely horizontal or vertical bounce
    pub fn keep_ball_moving(&mut self) {
        let Some(body) = self.ball.as_ref().map(|b| b.body) else {
            return;
        };
        let Some(vel) = self.world.velocity(body) else {
            return;
        };

        let min_speed = self.settings.min_axis_speed;
        if vel.x.abs() <= min_speed {
            let dx = self.random_direction();
            self.world.apply_impulse(body, Vec2::new(dx, 0.0));
        }
        if vel.y.abs() <= min_speed {
            let dy = self.random_direction();
            self.world.apply_impulse(body, Vec2::new(0.0, dy));
        }
    }

    /// Apply one classified contact
    pub fn handle_contact(&mut self, event: ContactEvent) {
        match event {
            ContactEvent::BallPaddle { .. } => {
                self.paddle.hit_flash = self.settings.paddle_flash_secs;
            }
            ContactEvent::BallGround { ball } => {
                if self.phase != GamePhase::Playing {
                    log::debug!("Ball touched ground in {}", self.phase.as_str());
                    return;
                }
                self.world.remove_body(ball);
                self.ball = None;
                self.enter(GamePhase::GameOver);
            }
            ContactEvent::BallBlock { block, .. } => {
                self.break_block(block);
                if self.is_won() {
                    self.enter(GamePhase::GameOver);
                }
            }
            ContactEvent::GroundPowerUp { power_up } => {
                self.remove_pickup(power_up);
            }
            ContactEvent::PaddlePowerUp { power_up } => {
                if let Some(pickup) = self.remove_pickup(power_up) {
                    self.resize_paddle(&pickup.effect());
                }
            }
        }
    }

    fn break_block(&mut self, body: BodyHandle) {
        let Some(index) = self.blocks.iter().position(|b| b.body == body) else {
            log::debug!("Contact with missing block {:?}", body);
            return;
        };

        let (pos, size) = (self.blocks[index].pos, self.blocks[index].size);
        match self.blocks[index].hit() {
            HitOutcome::Downgraded(tier) => {
                self.flash(pos, size);
                log::debug!("Block {:?} -> {}", body, tier.as_str());
            }
            HitOutcome::Destroyed => {
                self.release_power_up(pos);
                self.flash(pos, size);
                self.blocks.remove(index);
                self.world.remove_body(body);
                log::debug!("Block {:?} destroyed, {} left", body, self.blocks.len());
            }
            HitOutcome::Ignored => log::debug!("Block {:?} ignored hit", body),
        }
    }

    fn remove_pickup(&mut self, body: BodyHandle) -> Option<FallingPowerUp> {
        let index = self.pickups.iter().position(|p| p.body == body)?;
        self.world.remove_body(body);
        Some(self.pickups.remove(index))
    }
}
