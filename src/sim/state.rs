//! Game state and core simulation types
//!
//! One `GameState` is one scene: the level's blocks, the ball, the paddle and
//! the phase machine. Reloading builds a brand new `GameState`; nothing is
//! carried over except what the caller passes in.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::block::{Block, BlockKind};
use super::category::Category;
use super::level;
use super::paddle::{Paddle, PaddleWidth};
use super::physics::{ArcadeWorld, BodyDesc, BodyHandle, CategoryMask, PhysicsWorld, Shape};
use super::powerup::{Effect, FallingPowerUp};
use crate::catalog::{Level, PowerUpCatalog};
use crate::consts::*;
use crate::screen_fraction;
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball resting above the paddle, message shown, waiting for the first release
    WaitingForTap,
    /// Active gameplay
    Playing,
    /// Ball lost or level cleared
    GameOver,
}

impl GamePhase {
    /// Legal transitions: WaitingForTap → Playing → GameOver → WaitingForTap
    pub fn is_valid_next_state(self, next: GamePhase) -> bool {
        matches!(
            (self, next),
            (GamePhase::WaitingForTap, GamePhase::Playing)
                | (GamePhase::Playing, GamePhase::GameOver)
                | (GamePhase::GameOver, GamePhase::WaitingForTap)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::WaitingForTap => "WaitingForTap",
            GamePhase::Playing => "Playing",
            GamePhase::GameOver => "GameOver",
        }
    }
}

/// The ball entity
#[derive(Debug, Clone)]
pub struct Ball {
    pub body: BodyHandle,
    pub radius: f32,
}

/// Center-screen label ("Level N" / "Try again")
#[derive(Debug, Clone, PartialEq)]
pub struct GameMessage {
    pub text: String,
    /// 1.0 = visible, 0.0 = hidden
    pub scale: f32,
}

/// Short white flash over a hit block (purely visual)
#[derive(Debug, Clone)]
pub struct Flash {
    pub pos: Vec2,
    pub size: Vec2,
    /// Seconds remaining
    pub ttl: f32,
}

/// Text shown after losing the ball
pub const TRY_AGAIN: &str = "Try again";

/// Complete scene state
#[derive(Debug)]
pub struct GameState<W = ArcadeWorld> {
    pub settings: Settings,
    /// Index of the level this scene was built from
    pub level_index: usize,
    pub level: Level,
    power_up_catalog: PowerUpCatalog,
    /// Physics engine owning every body below
    pub world: W,
    rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// None once the ball has fallen
    pub ball: Option<Ball>,
    pub paddle: Paddle,
    /// Live blocks, destroyed ones are removed
    pub blocks: Vec<Block>,
    /// Falling power-ups
    pub pickups: Vec<FallingPowerUp>,
    pub flashes: Vec<Flash>,
    pub message: GameMessage,
    /// Simulation tick counter
    pub time_ticks: u64,
    reload_requested: bool,
}

impl<W: PhysicsWorld> GameState<W> {
    /// Build a scene for `level` and enter `WaitingForTap`
    pub fn new(
        mut world: W,
        settings: Settings,
        level_index: usize,
        level: Level,
        power_up_catalog: PowerUpCatalog,
        seed: u64,
    ) -> Self {
        let screen = settings.screen();

        world.create_body(border_desc(screen));
        world.create_body(ground_desc(screen));

        let blocks = build_blocks(&mut world, screen, &level);

        let ball_pos = Vec2::new(screen.x / 2.0, screen.y / 2.0 * BALL_START_Y);
        let ball = Ball {
            body: world.create_body(ball_desc(ball_pos)),
            radius: BALL_RADIUS,
        };

        let width = PaddleWidth::Normal;
        let size = Vec2::new(
            width.points(screen.x, &settings.paddle),
            screen.y * PADDLE_HEIGHT,
        );
        let pos = Vec2::new(screen.x / 2.0, screen.y / 2.0 * PADDLE_START_Y);
        let paddle = Paddle {
            body: world.create_body(paddle_desc(pos, size)),
            pos,
            width,
            size,
            hit_flash: 0.0,
        };

        log::info!(
            "Scene built: level {} (id {}), {} blocks, {} indestructible",
            level_index,
            level.id,
            blocks.len(),
            level.indestructible_count()
        );

        let mut state = Self {
            settings,
            level_index,
            message: GameMessage {
                text: format!("Level {}", level_index),
                scale: 0.0,
            },
            level,
            power_up_catalog,
            world,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::WaitingForTap,
            ball: Some(ball),
            paddle,
            blocks,
            pickups: Vec::new(),
            flashes: Vec::new(),
            time_ticks: 0,
            reload_requested: false,
        };
        state.on_enter(GamePhase::WaitingForTap, None);
        state
    }

    /// Request a phase change. Illegal transitions are rejected and leave the
    /// phase untouched.
    pub fn enter(&mut self, next: GamePhase) -> bool {
        if !self.phase.is_valid_next_state(next) {
            log::debug!(
                "Rejected transition {} -> {}",
                self.phase.as_str(),
                next.as_str()
            );
            return false;
        }

        let previous = self.phase;
        self.on_exit(previous);
        self.phase = next;
        log::info!("Phase {} -> {}", previous.as_str(), next.as_str());
        self.on_enter(next, Some(previous));
        true
    }

    fn on_enter(&mut self, phase: GamePhase, previous: Option<GamePhase>) {
        match phase {
            GamePhase::WaitingForTap => {
                self.message.scale = 1.0;
            }
            GamePhase::Playing => {
                if previous == Some(GamePhase::WaitingForTap) {
                    let impulse = Vec2::new(self.random_direction(), self.random_direction());
                    if let Some(ball) = &self.ball {
                        self.world.apply_impulse(ball.body, impulse);
                    }
                }
            }
            GamePhase::GameOver => {
                if self.is_won() {
                    log::info!("Level {} cleared", self.level_index);
                    self.reload_requested = true;
                } else {
                    self.message.text = TRY_AGAIN.to_string();
                    self.message.scale = 1.0;
                }
            }
        }
    }

    fn on_exit(&mut self, phase: GamePhase) {
        if phase == GamePhase::WaitingForTap {
            self.message.scale = 0.0;
        }
    }

    /// Whether only indestructible blocks remain (recomputed on every call)
    pub fn is_won(&self) -> bool {
        level::is_won(self.blocks.len(), &self.level)
    }

    /// Consume a pending reload request (set on win or by a tap after game over)
    pub fn take_reload_request(&mut self) -> bool {
        std::mem::take(&mut self.reload_requested)
    }

    pub fn reload_requested(&self) -> bool {
        self.reload_requested
    }

    pub(super) fn request_reload(&mut self) {
        self.reload_requested = true;
    }

    /// ±launch impulse with an unbiased coin flip
    pub(super) fn random_direction(&mut self) -> f32 {
        let speed = self.settings.launch_impulse;
        if self.rng.random_bool(0.5) { -speed } else { speed }
    }

    /// Roll for a power-up and drop it at `pos`
    pub(super) fn release_power_up(&mut self, pos: Vec2) {
        let Some(power_up) = self.power_up_catalog.select(&mut self.rng) else {
            return;
        };
        let name = power_up.image.clone();

        let size = screen_fraction(self.settings.screen(), POWER_UP_WIDTH, POWER_UP_HEIGHT);
        let body = self.world.create_body(power_up_desc(pos, size));
        self.world
            .apply_impulse(body, Vec2::new(0.0, -self.settings.power_up_impulse));
        log::debug!("Dropped power-up '{}' at {:?}", name, pos);
        self.pickups.push(FallingPowerUp { body, name, size });
    }

    /// Step the paddle width for `effect` and rebuild its collision shape.
    /// A grown paddle is pushed back inside the screen.
    pub(super) fn resize_paddle(&mut self, effect: &Effect) {
        let width = self.paddle.width.resize(effect);
        let screen_width = self.settings.screen_width;
        self.paddle.width = width;
        self.paddle.size.x = width.points(screen_width, &self.settings.paddle);
        self.paddle.slide(0.0, screen_width);

        self.world.set_shape(
            self.paddle.body,
            Shape::Rect {
                size: self.paddle.size,
            },
        );
        self.world.set_position(self.paddle.body, self.paddle.pos);
        log::debug!("Paddle resized to {:?} ({} pts)", width, self.paddle.size.x);
    }

    pub(super) fn flash(&mut self, pos: Vec2, size: Vec2) {
        self.flashes.push(Flash {
            pos,
            size,
            ttl: self.settings.block_flash_secs,
        });
    }
}

fn build_blocks<W: PhysicsWorld>(world: &mut W, screen: Vec2, level: &Level) -> Vec<Block> {
    let size = screen_fraction(screen, BLOCK_WIDTH, BLOCK_HEIGHT);
    let origin = Vec2::new(
        screen.x / 2.0 / BLOCK_X_OFFSET_DIVISOR,
        screen.y - screen.y / 2.0 / BLOCK_Y_OFFSET_DIVISOR,
    );
    let step = Vec2::new(screen.x * BLOCK_COLUMN_STEP, -screen.y * BLOCK_ROW_STEP);

    let mut blocks = Vec::with_capacity(level.block_count());
    for (row, tags) in level.blocks.iter().enumerate() {
        for (col, tag) in tags.iter().enumerate() {
            let kind = BlockKind::from_tag(tag);
            if let BlockKind::Unknown(tag) = &kind {
                log::warn!(
                    "Level {}: unknown block tag '{}' at row {}, column {}",
                    level.id,
                    tag,
                    row,
                    col
                );
            }
            let pos = origin + step * Vec2::new(col as f32, row as f32);
            blocks.push(Block {
                body: world.create_body(block_desc(pos, size)),
                kind,
                pos,
                size,
            });
        }
    }
    blocks
}

fn border_desc(screen: Vec2) -> BodyDesc {
    BodyDesc {
        friction: 0.0,
        ..BodyDesc::new(
            Category::Border,
            Shape::EdgeLoop { size: screen },
            screen / 2.0,
        )
    }
}

fn ground_desc(screen: Vec2) -> BodyDesc {
    BodyDesc::new(
        Category::Ground,
        Shape::Rect {
            size: Vec2::new(screen.x, screen.y * GROUND_HEIGHT),
        },
        Vec2::new(screen.x / 2.0, 0.0),
    )
}

fn block_desc(pos: Vec2, size: Vec2) -> BodyDesc {
    BodyDesc {
        friction: 0.0,
        allows_rotation: false,
        ..BodyDesc::new(Category::Block, Shape::Rect { size }, pos)
    }
}

fn ball_desc(pos: Vec2) -> BodyDesc {
    BodyDesc {
        dynamic: true,
        friction: 0.0,
        restitution: 1.0,
        allows_rotation: false,
        collides_with: CategoryMask::BLOCK
            | CategoryMask::GROUND
            | CategoryMask::PADDLE
            | CategoryMask::BORDER,
        contacts_with: CategoryMask::BLOCK | CategoryMask::GROUND | CategoryMask::PADDLE,
        ..BodyDesc::new(
            Category::Ball,
            Shape::Circle {
                radius: BALL_RADIUS,
            },
            pos,
        )
    }
}

fn paddle_desc(pos: Vec2, size: Vec2) -> BodyDesc {
    BodyDesc {
        friction: 0.0,
        restitution: 1.0,
        ..BodyDesc::new(Category::Paddle, Shape::Rect { size }, pos)
    }
}

fn power_up_desc(pos: Vec2, size: Vec2) -> BodyDesc {
    BodyDesc {
        dynamic: true,
        collides_with: CategoryMask::GROUND,
        contacts_with: CategoryMask::PADDLE | CategoryMask::GROUND,
        ..BodyDesc::new(Category::PowerUp, Shape::Rect { size }, pos)
    }
}
