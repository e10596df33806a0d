//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (physics bodies keyed by handle)
//! - No rendering or platform dependencies

pub mod block;
pub mod category;
pub mod collision;
pub mod level;
pub mod paddle;
pub mod physics;
pub mod powerup;
pub mod state;
pub mod tick;
pub mod view;

pub use block::{Advance, Block, BlockKind, HitOutcome, Tier};
pub use category::{Category, ContactEvent, classify};
pub use collision::CollisionResult;
pub use level::{is_won, next_level_index};
pub use paddle::{Paddle, PaddleWidth};
pub use physics::{ArcadeWorld, BodyDesc, BodyHandle, CategoryMask, Contact, PhysicsWorld, Shape};
pub use powerup::{Effect, FallingPowerUp};
pub use state::{Ball, Flash, GameMessage, GamePhase, GameState};
pub use tick::{TickInput, tick};
pub use view::SceneView;
