//! Read-only snapshot of a scene for the renderer

use glam::Vec2;
use serde::Serialize;

use super::physics::PhysicsWorld;
use super::state::{GamePhase, GameState};

/// A textured rectangle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpriteView {
    pub pos: Vec2,
    pub size: Vec2,
    pub texture: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BallView {
    pub pos: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageView {
    pub text: String,
    pub scale: f32,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneView {
    pub level_index: usize,
    pub phase: GamePhase,
    pub ball: Option<BallView>,
    pub paddle: SpriteView,
    pub blocks: Vec<SpriteView>,
    pub pickups: Vec<SpriteView>,
    /// White flash rectangles over recently hit blocks
    pub flashes: Vec<(Vec2, Vec2)>,
    pub message: MessageView,
}

impl<W: PhysicsWorld> GameState<W> {
    pub fn view(&self) -> SceneView {
        let ball = self.ball.as_ref().and_then(|ball| {
            self.world.position(ball.body).map(|pos| BallView {
                pos,
                radius: ball.radius,
            })
        });

        let pickups = self
            .pickups
            .iter()
            .filter_map(|p| {
                let pos = self.world.position(p.body)?;
                Some(SpriteView {
                    pos,
                    size: p.size,
                    texture: p.name.clone(),
                })
            })
            .collect();

        SceneView {
            level_index: self.level_index,
            phase: self.phase,
            ball,
            paddle: SpriteView {
                pos: self.paddle.pos,
                size: self.paddle.size,
                texture: self.paddle.texture().to_string(),
            },
            blocks: self
                .blocks
                .iter()
                .map(|b| SpriteView {
                    pos: b.pos,
                    size: b.size,
                    texture: b.kind.texture().to_string(),
                })
                .collect(),
            pickups,
            flashes: self.flashes.iter().map(|f| (f.pos, f.size)).collect(),
            message: MessageView {
                text: self.message.text.clone(),
                scale: self.message.scale,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Level, PowerUpCatalog};
    use crate::settings::Settings;
    use crate::sim::physics::ArcadeWorld;
    use crate::sim::tick::{TickInput, tick};

    #[test]
    fn test_view_reflects_scene() {
        let level = Level {
            id: 0,
            blocks: vec![vec!["red".into(), "gray".into()]],
        };
        let mut state = GameState::new(
            ArcadeWorld::new(),
            Settings::default(),
            1,
            level,
            PowerUpCatalog::default(),
            5,
        );

        let view = state.view();
        assert_eq!(view.phase, GamePhase::WaitingForTap);
        assert_eq!(view.level_index, 1);
        assert_eq!(view.message.text, "Level 1");
        assert_eq!(view.message.scale, 1.0);
        let textures: Vec<_> = view.blocks.iter().map(|b| b.texture.as_str()).collect();
        assert_eq!(textures, ["red", "gray"]);
        assert_eq!(view.paddle.texture, "paddle");
        assert_eq!(view.ball.as_ref().unwrap().radius, 10.0);

        tick(
            &mut state,
            &TickInput {
                touch_ended: true,
                ..Default::default()
            },
            1.0 / 60.0,
        );
        let view = state.view();
        assert_eq!(view.phase, GamePhase::Playing);
        assert_eq!(view.message.scale, 0.0);
    }

    #[test]
    fn test_view_serializes() {
        let level = Level {
            id: 0,
            blocks: vec![vec!["green".into()]],
        };
        let state = GameState::new(
            ArcadeWorld::new(),
            Settings::default(),
            0,
            level,
            PowerUpCatalog::default(),
            5,
        );
        let json = serde_json::to_string(&state.view()).unwrap();
        assert!(json.contains("\"WaitingForTap\""));
        assert!(json.contains("\"green\""));
    }
}
