//! Session driver
//!
//! Owns the catalogs and the current level index, and swaps in a freshly built
//! scene whenever the active one asks for a reload.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::catalog::{LevelCatalog, PowerUpCatalog};
use crate::settings::Settings;
use crate::sim::{ArcadeWorld, GameState, PhysicsWorld, TickInput, next_level_index, tick};

/// A running game: one scene at a time
pub struct Game<W = ArcadeWorld> {
    settings: Settings,
    levels: LevelCatalog,
    power_ups: PowerUpCatalog,
    current_level: usize,
    /// Master RNG, hands each new scene its own seed
    rng: Pcg32,
    scene: GameState<W>,
}

impl<W: PhysicsWorld + Default> Game<W> {
    pub fn new(
        settings: Settings,
        levels: LevelCatalog,
        power_ups: PowerUpCatalog,
        seed: u64,
    ) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let scene = build_scene(&settings, &levels, &power_ups, 0, &mut rng);
        Self {
            settings,
            levels,
            power_ups,
            current_level: 0,
            rng,
            scene,
        }
    }

    pub fn current_level(&self) -> usize {
        self.current_level
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn scene(&self) -> &GameState<W> {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut GameState<W> {
        &mut self.scene
    }

    /// Tick the active scene, then reload it if it asked to
    pub fn tick(&mut self, input: &TickInput, dt: f32) {
        tick(&mut self.scene, input, dt);
        if self.scene.take_reload_request() {
            self.reload();
        }
    }

    /// Replace the scene: next level after a win, same level after a loss
    pub fn reload(&mut self) {
        let won = self.scene.is_won();
        let next = next_level_index(self.current_level, self.levels.len(), won);
        if won && next == 0 {
            log::info!("All {} levels cleared, wrapping to level 0", self.levels.len());
        } else if won {
            log::info!("Advancing to level {}", next);
        } else {
            log::info!("Restarting level {}", next);
        }

        self.current_level = next;
        self.scene = build_scene(
            &self.settings,
            &self.levels,
            &self.power_ups,
            next,
            &mut self.rng,
        );
    }
}

fn build_scene<W: PhysicsWorld + Default>(
    settings: &Settings,
    levels: &LevelCatalog,
    power_ups: &PowerUpCatalog,
    level_index: usize,
    rng: &mut Pcg32,
) -> GameState<W> {
    GameState::new(
        W::default(),
        settings.clone(),
        level_index,
        levels.get(level_index).clone(),
        power_ups.clone(),
        rng.random(),
    )
}
