//! Brick Breaker entry point
//!
//! Headless runner: loads the bundled data and lets an autopilot play a fixed
//! number of frames, logging every phase and level change.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;

use brick_breaker::sim::{GamePhase, GameState, PhysicsWorld, TickInput};
use brick_breaker::{Game, LevelCatalog, PowerUpCatalog, Settings};

/// Simulation frame length (the host renders at 60 Hz)
const FRAME_DT: f32 = 1.0 / 60.0;
/// Fastest the autopilot's finger moves (points per frame)
const AUTOPILOT_MAX_DRAG: f32 = 12.0;

#[derive(Parser, Debug)]
#[command(version, about = "Run a headless autoplay session")]
struct Args {
    /// Directory holding levels.json, powers.json and optional settings.json
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// Number of frames to simulate
    #[arg(long, default_value_t = 60 * 120)]
    frames: u32,

    /// RNG seed (overrides settings.json; default: wall clock)
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    log::info!("Brick Breaker (headless) starting...");

    let settings = Settings::load_or_default(args.assets.join("settings.json"));
    let levels = match LevelCatalog::load(args.assets.join("levels.json")) {
        Ok(levels) => levels,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };
    let power_ups = match PowerUpCatalog::load(args.assets.join("powers.json")) {
        Ok(power_ups) => power_ups,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let seed = args
        .seed
        .or(settings.seed)
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        });
    log::info!("Seed {}", seed);

    let mut game: Game = Game::new(settings, levels, power_ups, seed);
    let mut last_phase = game.scene().phase;
    let mut last_level = game.current_level();
    let mut losses = 0u32;
    let mut clears = 0u32;

    for frame in 0..args.frames {
        let input = autopilot(game.scene(), frame);
        game.tick(&input, FRAME_DT);

        let phase = game.scene().phase;
        let level = game.current_level();
        if level != last_level {
            clears += 1;
            log::info!("Frame {}: now on level {}", frame, level);
        }
        if phase != last_phase {
            if phase == GamePhase::GameOver && !game.scene().is_won() {
                losses += 1;
            }
            log::info!("Frame {}: {}", frame, phase.as_str());
        }
        last_phase = phase;
        last_level = level;
    }

    println!(
        "Simulated {} frames: level {} of {}, {} levels cleared, {} balls lost",
        args.frames,
        game.current_level(),
        game.level_count(),
        clears,
        losses
    );
}

/// Touch input an attentive player would produce this frame
fn autopilot<W: PhysicsWorld>(state: &GameState<W>, frame: u32) -> TickInput {
    match state.phase {
        GamePhase::WaitingForTap => TickInput {
            touch_ended: true,
            ..Default::default()
        },
        GamePhase::GameOver => TickInput {
            touch_began: true,
            ..Default::default()
        },
        GamePhase::Playing => {
            let Some(view) = state.view().ball else {
                return TickInput::default();
            };
            // Wobble around the ball so rallies don't loop forever
            let t = frame as f32 * 0.02;
            let offset = t.sin() * state.paddle.size.x * 0.3;
            let dx = (view.pos.x + offset - state.paddle.pos.x)
                .clamp(-AUTOPILOT_MAX_DRAG, AUTOPILOT_MAX_DRAG);
            TickInput {
                touch_moved: Some(dx),
                ..Default::default()
            }
        }
    }
}
