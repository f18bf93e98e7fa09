//! Gump headless simulator
//!
//! Drives a scripted session through the simulation, logs what happens and
//! checks that replaying the recorded input reproduces the final state.

use anyhow::{bail, Context};
use tracing::info;
use tracing_subscriber::EnvFilter;

use gump::{
    config::{GameConfig, CONFIG_FILE},
    core::hash::compute_world_hash,
    game::{
        events::GameEventData,
        input::{InputFrame, InputRecording},
        tick::{replay, tick, World},
    },
    VERSION,
};

/// (ticks to hold, input) pairs for the demo session.
const SCRIPT: &[(u32, InputFrame)] = &[
    (60, InputFrame::empty()),
    (90, InputFrame::RIGHT),
    (1, InputFrame::RIGHT.union(InputFrame::UP)),
    (60, InputFrame::RIGHT),
    (120, InputFrame::LEFT),
    (30, InputFrame::LEFT.union(InputFrame::UP)),
    (90, InputFrame::empty()),
];

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Gump simulator v{}", VERSION);

    let config = GameConfig::load_or_default(CONFIG_FILE)
        .with_context(|| format!("loading {}", CONFIG_FILE))?;
    info!(
        "Canvas {}x{} @ {} FPS, gravity {}",
        config.canvas.width, config.canvas.height, config.canvas.fps, config.gravity
    );

    run_script(&config)
}

/// Play the script, then replay its recording and compare hashes.
fn run_script(config: &GameConfig) -> anyhow::Result<()> {
    info!("=== Starting Scripted Session ===");

    let mut world = World::new(config);
    let mut recording = InputRecording::new(1);
    let mut total_events = 0;

    for &(hold, input) in SCRIPT {
        for _ in 0..hold {
            let result = tick(&mut world, input, config);
            recording.record(world.tick, input);
            total_events += result.events.len();

            for event in &result.events {
                match &event.data {
                    GameEventData::Jumped { position } => {
                        info!("Tick {}: jumped from {}", event.tick, position);
                    }
                    GameEventData::Landed { position } => {
                        info!("Tick {}: landed at {}", event.tick, position);
                    }
                    GameEventData::LeftGround { position } => {
                        info!("Tick {}: left the ground at {}", event.tick, position);
                    }
                    GameEventData::StateChanged { .. } => {}
                }
            }

            // Report every second
            if world.tick % config.canvas.fps == 0 {
                let player = &world.player;
                info!(
                    "Tick {}: {} at {} moving {}",
                    world.tick,
                    player.current_state(),
                    player.position,
                    player.velocity
                );
            }
        }
    }

    info!("=== Session Results ===");
    let hash = compute_world_hash(&world);
    info!("Ticks: {}, events: {}", world.tick, total_events);
    info!("Input changes recorded: {}", recording.delta_count());
    info!("Final State Hash: {}", hex::encode(hash));

    info!("=== Verifying Replay ===");
    let (replayed, replay_events) = replay(&recording, config);
    let replay_hash = compute_world_hash(&replayed);
    info!("Replay State Hash: {}", hex::encode(replay_hash));

    if hash != replay_hash || replay_events.len() != total_events {
        bail!(
            "replay diverged: {} vs {} ({} vs {} events)",
            hex::encode(hash),
            hex::encode(replay_hash),
            total_events,
            replay_events.len()
        );
    }

    info!("REPLAY VERIFIED: Hashes match!");
    Ok(())
}
