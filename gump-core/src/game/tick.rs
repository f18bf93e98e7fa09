//! Simulation Tick
//!
//! One fixed step of the game: input → motion → ground resolution → state
//! derivation. Deterministic for a given config and input sequence.

use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::config::GameConfig;
use crate::game::events::GameEvent;
use crate::game::input::{InputFrame, InputRecording};
use crate::game::platform::Platform;
use crate::game::player::Player;

/// Everything the loop mutates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct World {
    /// Ticks simulated so far
    pub tick: u32,
    /// The controllable character
    pub player: Player,
    /// Static ground
    pub platforms: Vec<Platform>,
}

impl World {
    /// Fresh world: player at its starting position above the base platform.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            tick: 0,
            player: Player::new(config),
            platforms: vec![Platform::new(config)],
        }
    }
}

/// Result of a tick.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Events generated this tick
    pub events: Vec<GameEvent>,
}

/// Run one simulation tick.
pub fn tick(world: &mut World, input: InputFrame, config: &GameConfig) -> TickResult {
    let mut result = TickResult::default();

    world.tick += 1;
    let t = world.tick;

    let player = &mut world.player;
    let was_on_ground = player.on_ground;
    let old_state = player.current_state();

    // 1. Motion (jump is attempted inside)
    let jumped = player.move_with(input, config);

    // 2. Ground resolution and state derivation
    let new_state = player.update(&world.platforms, config);

    #[cfg(feature = "debug-tracing")]
    tracing::trace!(tick = t, position = %player.position, velocity = %player.velocity, "tick");

    if jumped {
        result.events.push(GameEvent::jumped(t, player.position));
    } else if was_on_ground && !player.on_ground {
        result.events.push(GameEvent::left_ground(t, player.position));
    }
    if !was_on_ground && player.on_ground {
        result.events.push(GameEvent::landed(t, player.position));
    }
    if new_state != old_state {
        debug!(tick = t, "New state: {}", new_state);
        result.events.push(GameEvent::state_changed(t, old_state, new_state));
    }

    result
}

/// Replay a recording from a fresh world.
///
/// Returns the final world and every event produced.
pub fn replay(recording: &InputRecording, config: &GameConfig) -> (World, Vec<GameEvent>) {
    let mut world = World::new(config);
    let mut all_events = Vec::new();

    for (_, input) in recording.replay_iter() {
        let result = tick(&mut world, input, config);
        all_events.extend(result.events);
    }

    (world, all_events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hash::compute_world_hash;
    use crate::game::events::GameEventData;
    use crate::game::state::{Facing, Mode, PlayerState};
    use rand::{Rng, SeedableRng};
    use rand::rngs::StdRng;

    fn settle(world: &mut World, config: &GameConfig) {
        while !world.player.on_ground {
            tick(world, InputFrame::empty(), config);
        }
    }

    #[test]
    fn test_first_landing_events() {
        let config = GameConfig::default();
        let mut world = World::new(&config);

        let mut events = Vec::new();
        for _ in 0..100 {
            events.extend(tick(&mut world, InputFrame::empty(), &config).events);
        }

        let landings: Vec<_> = events
            .iter()
            .filter(|e| matches!(e.data, GameEventData::Landed { .. }))
            .collect();
        assert_eq!(landings.len(), 1);

        let changes: Vec<_> = events
            .iter()
            .filter_map(|e| match e.data {
                GameEventData::StateChanged { new, .. } => Some(new),
                _ => None,
            })
            .collect();
        assert_eq!(changes, vec![PlayerState::stand()]);
    }

    #[test]
    fn test_jump_and_land() {
        let config = GameConfig::default();
        let mut world = World::new(&config);
        settle(&mut world, &config);

        let result = tick(&mut world, InputFrame::UP, &config);
        assert!(matches!(result.events[0].data, GameEventData::Jumped { .. }));
        assert!(!world.player.on_ground);
        assert_eq!(
            world.player.current_state(),
            PlayerState::new(Facing::None, Mode::Jump, None)
        );

        // Holding up while airborne does nothing; the player comes back down
        let mut landed = false;
        for _ in 0..60 {
            let result = tick(&mut world, InputFrame::UP, &config);
            if result.events.iter().any(|e| matches!(e.data, GameEventData::Landed { .. })) {
                landed = true;
                break;
            }
        }
        assert!(landed);
    }

    #[test]
    fn test_tick_determinism() {
        let config = GameConfig::default();
        let mut world1 = World::new(&config);
        let mut world2 = World::new(&config);

        let mut rng = StdRng::seed_from_u64(12345);
        for _ in 0..500 {
            let input = InputFrame::from_bits_truncate(rng.gen::<u8>());
            tick(&mut world1, input, &config);
            tick(&mut world2, input, &config);
        }

        assert_eq!(world1, world2);
        assert_eq!(compute_world_hash(&world1), compute_world_hash(&world2));
    }

    #[test]
    fn test_replay_matches_live_run() {
        let config = GameConfig::default();
        let mut world = World::new(&config);
        let mut recording = InputRecording::new(1);
        let mut live_events = Vec::new();

        let mut rng = StdRng::seed_from_u64(99999);
        let mut input = InputFrame::empty();
        for _ in 0..300 {
            // Hold each input for a while, like a person would
            if rng.gen_bool(0.1) {
                input = InputFrame::from_bits_truncate(rng.gen::<u8>());
            }
            let result = tick(&mut world, input, &config);
            recording.record(world.tick, input);
            live_events.extend(result.events);
        }

        let (replayed, replay_events) = replay(&recording, &config);
        assert_eq!(replayed.tick, world.tick);
        assert_eq!(compute_world_hash(&replayed), compute_world_hash(&world));
        assert_eq!(replay_events, live_events);
    }
}
