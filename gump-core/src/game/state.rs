//! Player State Machine
//!
//! Derives the symbolic movement/animation state from velocity and ground
//! contact. The state is a tagged value; the legacy bitmask key only exists at
//! the sprite-table boundary (`StateKey`).

use std::fmt;
use serde::{Serialize, Deserialize};

use crate::config::CLOSE_ENOUGH_TO_ZERO;
use crate::core::vec2::Vec2;

// =============================================================================
// STATE COMPONENTS
// =============================================================================

/// Horizontal orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    /// Neither direction (horizontal speed below the rest threshold)
    #[default]
    None,
    /// Facing left
    Left,
    /// Facing right
    Right,
}

/// Movement mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Mode {
    /// On the ground, not moving
    #[default]
    Stand,
    /// On the ground, moving
    Walk,
    /// Airborne, descending
    Fall,
    /// Airborne, rising
    Jump,
    /// Dead (loaded, never derived)
    Die,
}

/// Walk-cycle frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Phase {
    /// First walk frame
    One = 0,
    /// Second walk frame
    Two = 1,
    /// Third walk frame
    Three = 2,
    /// Fourth walk frame
    Four = 3,
}

impl Phase {
    /// All phases in cycle order.
    pub const ALL: [Phase; 4] = [Phase::One, Phase::Two, Phase::Three, Phase::Four];

    /// Get phase from index (0-3).
    pub fn from_index(index: u8) -> Option<Phase> {
        Self::ALL.get(index as usize).copied()
    }

    /// 1-based number used in sprite names.
    #[inline]
    pub fn number(self) -> u8 {
        self as u8 + 1
    }
}

// =============================================================================
// LEGACY KEY
// =============================================================================

bitflags::bitflags! {
    /// Legacy bitmask identifying a sprite.
    ///
    /// Bit layout: `DS#####LRJFW4321`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct StateKey: u16 {
        /// Walk frame 1
        const STATE1 = 1;
        /// Walk frame 2
        const STATE2 = 1 << 1;
        /// Walk frame 3
        const STATE3 = 1 << 2;
        /// Walk frame 4
        const STATE4 = 1 << 3;
        /// Walking
        const WALK = 1 << 4;
        /// Falling
        const FALL = 1 << 5;
        /// Jumping
        const JUMP = 1 << 6;
        /// Facing right
        const RIGHT = 1 << 7;
        /// Facing left
        const LEFT = 1 << 8;
        /// Standing
        const STAND = 1 << 14;
        /// Dead
        const DIE = 1 << 15;

        /// Any walk frame
        const PHASES = Self::STATE1.bits() | Self::STATE2.bits() | Self::STATE3.bits() | Self::STATE4.bits();
        /// Any facing
        const DIRECTIONAL = Self::LEFT.bits() | Self::RIGHT.bits();
        /// Any mode
        const MODES = Self::WALK.bits() | Self::FALL.bits() | Self::JUMP.bits() | Self::STAND.bits() | Self::DIE.bits();
    }
}

// =============================================================================
// PLAYER STATE
// =============================================================================

/// Derived player state: one mode, an optional facing, and a phase when walking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct PlayerState {
    /// Horizontal orientation
    pub facing: Facing,
    /// Movement mode
    pub mode: Mode,
    /// Walk frame (only with `Mode::Walk`)
    pub phase: Option<Phase>,
}

impl PlayerState {
    /// The 16 states that have sprites.
    pub const POPULATED: [PlayerState; 16] = [
        // Straight states
        Self::new(Facing::None, Mode::Stand, None),
        Self::new(Facing::None, Mode::Fall, None),
        Self::new(Facing::None, Mode::Jump, None),
        Self::new(Facing::None, Mode::Die, None),
        // Directional states
        Self::new(Facing::Right, Mode::Walk, Some(Phase::One)),
        Self::new(Facing::Right, Mode::Walk, Some(Phase::Two)),
        Self::new(Facing::Right, Mode::Walk, Some(Phase::Three)),
        Self::new(Facing::Right, Mode::Walk, Some(Phase::Four)),
        Self::new(Facing::Right, Mode::Fall, None),
        Self::new(Facing::Right, Mode::Jump, None),
        Self::new(Facing::Left, Mode::Walk, Some(Phase::One)),
        Self::new(Facing::Left, Mode::Walk, Some(Phase::Two)),
        Self::new(Facing::Left, Mode::Walk, Some(Phase::Three)),
        Self::new(Facing::Left, Mode::Walk, Some(Phase::Four)),
        Self::new(Facing::Left, Mode::Fall, None),
        Self::new(Facing::Left, Mode::Jump, None),
    ];

    /// Create a state from its parts.
    pub const fn new(facing: Facing, mode: Mode, phase: Option<Phase>) -> Self {
        Self { facing, mode, phase }
    }

    /// Standing, no facing.
    pub const fn stand() -> Self {
        Self::new(Facing::None, Mode::Stand, None)
    }

    /// Walking in `facing` at `phase`.
    pub const fn walk(facing: Facing, phase: Phase) -> Self {
        Self::new(facing, Mode::Walk, Some(phase))
    }

    /// Whether this state has a sprite.
    pub fn is_populated(&self) -> bool {
        Self::POPULATED.contains(self)
    }

    /// Convert to the legacy bitmask.
    pub fn to_key(self) -> StateKey {
        let mut key = match self.mode {
            Mode::Stand => StateKey::STAND,
            Mode::Walk => StateKey::WALK,
            Mode::Fall => StateKey::FALL,
            Mode::Jump => StateKey::JUMP,
            Mode::Die => StateKey::DIE,
        };

        match self.facing {
            Facing::None => {}
            Facing::Left => key |= StateKey::LEFT,
            Facing::Right => key |= StateKey::RIGHT,
        }

        if let Some(phase) = self.phase {
            key |= StateKey::from_bits_retain(1 << phase as u8);
        }

        key
    }

    /// Parse a legacy bitmask.
    ///
    /// Returns None for keys that break the invariants: unknown bits, zero or
    /// several modes, both facings, or a phase bit count that does not match
    /// the mode (exactly one with Walk, none otherwise).
    pub fn from_key(bits: u16) -> Option<Self> {
        let key = StateKey::from_bits(bits)?;

        let modes = key & StateKey::MODES;
        let mode = if modes == StateKey::STAND {
            Mode::Stand
        } else if modes == StateKey::WALK {
            Mode::Walk
        } else if modes == StateKey::FALL {
            Mode::Fall
        } else if modes == StateKey::JUMP {
            Mode::Jump
        } else if modes == StateKey::DIE {
            Mode::Die
        } else {
            return None;
        };

        let facings = key & StateKey::DIRECTIONAL;
        let facing = if facings.is_empty() {
            Facing::None
        } else if facings == StateKey::LEFT {
            Facing::Left
        } else if facings == StateKey::RIGHT {
            Facing::Right
        } else {
            return None;
        };

        let phases = (key & StateKey::PHASES).bits();
        let phase = match (mode, phases) {
            (Mode::Walk, 1) => Some(Phase::One),
            (Mode::Walk, 2) => Some(Phase::Two),
            (Mode::Walk, 4) => Some(Phase::Three),
            (Mode::Walk, 8) => Some(Phase::Four),
            (Mode::Walk, _) => return None,
            (_, 0) => None,
            _ => return None,
        };

        Some(Self { facing, mode, phase })
    }

    /// Legacy symbolic name, lower-cased and hyphen-joined
    /// (`stand`, `walk-right-1`, `fall-left`, ...).
    pub fn name(&self) -> String {
        let mut name = String::from(match self.mode {
            Mode::Stand => "stand",
            Mode::Walk => "walk",
            Mode::Fall => "fall",
            Mode::Jump => "jump",
            Mode::Die => "die",
        });

        match self.facing {
            Facing::None => {}
            Facing::Left => name.push_str("-left"),
            Facing::Right => name.push_str("-right"),
        }

        if let Some(phase) = self.phase {
            name.push('-');
            name.push_str(&phase.number().to_string());
        }

        name
    }
}

impl fmt::Display for PlayerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

// =============================================================================
// ANIMATION COUNTER
// =============================================================================

/// Walk-cycle counter (0..15). Each phase is held for four ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnimationFrame(u8);

impl AnimationFrame {
    /// Number of counter values in one full walk cycle.
    pub const CYCLE: u8 = 16;

    /// Ticks each phase is held for.
    pub const TICKS_PER_PHASE: u8 = 4;

    /// Current counter value.
    #[inline]
    pub fn value(self) -> u8 {
        self.0
    }

    /// Phase for the current value, then advance the counter.
    pub fn advance(&mut self) -> Phase {
        let current = self.0;
        self.0 = (current + 1) % Self::CYCLE;
        match current / Self::TICKS_PER_PHASE {
            0 => Phase::One,
            1 => Phase::Two,
            2 => Phase::Three,
            _ => Phase::Four,
        }
    }
}

// =============================================================================
// DERIVATION
// =============================================================================

/// Facing implied by a horizontal velocity.
#[inline]
pub fn facing_for(vx: f32, threshold: f32) -> Facing {
    if vx >= threshold {
        Facing::Right
    } else if vx <= -threshold {
        Facing::Left
    } else {
        Facing::None
    }
}

/// Derive the player state, advancing `frame` only while walking.
pub fn derive_state_with(
    velocity: Vec2,
    on_ground: bool,
    frame: &mut AnimationFrame,
    threshold: f32,
) -> PlayerState {
    let facing = facing_for(velocity.x, threshold);

    let state = if on_ground {
        if velocity.x.abs() < threshold {
            PlayerState::new(facing, Mode::Stand, None)
        } else {
            PlayerState::new(facing, Mode::Walk, Some(frame.advance()))
        }
    } else if velocity.y < 0.0 {
        PlayerState::new(facing, Mode::Jump, None)
    } else {
        PlayerState::new(facing, Mode::Fall, None)
    };

    debug_assert!(state.is_populated(), "derived unpopulated state {:?}", state);
    state
}

/// Derive the player state with the default rest threshold.
#[inline]
pub fn derive_state(velocity: Vec2, on_ground: bool, frame: &mut AnimationFrame) -> PlayerState {
    derive_state_with(velocity, on_ground, frame, CLOSE_ENOUGH_TO_ZERO)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_populated_keys_roundtrip() {
        for state in PlayerState::POPULATED {
            let key = state.to_key();
            assert_eq!(PlayerState::from_key(key.bits()), Some(state), "key {:#x}", key.bits());
        }
    }

    #[test]
    fn test_legacy_key_values() {
        assert_eq!(PlayerState::stand().to_key().bits(), 16384);
        assert_eq!(PlayerState::walk(Facing::Right, Phase::One).to_key().bits(), 16 | 128 | 1);
        assert_eq!(PlayerState::walk(Facing::Left, Phase::Four).to_key().bits(), 16 | 256 | 8);
        assert_eq!(PlayerState::new(Facing::Right, Mode::Fall, None).to_key().bits(), 32 | 128);
        assert_eq!(PlayerState::new(Facing::None, Mode::Die, None).to_key().bits(), 32768);
    }

    #[test]
    fn test_from_key_rejects_invalid() {
        // No mode
        assert_eq!(PlayerState::from_key(0), None);
        // Two modes
        assert_eq!(PlayerState::from_key(16 | 32), None);
        // Both facings
        assert_eq!(PlayerState::from_key(32 | 128 | 256), None);
        // Walk without phase, walk with two phases
        assert_eq!(PlayerState::from_key(16 | 128), None);
        assert_eq!(PlayerState::from_key(16 | 128 | 1 | 2), None);
        // Phase without walk
        assert_eq!(PlayerState::from_key(32 | 1), None);
        // Unknown bit
        assert_eq!(PlayerState::from_key(16384 | 512), None);
    }

    #[test]
    fn test_names() {
        let names: Vec<String> = PlayerState::POPULATED.iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            vec![
                "stand", "fall", "jump", "die",
                "walk-right-1", "walk-right-2", "walk-right-3", "walk-right-4",
                "fall-right", "jump-right",
                "walk-left-1", "walk-left-2", "walk-left-3", "walk-left-4",
                "fall-left", "jump-left",
            ]
        );
    }

    #[test]
    fn test_stand_has_no_facing() {
        let mut frame = AnimationFrame::default();
        let state = derive_state(Vec2::new(0.01, 0.0), true, &mut frame);
        assert_eq!(state, PlayerState::stand());
        assert_eq!(frame.value(), 0, "standing must not advance the counter");
    }

    #[test]
    fn test_airborne_modes() {
        let mut frame = AnimationFrame::default();
        assert_eq!(
            derive_state(Vec2::new(1.0, -3.0), false, &mut frame),
            PlayerState::new(Facing::Right, Mode::Jump, None)
        );
        assert_eq!(
            derive_state(Vec2::new(-1.0, 2.0), false, &mut frame),
            PlayerState::new(Facing::Left, Mode::Fall, None)
        );
        assert_eq!(
            derive_state(Vec2::new(0.0, 0.0), false, &mut frame),
            PlayerState::new(Facing::None, Mode::Fall, None)
        );
        assert_eq!(frame.value(), 0);
    }

    #[test]
    fn test_walk_cycle() {
        let mut frame = AnimationFrame::default();
        let phases: Vec<Phase> = (0..20)
            .map(|_| derive_state(Vec2::new(2.0, 0.0), true, &mut frame).phase.unwrap())
            .collect();

        let expected: Vec<Phase> = [1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 4, 4, 4, 4, 1, 1, 1, 1]
            .iter()
            .map(|n| Phase::from_index(n - 1).unwrap())
            .collect();
        assert_eq!(phases, expected);
        assert_eq!(frame.value(), 4);
    }

    #[test]
    fn test_threshold_boundary() {
        assert_eq!(facing_for(0.05, CLOSE_ENOUGH_TO_ZERO), Facing::Right);
        assert_eq!(facing_for(-0.05, CLOSE_ENOUGH_TO_ZERO), Facing::Left);
        assert_eq!(facing_for(0.049, CLOSE_ENOUGH_TO_ZERO), Facing::None);

        // Walking exactly at the threshold still carries a facing
        let mut frame = AnimationFrame::default();
        let state = derive_state(Vec2::new(0.05, 0.0), true, &mut frame);
        assert_eq!(state.mode, Mode::Walk);
        assert_eq!(state.facing, Facing::Right);
    }

    proptest! {
        #[test]
        fn prop_facing_matches_sign(vx in -20.0f32..20.0, vy in -20.0f32..20.0, on_ground: bool) {
            let mut frame = AnimationFrame::default();
            let state = derive_state(Vec2::new(vx, vy), on_ground, &mut frame);

            if vx.abs() >= CLOSE_ENOUGH_TO_ZERO {
                let expected = if vx > 0.0 { Facing::Right } else { Facing::Left };
                prop_assert_eq!(state.facing, expected);
            } else {
                prop_assert_eq!(state.facing, Facing::None);
            }
        }

        #[test]
        fn prop_derived_states_are_populated(
            vx in -20.0f32..20.0,
            vy in -20.0f32..20.0,
            on_ground: bool,
            start in 0u8..16,
        ) {
            let mut frame = AnimationFrame(start);
            let state = derive_state(Vec2::new(vx, vy), on_ground, &mut frame);
            prop_assert!(state.is_populated());
            prop_assert!(frame.value() < AnimationFrame::CYCLE);
        }

        #[test]
        fn prop_each_phase_held_four_ticks(start in 0u8..16) {
            let mut frame = AnimationFrame(start);
            let phases: Vec<Phase> = (0..16).map(|_| frame.advance()).collect();

            for phase in Phase::ALL {
                prop_assert_eq!(phases.iter().filter(|p| **p == phase).count(), 4);
            }
            prop_assert_eq!(frame.value(), start);
        }
    }
}
