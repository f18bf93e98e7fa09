//! Game Events
//!
//! Events generated during simulation, for logging and replay checks.

use serde::{Serialize, Deserialize};

use crate::core::vec2::Vec2;
use crate::game::state::PlayerState;

/// Game event data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEventData {
    /// Jump impulse applied
    Jumped {
        position: Vec2,
    },

    /// Player came to rest on a platform
    Landed {
        position: Vec2,
    },

    /// Player walked off a platform (no jump)
    LeftGround {
        position: Vec2,
    },

    /// Derived state differs from the previous tick's
    StateChanged {
        old: PlayerState,
        new: PlayerState,
    },
}

/// A game event with timing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Tick when event occurred
    pub tick: u32,

    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event.
    pub fn new(tick: u32, data: GameEventData) -> Self {
        Self { tick, data }
    }

    /// Create jumped event.
    pub fn jumped(tick: u32, position: Vec2) -> Self {
        Self::new(tick, GameEventData::Jumped { position })
    }

    /// Create landed event.
    pub fn landed(tick: u32, position: Vec2) -> Self {
        Self::new(tick, GameEventData::Landed { position })
    }

    /// Create left-ground event.
    pub fn left_ground(tick: u32, position: Vec2) -> Self {
        Self::new(tick, GameEventData::LeftGround { position })
    }

    /// Create state-changed event.
    pub fn state_changed(tick: u32, old: PlayerState, new: PlayerState) -> Self {
        Self::new(tick, GameEventData::StateChanged { old, new })
    }
}
