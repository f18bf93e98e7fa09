//! Game Logic Module
//!
//! All game simulation code. Deterministic for a given config and input.
//!
//! ## Module Structure
//!
//! - `input`: Key state per tick, recording and replay
//! - `state`: Player state machine (facing, mode, walk phase)
//! - `player`: Motion integration, jump, ground resolution
//! - `platform`: The static ground
//! - `collision`: Player-vs-platform overlap
//! - `tick`: One simulation step over the world
//! - `events`: Events emitted by a tick

pub mod input;
pub mod state;
pub mod player;
pub mod platform;
pub mod collision;
pub mod tick;
pub mod events;

// Re-export key types
pub use input::{InputFrame, InputRecording};
pub use state::{PlayerState, Facing, Mode, Phase, StateKey};
pub use player::Player;
pub use platform::Platform;
pub use tick::{TickResult, World};
pub use events::{GameEvent, GameEventData};
