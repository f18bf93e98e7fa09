//! # Gump Simulation
//!
//! Player physics and animation state machine for the Gump side-scroller.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        GUMP CORE                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  config.rs       - Canvas, physics and player constants      │
//! │  error.rs        - Library error type                        │
//! │  sprites.rs      - State → graphic table, color key          │
//! │                                                              │
//! │  core/           - Primitives                                │
//! │  ├── vec2.rs     - 2D float vector                           │
//! │  ├── rect.rs     - Axis-aligned rectangle                    │
//! │  └── hash.rs     - World hashing for replay checks           │
//! │                                                              │
//! │  game/           - Game logic                                │
//! │  ├── input.rs    - Key state, recording, replay              │
//! │  ├── state.rs    - Player state machine                      │
//! │  ├── player.rs   - Motion integration and jumping            │
//! │  ├── platform.rs - Static ground                             │
//! │  ├── collision.rs- Player-vs-platform overlap                │
//! │  ├── tick.rs     - One simulation step                       │
//! │  └── events.rs   - Tick events                               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Canvas space is y-down with the origin at the top-left corner, and every
//! quantity is per tick: the simulation has no notion of wall-clock time.
//! The renderer (see the `gump-client` crate) is responsible for running
//! `game::tick::tick` at [`config::FPS`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod core;
pub mod error;
pub mod game;
pub mod sprites;

// Re-export commonly used types
pub use config::GameConfig;
pub use crate::core::vec2::Vec2;
pub use crate::core::rect::Rect;
pub use error::{GumpError, Result};
pub use game::input::{InputFrame, InputRecording};
pub use game::state::{PlayerState, Facing, Mode, Phase};
pub use game::tick::{tick, World};
pub use sprites::SpriteTable;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
