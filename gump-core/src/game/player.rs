//! Player
//!
//! Position, velocity and acceleration of the controllable character, the
//! per-tick motion integration, jumping and ground resolution.

use serde::{Serialize, Deserialize};

use crate::config::GameConfig;
use crate::core::rect::Rect;
use crate::core::vec2::Vec2;
use crate::game::collision::platform_top;
use crate::game::input::InputFrame;
use crate::game::platform::Platform;
use crate::game::state::{derive_state_with, AnimationFrame, PlayerState};

/// The controllable character.
///
/// `position` is the midpoint of the bottom edge of `rect`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Bottom-center anchor in canvas space
    pub position: Vec2,

    /// Units per tick
    pub velocity: Vec2,

    /// Units per tick², reset every move
    pub acceleration: Vec2,

    /// Resting on a platform?
    pub on_ground: bool,

    /// Walk-cycle counter
    pub animation_frame: AnimationFrame,

    current_state: PlayerState,
    rect: Rect,
}

impl Player {
    /// Create a player at the configured starting position.
    ///
    /// The player starts airborne; the state is derived once so that a
    /// sprite can be selected before the first tick.
    pub fn new(config: &GameConfig) -> Self {
        let (w, h) = config.player.size;
        let (cx, cy) = config.player.center();
        let (sx, sy) = config.player.starting_position;
        let position = Vec2::new(sx + cx, sy + cy);

        let mut player = Self {
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            on_ground: false,
            animation_frame: AnimationFrame::default(),
            current_state: PlayerState::default(),
            rect: Rect::from_midbottom(position, w, h),
        };
        player.refresh_state(config);
        player
    }

    /// Place a player at `position` with a given velocity and ground contact.
    pub fn at(config: &GameConfig, position: Vec2, velocity: Vec2, on_ground: bool) -> Self {
        let mut player = Self::new(config);
        player.position = position;
        player.velocity = velocity;
        player.on_ground = on_ground;
        player.rect.set_midbottom(position);
        player
    }

    /// Bounds in canvas space, as of the last move.
    #[inline]
    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    /// State derived during the last update.
    #[inline]
    pub fn current_state(&self) -> PlayerState {
        self.current_state
    }

    /// Integrate one tick of motion from `input`.
    ///
    /// Returns whether a jump impulse was applied.
    pub fn move_with(&mut self, input: InputFrame, config: &GameConfig) -> bool {
        let tuning = &config.player;

        self.acceleration = Vec2::new(0.0, config.gravity);

        if input.left() {
            self.acceleration.x = -tuning.acceleration;
        }
        // Checked after left: right wins when both are held
        if input.right() {
            self.acceleration.x = tuning.acceleration;
        }
        let jumped = input.up() && self.jump(config);

        self.acceleration.x += self.velocity.x * -tuning.friction;
        self.velocity += self.acceleration;
        self.position += self.velocity + 0.5 * self.acceleration;

        // Keep the whole sprite on screen
        let half_width = tuning.center().0;
        self.position.x = self
            .position
            .x
            .min(config.canvas.width - half_width)
            .max(half_width);

        self.rect.set_midbottom(self.position);
        jumped
    }

    /// Jump if standing on a platform. Ignored while airborne.
    ///
    /// Returns whether the impulse was applied.
    pub fn jump(&mut self, config: &GameConfig) -> bool {
        if !self.on_ground {
            return false;
        }
        self.velocity.y = -config.player.jump_velocity;
        self.on_ground = false;
        true
    }

    /// Resolve ground contact while descending.
    ///
    /// Ground state is only re-evaluated when `velocity.y > 0`; a rising or
    /// still player keeps its previous on-ground flag.
    pub fn resolve_ground(&mut self, platforms: &[Platform]) {
        if self.velocity.y <= 0.0 {
            return;
        }

        match platform_top(&self.rect, platforms) {
            Some(top) => {
                // +1 so the player doesn't immediately collide again
                self.position.y = top + 1.0;
                self.velocity.y = 0.0;
                self.on_ground = true;
            }
            None => self.on_ground = false,
        }
    }

    /// Post-move update: ground resolution followed by state derivation.
    pub fn update(&mut self, platforms: &[Platform], config: &GameConfig) -> PlayerState {
        self.resolve_ground(platforms);
        self.refresh_state(config)
    }

    fn refresh_state(&mut self, config: &GameConfig) -> PlayerState {
        self.current_state = derive_state_with(
            self.velocity,
            self.on_ground,
            &mut self.animation_frame,
            config.player.rest_threshold,
        );
        self.current_state
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

// =============================================================================
// TESTS
// =============================================================================
