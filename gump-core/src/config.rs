//! Game Configuration
//!
//! Canvas, physics, player and platform constants. The `pub const` values
//! are the defaults; `GameConfig` carries them at runtime so a `gump.json`
//! next to the executable can override any subset.

use std::fs;
use std::path::Path;

use serde::{Serialize, Deserialize};
use tracing::{debug, info};

use crate::error::{GumpError, Result};

// =============================================================================
// CANVAS
// =============================================================================

/// Canvas width in units (pixels)
pub const CANVAS_WIDTH: f32 = 400.0;

/// Canvas height in units (pixels)
pub const CANVAS_HEIGHT: f32 = 450.0;

/// Target frame rate
pub const FPS: u32 = 60;

/// Window caption
pub const CAPTION: &str = "Gump";

/// Background fill color
pub const BACKGROUND_COLOR: [u8; 3] = [0, 0, 0];

/// Pixels of this color are transparent in sprite images
pub const SPRITE_TRANSPARENT_COLOR: [u8; 3] = [255, 0, 255];

// =============================================================================
// PHYSICS
// =============================================================================

/// Downward acceleration per tick
pub const GRAVITY: f32 = 0.5;

// =============================================================================
// PLAYER
// =============================================================================

/// Player sprite size (width, height)
pub const PLAYER_SIZE: (f32, f32) = (24.0, 30.0);

/// Top-left corner of the player at startup
pub const PLAYER_STARTING_POSITION: (f32, f32) = (10.0, 0.0);

/// Upward velocity applied by a jump
pub const PLAYER_JUMP_VELOCITY: f32 = 8.0;

/// Horizontal acceleration while an arrow key is held
pub const PLAYER_ACCELERATION: f32 = 0.5;

/// Linear drag factor on horizontal velocity
pub const PLAYER_FRICTION: f32 = 0.12;

/// Horizontal speeds below this count as standing still
pub const CLOSE_ENOUGH_TO_ZERO: f32 = 0.05;

// =============================================================================
// PLATFORM
// =============================================================================

/// Platform height
pub const PLATFORM_HEIGHT: f32 = 20.0;

/// Platform fill color
pub const PLATFORM_COLOR: [u8; 3] = [255, 0, 0];

/// Default location of the optional override file.
pub const CONFIG_FILE: &str = "gump.json";

// =============================================================================
// CONFIG TYPES
// =============================================================================

/// Window and frame-rate settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Canvas width
    pub width: f32,
    /// Canvas height
    pub height: f32,
    /// Target ticks per second
    pub fps: u32,
    /// Window caption
    pub caption: String,
    /// Background color (RGB)
    pub background_color: [u8; 3],
    /// Sprite color key (RGB)
    pub transparent_color: [u8; 3],
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            fps: FPS,
            caption: CAPTION.to_string(),
            background_color: BACKGROUND_COLOR,
            transparent_color: SPRITE_TRANSPARENT_COLOR,
        }
    }
}

/// Player movement tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Sprite size (width, height)
    pub size: (f32, f32),
    /// Top-left corner at startup
    pub starting_position: (f32, f32),
    /// Jump impulse
    pub jump_velocity: f32,
    /// Horizontal acceleration
    pub acceleration: f32,
    /// Drag factor
    pub friction: f32,
    /// Standing-still threshold
    pub rest_threshold: f32,
}

impl PlayerConfig {
    /// Half the sprite size; the offset from the top-left corner to the center.
    pub fn center(&self) -> (f32, f32) {
        (self.size.0 / 2.0, self.size.1 / 2.0)
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            size: PLAYER_SIZE,
            starting_position: PLAYER_STARTING_POSITION,
            jump_velocity: PLAYER_JUMP_VELOCITY,
            acceleration: PLAYER_ACCELERATION,
            friction: PLAYER_FRICTION,
            rest_threshold: CLOSE_ENOUGH_TO_ZERO,
        }
    }
}

/// Platform appearance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// Platform height
    pub height: f32,
    /// Fill color (RGB)
    pub color: [u8; 3],
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            height: PLATFORM_HEIGHT,
            color: PLATFORM_COLOR,
        }
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Canvas settings
    pub canvas: CanvasConfig,
    /// Downward acceleration per tick
    pub gravity: f32,
    /// Player tuning
    pub player: PlayerConfig,
    /// Platform appearance
    pub platform: PlatformConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            gravity: GRAVITY,
            player: PlayerConfig::default(),
            platform: PlatformConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parse a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let json = fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject values the simulation cannot work with.
    pub fn validate(&self) -> Result<()> {
        let (w, h) = self.player.size;
        if w <= 0.0 || h <= 0.0 {
            return Err(GumpError::Config(format!("player size must be positive, got {w}x{h}")));
        }
        if self.canvas.width < w || self.canvas.height < h + self.platform.height {
            return Err(GumpError::Config(format!(
                "canvas {}x{} cannot hold the player and platform",
                self.canvas.width, self.canvas.height
            )));
        }
        if self.canvas.fps == 0 {
            return Err(GumpError::Config("fps must be non-zero".into()));
        }
        if self.platform.height <= 0.0 {
            return Err(GumpError::Config("platform height must be positive".into()));
        }

        let player = &self.player;
        if player.rest_threshold <= 0.0 {
            return Err(GumpError::Config(format!(
                "rest threshold must be positive, got {}",
                player.rest_threshold
            )));
        }
        for (name, value) in [
            ("acceleration", player.acceleration),
            ("friction", player.friction),
            ("jump velocity", player.jump_velocity),
        ] {
            if value < 0.0 {
                return Err(GumpError::Config(format!("{name} must not be negative, got {value}")));
            }
        }
        Ok(())
    }
}
