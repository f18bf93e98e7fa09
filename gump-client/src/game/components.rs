//! Marker components for the entities the renderer draws

use bevy::prelude::*;

use gump::SpriteTable;

/// The player sprite; its image follows the simulated state.
#[derive(Component)]
pub struct PlayerSprite;

/// The solid-color ground rectangle.
#[derive(Component)]
pub struct PlatformSprite;

/// One image handle per populated player state.
#[derive(Resource)]
pub struct PlayerSprites(pub SpriteTable<Handle<Image>>);
