//! Player sprite loading
//!
//! All 16 images are requested at startup. The game stays in
//! `AppState::Loading` until every one has loaded and been color keyed; a
//! single failure ends the app with an error.

use std::convert::Infallible;

use bevy::asset::LoadState;
use bevy::prelude::*;
use bevy::render::render_resource::TextureFormat;

use gump::sprites::apply_color_key;
use gump::SpriteTable;

use super::{PlayerSprites, Settings};
use crate::AppState;

/// Request every player sprite from the asset server.
pub fn load_player_sprites(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut app_exit: EventWriter<AppExit>,
) {
    let table = SpriteTable::load(|_, path| {
        Ok::<_, Infallible>(asset_server.load::<Image>(path.to_path_buf()))
    });

    match table {
        Ok(table) => {
            info!("Requested {} player sprites", table.len());
            commands.insert_resource(PlayerSprites(table));
        }
        Err(e) => {
            error!("{}", e);
            app_exit.send(AppExit::error());
        }
    }
}

/// Wait for the sprites, key out the transparent color, then start playing.
pub fn check_player_sprites(
    asset_server: Res<AssetServer>,
    sprites: Option<Res<PlayerSprites>>,
    settings: Res<Settings>,
    mut images: ResMut<Assets<Image>>,
    mut next_state: ResMut<NextState<AppState>>,
    mut app_exit: EventWriter<AppExit>,
) {
    let Some(sprites) = sprites else {
        return;
    };

    let mut loaded = 0;
    for (state, handle) in sprites.0.iter() {
        match asset_server.get_load_state(handle.id()) {
            Some(LoadState::Loaded) => loaded += 1,
            Some(LoadState::Failed(err)) => {
                error!("Unable to load sprite for {}: {}", state, err);
                app_exit.send(AppExit::error());
                return;
            }
            _ => {}
        }
    }
    if loaded < sprites.0.len() {
        return;
    }

    let key = settings.0.canvas.transparent_color;
    for (state, handle) in sprites.0.iter() {
        let Some(image) = images.get_mut(handle) else {
            error!("Sprite for {} reported loaded but is missing", state);
            app_exit.send(AppExit::error());
            return;
        };

        match color_key_image(image, key) {
            Ok(keyed) => debug!("Keyed {} pixels out of {}", keyed, state),
            Err(e) => {
                error!("Unable to color key sprite for {}: {}", state, e);
                app_exit.send(AppExit::error());
                return;
            }
        }
    }

    info!("All player sprites loaded");
    next_state.set(AppState::Playing);
}

/// Convert `image` to sRGB RGBA8 if needed, then key out `key`.
///
/// Returns the number of pixels made transparent.
pub fn color_key_image(image: &mut Image, key: [u8; 3]) -> Result<usize, String> {
    let format = image.texture_descriptor.format;
    if format != TextureFormat::Rgba8UnormSrgb {
        *image = image
            .convert(TextureFormat::Rgba8UnormSrgb)
            .ok_or_else(|| format!("unsupported texture format {:?}", format))?;
    }
    Ok(apply_color_key(&mut image.data, key))
}
