//! Sprite Table
//!
//! Maps each of the 16 populated player states to a loaded graphic. The table
//! is built once at startup by the renderer and handed to whatever draws the
//! player; it is generic over the graphic type so the simulation never depends
//! on a graphics library.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{GumpError, Result};
use crate::game::state::PlayerState;

/// Sprite directory, relative to the asset root.
pub const SPRITE_DIR: &str = "graphics/player";

/// Asset path for a state: `graphics/player/gump-<name>.png`.
pub fn sprite_path(state: PlayerState) -> PathBuf {
    Path::new(SPRITE_DIR).join(format!("gump-{}.png", state.name()))
}

/// Loaded graphics for every populated state.
#[derive(Clone, Debug)]
pub struct SpriteTable<T> {
    graphics: BTreeMap<PlayerState, T>,
}

impl<T> SpriteTable<T> {
    /// Build the table by calling `loader` once per populated state.
    ///
    /// The first loader error aborts construction.
    pub fn load<F, E>(mut loader: F) -> Result<Self>
    where
        F: FnMut(PlayerState, &Path) -> std::result::Result<T, E>,
        E: fmt::Display,
    {
        let mut graphics = BTreeMap::new();

        for state in PlayerState::POPULATED {
            let path = sprite_path(state);
            info!("Acquiring: {}", path.display());

            let graphic = loader(state, &path).map_err(|e| GumpError::AssetLoad {
                path: path.clone(),
                reason: e.to_string(),
            })?;
            graphics.insert(state, graphic);
        }

        Ok(Self { graphics })
    }

    /// Graphic for `state`.
    pub fn get(&self, state: PlayerState) -> Result<&T> {
        self.graphics
            .get(&state)
            .ok_or_else(|| GumpError::UnmappedState(state.to_key().bits()))
    }

    /// All entries in state order.
    pub fn iter(&self) -> impl Iterator<Item = (&PlayerState, &T)> {
        self.graphics.iter()
    }

    /// Number of loaded graphics.
    pub fn len(&self) -> usize {
        self.graphics.len()
    }

    /// True if nothing is loaded.
    pub fn is_empty(&self) -> bool {
        self.graphics.is_empty()
    }
}

/// Make every pixel whose RGB equals `key` fully transparent.
///
/// `rgba` is tightly packed RGBA8. Returns the number of pixels keyed out.
pub fn apply_color_key(rgba: &mut [u8], key: [u8; 3]) -> usize {
    let mut keyed = 0;
    for pixel in rgba.chunks_exact_mut(4) {
        if pixel[..3] == key {
            pixel[3] = 0;
            keyed += 1;
        }
    }
    keyed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::{Facing, Mode, Phase};

    #[test]
    fn test_sprite_paths() {
        assert_eq!(
            sprite_path(PlayerState::stand()),
            PathBuf::from("graphics/player/gump-stand.png")
        );
        assert_eq!(
            sprite_path(PlayerState::walk(Facing::Left, Phase::Three)),
            PathBuf::from("graphics/player/gump-walk-left-3.png")
        );
        assert_eq!(
            sprite_path(PlayerState::new(Facing::Right, Mode::Jump, None)),
            PathBuf::from("graphics/player/gump-jump-right.png")
        );
    }

    #[test]
    fn test_load_all_states() {
        let table = SpriteTable::load(|state, path| {
            Ok::<_, String>(format!("{}@{}", state.name(), path.display()))
        })
        .unwrap();

        assert_eq!(table.len(), 16);
        for state in PlayerState::POPULATED {
            assert!(table.get(state).unwrap().starts_with(&state.name()));
        }
    }

    #[test]
    fn test_load_failure_is_fatal() {
        let mut calls = 0;
        let result = SpriteTable::<()>::load(|state, _| {
            calls += 1;
            if state.mode == Mode::Jump {
                Err("file not found")
            } else {
                Ok(())
            }
        });

        match result {
            Err(GumpError::AssetLoad { path, reason }) => {
                assert_eq!(path, PathBuf::from("graphics/player/gump-jump.png"));
                assert_eq!(reason, "file not found");
            }
            other => panic!("expected AssetLoad, got {:?}", other),
        }
        // Stand, Fall, Jump: stops at the first failure
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_unmapped_state() {
        let table = SpriteTable::load(|_, _| Ok::<_, String>(())).unwrap();

        let stand_right = PlayerState::new(Facing::Right, Mode::Stand, None);
        assert!(matches!(
            table.get(stand_right),
            Err(GumpError::UnmappedState(key)) if key == 16384 | 128
        ));

        let walk_none = PlayerState::new(Facing::None, Mode::Walk, Some(Phase::One));
        assert!(table.get(walk_none).is_err());
    }

    #[test]
    fn test_color_key() {
        let mut pixels = vec![
            255, 0, 255, 255, // key
            255, 0, 254, 255, // near miss
            10, 20, 30, 255, // other
            255, 0, 255, 128, // key, already translucent
        ];

        assert_eq!(apply_color_key(&mut pixels, [255, 0, 255]), 2);
        assert_eq!(pixels[3], 0);
        assert_eq!(pixels[7], 255);
        assert_eq!(pixels[11], 255);
        assert_eq!(pixels[15], 0);
        // Color channels untouched
        assert_eq!(&pixels[..3], &[255, 0, 255]);
    }
}
