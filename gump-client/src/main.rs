//! Gump - 2D side-scroller prototype
//!
//! A single character on a single platform: arrows to walk, up to jump.
//! All physics lives in `gump-core`; this crate owns the window, the
//! sprites and the fixed-rate loop.

mod game;

use bevy::prelude::*;
use bevy::window::WindowResolution;

use gump::config::{GameConfig, CONFIG_FILE};
use game::{GamePlugin, Settings};

/// Game states
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    /// Waiting for every player sprite to finish loading
    #[default]
    Loading,
    /// Simulation running
    Playing,
}

fn main() -> anyhow::Result<()> {
    let config = GameConfig::load_or_default(CONFIG_FILE)?;
    let canvas = &config.canvas;
    let [r, g, b] = canvas.background_color;

    let exit = App::new()
        // Bevy defaults with a fixed-size window
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: canvas.caption.clone(),
                        resolution: WindowResolution::new(canvas.width, canvas.height),
                        resizable: false,
                        ..default()
                    }),
                    ..default()
                })
                // Pixel art: no smoothing when scaled
                .set(ImagePlugin::default_nearest()),
        )
        .insert_resource(ClearColor(Color::srgb_u8(r, g, b)))
        // One simulation step per frame at the target rate
        .insert_resource(Time::<Fixed>::from_hz(canvas.fps as f64))
        .insert_resource(Settings(config.clone()))
        .init_state::<AppState>()
        .add_plugins(GamePlugin)
        .add_systems(Startup, setup_2d_camera)
        .run();

    if let AppExit::Error(code) = exit {
        anyhow::bail!("gump exited with code {}", code);
    }
    Ok(())
}

/// Plain 2D camera; one world unit is one canvas pixel.
fn setup_2d_camera(mut commands: Commands) {
    commands.spawn(Camera2d);

    info!("Gump v{} initialized!", gump::VERSION);
}
