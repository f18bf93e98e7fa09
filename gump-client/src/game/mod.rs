//! Game module - fixed-rate simulation and sprite rendering

use bevy::prelude::*;

use gump::{GameConfig, World};

use crate::AppState;

pub mod assets;
pub mod components;
pub mod player;

pub use assets::*;
pub use components::*;
pub use player::*;

// ============================================================================
// GAME PLUGIN
// ============================================================================

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app
            // Asset loading
            .add_systems(Startup, load_player_sprites)
            .add_systems(Update, check_player_sprites.run_if(in_state(AppState::Loading)))

            // Game setup
            .add_systems(OnEnter(AppState::Playing), setup_game)

            // input → physics → collision → state → sprite, once per tick
            .add_systems(FixedUpdate, (
                step_simulation,
                sync_player_sprite,
            ).chain()
                .run_if(in_state(AppState::Playing))
                .run_if(resource_exists::<Simulation>));
    }
}

// ============================================================================
// RESOURCES
// ============================================================================

/// Configuration the app was started with.
#[derive(Resource)]
pub struct Settings(pub GameConfig);

/// The simulated world.
#[derive(Resource)]
pub struct Simulation {
    pub world: World,
}

// ============================================================================
// COORDINATES
// ============================================================================

/// Map a y-down canvas point to the y-up, centered bevy world.
pub fn canvas_to_world(point: gump::Vec2, config: &GameConfig) -> Vec2 {
    Vec2::new(
        point.x - config.canvas.width / 2.0,
        config.canvas.height / 2.0 - point.y,
    )
}

// ============================================================================
// GAME SETUP
// ============================================================================

fn setup_game(
    mut commands: Commands,
    settings: Res<Settings>,
    sprites: Res<PlayerSprites>,
    mut app_exit: EventWriter<AppExit>,
) {
    let config = &settings.0;
    let world = World::new(config);

    // Platform
    for platform in &world.platforms {
        let rect = platform.rect();
        let [r, g, b] = platform.color();
        commands.spawn((
            Sprite {
                color: Color::srgb_u8(r, g, b),
                custom_size: Some(Vec2::new(rect.w, rect.h)),
                ..default()
            },
            Transform::from_translation(canvas_to_world(rect.center(), config).extend(0.0)),
            PlatformSprite,
        ));
    }

    // Player
    let player = &world.player;
    let image = match sprites.0.get(player.current_state()) {
        Ok(handle) => handle.clone(),
        Err(e) => {
            error!("{}", e);
            app_exit.send(AppExit::error());
            return;
        }
    };
    commands.spawn((
        Sprite {
            image,
            anchor: bevy::sprite::Anchor::BottomCenter,
            ..default()
        },
        Transform::from_translation(canvas_to_world(player.position, config).extend(10.0)),
        PlayerSprite,
        Name::new("Gump"),
    ));

    info!("Player spawned at {}", player.position);
    commands.insert_resource(Simulation { world });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_to_world() {
        let config = GameConfig::default();

        // Canvas center is the world origin
        assert_eq!(canvas_to_world(gump::Vec2::new(200.0, 225.0), &config), Vec2::ZERO);
        // Top-left corner
        assert_eq!(
            canvas_to_world(gump::Vec2::new(0.0, 0.0), &config),
            Vec2::new(-200.0, 225.0)
        );
        // Platform top sits 205 below the origin
        assert_eq!(canvas_to_world(gump::Vec2::new(200.0, 430.0), &config).y, -205.0);
    }
}
