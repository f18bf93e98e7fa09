//! Player systems: keyboard to simulation, simulation to sprite

use bevy::prelude::*;

use gump::game::events::GameEventData;
use gump::{tick, InputFrame};

use super::{canvas_to_world, PlayerSprite, PlayerSprites, Settings, Simulation};

// ============================================================================
// INPUT
// ============================================================================

/// Arrow keys held this tick.
pub fn read_input(keyboard: &ButtonInput<KeyCode>) -> InputFrame {
    InputFrame::from_keys(
        keyboard.pressed(KeyCode::ArrowLeft),
        keyboard.pressed(KeyCode::ArrowRight),
        keyboard.pressed(KeyCode::ArrowUp),
    )
}

// ============================================================================
// SIMULATION
// ============================================================================

/// Advance the world by one tick (fixed timestep)
pub fn step_simulation(
    keyboard: Res<ButtonInput<KeyCode>>,
    settings: Res<Settings>,
    mut sim: ResMut<Simulation>,
) {
    let input = read_input(&keyboard);
    let result = tick(&mut sim.world, input, &settings.0);

    for event in &result.events {
        match &event.data {
            GameEventData::Jumped { position } => {
                debug!("Jumped from {}", position);
            }
            GameEventData::Landed { position } => {
                debug!("Landed at {}", position);
            }
            _ => {}
        }
    }
}

// ============================================================================
// RENDERING
// ============================================================================

/// Move the player sprite and swap its image to match the current state
pub fn sync_player_sprite(
    settings: Res<Settings>,
    sim: Res<Simulation>,
    sprites: Res<PlayerSprites>,
    mut query: Query<(&mut Transform, &mut Sprite), With<PlayerSprite>>,
    mut app_exit: EventWriter<AppExit>,
) {
    let Ok((mut transform, mut sprite)) = query.get_single_mut() else {
        return;
    };

    let player = &sim.world.player;
    let state = player.current_state();

    let image = match sprites.0.get(state) {
        Ok(handle) => handle,
        Err(e) => {
            error!("{} ({})", e, state);
            app_exit.send(AppExit::error());
            return;
        }
    };
    if sprite.image != *image {
        sprite.image = image.clone();
    }

    let position = canvas_to_world(player.position, &settings.0);
    transform.translation.x = position.x;
    transform.translation.y = position.y;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_input() {
        let mut keyboard = ButtonInput::<KeyCode>::default();
        assert!(read_input(&keyboard).is_idle());

        keyboard.press(KeyCode::ArrowLeft);
        keyboard.press(KeyCode::ArrowUp);
        let input = read_input(&keyboard);
        assert!(input.left());
        assert!(input.up());
        assert!(!input.right());

        // WASD is not bound
        keyboard.release_all();
        keyboard.press(KeyCode::KeyD);
        assert!(read_input(&keyboard).is_idle());
    }
}
