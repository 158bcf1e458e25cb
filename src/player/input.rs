//! Keyboard and mouse sampling.
//!
//! Controls:
//! - A/D: Move
//! - Space: Jump (release early for a short hop)
//! - S / Left Ctrl: Crouch
//! - F / Left mouse: Flashlight
//! - R: Recharge a drained flashlight
//! - Mouse or arrow keys: Aim the flashlight

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::components::*;
use super::spawn::PlayerCamera;

fn axis(negative: bool, positive: bool) -> f32 {
    match (negative, positive) {
        (true, false) => -1.0,
        (false, true) => 1.0,
        _ => 0.0,
    }
}

/// Latch this frame's input into the player's `PlayerInput`.
pub fn read_player_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<PlayerCamera>>,
    mut last_cursor: Local<Option<Vec2>>,
    mut player_query: Query<(&GlobalTransform, &mut PlayerInput), (With<Player>, Without<Incapacitated>)>,
) {
    let Ok((player_transform, mut input)) = player_query.get_single_mut() else {
        return;
    };

    input.move_axis = axis(keyboard.pressed(KeyCode::KeyA), keyboard.pressed(KeyCode::KeyD));

    input.jump_pressed |= keyboard.just_pressed(KeyCode::Space);
    input.jump_held = keyboard.pressed(KeyCode::Space);

    let crouch_keys = [KeyCode::KeyS, KeyCode::ControlLeft];
    input.crouch_pressed |= keyboard.any_just_pressed(crouch_keys);
    input.crouch_held = keyboard.any_pressed(crouch_keys);

    input.flashlight_pressed |=
        keyboard.just_pressed(KeyCode::KeyF) || mouse.just_pressed(MouseButton::Left);
    input.flashlight_released |=
        keyboard.just_released(KeyCode::KeyF) || mouse.just_released(MouseButton::Left);

    input.recharge_pressed |= keyboard.just_pressed(KeyCode::KeyR);
    input.recharge_held = keyboard.pressed(KeyCode::KeyR);

    // Arrow keys take over the aim until the mouse moves again.
    let aim_axes = Vec2::new(
        axis(keyboard.pressed(KeyCode::ArrowLeft), keyboard.pressed(KeyCode::ArrowRight)),
        axis(keyboard.pressed(KeyCode::ArrowDown), keyboard.pressed(KeyCode::ArrowUp)),
    );
    if aim_axes != Vec2::ZERO {
        input.aim_source = AimSource::Axes;
    }
    input.aim_axes = aim_axes;

    let Ok(window) = window_query.get_single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    if *last_cursor != Some(cursor) {
        *last_cursor = Some(cursor);
        input.aim_source = AimSource::Mouse;
    }

    let Ok((camera, camera_transform)) = camera_query.get_single() else {
        return;
    };
    if let Ok(world_cursor) = camera.viewport_to_world_2d(camera_transform, cursor) {
        input.cursor_offset = world_cursor - player_transform.translation().truncate();
    }
}
