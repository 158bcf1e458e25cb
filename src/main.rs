//! Morkel - Entry Point
//!
//! Controls:
//! - A/D: Move
//! - Space: Jump (release early for a shorter jump)
//! - S / Left Ctrl: Crouch
//! - F / Left mouse: Flashlight
//! - R: Recharge the flashlight (only while standing on the ground)
//! - Mouse or arrow keys: Aim the flashlight
//! - Escape: Pause/Unpause

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Morkel".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))

        // Physics, stepped with the fixed tick the player systems run in
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(100.0).in_fixed_schedule())

        // Our game plugin
        .add_plugins(morkel::MorkelPlugin)

        .run();
}
