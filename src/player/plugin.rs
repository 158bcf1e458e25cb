//! Player plugin - input, flashlight, locomotion and aim.

use bevy::prelude::*;

use super::config::load_player_config;
use super::systems;

/// Player plugin - handles player input, movement and the flashlight.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        systems::setup_player_systems(app);

        app.add_systems(Startup, load_player_config);
    }
}
