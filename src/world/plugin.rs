//! World plugin - level loading, hazards, checkpoints and respawning.

use bevy::prelude::*;

use crate::core::{GameSession, GameState};
use crate::health::HealthSet;
use crate::player::{spawn_camera, spawn_player, PlayerConfig};

use super::builder::build_level;
use super::data::{load_level_definition, LevelDefinition};
use super::hazards::handle_sensor_contacts;
use super::respawn::{begin_respawn_on_death, drive_respawn, spawn_screen_cover, update_screen_cover};

/// World plugin - handles level loading and world setup.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_level_definition)
            .add_systems(
                Update,
                finish_loading.run_if(in_state(GameState::Loading)),
            )
            // Resuming from pause re-enters InGame; only build once per session.
            .add_systems(
                OnEnter(GameState::InGame),
                setup_level.run_if(not(resource_exists::<GameSession>)),
            )
            .add_systems(
                FixedUpdate,
                handle_sensor_contacts
                    .before(HealthSet::Apply)
                    .run_if(in_state(GameState::InGame).and(resource_exists::<GameSession>)),
            )
            .add_systems(
                FixedUpdate,
                (begin_respawn_on_death, drive_respawn)
                    .chain()
                    .after(HealthSet::Apply)
                    .run_if(in_state(GameState::InGame).and(resource_exists::<GameSession>)),
            )
            .add_systems(Update, update_screen_cover);
    }
}

/// Leave the loading state once every data resource is in place.
fn finish_loading(
    config: Option<Res<PlayerConfig>>,
    level: Option<Res<LevelDefinition>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if config.is_some() && level.is_some() {
        next_state.set(GameState::InGame);
    }
}

/// Build the level and spawn the player, camera and fade overlay.
pub fn setup_level(mut commands: Commands, level: Res<LevelDefinition>, config: Res<PlayerConfig>) {
    commands.insert_resource(GameSession::default());

    build_level(&mut commands, &level);

    let spawn = level.spawn_point();
    let player = spawn_player(&mut commands, spawn, &config);
    spawn_camera(&mut commands, player, spawn);
    spawn_screen_cover(&mut commands);
}
