//! Player death and respawn at the active checkpoint.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::hazards::Checkpoint;
use crate::core::{DeathEvent, FlashlightEvent, GameSession, RespawnAction, ScreenCover};
use crate::health::Health;
use crate::player::{Flashlight, Incapacitated, Locomotion, Player, PlayerColliders, PlayerInput};

/// Marker for the full-screen fade node.
#[derive(Component)]
pub struct ScreenCoverOverlay;

/// Take control away from a dead player and start the respawn sequence.
pub fn begin_respawn_on_death(
    mut commands: Commands,
    mut death_events: EventReader<DeathEvent>,
    mut session: ResMut<GameSession>,
    mut cover: ResMut<ScreenCover>,
    mut player_query: Query<
        (
            &mut Health,
            &mut Flashlight,
            &mut PlayerInput,
            &mut Locomotion,
            Option<&mut Velocity>,
            Option<&mut RigidBody>,
        ),
        With<Player>,
    >,
    mut flashlight_events: EventWriter<FlashlightEvent>,
) {
    for event in death_events.read() {
        let Ok((mut health, mut flashlight, mut input, mut locomotion, velocity, body)) =
            player_query.get_mut(event.entity)
        else {
            continue;
        };

        info!("Player died, respawning at checkpoint {}", session.checkpoint);

        // Can no longer be hurt while the sequence runs.
        health.disable();
        if let Some(signal) = flashlight.deactivate() {
            flashlight_events.send(FlashlightEvent {
                entity: event.entity,
                signal,
            });
        }
        input.reset();
        locomotion.clear_intent();
        if let Some(mut velocity) = velocity {
            *velocity = Velocity::zero();
        }
        if let Some(mut body) = body {
            *body = RigidBody::KinematicPositionBased;
        }
        commands.entity(event.entity).insert(Incapacitated);

        if session.respawn.begin() == Some(RespawnAction::CoverOn) {
            cover.fade_in();
        }
    }
}

/// Advance the respawn sequence one fixed tick.
pub fn drive_respawn(
    time: Res<Time>,
    mut commands: Commands,
    mut session: ResMut<GameSession>,
    mut cover: ResMut<ScreenCover>,
    checkpoint_query: Query<(&Checkpoint, &Transform), Without<Player>>,
    mut player_query: Query<
        (
            Entity,
            &mut Transform,
            &mut Health,
            &mut Flashlight,
            &mut Locomotion,
            Option<&mut Velocity>,
            Option<&mut RigidBody>,
            Option<(&PlayerColliders, &mut Collider)>,
        ),
        With<Player>,
    >,
) {
    let Some(action) = session.respawn.advance(&cover, time.delta_secs()) else {
        return;
    };

    debug!("Respawn step: {:?}", action);

    match action {
        RespawnAction::CoverOn => return cover.fade_in(),
        RespawnAction::CoverOff => return cover.fade_out(),
        _ => {}
    }

    let Ok((
        entity,
        mut transform,
        mut health,
        mut flashlight,
        mut locomotion,
        velocity,
        body,
        shapes,
    )) = player_query.get_single_mut()
    else {
        return;
    };

    match action {
        RespawnAction::Relocate => {
            let target = checkpoint_query
                .iter()
                .find(|(checkpoint, _)| checkpoint.index == session.checkpoint)
                .map(|(_, checkpoint_transform)| checkpoint_transform.translation.truncate());

            match target {
                Some(position) => {
                    transform.translation = position.extend(transform.translation.z);
                }
                None => warn!(
                    "Checkpoint {} not found, respawning in place",
                    session.checkpoint
                ),
            }

            // A fresh locomotion state stands, so the body has to stand too.
            *locomotion = Locomotion::default();
            if let Some((colliders, mut collider)) = shapes {
                *collider = colliders.standing.clone();
            }
            if let Some(mut velocity) = velocity {
                *velocity = Velocity::zero();
            }
        }
        RespawnAction::Restore => {
            health.enable();
            flashlight.reset();
            if let Some(mut body) = body {
                *body = RigidBody::Dynamic;
            }
            commands.entity(entity).remove::<Incapacitated>();
            info!("Player respawned");
        }
        RespawnAction::CoverOn | RespawnAction::CoverOff => {}
    }
}

/// Spawn the (initially clear) fade overlay.
pub fn spawn_screen_cover(commands: &mut Commands) {
    commands.spawn((
        ScreenCoverOverlay,
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            position_type: PositionType::Absolute,
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.0)),
        GlobalZIndex(10),
    ));
}

/// Fade the cover toward its target and tint the overlay.
pub fn update_screen_cover(
    time: Res<Time>,
    mut cover: ResMut<ScreenCover>,
    mut overlay_query: Query<&mut BackgroundColor, With<ScreenCoverOverlay>>,
) {
    cover.update(time.delta_secs());

    for mut background in overlay_query.iter_mut() {
        background.0 = Color::srgba(0.0, 0.0, 0.0, cover.opacity);
    }
}
