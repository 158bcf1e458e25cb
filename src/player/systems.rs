//! Fixed-tick player systems: flashlight, locomotion and aim.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::aim::{aim_at, aim_from_axes};
use super::components::*;
use super::config::PlayerConfig;
use super::flashlight::Flashlight;
use super::ground::{GroundSensor, RapierGroundQuery};
use super::input::read_player_input;
use super::locomotion::{Actor, Locomotion, SurfaceFriction};
use crate::core::{FlashlightEvent, GameState};

/// System set ordering for the player's fixed tick.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum PlayerSet {
    /// Flashlight buttons, recharge and energy
    Resources,
    /// Ground check and velocity
    Locomotion,
    /// Aim and input bookkeeping
    Feedback,
}

/// Set up player systems.
pub fn setup_player_systems(app: &mut App) {
    app
        .configure_sets(
            FixedUpdate,
            (PlayerSet::Resources, PlayerSet::Locomotion, PlayerSet::Feedback)
                .chain()
                .before(PhysicsSet::SyncBackend)
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(FixedUpdate, flashlight_control.in_set(PlayerSet::Resources))
        .add_systems(FixedUpdate, player_locomotion.in_set(PlayerSet::Locomotion))
        .add_systems(
            FixedUpdate,
            (update_flashlight_aim, consume_input_presses)
                .chain()
                .in_set(PlayerSet::Feedback),
        )
        .add_systems(
            Update,
            (read_player_input, update_player_sprite, update_flashlight_beam)
                .run_if(in_state(GameState::InGame)),
        );
}

/// Flashlight buttons, recharge requests and energy drain/refill.
pub fn flashlight_control(
    time: Res<Time>,
    config: Res<PlayerConfig>,
    mut query: Query<
        (Entity, &mut PlayerInput, &mut Flashlight, &Locomotion, Option<&mut Friction>),
        (With<Player>, Without<Incapacitated>),
    >,
    mut events: EventWriter<FlashlightEvent>,
) {
    let dt = time.delta_secs();

    for (entity, mut input, mut flashlight, locomotion, friction) in query.iter_mut() {
        // Light switch is locked while recharging.
        if !flashlight.is_recharging() {
            let signal = if config.flashlight.toggle_input {
                if input.flashlight_pressed {
                    flashlight.toggle()
                } else {
                    None
                }
            } else if input.flashlight_pressed {
                flashlight.activate()
            } else if input.flashlight_released {
                flashlight.deactivate()
            } else {
                None
            };

            if let Some(signal) = signal {
                events.send(FlashlightEvent { entity, signal });
            }
        }

        let (pressed, held) = (input.recharge_pressed, input.recharge_held);
        let requested = input.recharge_button.update(pressed, held, dt);

        // Can't recharge in the air.
        if locomotion.is_grounded() {
            if requested && !flashlight.is_recharging() {
                if flashlight.request_recharge(true) {
                    if let Some(mut friction) = friction {
                        friction.coefficient = config.friction.idle;
                    }
                }
            } else if !requested && flashlight.is_recharging() {
                flashlight.request_recharge(false);
            }
        }

        if let Some(signal) = flashlight.tick(dt) {
            events.send(FlashlightEvent { entity, signal });
        }
    }
}

/// Ground check and movement for the player body.
pub fn player_locomotion(
    time: Res<Time>,
    config: Res<PlayerConfig>,
    rapier_context: Query<&RapierContext>,
    mut player_query: Query<
        (
            Entity,
            &Transform,
            &GroundSensor,
            &PlayerInput,
            &Flashlight,
            &PlayerColliders,
            &mut Locomotion,
            &mut Velocity,
            &mut Friction,
            &mut Collider,
        ),
        (With<Player>, Without<Incapacitated>),
    >,
) {
    let Ok(context) = rapier_context.get_single() else {
        return;
    };
    let Ok((
        player_entity,
        transform,
        sensor,
        input,
        flashlight,
        colliders,
        mut locomotion,
        mut velocity,
        mut friction,
        mut collider,
    )) = player_query.get_single_mut()
    else {
        return;
    };

    let groups = CollisionGroups::new(
        Group::ALL,
        Group::from_bits_truncate(config.ground.collision_mask),
    );
    let filter = QueryFilter::default()
        .exclude_collider(player_entity)
        .exclude_sensors()
        .groups(groups);
    let ground_query = RapierGroundQuery::new(context, filter, config.ground.probes);

    let mut actor = Actor {
        position: transform.translation.truncate(),
        velocity: velocity.linvel,
    };

    let outcome = locomotion.step(
        &mut actor,
        &input.locomotion(),
        sensor,
        &ground_query,
        flashlight.is_recharging(),
        &config.locomotion,
        time.delta_secs(),
    );

    velocity.linvel = actor.velocity;

    if let Some(surface) = outcome.friction {
        friction.coefficient = match surface {
            SurfaceFriction::Sticky => config.friction.idle,
            SurfaceFriction::Slippery => config.friction.moving,
        };
    }

    if outcome.crouch_changed {
        *collider = if locomotion.is_crouching() {
            colliders.crouching.clone()
        } else {
            colliders.standing.clone()
        };
    }

    if outcome.jumped {
        debug!("Player jumped");
    }
}

/// Point the flashlight at the cursor or along the aim axes.
pub fn update_flashlight_aim(
    config: Res<PlayerConfig>,
    mut query: Query<(&PlayerInput, &Locomotion, &mut FlashlightAim), Without<Incapacitated>>,
) {
    let look_up_angle = config.flashlight.look_up_angle;

    for (input, locomotion, mut aim) in query.iter_mut() {
        let facing_right = locomotion.facing_right();
        aim.0 = match input.aim_source {
            AimSource::Mouse => aim_at(
                input.cursor_offset.x,
                input.cursor_offset.y,
                facing_right,
                look_up_angle,
            ),
            AimSource::Axes => {
                aim_from_axes(input.aim_axes.x, input.aim_axes.y, facing_right, look_up_angle)
            }
        };
    }
}

/// Presses have been seen by this tick; drop them.
pub fn consume_input_presses(mut query: Query<&mut PlayerInput>) {
    for mut input in query.iter_mut() {
        input.clear_presses();
    }
}

/// Mirror the player sprite to its facing.
fn update_player_sprite(mut query: Query<(&Locomotion, &mut Sprite), With<Player>>) {
    for (locomotion, mut sprite) in query.iter_mut() {
        sprite.flip_x = !locomotion.facing_right();
    }
}

/// Show the light cone while the flashlight is on and rotate it to the aim.
fn update_flashlight_beam(
    player_query: Query<(&Flashlight, &FlashlightAim, &Children), With<Player>>,
    mut beam_query: Query<(&mut Transform, &mut Visibility), With<FlashlightBeam>>,
) {
    for (flashlight, aim, children) in player_query.iter() {
        for &child in children.iter() {
            let Ok((mut transform, mut visibility)) = beam_query.get_mut(child) else {
                continue;
            };
            *visibility = if flashlight.is_on() {
                Visibility::Inherited
            } else {
                Visibility::Hidden
            };
            transform.rotation = Quat::from_rotation_z(aim.0.angle.to_radians());
        }
    }
}
