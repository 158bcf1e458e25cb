//! Player and camera spawning.

use bevy::prelude::*;
use bevy::sprite::Anchor;
use bevy_rapier2d::prelude::*;

use super::components::*;
use super::config::PlayerConfig;
use super::flashlight::Flashlight;
use super::ground::GroundSensor;
use super::locomotion::Locomotion;
use crate::core::SmoothFollow;
use crate::health::Health;

/// Marker for the camera that follows the player.
#[derive(Component)]
pub struct PlayerCamera;

/// Capsule half-height and radius of the standing body.
const BODY_HALF_HEIGHT: f32 = 32.0;
const BODY_RADIUS: f32 = 16.0;

/// Spawn the player entity at `position`.
pub fn spawn_player(commands: &mut Commands, position: Vec2, config: &PlayerConfig) -> Entity {
    let standing = Collider::capsule_y(BODY_HALF_HEIGHT, BODY_RADIUS);
    // Half as tall, shifted down so the feet stay where they were.
    let crouching = Collider::compound(vec![(
        Vec2::new(0.0, -BODY_HALF_HEIGHT / 2.0),
        0.0,
        Collider::capsule_y(BODY_HALF_HEIGHT / 2.0, BODY_RADIUS),
    )]);

    let player = commands
        .spawn((
            (
                Player,
                Name::new("Player"),
                PlayerInput::default(),
                Locomotion::default(),
                GroundSensor::from_config(&config.ground),
                Flashlight::new(&config.flashlight),
                FlashlightAim::default(),
                Health::new(config.health.max_health, config.health.invincibility_duration),
            ),
            Sprite {
                color: Color::srgb(0.82, 0.78, 0.70),
                custom_size: Some(Vec2::new(
                    BODY_RADIUS * 2.0,
                    (BODY_HALF_HEIGHT + BODY_RADIUS) * 2.0,
                )),
                ..default()
            },
            Transform::from_translation(position.extend(1.0)),
            // Rapier physics components
            (
                RigidBody::Dynamic,
                LockedAxes::ROTATION_LOCKED,
                Velocity::zero(),
                standing.clone(),
                PlayerColliders {
                    standing,
                    crouching,
                },
                Friction::coefficient(config.friction.idle),
                Ccd::enabled(),
                ActiveEvents::COLLISION_EVENTS,
            ),
        ))
        .id();

    commands.entity(player).with_children(|parent| {
        parent.spawn((
            FlashlightBeam,
            Sprite {
                color: Color::srgba(1.0, 0.95, 0.7, 0.35),
                custom_size: Some(Vec2::new(220.0, 60.0)),
                anchor: Anchor::CenterLeft,
                ..default()
            },
            Transform::from_xyz(0.0, BODY_HALF_HEIGHT / 2.0, 0.5),
            Visibility::Hidden,
        ));
    });

    info!("Spawned player at ({}, {})", position.x, position.y);
    player
}

/// Spawn the 2D camera following `target`.
pub fn spawn_camera(commands: &mut Commands, target: Entity, position: Vec2) -> Entity {
    commands
        .spawn((
            Camera2d,
            PlayerCamera,
            SmoothFollow::new(target, 6.0),
            Transform::from_translation(position.extend(100.0)),
        ))
        .id()
}
