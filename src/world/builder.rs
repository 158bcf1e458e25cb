//! Level building - turns a `LevelDefinition` into entities.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::data::LevelDefinition;
use super::hazards::{Checkpoint, DamageZone};

/// Marker component for all level geometry entities.
#[derive(Component)]
pub struct LevelGeometry;

const BLOCK_COLOR: Color = Color::srgb(0.22, 0.20, 0.19);
const HAZARD_COLOR: Color = Color::srgb(0.55, 0.10, 0.10);
const CHECKPOINT_COLOR: Color = Color::srgba(0.35, 0.55, 0.75, 0.5);
const CHECKPOINT_SIZE: Vec2 = Vec2::new(32.0, 96.0);

fn vec2((x, y): (f32, f32)) -> Vec2 {
    Vec2::new(x, y)
}

/// Spawn all geometry, hazards and checkpoints of `level`.
pub fn build_level(commands: &mut Commands, level: &LevelDefinition) {
    for block in &level.blocks {
        let size = vec2(block.size);
        commands.spawn((
            LevelGeometry,
            Sprite {
                color: BLOCK_COLOR,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(vec2(block.position).extend(0.0))
                .with_rotation(Quat::from_rotation_z(block.angle.to_radians())),
            RigidBody::Fixed,
            Collider::cuboid(size.x / 2.0, size.y / 2.0),
        ));
    }

    for hazard in &level.hazards {
        let size = vec2(hazard.size);
        commands.spawn((
            LevelGeometry,
            DamageZone {
                damage: hazard.damage,
            },
            Sprite {
                color: HAZARD_COLOR,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(vec2(hazard.position).extend(0.0)),
            Collider::cuboid(size.x / 2.0, size.y / 2.0),
            Sensor,
            ActiveEvents::COLLISION_EVENTS,
        ));
    }

    for (index, &position) in level.checkpoints.iter().enumerate() {
        commands.spawn((
            LevelGeometry,
            Checkpoint { index },
            Sprite {
                color: CHECKPOINT_COLOR,
                custom_size: Some(CHECKPOINT_SIZE),
                ..default()
            },
            Transform::from_translation(vec2(position).extend(0.0)),
            Collider::cuboid(CHECKPOINT_SIZE.x / 2.0, CHECKPOINT_SIZE.y / 2.0),
            Sensor,
            ActiveEvents::COLLISION_EVENTS,
        ));
    }

    info!(
        "Built level '{}': {} blocks, {} hazards, {} checkpoints",
        level.name,
        level.blocks.len(),
        level.hazards.len(),
        level.checkpoints.len()
    );
}
