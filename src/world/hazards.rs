//! Sensor areas: damage zones and checkpoints.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::{CheckpointReachedEvent, DamageEvent, GameSession};
use crate::health::Health;
use crate::player::Player;

/// Hurts any living entity with `Health` that starts touching it.
#[derive(Component, Debug, Clone, Copy)]
pub struct DamageZone {
    pub damage: i32,
}

/// Respawn point, activated when the player touches it.
#[derive(Component, Debug, Clone, Copy)]
pub struct Checkpoint {
    pub index: usize,
}

/// React to sensor contacts that just started.
pub fn handle_sensor_contacts(
    mut collisions: EventReader<CollisionEvent>,
    zones: Query<&DamageZone>,
    checkpoints: Query<&Checkpoint>,
    players: Query<(), With<Player>>,
    healths: Query<&Health>,
    mut session: ResMut<GameSession>,
    mut damage_events: EventWriter<DamageEvent>,
    mut checkpoint_events: EventWriter<CheckpointReachedEvent>,
) {
    for event in collisions.read() {
        let CollisionEvent::Started(a, b, _) = *event else {
            continue;
        };

        for (sensor, other) in [(a, b), (b, a)] {
            if let Ok(zone) = zones.get(sensor) {
                if healths.get(other).is_ok_and(|health| !health.is_dead()) {
                    damage_events.send(DamageEvent {
                        target: other,
                        amount: zone.damage,
                    });
                }
            }

            if let Ok(checkpoint) = checkpoints.get(sensor) {
                if players.contains(other) && session.checkpoint != checkpoint.index {
                    session.checkpoint = checkpoint.index;
                    info!("Checkpoint {} reached", checkpoint.index);
                    checkpoint_events.send(CheckpointReachedEvent {
                        index: checkpoint.index,
                    });
                }
            }
        }
    }
}
