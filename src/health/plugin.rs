//! Health plugin - damage, healing and invincibility.

use bevy::prelude::*;

use super::systems;

/// Health plugin - handles hurt/heal requests for every entity with `Health`.
pub struct HealthPlugin;

impl Plugin for HealthPlugin {
    fn build(&self, app: &mut App) {
        systems::setup_health_systems(app);
    }
}
