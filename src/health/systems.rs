//! Health systems - apply damage/heal requests and run invincibility timers.

use bevy::prelude::*;

use super::components::*;
use crate::core::{DamageEvent, DeathEvent, GameState, HealEvent, HealedEvent, HurtEvent};

/// System set ordering for health.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum HealthSet {
    /// Timers run before new requests so a window that ends this tick
    /// no longer blocks damage arriving this tick.
    Timers,
    Apply,
}

/// Configure health systems.
pub fn setup_health_systems(app: &mut App) {
    app
        .configure_sets(
            FixedUpdate,
            (HealthSet::Timers, HealthSet::Apply)
                .chain()
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(FixedUpdate, tick_invincibility.in_set(HealthSet::Timers))
        .add_systems(
            FixedUpdate,
            (apply_damage, apply_heal).chain().in_set(HealthSet::Apply),
        );
}

/// Count down damage-granted invincibility windows.
pub fn tick_invincibility(time: Res<Time>, mut query: Query<&mut Health>) {
    let dt = time.delta_secs();
    for mut health in query.iter_mut() {
        health.tick(dt);
    }
}

/// Apply damage requests and announce the result.
pub fn apply_damage(
    mut damage_events: EventReader<DamageEvent>,
    mut query: Query<&mut Health>,
    mut hurt_events: EventWriter<HurtEvent>,
    mut death_events: EventWriter<DeathEvent>,
) {
    for event in damage_events.read() {
        let Ok(mut health) = query.get_mut(event.target) else {
            continue;
        };

        match health.hurt(event.amount) {
            Some(HealthChange::Hurt(amount)) => {
                debug!("{:?} hurt for {} ({} left)", event.target, amount, health.current());
                hurt_events.send(HurtEvent {
                    entity: event.target,
                    amount,
                });
            }
            Some(HealthChange::Died) => {
                info!("{:?} died", event.target);
                death_events.send(DeathEvent {
                    entity: event.target,
                });
            }
            _ => {}
        }
    }
}

/// Apply heal requests and announce the clamped amount.
pub fn apply_heal(
    mut heal_events: EventReader<HealEvent>,
    mut query: Query<&mut Health>,
    mut healed_events: EventWriter<HealedEvent>,
) {
    for event in heal_events.read() {
        let Ok(mut health) = query.get_mut(event.target) else {
            continue;
        };

        let change = match event.amount {
            Some(amount) => health.heal(amount),
            None => health.full_heal(),
        };

        if let Some(HealthChange::Healed(amount)) = change {
            healed_events.send(HealedEvent {
                entity: event.target,
                amount,
            });
        }
    }
}
