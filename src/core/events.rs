//! Global events used for cross-system communication.
//!
//! Requests (`DamageEvent`, `HealEvent`) are sent by whoever wants a health
//! change; the health systems apply them and answer with notifications
//! (`HurtEvent`, `HealedEvent`, `DeathEvent`) that animation, audio and UI
//! collaborators can read. A reader lives as long as its system, so there is
//! nothing to unsubscribe by hand.

use bevy::prelude::*;

/// Request to damage an entity that carries `Health`.
#[derive(Event, Debug, Clone, Copy)]
pub struct DamageEvent {
    /// Entity receiving damage
    pub target: Entity,
    /// Hit points to subtract
    pub amount: i32,
}

/// Request to heal an entity that carries `Health`.
#[derive(Event, Debug, Clone, Copy)]
pub struct HealEvent {
    /// Entity being healed
    pub target: Entity,
    /// Hit points to restore, `None` heals to full
    pub amount: Option<i32>,
}

/// Sent after damage was applied and the entity survived.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HurtEvent {
    pub entity: Entity,
    pub amount: i32,
}

/// Sent after a heal was applied. `amount` is what was actually restored.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealedEvent {
    pub entity: Entity,
    pub amount: i32,
}

/// Sent once when an entity's health reaches 0.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeathEvent {
    pub entity: Entity,
}

/// Observable flashlight transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashlightSignal {
    On,
    Off,
    /// Energy dropped under the low-energy threshold while the light was on.
    LowEnergy,
    /// Energy refilled to 100 and the recharge lock was lifted.
    RechargeComplete,
}

/// Sent whenever a flashlight changes observable state.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlashlightEvent {
    pub entity: Entity,
    pub signal: FlashlightSignal,
}

/// Sent when the player touches a checkpoint.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckpointReachedEvent {
    pub index: usize,
}
