//! World module - level data, geometry, hazards and respawning.

mod builder;
mod data;
mod hazards;
mod plugin;
mod respawn;

pub use builder::{build_level, LevelGeometry};
pub use data::{BlockDef, HazardDef, LevelDefinition, LEVEL_PATH};
pub use hazards::{handle_sensor_contacts, Checkpoint, DamageZone};
pub use plugin::{setup_level, WorldPlugin};
pub use respawn::{begin_respawn_on_death, drive_respawn, ScreenCoverOverlay};
