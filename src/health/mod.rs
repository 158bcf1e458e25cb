//! Health module - hit points, invincibility windows and death.

mod components;
mod plugin;
mod systems;

pub use components::*;
pub use plugin::HealthPlugin;
pub use systems::HealthSet;
