//! Morkel - player movement and survival core of a 2D side-scrolling horror game.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, respawn sequencing, camera follow
//! - **Health**: Hit points, invincibility windows, hurt/heal/death events
//! - **Player**: Input, ground sensing, locomotion, flashlight and aim
//! - **World**: Level data, geometry, hazards, checkpoints and respawning
//!
//! The movement, flashlight and health rules live in plain structs
//! (`Locomotion`, `Flashlight`, `Health`) that know nothing about the ECS;
//! the systems only feed them input and write back the results.

pub mod core;
pub mod health;
pub mod player;
pub mod world;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
///
/// Physics is left to the caller so tests can run the game logic without it.
pub struct MorkelPlugin;

impl Plugin for MorkelPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Health systems
            .add_plugins(health::HealthPlugin)

            // Player systems
            .add_plugins(player::PlayerPlugin)

            // World systems
            .add_plugins(world::WorldPlugin);
    }
}
