//! Game state definitions that control the overall flow of the game.
//!
//! States determine which systems run at any given time. The fixed-tick
//! simulation (ground sensing, locomotion, flashlight, health timers) only
//! runs while `InGame`.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// - Start in `Loading` while data files are read
/// - Enter `InGame` once the player config and level are available
/// - `Paused` freezes the simulation but keeps the world visible
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading data files
    #[default]
    Loading,
    /// Active gameplay
    InGame,
    /// Game is paused (overlay on gameplay)
    Paused,
}
