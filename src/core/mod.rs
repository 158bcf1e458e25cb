//! Core game module - states, events, session context and fundamental systems.
//!
//! This module provides the foundation that all other game systems build upon.

mod data;
mod error;
mod events;
mod plugin;
mod session;
mod states;
mod tween;

pub use data::{load_ron, parse_ron};
pub use error::DataLoadError;
pub use events::*;
pub use plugin::CorePlugin;
pub use session::*;
pub use states::*;
pub use tween::*;
