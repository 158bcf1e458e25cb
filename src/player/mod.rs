//! Player module - ground detection, locomotion, flashlight and input.

mod aim;
mod components;
mod config;
mod flashlight;
mod ground;
mod input;
mod locomotion;
mod plugin;
mod spawn;
mod systems;

pub use aim::{aim_at, aim_from_axes, Aim};
pub use components::*;
pub use config::*;
pub use flashlight::{Flashlight, RechargeButton, MAX_ENERGY, RECHARGE_INPUT_BUFFER};
pub use ground::{
    probe_offsets, slope_tangent, surface_angle, GroundContact, GroundQuery, GroundSensor,
    GroundState, RapierGroundQuery, MAX_PROBE_SPACING,
};
pub use locomotion::{Actor, JumpBuffer, Locomotion, LocomotionInput, StepOutcome, SurfaceFriction};
pub use plugin::PlayerPlugin;
pub use spawn::{spawn_camera, spawn_player, PlayerCamera};
pub use systems::PlayerSet;
