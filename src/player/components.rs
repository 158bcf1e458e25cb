//! Player-related components.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::aim::Aim;
use super::flashlight::RechargeButton;
use super::locomotion::LocomotionInput;

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Marker for a player that has lost control (dead, respawning).
#[derive(Component)]
pub struct Incapacitated;

/// Last device that moved the flashlight aim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AimSource {
    #[default]
    Mouse,
    Axes,
}

/// Input sampled every frame and consumed by the fixed tick.
///
/// Presses and releases are latched until a fixed tick has seen them, so a
/// frame that runs no fixed tick cannot swallow a press.
#[derive(Component, Debug, Clone, Default)]
pub struct PlayerInput {
    pub move_axis: f32,
    pub jump_pressed: bool,
    pub jump_held: bool,
    pub crouch_pressed: bool,
    pub crouch_held: bool,
    pub flashlight_pressed: bool,
    pub flashlight_released: bool,
    pub recharge_pressed: bool,
    pub recharge_held: bool,
    pub aim_source: AimSource,
    /// Cursor position relative to the player, in world units
    pub cursor_offset: Vec2,
    /// Directional aim axes in [-1, 1]
    pub aim_axes: Vec2,
    /// Recharge press buffer, advanced by the fixed tick
    pub recharge_button: RechargeButton,
}

impl PlayerInput {
    pub fn locomotion(&self) -> LocomotionInput {
        LocomotionInput {
            move_axis: self.move_axis,
            jump_pressed: self.jump_pressed,
            jump_held: self.jump_held,
            crouch_pressed: self.crouch_pressed,
            crouch_held: self.crouch_held,
        }
    }

    /// Forget one-shot presses once a fixed tick has handled them.
    pub fn clear_presses(&mut self) {
        self.jump_pressed = false;
        self.crouch_pressed = false;
        self.flashlight_pressed = false;
        self.flashlight_released = false;
        self.recharge_pressed = false;
    }

    /// Drop everything, used when control is taken away.
    pub fn reset(&mut self) {
        *self = Self {
            aim_source: self.aim_source,
            ..default()
        };
    }
}

/// Standing and crouching body shapes.
#[derive(Component, Clone)]
pub struct PlayerColliders {
    pub standing: Collider,
    pub crouching: Collider,
}

/// Current flashlight aim, updated every fixed tick.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct FlashlightAim(pub Aim);

/// Marker for the visible light cone child entity.
#[derive(Component)]
pub struct FlashlightBeam;
