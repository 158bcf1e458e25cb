//! Player locomotion state machine.
//!
//! One call to `Locomotion::step` per fixed tick: sense the ground, read the
//! buttons, then produce the velocity for the physics body. Every branch is
//! total, so stale or empty input simply leaves the body alone.

use bevy::prelude::*;

use super::config::LocomotionConfig;
use super::ground::{GroundQuery, GroundSensor, GroundState};

/// Physical state the locomotion step reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Actor {
    pub position: Vec2,
    pub velocity: Vec2,
}

/// Leniency window for jump presses made just before landing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct JumpBuffer {
    remaining: f32,
}

impl JumpBuffer {
    pub fn press(&mut self, duration: f32) {
        self.remaining = duration.max(0.0);
    }

    pub fn decay(&mut self, delta: f32) {
        self.remaining = (self.remaining - delta).max(0.0);
    }

    pub fn is_pending(&self) -> bool {
        self.remaining > 0.0
    }

    /// Take the buffered press, leaving the buffer empty.
    pub fn consume(&mut self) -> bool {
        let pending = self.is_pending();
        self.remaining = 0.0;
        pending
    }

    pub fn clear(&mut self) {
        self.remaining = 0.0;
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}

/// Buttons and axis sampled for one fixed tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocomotionInput {
    /// Horizontal axis in [-1, 1]
    pub move_axis: f32,
    pub jump_pressed: bool,
    pub jump_held: bool,
    pub crouch_pressed: bool,
    pub crouch_held: bool,
}

/// Which friction the body should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceFriction {
    /// Standing still on ground
    Sticky,
    /// Walking or airborne
    Slippery,
}

/// What changed during a step, for the engine side to apply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    /// `None` leaves the current friction untouched
    pub friction: Option<SurfaceFriction>,
    pub jumped: bool,
    pub crouch_changed: bool,
}

/// Locomotion state carried between ticks.
#[derive(Component, Debug, Clone)]
pub struct Locomotion {
    ground: GroundState,
    is_jumping: bool,
    jump_cancel: bool,
    is_crouching: bool,
    facing_right: bool,
    jump_buffer: JumpBuffer,
}

impl Default for Locomotion {
    fn default() -> Self {
        Self {
            ground: GroundState::default(),
            is_jumping: false,
            jump_cancel: false,
            is_crouching: false,
            facing_right: true,
            jump_buffer: JumpBuffer::default(),
        }
    }
}

impl Locomotion {
    pub fn ground(&self) -> GroundState {
        self.ground
    }

    pub fn is_grounded(&self) -> bool {
        self.ground.is_grounded
    }

    pub fn is_jumping(&self) -> bool {
        self.is_jumping
    }

    pub fn is_crouching(&self) -> bool {
        self.is_crouching
    }

    pub fn facing_right(&self) -> bool {
        self.facing_right
    }

    pub fn jump_buffer(&self) -> JumpBuffer {
        self.jump_buffer
    }

    /// Drop buffered intent, used when control is taken away.
    pub fn clear_intent(&mut self) {
        self.jump_buffer.clear();
        self.jump_cancel = false;
    }

    /// Advance one fixed tick.
    ///
    /// `recharging` is the flashlight's recharge lock: while set, input is
    /// ignored and only the vertical clamp runs.
    #[allow(clippy::too_many_arguments)]
    pub fn step<Q: GroundQuery + ?Sized>(
        &mut self,
        actor: &mut Actor,
        input: &LocomotionInput,
        sensor: &GroundSensor,
        query: &Q,
        recharging: bool,
        config: &LocomotionConfig,
        delta: f32,
    ) -> StepOutcome {
        self.ground = sensor.sense(actor.position, self.is_jumping, query);

        let was_crouching = self.is_crouching;
        let move_axis = if input.move_axis.is_finite() {
            input.move_axis.clamp(-1.0, 1.0)
        } else {
            0.0
        };

        if !recharging {
            self.read_buttons(input, move_axis, config, delta);
        }

        // Can't crouch in the air.
        if !self.ground.is_grounded && self.is_crouching {
            self.is_crouching = false;
        }

        let mut outcome = StepOutcome {
            friction: None,
            jumped: false,
            crouch_changed: false,
        };

        if !recharging {
            if self.ground.is_grounded {
                outcome.jumped = self.ground_move(actor, move_axis, config);
                outcome.friction = Some(if move_axis == 0.0 {
                    SurfaceFriction::Sticky
                } else {
                    SurfaceFriction::Slippery
                });
            } else {
                self.air_move(actor, move_axis, config);
                outcome.friction = Some(SurfaceFriction::Slippery);
            }
        }

        actor.velocity.y = actor
            .velocity
            .y
            .clamp(config.air_min_velocity, config.air_max_velocity);

        outcome.crouch_changed = was_crouching != self.is_crouching;
        outcome
    }

    fn read_buttons(
        &mut self,
        input: &LocomotionInput,
        move_axis: f32,
        config: &LocomotionConfig,
        delta: f32,
    ) {
        if move_axis != 0.0 {
            self.facing_right = move_axis > 0.0;
        }

        if self.ground.is_grounded {
            if config.crouch_toggle {
                if input.crouch_pressed {
                    self.is_crouching = !self.is_crouching;
                }
            } else {
                self.is_crouching = input.crouch_held;
            }
        }

        if input.jump_pressed && !self.is_crouching {
            self.jump_buffer.press(config.jump_buffer_duration);
        } else if self.jump_buffer.is_pending() {
            self.jump_buffer.decay(delta);
        }

        if self.is_jumping && !input.jump_held {
            self.jump_cancel = true;
        }
    }

    /// Returns whether a jump was executed.
    fn ground_move(&mut self, actor: &mut Actor, move_axis: f32, config: &LocomotionConfig) -> bool {
        if move_axis != 0.0 {
            if self.ground.is_on_slope {
                // Follow the surface on both axes.
                actor.velocity = self.ground.slope_tangent * move_axis * config.move_speed;
            } else {
                actor.velocity.x = move_axis * config.move_speed;
            }

            if self.is_crouching {
                actor.velocity *= config.crouch_speed_multiplier;
            }
        }

        if !self.jump_buffer.consume() {
            return false;
        }

        actor.velocity.y = config.jump_force;
        self.is_jumping = true;
        self.jump_cancel = false;
        self.ground.is_grounded = false;
        self.ground.is_on_slope = false;
        true
    }

    fn air_move(&mut self, actor: &mut Actor, move_axis: f32, config: &LocomotionConfig) {
        actor.velocity.x = move_axis * config.move_speed;

        if self.is_jumping && self.jump_cancel {
            actor.velocity.y = 0.0;
            self.jump_cancel = false;
        }

        if self.is_jumping && actor.velocity.y <= 0.0 {
            self.is_jumping = false;
            self.jump_cancel = false;
        }
    }
}
