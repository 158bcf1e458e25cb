//! Player tuning loaded from an external RON file.
//!
//! Allows tweaking movement, flashlight and health parameters without
//! recompilation. Values are checked by `PlayerConfig::validate` before the
//! config is handed to the simulation.

use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

use crate::core::{load_ron, parse_ron, DataLoadError};

/// Default location of the player data file.
pub const PLAYER_CONFIG_PATH: &str = "assets/data/player.ron";

/// A config value the simulation cannot work with.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },

    #[error("crouch speed multiplier must be within [0, 1] (got {0})")]
    CrouchMultiplier(f32),

    #[error("air velocity range is inverted: min {min} > max {max}")]
    AirVelocityRange { min: f32, max: f32 },

    #[error("max health must be positive (got {0})")]
    MaxHealth(i32),

    #[error("max incline must be within (0, 90] degrees (got {0})")]
    MaxIncline(f32),

    #[error("look-up angle must be within [1, 179] degrees (got {0})")]
    LookUpAngle(f32),

    #[error("ground check size must be positive (got {0}x{1})")]
    GroundCheckSize(f32, f32),
}

/// Ground check box and walkable slope limit.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GroundConfig {
    /// Box center relative to the player's position
    pub offset: (f32, f32),
    /// Box width and height
    pub size: (f32, f32),
    /// Steepest walkable surface in degrees
    pub max_incline: f32,
    /// Collision groups the ground check reacts to
    pub collision_mask: u32,
    /// Fewest probe rays spread across the box width; wide boxes get more
    pub probes: usize,
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            offset: (0.0, -48.0),
            size: (28.0, 8.0),
            max_incline: 47.5,
            collision_mask: u32::MAX,
            probes: 3,
        }
    }
}

impl GroundConfig {
    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.offset.0, self.offset.1)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.size.0, self.size.1)
    }
}

/// Movement and jump tuning.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    /// Horizontal speed in pixels per second
    pub move_speed: f32,
    /// Speed multiplier while crouching
    pub crouch_speed_multiplier: f32,
    /// Vertical velocity set by a jump
    pub jump_force: f32,
    /// Lowest vertical velocity (terminal fall speed, negative)
    pub air_min_velocity: f32,
    /// Highest vertical velocity
    pub air_max_velocity: f32,
    /// How long a jump press stays buffered before landing
    pub jump_buffer_duration: f32,
    /// Crouch button toggles instead of being held
    pub crouch_toggle: bool,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            move_speed: 260.0,
            crouch_speed_multiplier: 0.5,
            jump_force: 620.0,
            air_min_velocity: -900.0,
            air_max_velocity: 900.0,
            jump_buffer_duration: 0.15,
            crouch_toggle: false,
        }
    }
}

/// Flashlight energy tuning.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FlashlightConfig {
    /// Energy lost per second while on
    pub energy_decay_per_sec: f32,
    /// Seconds to refill from 0 to 100
    pub time_for_full_recharge: f32,
    /// Energy level under which the low-energy signal fires
    pub low_energy_threshold: f32,
    /// Flashlight button toggles instead of being held
    pub toggle_input: bool,
    /// Debug switch that freezes the drain
    pub decay_disabled: bool,
    /// Width of the cone around straight up that counts as looking up
    pub look_up_angle: f32,
}

impl Default for FlashlightConfig {
    fn default() -> Self {
        Self {
            energy_decay_per_sec: 10.0,
            time_for_full_recharge: 3.0,
            low_energy_threshold: 40.0,
            toggle_input: true,
            decay_disabled: false,
            look_up_angle: 90.0,
        }
    }
}

/// Hit points and damage window.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HealthConfig {
    pub max_health: i32,
    /// Seconds of invincibility after each hit
    pub invincibility_duration: f32,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            max_health: 3,
            invincibility_duration: 1.0,
        }
    }
}

/// Friction coefficients swapped by the locomotion state.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FrictionConfig {
    /// Standing still, crouching or recharging
    pub idle: f32,
    /// Walking or airborne
    pub moving: f32,
}

impl Default for FrictionConfig {
    fn default() -> Self {
        Self {
            idle: 1.0,
            moving: 0.0,
        }
    }
}

/// Player configuration loaded from assets/data/player.ron.
#[derive(Resource, Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub ground: GroundConfig,
    pub locomotion: LocomotionConfig,
    pub flashlight: FlashlightConfig,
    pub health: HealthConfig,
    pub friction: FrictionConfig,
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NotFinite { field });
    }
    Ok(())
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(ConfigError::Negative { field, value });
    }
    Ok(())
}

impl PlayerConfig {
    /// Reject values that would break the simulation's invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ground = &self.ground;
        finite("ground.offset.x", ground.offset.0)?;
        finite("ground.offset.y", ground.offset.1)?;
        finite("ground.size.x", ground.size.0)?;
        finite("ground.size.y", ground.size.1)?;
        finite("ground.max_incline", ground.max_incline)?;
        if ground.size.0 <= 0.0 || ground.size.1 <= 0.0 {
            return Err(ConfigError::GroundCheckSize(ground.size.0, ground.size.1));
        }
        if ground.max_incline <= 0.0 || ground.max_incline > 90.0 {
            return Err(ConfigError::MaxIncline(ground.max_incline));
        }

        let locomotion = &self.locomotion;
        non_negative("move_speed", locomotion.move_speed)?;
        non_negative("jump_force", locomotion.jump_force)?;
        non_negative("jump_buffer_duration", locomotion.jump_buffer_duration)?;
        if !(0.0..=1.0).contains(&locomotion.crouch_speed_multiplier) {
            return Err(ConfigError::CrouchMultiplier(locomotion.crouch_speed_multiplier));
        }
        finite("air_min_velocity", locomotion.air_min_velocity)?;
        finite("air_max_velocity", locomotion.air_max_velocity)?;
        if locomotion.air_min_velocity > locomotion.air_max_velocity {
            return Err(ConfigError::AirVelocityRange {
                min: locomotion.air_min_velocity,
                max: locomotion.air_max_velocity,
            });
        }

        let flashlight = &self.flashlight;
        non_negative("energy_decay_per_sec", flashlight.energy_decay_per_sec)?;
        non_negative("time_for_full_recharge", flashlight.time_for_full_recharge)?;
        non_negative("low_energy_threshold", flashlight.low_energy_threshold)?;
        if !(1.0..=179.0).contains(&flashlight.look_up_angle) {
            return Err(ConfigError::LookUpAngle(flashlight.look_up_angle));
        }

        if self.health.max_health <= 0 {
            return Err(ConfigError::MaxHealth(self.health.max_health));
        }
        non_negative("invincibility_duration", self.health.invincibility_duration)?;

        non_negative("friction.idle", self.friction.idle)?;
        non_negative("friction.moving", self.friction.moving)?;

        Ok(())
    }

    /// Parse and validate RON text.
    pub fn parse(contents: &str, path: &str) -> Result<Self, DataLoadError> {
        let config: Self = parse_ron(contents, path)?;
        config.checked(path)
    }

    /// Read, parse and validate a RON file.
    pub fn load_from(path: &str) -> Result<Self, DataLoadError> {
        let config: Self = load_ron(path)?;
        config.checked(path)
    }

    fn checked(self, path: &str) -> Result<Self, DataLoadError> {
        self.validate().map_err(|e| DataLoadError::Invalid {
            path: path.to_string(),
            details: e.to_string(),
        })?;
        Ok(self)
    }

    /// Load the player config, falling back to defaults on any problem.
    pub fn load() -> Self {
        match Self::load_from(PLAYER_CONFIG_PATH) {
            Ok(config) => {
                info!("Loaded player config from {}", PLAYER_CONFIG_PATH);
                config
            }
            Err(e @ DataLoadError::ReadError { .. }) => {
                warn!("{}. Using defaults.", e);
                Self::default()
            }
            Err(e) => {
                error!("{}. Using defaults.", e);
                Self::default()
            }
        }
    }
}

/// System to load the player config at startup.
pub fn load_player_config(mut commands: Commands) {
    let config = PlayerConfig::load();
    commands.insert_resource(config);
}
