//! Flashlight energy: drains while on, refills only through a forced recharge.
//!
//! Off -> On (refused when empty or locked) -> energy hits 0 -> forced Off
//! with `can_recharge` set -> recharging -> energy reaches 100 -> Off with
//! the lock lifted. Cancelling a recharge halfway keeps the lock and the
//! progress, so the next recharge resumes where it stopped.

use bevy::prelude::*;

use super::config::FlashlightConfig;
use crate::core::FlashlightSignal;

pub const MAX_ENERGY: f32 = 100.0;

/// Drain residue below this counts as empty.
const EMPTY_EPSILON: f32 = 1e-3;

/// How long a recharge press keeps requesting after the button is let go.
pub const RECHARGE_INPUT_BUFFER: f32 = 0.1;

#[derive(Component, Debug, Clone)]
pub struct Flashlight {
    energy: f32,
    is_on: bool,
    can_recharge: bool,
    is_recharging: bool,
    recharge_elapsed: f32,
    low_energy_reported: bool,
    decay_per_sec: f32,
    time_for_full_recharge: f32,
    low_energy_threshold: f32,
    decay_disabled: bool,
}

impl Flashlight {
    pub fn new(config: &FlashlightConfig) -> Self {
        assert!(config.energy_decay_per_sec >= 0.0, "decay must not be negative");
        assert!(
            config.time_for_full_recharge >= 0.0,
            "recharge time must not be negative"
        );
        Self {
            energy: MAX_ENERGY,
            is_on: false,
            can_recharge: false,
            is_recharging: false,
            recharge_elapsed: 0.0,
            low_energy_reported: false,
            decay_per_sec: config.energy_decay_per_sec,
            time_for_full_recharge: config.time_for_full_recharge,
            low_energy_threshold: config.low_energy_threshold,
            decay_disabled: config.decay_disabled,
        }
    }

    pub fn energy(&self) -> f32 {
        self.energy
    }

    pub fn is_on(&self) -> bool {
        self.is_on
    }

    pub fn can_recharge(&self) -> bool {
        self.can_recharge
    }

    pub fn is_recharging(&self) -> bool {
        self.is_recharging
    }

    /// Back to a full, switched-off light.
    pub fn reset(&mut self) {
        self.energy = MAX_ENERGY;
        self.is_on = false;
        self.can_recharge = false;
        self.is_recharging = false;
        self.recharge_elapsed = 0.0;
        self.low_energy_reported = false;
    }

    /// Switch on. Refused while empty or waiting for a recharge.
    pub fn activate(&mut self) -> Option<FlashlightSignal> {
        if self.is_on || self.energy <= 0.0 || self.can_recharge {
            return None;
        }
        self.is_on = true;
        Some(FlashlightSignal::On)
    }

    pub fn deactivate(&mut self) -> Option<FlashlightSignal> {
        if !self.is_on {
            return None;
        }
        self.is_on = false;
        self.low_energy_reported = false;
        Some(FlashlightSignal::Off)
    }

    pub fn toggle(&mut self) -> Option<FlashlightSignal> {
        if self.is_on {
            self.deactivate()
        } else {
            self.activate()
        }
    }

    /// Start or stop recharging. Returns whether the request was accepted,
    /// which only happens once the light has been drained.
    pub fn request_recharge(&mut self, recharging: bool) -> bool {
        if !self.can_recharge {
            return false;
        }
        self.is_recharging = recharging;
        true
    }

    pub fn tick(&mut self, delta: f32) -> Option<FlashlightSignal> {
        if self.is_on && !self.decay_disabled {
            self.energy = (self.energy - self.decay_per_sec * delta).max(0.0);

            if self.energy <= EMPTY_EPSILON {
                self.energy = 0.0;
                self.is_on = false;
                self.low_energy_reported = false;
                self.can_recharge = true;
                info!("Flashlight drained, recharge required");
                return Some(FlashlightSignal::Off);
            }

            if !self.low_energy_reported && self.energy < self.low_energy_threshold {
                self.low_energy_reported = true;
                return Some(FlashlightSignal::LowEnergy);
            }
        }

        if self.can_recharge && self.is_recharging {
            self.recharge_elapsed += delta;
            self.energy = if self.time_for_full_recharge > 0.0 {
                (MAX_ENERGY * self.recharge_elapsed / self.time_for_full_recharge).min(MAX_ENERGY)
            } else {
                MAX_ENERGY
            };

            if self.energy >= MAX_ENERGY {
                self.energy = MAX_ENERGY;
                self.is_recharging = false;
                self.can_recharge = false;
                self.recharge_elapsed = 0.0;
                info!("Flashlight recharged");
                return Some(FlashlightSignal::RechargeComplete);
            }
        }

        None
    }
}

/// Short press buffer for the recharge button.
#[derive(Debug, Clone, Copy, Default)]
pub struct RechargeButton {
    buffer: f32,
}

impl RechargeButton {
    /// Feed one tick of button state; returns whether a recharge is requested.
    pub fn update(&mut self, pressed: bool, held: bool, delta: f32) -> bool {
        if pressed {
            self.buffer = RECHARGE_INPUT_BUFFER;
        } else if !held {
            self.buffer = (self.buffer - delta).max(0.0);
        }
        self.buffer > 0.0
    }

    pub fn clear(&mut self) {
        self.buffer = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> FlashlightConfig {
        FlashlightConfig {
            energy_decay_per_sec: 10.0,
            time_for_full_recharge: 2.0,
            low_energy_threshold: 40.0,
            ..default()
        }
    }

    fn drained() -> Flashlight {
        let mut light = Flashlight::new(&config());
        light.activate();
        light.tick(10.0);
        light
    }

    #[test]
    fn activate_and_deactivate_emit_signals() {
        let mut light = Flashlight::new(&config());
        assert_eq!(light.activate(), Some(FlashlightSignal::On));
        assert_eq!(light.activate(), None);
        assert_eq!(light.deactivate(), Some(FlashlightSignal::Off));
        assert_eq!(light.deactivate(), None);
        assert_eq!(light.toggle(), Some(FlashlightSignal::On));
    }

    #[test]
    fn energy_only_drains_while_on() {
        let mut light = Flashlight::new(&config());
        light.tick(1.0);
        assert_eq!(light.energy(), 100.0);

        light.activate();
        let mut previous = light.energy();
        for _ in 0..10 {
            light.tick(0.25);
            assert!(light.energy() < previous);
            previous = light.energy();
        }
    }

    #[test]
    fn full_drain_scenario() {
        let mut light = Flashlight::new(&config());
        light.activate();
        let mut forced_off = None;
        for i in 0..640 {
            if let Some(FlashlightSignal::Off) = light.tick(1.0 / 64.0) {
                forced_off = Some(i);
            }
        }
        assert_eq!(forced_off, Some(639));
        assert_eq!(light.energy(), 0.0);
        assert!(!light.is_on());
        assert!(light.can_recharge());
    }

    #[test]
    fn drain_in_coarse_steps_still_empties() {
        let mut light = Flashlight::new(&config());
        light.activate();
        for _ in 0..100 {
            light.tick(0.1);
        }
        assert_eq!(light.energy(), 0.0);
        assert!(!light.is_on());
        assert!(light.can_recharge());
    }

    #[test]
    fn low_energy_fires_once_per_on_period() {
        let mut light = Flashlight::new(&config());
        light.activate();
        assert_eq!(light.tick(5.0), None);
        assert_eq!(light.tick(1.5), Some(FlashlightSignal::LowEnergy));
        assert_eq!(light.tick(0.5), None);

        light.deactivate();
        light.activate();
        assert_eq!(light.tick(0.1), Some(FlashlightSignal::LowEnergy));
    }

    #[test]
    fn empty_light_cannot_turn_on() {
        let mut light = drained();
        assert_eq!(light.activate(), None);
        assert!(!light.is_on());
    }

    #[test]
    fn recharge_requires_a_drained_light() {
        let mut light = Flashlight::new(&config());
        assert!(!light.request_recharge(true));
        assert!(!light.is_recharging());
    }

    #[test]
    fn recharge_fills_linearly_and_completes_at_full() {
        let mut light = drained();
        assert!(light.request_recharge(true));

        let mut previous = light.energy();
        let mut completed = false;
        for _ in 0..8 {
            if light.tick(0.25) == Some(FlashlightSignal::RechargeComplete) {
                completed = true;
                break;
            }
            assert!(light.energy() > previous);
            assert!(light.energy() < MAX_ENERGY);
            assert!(light.can_recharge());
            previous = light.energy();
        }
        assert!(completed);
        assert_eq!(light.energy(), MAX_ENERGY);
        assert!(!light.can_recharge());
        assert!(!light.is_recharging());
        assert_eq!(light.activate(), Some(FlashlightSignal::On));
    }

    #[test]
    fn cancelled_recharge_keeps_lock_and_progress() {
        let mut light = drained();
        light.request_recharge(true);
        light.tick(0.5);
        let partial = light.energy();
        assert!((partial - 25.0).abs() < 1e-3);

        assert!(light.request_recharge(false));
        assert!(light.can_recharge());
        light.tick(1.0);
        assert_eq!(light.energy(), partial);
        assert_eq!(light.activate(), None);

        light.request_recharge(true);
        light.tick(0.5);
        assert!((light.energy() - 50.0).abs() < 1e-3);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut light = drained();
        light.request_recharge(true);
        light.tick(0.5);
        light.reset();
        assert_eq!(light.energy(), MAX_ENERGY);
        assert!(!light.can_recharge());
        assert!(!light.is_recharging());
        assert!(!light.is_on());
    }

    #[test]
    fn decay_can_be_disabled() {
        let mut light = Flashlight::new(&FlashlightConfig {
            decay_disabled: true,
            ..config()
        });
        light.activate();
        light.tick(100.0);
        assert_eq!(light.energy(), MAX_ENERGY);
        assert!(light.is_on());
    }

    #[test]
    fn recharge_button_buffers_short_presses() {
        let mut button = RechargeButton::default();
        assert!(button.update(true, true, 0.02));
        assert!(button.update(false, true, 1.0));
        assert!(button.update(false, false, 0.05));
        assert!(!button.update(false, false, 0.06));
    }
}
