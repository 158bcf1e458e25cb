//! Hit points, post-damage invincibility and death.

use bevy::prelude::*;

/// Outcome of a health operation that actually changed something.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthChange {
    /// Damage applied, entity still alive.
    Hurt(i32),
    /// Hit points restored (the clamped amount).
    Healed(i32),
    /// Health reached 0.
    Died,
}

/// Component for entities that can take damage.
///
/// Damage grants an invincibility window that counts down in `tick`.
/// Invincibility switched on through `set_invincible` is not timed and
/// stays until switched off again.
#[derive(Component, Debug, Clone)]
pub struct Health {
    current: i32,
    maximum: i32,
    /// Length of the window granted by each hit, in seconds
    invincibility_duration: f32,
    invincible: bool,
    /// Whether the current invincibility came from taking damage
    invincible_after_damage: bool,
    invincibility_timer: f32,
    enabled: bool,
}

impl Health {
    pub fn new(max: i32, invincibility_duration: f32) -> Self {
        assert!(max > 0, "max health must be positive");
        assert!(
            invincibility_duration >= 0.0,
            "invincibility duration must not be negative"
        );
        Self {
            current: max,
            maximum: max,
            invincibility_duration,
            invincible: false,
            invincible_after_damage: false,
            invincibility_timer: 0.0,
            enabled: true,
        }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn maximum(&self) -> i32 {
        self.maximum
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.maximum
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible
    }

    pub fn invincibility_timer(&self) -> f32 {
        self.invincibility_timer
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn percentage(&self) -> f32 {
        self.current as f32 / self.maximum as f32
    }

    /// Externally controlled invincibility (spawn protection, cutscenes).
    pub fn set_invincible(&mut self, invincible: bool) {
        self.invincible = invincible;
        self.invincible_after_damage = false;
        if !invincible {
            self.invincibility_timer = 0.0;
        }
    }

    /// Stop reacting to hurt and heal. State is kept as is.
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Re-activate with defaults: full health, no invincibility.
    pub fn enable(&mut self) {
        self.reset();
        self.enabled = true;
    }

    pub fn reset(&mut self) {
        self.current = self.maximum;
        self.invincible = false;
        self.invincible_after_damage = false;
        self.invincibility_timer = 0.0;
    }

    pub fn hurt(&mut self, amount: i32) -> Option<HealthChange> {
        if self.invincible || self.is_dead() || !self.enabled {
            return None;
        }
        debug_assert!(amount >= 0, "damage must not be negative");
        let amount = amount.max(0);

        self.current = (self.current - amount).max(0);

        if self.current == 0 {
            return Some(HealthChange::Died);
        }

        self.invincibility_timer = self.invincibility_duration;
        self.invincible_after_damage = true;
        self.invincible = true;
        Some(HealthChange::Hurt(amount))
    }

    pub fn heal(&mut self, amount: i32) -> Option<HealthChange> {
        if self.is_full() || self.is_dead() || !self.enabled {
            return None;
        }
        debug_assert!(amount >= 0, "heal must not be negative");

        let applied = amount.max(0).min(self.maximum - self.current);
        self.current += applied;
        Some(HealthChange::Healed(applied))
    }

    pub fn full_heal(&mut self) -> Option<HealthChange> {
        self.heal(self.maximum)
    }

    /// Count down damage-granted invincibility.
    pub fn tick(&mut self, delta: f32) {
        if !self.invincible_after_damage {
            return;
        }

        self.invincibility_timer = (self.invincibility_timer - delta).max(0.0);
        if self.invincibility_timer <= 0.0 {
            self.invincible_after_damage = false;
            self.invincible = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hurt_subtracts_and_starts_window() {
        let mut health = Health::new(5, 1.0);
        assert_eq!(health.hurt(2), Some(HealthChange::Hurt(2)));
        assert_eq!(health.current(), 3);
        assert!(health.is_invincible());
        assert_eq!(health.invincibility_timer(), 1.0);
    }

    #[test]
    fn hurt_is_ignored_while_invincible() {
        let mut health = Health::new(5, 1.0);
        health.set_invincible(true);
        assert_eq!(health.hurt(3), None);
        assert_eq!(health.current(), 5);
    }

    #[test]
    fn lethal_damage_clamps_at_zero_and_is_terminal() {
        let mut health = Health::new(3, 0.5);
        assert_eq!(health.hurt(10), Some(HealthChange::Died));
        assert_eq!(health.current(), 0);
        assert!(health.is_dead());
        assert!(!health.is_invincible());

        assert_eq!(health.hurt(1), None);
        assert_eq!(health.heal(2), None);
        assert_eq!(health.current(), 0);
    }

    #[test]
    fn exact_damage_kills() {
        let mut health = Health::new(3, 0.5);
        assert_eq!(health.hurt(3), Some(HealthChange::Died));
    }

    #[test]
    fn damage_below_current_never_kills() {
        for amount in 0..5 {
            let mut health = Health::new(5, 0.5);
            assert_eq!(health.hurt(amount), Some(HealthChange::Hurt(amount)));
            assert_eq!(health.current(), 5 - amount);
        }
    }

    #[test]
    fn heal_is_clamped_to_missing_health() {
        let mut health = Health::new(10, 0.0);
        health.hurt(3);
        assert_eq!(health.heal(50), Some(HealthChange::Healed(3)));
        assert_eq!(health.current(), 10);
        assert_eq!(health.heal(1), None);
    }

    #[test]
    fn full_heal_restores_maximum() {
        let mut health = Health::new(8, 0.0);
        health.hurt(5);
        assert_eq!(health.full_heal(), Some(HealthChange::Healed(5)));
        assert!(health.is_full());
    }

    #[test]
    fn disabled_health_ignores_everything() {
        let mut health = Health::new(4, 0.0);
        health.hurt(1);
        health.disable();
        assert_eq!(health.hurt(1), None);
        assert_eq!(health.heal(1), None);
        assert_eq!(health.current(), 3);

        health.enable();
        assert_eq!(health.current(), 4);
    }

    #[test]
    fn invincibility_window_scenario() {
        let mut health = Health::new(3, 1.0);
        assert_eq!(health.hurt(1), Some(HealthChange::Hurt(1)));
        assert_eq!(health.current(), 2);
        assert!(health.is_invincible());

        health.tick(0.5);
        assert_eq!(health.hurt(1), None);
        assert_eq!(health.current(), 2);

        health.tick(0.5);
        assert!(!health.is_invincible());
        assert_eq!(health.hurt(1), Some(HealthChange::Hurt(1)));
        assert_eq!(health.current(), 1);
    }

    #[test]
    fn manual_invincibility_does_not_expire() {
        let mut health = Health::new(3, 1.0);
        health.set_invincible(true);
        for _ in 0..100 {
            health.tick(0.1);
        }
        assert!(health.is_invincible());

        health.set_invincible(false);
        assert_eq!(health.hurt(1), Some(HealthChange::Hurt(1)));
    }

    #[test]
    fn manual_invincibility_overrides_damage_window() {
        let mut health = Health::new(3, 1.0);
        health.hurt(1);
        health.set_invincible(true);
        health.tick(5.0);
        assert!(health.is_invincible());
    }
}
