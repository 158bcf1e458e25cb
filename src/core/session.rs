//! Session context shared by the level systems.
//!
//! `GameSession` is inserted when gameplay starts and removed when it ends.
//! Systems that need the active checkpoint or the respawn state ask for it
//! as a resource instead of reaching for a global manager.

use bevy::prelude::*;

/// Delay between the cover clearing and control returning to the player.
pub const DEFAULT_RECOVERY_DELAY: f32 = 1.0;

/// Per-run state owned by the level.
#[derive(Resource, Debug)]
pub struct GameSession {
    /// Index of the checkpoint the player respawns at.
    pub checkpoint: usize,
    pub respawn: RespawnSequence,
}

impl Default for GameSession {
    fn default() -> Self {
        Self {
            checkpoint: 0,
            respawn: RespawnSequence::new(DEFAULT_RECOVERY_DELAY),
        }
    }
}

/// Full-screen fade used to hide the player while it is moved.
#[derive(Resource, Debug, Clone)]
pub struct ScreenCover {
    /// 0 = fully clear, 1 = fully covered
    pub opacity: f32,
    pub target: f32,
    /// Opacity change per second
    pub fade_speed: f32,
}

impl Default for ScreenCover {
    fn default() -> Self {
        Self {
            opacity: 0.0,
            target: 0.0,
            fade_speed: 2.0,
        }
    }
}

impl ScreenCover {
    pub fn fade_in(&mut self) {
        self.target = 1.0;
    }

    pub fn fade_out(&mut self) {
        self.target = 0.0;
    }

    pub fn is_covered(&self) -> bool {
        self.opacity >= 1.0
    }

    pub fn is_clear(&self) -> bool {
        self.opacity <= 0.0
    }

    pub fn update(&mut self, delta: f32) {
        let step = self.fade_speed * delta;
        if self.opacity < self.target {
            self.opacity = (self.opacity + step).min(self.target);
        } else if self.opacity > self.target {
            self.opacity = (self.opacity - step).max(self.target);
        }
    }
}

/// Where the death sequence currently is.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RespawnPhase {
    #[default]
    Idle,
    /// Waiting for the cover to fully close.
    CoveringUp,
    /// Player has been moved; the cover opens on the next tick.
    Relocated,
    /// Waiting for the cover to fully clear.
    Uncovering,
    /// Short pause before control returns.
    Recovering { remaining: f32 },
}

/// Side effect the caller must perform for a phase change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RespawnAction {
    CoverOn,
    /// Move the player to the active checkpoint.
    Relocate,
    CoverOff,
    /// Reset health and flashlight and give control back.
    Restore,
}

/// Death-to-respawn sequence driven by the fixed tick.
///
/// Each wait is a condition checked on every `advance` call, so the
/// sequence never holds a suspended context.
#[derive(Debug, Clone)]
pub struct RespawnSequence {
    phase: RespawnPhase,
    recovery_delay: f32,
}

impl RespawnSequence {
    pub fn new(recovery_delay: f32) -> Self {
        assert!(recovery_delay >= 0.0, "recovery delay must not be negative");
        Self {
            phase: RespawnPhase::Idle,
            recovery_delay,
        }
    }

    pub fn phase(&self) -> RespawnPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase != RespawnPhase::Idle
    }

    /// Start the sequence. Ignored while one is already running.
    pub fn begin(&mut self) -> Option<RespawnAction> {
        if self.is_running() {
            return None;
        }
        self.phase = RespawnPhase::CoveringUp;
        Some(RespawnAction::CoverOn)
    }

    /// Evaluate the current wait condition and move on when it holds.
    pub fn advance(&mut self, cover: &ScreenCover, delta: f32) -> Option<RespawnAction> {
        match self.phase {
            RespawnPhase::Idle => None,
            RespawnPhase::CoveringUp => {
                if !cover.is_covered() {
                    return None;
                }
                self.phase = RespawnPhase::Relocated;
                Some(RespawnAction::Relocate)
            }
            RespawnPhase::Relocated => {
                self.phase = RespawnPhase::Uncovering;
                Some(RespawnAction::CoverOff)
            }
            RespawnPhase::Uncovering => {
                if cover.is_clear() {
                    self.phase = RespawnPhase::Recovering {
                        remaining: self.recovery_delay,
                    };
                }
                None
            }
            RespawnPhase::Recovering { remaining } => {
                let remaining = remaining - delta;
                if remaining > 0.0 {
                    self.phase = RespawnPhase::Recovering { remaining };
                    return None;
                }
                self.phase = RespawnPhase::Idle;
                Some(RespawnAction::Restore)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn covered() -> ScreenCover {
        ScreenCover {
            opacity: 1.0,
            target: 1.0,
            ..default()
        }
    }

    #[test]
    fn cover_fades_toward_target_and_stops() {
        let mut cover = ScreenCover::default();
        cover.fade_in();
        cover.update(0.25);
        assert!((cover.opacity - 0.5).abs() < 1e-6);
        cover.update(1.0);
        assert!(cover.is_covered());
        cover.fade_out();
        cover.update(10.0);
        assert!(cover.is_clear());
    }

    #[test]
    fn sequence_waits_for_cover_before_relocating() {
        let mut seq = RespawnSequence::new(1.0);
        assert_eq!(seq.begin(), Some(RespawnAction::CoverOn));
        assert_eq!(seq.begin(), None);

        let clear = ScreenCover::default();
        assert_eq!(seq.advance(&clear, 0.1), None);
        assert_eq!(seq.phase(), RespawnPhase::CoveringUp);

        assert_eq!(seq.advance(&covered(), 0.1), Some(RespawnAction::Relocate));
        assert_eq!(seq.advance(&covered(), 0.1), Some(RespawnAction::CoverOff));
        assert_eq!(seq.advance(&covered(), 0.1), None);
        assert_eq!(seq.phase(), RespawnPhase::Uncovering);
    }

    #[test]
    fn sequence_restores_after_recovery_delay() {
        let mut seq = RespawnSequence::new(1.0);
        seq.begin();
        seq.advance(&covered(), 0.0);
        seq.advance(&covered(), 0.0);

        let clear = ScreenCover::default();
        assert_eq!(seq.advance(&clear, 0.0), None);
        assert_eq!(seq.advance(&clear, 0.5), None);
        assert!(seq.is_running());
        assert_eq!(seq.advance(&clear, 0.5), Some(RespawnAction::Restore));
        assert!(!seq.is_running());
    }
}
