//! Shared countdown primitive
//!
//! Every timed mechanic (dash, combo, zone, storm, bolt aging) counts down
//! through this type so they all share identical tick semantics.

use serde::{Deserialize, Serialize};

/// Tick-based countdown, clamped at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cooldown {
    remaining: u32,
}

impl Cooldown {
    /// An inactive countdown.
    pub fn idle() -> Self {
        Self { remaining: 0 }
    }

    /// Start (or restart) the countdown at `duration` ticks.
    pub fn start(&mut self, duration: u32) {
        self.remaining = duration;
    }

    /// Force the countdown to zero without reporting expiry.
    pub fn clear(&mut self) {
        self.remaining = 0;
    }

    /// Advance one tick. Returns `true` only on the tick the countdown
    /// transitions from 1 to 0, so expiry actions fire exactly once.
    pub fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.remaining == 0
    }

    /// Whether the countdown is still running.
    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }

    /// Ticks left.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Remaining fraction of `total`, for HUD bars.
    pub fn fraction(&self, total: u32) -> f32 {
        if total == 0 {
            0.0
        } else {
            self.remaining as f32 / total as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_down_and_clamps_at_zero() {
        let mut cd = Cooldown::idle();
        cd.start(2);
        assert!(cd.is_active());
        assert!(!cd.tick());
        assert!(cd.tick()); // 1 -> 0 reported once
        assert!(!cd.tick()); // stays at 0, no re-report
        assert!(!cd.is_active());
        assert_eq!(cd.remaining(), 0);
    }

    #[test]
    fn restart_overwrites_remaining() {
        let mut cd = Cooldown::idle();
        cd.start(5);
        let _ = cd.tick();
        cd.start(3);
        assert_eq!(cd.remaining(), 3);
    }

    #[test]
    fn fraction_for_hud() {
        let mut cd = Cooldown::idle();
        cd.start(30);
        assert!((cd.fraction(30) - 1.0).abs() < f32::EPSILON);
        let _ = cd.tick();
        assert!((cd.fraction(30) - 29.0 / 30.0).abs() < 1e-6);
        assert_eq!(Cooldown::idle().fraction(0), 0.0);
    }
}
