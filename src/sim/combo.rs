//! Combo multiplier and score accumulation
//!
//! Asymmetric decay: above the midpoint threshold an expired combo drains
//! gradually; at or below it the multiplier snaps straight back to 1.

use serde::{Deserialize, Serialize};

use crate::consts::*;

use super::timer::Cooldown;

/// Multiplier above which decay is gradual instead of a hard reset
pub const DRAIN_THRESHOLD: f32 = MAX_MULTIPLIER / 2.0;

/// Combo multiplier state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComboState {
    /// Current score multiplier, clamped to [1, MAX_MULTIPLIER]
    pub multiplier: f32,
    /// Ticks before decay begins
    pub timer: Cooldown,
    /// Cosmetic pop scale, eases back toward 1
    pub animation_scale: f32,
}

impl Default for ComboState {
    fn default() -> Self {
        Self {
            multiplier: 1.0,
            timer: Cooldown::idle(),
            animation_scale: 1.0,
        }
    }
}

impl ComboState {
    /// Grow the multiplier by `bump` and restart the decay timer.
    fn grow(&mut self, bump: f32) {
        self.multiplier = (self.multiplier + bump).min(MAX_MULTIPLIER);
        self.timer.start(COMBO_TIMER_TICKS);
        self.animation_scale = 1.5;
    }

    /// Score a direct bonus hit: full bump, zone factor applied if the hit
    /// point fell inside an active zone. Returns the score gain.
    pub fn on_bonus_hit(&mut self, base: i64, zone_factor: f32) -> i64 {
        let gain = (base as f32 * self.multiplier * zone_factor).floor() as i64;
        self.grow(COMBO_HIT_BUMP);
        gain
    }

    /// Score an ambient gather-style gain (chain links): reduced bump, no
    /// zone factor. Returns the score gain.
    pub fn on_gather(&mut self, base: i64) -> i64 {
        let gain = (base as f32 * self.multiplier).floor() as i64;
        self.grow(COMBO_GATHER_BUMP);
        gain
    }

    /// Gather-style bump without a score gain, for fixed-score sweeps
    /// (bomb).
    pub fn boost(&mut self) {
        self.grow(COMBO_GATHER_BUMP);
    }

    /// React to a penalty hit: soften the blow above the drain threshold,
    /// hard reset at or below it.
    pub fn on_penalty_hit(&mut self) {
        if self.multiplier > DRAIN_THRESHOLD {
            self.multiplier = (self.multiplier - COMBO_PENALTY_STEP).max(1.0);
            self.timer.start(COMBO_TIMER_TICKS / 2);
        } else {
            self.multiplier = 1.0;
            self.timer.clear();
        }
    }

    /// Per-tick decay: run the timer down, then either drain gradually or
    /// snap to 1 depending on the threshold.
    pub fn update(&mut self) {
        // Ease the cosmetic pop back toward 1
        self.animation_scale = 1.0 + (self.animation_scale - 1.0) * 0.9;
        if (self.animation_scale - 1.0).abs() < 0.01 {
            self.animation_scale = 1.0;
        }

        if self.timer.is_active() {
            if self.timer.tick() && self.multiplier <= DRAIN_THRESHOLD {
                // Timer just ran out below the threshold: hard reset
                self.multiplier = 1.0;
            }
            return;
        }

        if self.multiplier > DRAIN_THRESHOLD {
            self.multiplier -= COMBO_DRAIN_RATE;
            if self.multiplier <= DRAIN_THRESHOLD {
                self.multiplier = 1.0;
            }
        } else if self.multiplier > 1.0 {
            self.multiplier = 1.0;
        }
    }

    /// Remaining decay-timer fraction for the HUD
    pub fn timer_fraction(&self) -> f32 {
        self.timer.fraction(COMBO_TIMER_TICKS)
    }
}
