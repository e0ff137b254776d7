//! Timed, triggerable abilities: bomb, multiplier zone, lightning storm
//!
//! Each operates on the shared entity pools through its own timer and
//! activation precondition; the orchestrator routes trigger intents here.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;

use super::chain;
use super::particles;
use super::state::{GameState, MultiplierZone};
use super::timer::Cooldown;

/// Sweep the field with the bomb: every penalty projectile explodes for a
/// halved penalty, every bonus projectile gathers toward the player for a
/// reduced reward and a combo boost. Clears the field and disarms both the
/// bomb and the streak. Returns whether the bomb fired.
pub fn activate_bomb(state: &mut GameState) -> bool {
    if !state.bomb_ready {
        return false;
    }

    let player_center = state.player.center();
    let cleared = std::mem::take(&mut state.projectiles);
    for p in &cleared {
        let center = p.center();
        if p.bonus {
            state.score += BOMB_BONUS_SCORE;
            state.combo.boost();
            particles::spawn_gather(&mut state.particles, &mut state.rng, center, player_center);
        } else {
            state.score -= BOMB_PENALTY_SCORE;
            particles::spawn_explosion(&mut state.particles, &mut state.rng, center);
        }
    }

    state.bomb_ready = false;
    state.streak = 0;
    state.shake.pulse(0.5);
    log::info!("Bomb cleared {} projectiles", cleared.len());
    true
}

/// Maybe spawn a multiplier zone this tick; at most one exists at a time.
pub fn try_spawn_zone(state: &mut GameState) {
    if state.zone.is_some() || !state.rng.random_bool(ZONE_SPAWN_CHANCE) {
        return;
    }
    let center = Vec2::new(
        state.rng.random_range(ZONE_RADIUS..FIELD_WIDTH - ZONE_RADIUS),
        state.rng.random_range(ZONE_RADIUS..FIELD_HEIGHT - ZONE_RADIUS),
    );
    let mut timer = Cooldown::idle();
    timer.start(ZONE_DURATION_TICKS);
    state.zone = Some(MultiplierZone {
        center,
        radius: ZONE_RADIUS,
        timer,
    });
    log::info!("Multiplier zone opened at {center}");
}

/// Age the active zone, clearing it when its timer elapses.
pub fn update_zone(state: &mut GameState) {
    if let Some(zone) = &mut state.zone
        && zone.timer.tick()
    {
        state.zone = None;
    }
}

/// Score factor for a bonus hit at `point`.
pub fn zone_factor(zone: Option<&MultiplierZone>, point: Vec2) -> f32 {
    match zone {
        Some(z) if z.contains(point) => ZONE_MULTIPLIER,
        _ => 1.0,
    }
}

/// Arm the storm once the combo multiplier reaches its cap.
pub fn maybe_arm_storm(state: &mut GameState) {
    if !state.storm.ready && !state.storm.is_active() && state.combo.multiplier >= MAX_MULTIPLIER {
        state.storm.ready = true;
        log::info!("Storm armed");
    }
}

/// Explicit trigger: consume the arming and start the global effect.
pub fn trigger_storm(state: &mut GameState) -> bool {
    if !state.storm.ready || state.storm.is_active() {
        return false;
    }
    state.storm.ready = false;
    state.storm.timer.start(STORM_DURATION_TICKS);
    state.shake.pulse(0.6);
    log::info!("Storm triggered");
    true
}

/// While the storm runs, every live projectile is cleared with a reward:
/// bonuses gather toward the player, penalties explode. Decorative bolts
/// strike on a fixed cadence. The effect ends when its timer elapses.
pub fn update_storm(state: &mut GameState) {
    if !state.storm.is_active() {
        return;
    }

    let player_center = state.player.center();
    let cleared = std::mem::take(&mut state.projectiles);
    for p in &cleared {
        let center = p.center();
        if p.bonus {
            state.score += (BONUS_SCORE as f32 * state.combo.multiplier).floor() as i64;
            particles::spawn_gather(&mut state.particles, &mut state.rng, center, player_center);
        } else {
            state.score += STORM_PENALTY_SCORE;
            particles::spawn_explosion(&mut state.particles, &mut state.rng, center);
        }
    }

    if state.time_ticks % STORM_BOLT_INTERVAL == 0 {
        let from = Vec2::new(state.rng.random_range(0.0..FIELD_WIDTH), 0.0);
        let to = Vec2::new(
            state.rng.random_range(0.0..FIELD_WIDTH),
            state.rng.random_range(FIELD_HEIGHT * 0.25..FIELD_HEIGHT),
        );
        let bolt = chain::bolt_between(&mut state.rng, from, to);
        state.bolts.push(bolt);
    }

    if state.storm.timer.tick() {
        log::info!("Storm ended");
    }
}
