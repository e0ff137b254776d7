//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. One call
//! advances exactly one frame; subsystems run in a fixed order so runs are
//! reproducible from the seed and the input sequence.

use glam::Vec2;

use crate::consts::*;

use super::projectiles::HitEvent;
use super::state::{BannerKind, GameState};
use super::{abilities, chain, dash, particles, projectiles};

/// Input intents for a single tick (pre-debounced edge events)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Movement intent, each axis in [-1, 1]
    pub move_x: f32,
    pub move_y: f32,
    /// Lateral dash triggers
    pub dash_left: bool,
    pub dash_right: bool,
    /// Directional dash trigger with its own direction
    pub dash_directional: Option<Vec2>,
    /// Ability triggers
    pub bomb: bool,
    pub storm: bool,
    /// Pause toggle
    pub pause: bool,
    /// Atomically reinitialize the session
    pub restart: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

fn clean_axis(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

impl TickInput {
    /// Clamp malformed intent fields (NaN, out of range) to no-ops rather
    /// than letting them reach the simulation.
    pub fn sanitized(&self) -> Self {
        let mut input = self.clone();
        input.move_x = clean_axis(input.move_x);
        input.move_y = clean_axis(input.move_y);
        if let Some(dir) = input.dash_directional
            && !(dir.x.is_finite() && dir.y.is_finite())
        {
            input.dash_directional = None;
        }
        input
    }
}

/// Dash direction for this tick's triggers: an explicit directional intent
/// wins, then the held movement direction, then a lateral default per
/// trigger side.
fn resolve_dash_direction(input: &TickInput) -> Option<Vec2> {
    if let Some(dir) = input.dash_directional
        && dir != Vec2::ZERO
    {
        return Some(dir);
    }
    if !input.dash_left && !input.dash_right {
        return None;
    }
    let held = Vec2::new(axis_sign(input.move_x), axis_sign(input.move_y));
    if held != Vec2::ZERO {
        Some(held)
    } else if input.dash_left {
        Some(Vec2::NEG_X)
    } else {
        Some(Vec2::X)
    }
}

fn axis_sign(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    let input = input.sanitized();

    // Pause/restart intents resolve before anything else
    if input.restart {
        log::info!("Restarting session (seed {})", state.seed);
        state.reset();
        return;
    }
    if input.pause {
        state.paused = !state.paused;
    }
    if state.paused {
        // Simulation frozen; banner fades and shake decay keep running
        decay_feedback(state);
        return;
    }

    let input = if input.idle_mode {
        autopilot(state, input)
    } else {
        input
    };

    state.time_ticks += 1;

    // Ability triggers
    if input.bomb {
        let _ = abilities::activate_bomb(state);
    }
    if input.storm {
        let _ = abilities::trigger_storm(state);
    }

    // Projectile spawn
    projectiles::try_spawn(state);

    // Player movement: dash trigger, dash advance, then normal movement
    if let Some(dir) = resolve_dash_direction(&input) {
        let _ = dash::try_start(
            &mut state.player,
            dir,
            &mut state.rng,
            &mut state.particles,
            &mut state.shake,
        );
    }
    dash::update(&mut state.player);
    let move_vec = Vec2::new(input.move_x, input.move_y);
    dash::apply_movement(&mut state.player, move_vec);
    emit_trail(state, move_vec != Vec2::ZERO);

    // Projectile motion and collisions, events routed as they resolved
    projectiles::advance(&mut state.projectiles);
    for event in projectiles::resolve_collisions(&state.player, &mut state.projectiles) {
        route_hit(state, event);
    }

    // Particles
    particles::update(&mut state.particles);

    // Chain/zone/storm timers
    state.bolts.retain_mut(|bolt| {
        let _ = bolt.timer.tick();
        bolt.timer.is_active()
    });
    abilities::try_spawn_zone(state);
    abilities::update_zone(state);
    abilities::update_storm(state);

    // Combo decay, storm arming, screen feedback
    state.combo.update();
    abilities::maybe_arm_storm(state);
    decay_feedback(state);
}

/// Leave a trail marker while moving or dashing, rate-limited.
fn emit_trail(state: &mut GameState, moving: bool) {
    if !(moving || state.player.is_dashing()) {
        return;
    }
    if state.time_ticks - state.player.last_trail_tick < TRAIL_INTERVAL_TICKS {
        return;
    }
    state.player.last_trail_tick = state.time_ticks;
    particles::spawn_trail(&mut state.particles, state.player.center(), state.player.size);
}

/// Route one resolved collision into combo/streak/ability/feedback state.
fn route_hit(state: &mut GameState, event: HitEvent) {
    match event {
        HitEvent::Bonus { center } => {
            let factor = abilities::zone_factor(state.zone.as_ref(), center);
            let gain = state.combo.on_bonus_hit(BONUS_SCORE, factor);
            state.score += gain;

            state.streak += 1;
            if state.streak >= BOMB_STREAK && !state.bomb_ready {
                state.bomb_ready = true;
                state.show_banner(BannerKind::BombReady);
                log::info!("Bomb armed after {} consecutive bonus hits", state.streak);
            }

            particles::spawn_confetti(&mut state.particles, &mut state.rng, center);
            particles::spawn_score_text(&mut state.particles, center, format!("+{gain}"));

            // Cascade through nearby bonus projectiles
            let links = chain::propagate(
                center,
                &mut state.projectiles,
                &mut state.rng,
                &mut state.bolts,
            );
            let player_center = state.player.center();
            for link in links {
                state.score += state.combo.on_gather(CHAIN_SCORE);
                particles::spawn_gather(
                    &mut state.particles,
                    &mut state.rng,
                    link.center,
                    player_center,
                );
            }
        }
        HitEvent::Penalty { center } => {
            state.score -= PENALTY_SCORE;
            state.combo.on_penalty_hit();
            if state.streak > 0 {
                state.show_banner(BannerKind::StreakLost);
            }
            state.streak = 0;
            particles::spawn_explosion(&mut state.particles, &mut state.rng, center);
            state.shake.pulse(0.25);
        }
    }
}

/// Screen-shake decay and banner fading; runs even while paused.
fn decay_feedback(state: &mut GameState) {
    state.shake.update(&mut state.rng);
    if let Some(banner) = &mut state.banner
        && !banner.advance()
    {
        state.banner = None;
    }
}

/// Idle/demo mode: sidestep the most imminent penalty, otherwise drift
/// toward the nearest bonus column, firing armed abilities as they come up.
fn autopilot(state: &GameState, mut input: TickInput) -> TickInput {
    let center = state.player.center();

    input.bomb =
        state.bomb_ready && state.projectiles.iter().filter(|p| !p.bonus).count() >= 3;
    input.storm = state.storm.ready;

    let threat = state
        .projectiles
        .iter()
        .filter(|p| {
            !p.bonus
                && p.center().y < center.y
                && (p.center().x - center.x).abs() < state.player.size * 1.5
        })
        .min_by(|a, b| {
            (center.y - a.center().y)
                .partial_cmp(&(center.y - b.center().y))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    if let Some(threat) = threat
        && center.y - threat.center().y < 200.0
    {
        // Step out of the falling column
        input.move_x = if threat.center().x >= center.x {
            -1.0
        } else {
            1.0
        };
    } else {
        let target = state
            .projectiles
            .iter()
            .filter(|p| p.bonus)
            .min_by(|a, b| {
                a.center()
                    .distance_squared(center)
                    .partial_cmp(&b.center().distance_squared(center))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        if let Some(target) = target {
            input.move_x = axis_sign(target.center().x - center.x);
        }
    }

    input
}
