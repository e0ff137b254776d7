//! Short-lived visual entities
//!
//! Pure feedback layer: nothing here affects gameplay. Each kind carries its
//! own motion fields and is dispatched by pattern match in [`update`].

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::TEXT_LIFE_TICKS;

/// Pool cap; spawning past it evicts the oldest particle
pub const MAX_PARTICLES: usize = 1024;

/// Gather particles are treated as arrived within this distance of the target
const GATHER_ARRIVE_DIST: f32 = 10.0;
/// Speed cap for gather particles
const GATHER_MAX_SPEED: f32 = 10.0;
/// Per-tick downward acceleration on confetti
const CONFETTI_GRAVITY: f32 = 0.15;

/// Celebration palette (also the player/projectile tints)
pub const PALETTE: [u32; 6] = [0x3498db, 0x2ecc71, 0xf1c40f, 0xe74c3c, 0x9b59b6, 0x1abc9c];
/// Player tint, used for dash effects
pub const PLAYER_BLUE: u32 = 0x3498db;
const TEXT_WHITE: u32 = 0xffffff;

/// Per-kind motion data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Explosion/dash debris: linear motion, life decay
    Spark,
    /// Spark plus gravity and rotation
    Confetti { rotation: f32, spin: f32 },
    /// Stationary marker fading with its life fraction
    Trail { initial_life: f32 },
    /// Homes in on a target point, accelerating multiplicatively
    Gather { target: Vec2, acceleration: f32 },
    /// Floating score text, rises at constant speed
    Text { label: String },
}

/// A visual particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    /// Center position
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// Packed 0xRRGGBB tint
    pub color: u32,
    /// Remaining life in ticks
    pub life: f32,
    pub kind: ParticleKind,
}

/// Append a particle, evicting the oldest when the pool is full.
fn push(pool: &mut Vec<Particle>, particle: Particle) {
    if pool.len() >= MAX_PARTICLES {
        let _ = pool.remove(0);
    }
    pool.push(particle);
}

/// Burst of sparks opposite the dash direction.
pub fn spawn_dash_burst(pool: &mut Vec<Particle>, rng: &mut Pcg32, origin: Vec2, dir: Vec2) {
    for _ in 0..20 {
        let speed = rng.random_range(2.0..6.0);
        push(
            pool,
            Particle {
                pos: origin,
                vel: -dir * speed,
                size: rng.random_range(2.0..6.0),
                color: PLAYER_BLUE,
                life: rng.random_range(15.0..25.0),
                kind: ParticleKind::Spark,
            },
        );
    }
}

/// Single translucent marker left behind a moving player.
pub fn spawn_trail(pool: &mut Vec<Particle>, origin: Vec2, size: f32) {
    push(
        pool,
        Particle {
            pos: origin,
            vel: Vec2::ZERO,
            size: size / 2.0,
            color: PLAYER_BLUE,
            life: 10.0,
            kind: ParticleKind::Trail { initial_life: 10.0 },
        },
    );
}

/// Red-orange debris for penalty impacts and bomb/storm clears.
pub fn spawn_explosion(pool: &mut Vec<Particle>, rng: &mut Pcg32, origin: Vec2) {
    for _ in 0..30 {
        let r = 200 + rng.random_range(0u32..56);
        let g = 100 + rng.random_range(0u32..51);
        let b = rng.random_range(0u32..51);
        push(
            pool,
            Particle {
                pos: origin,
                vel: Vec2::new(rng.random_range(-4.0..4.0), rng.random_range(-4.0..4.0)),
                size: rng.random_range(2.0..7.0),
                color: (r << 16) | (g << 8) | b,
                life: rng.random_range(30.0..50.0),
                kind: ParticleKind::Spark,
            },
        );
    }
}

/// Mostly-upward celebration burst for bonus hits.
pub fn spawn_confetti(pool: &mut Vec<Particle>, rng: &mut Pcg32, origin: Vec2) {
    for _ in 0..40 {
        push(
            pool,
            Particle {
                pos: origin,
                vel: Vec2::new(
                    rng.random_range(-3.0..3.0),
                    -rng.random_range(0.0..6.0) - 2.0,
                ),
                size: rng.random_range(2.0..8.0),
                color: PALETTE[rng.random_range(0..PALETTE.len())],
                life: rng.random_range(40.0..60.0),
                kind: ParticleKind::Confetti {
                    rotation: rng.random_range(0.0..360.0),
                    spin: rng.random_range(-5.0..5.0),
                },
            },
        );
    }
}

/// Stream of particles homing from `origin` toward `target`.
pub fn spawn_gather(pool: &mut Vec<Particle>, rng: &mut Pcg32, origin: Vec2, target: Vec2) {
    for _ in 0..15 {
        let jitter = Vec2::new(rng.random_range(-0.25..0.25), rng.random_range(-0.25..0.25));
        let dir = ((target - origin).normalize_or_zero() + jitter).normalize_or_zero();
        push(
            pool,
            Particle {
                pos: origin,
                vel: dir * rng.random_range(2.0..5.0),
                size: rng.random_range(2.0..6.0),
                color: PALETTE[rng.random_range(0..PALETTE.len())],
                life: rng.random_range(40.0..60.0),
                kind: ParticleKind::Gather {
                    target,
                    acceleration: 1.05,
                },
            },
        );
    }
}

/// Rising score text.
pub fn spawn_score_text(pool: &mut Vec<Particle>, origin: Vec2, label: String) {
    push(
        pool,
        Particle {
            pos: origin,
            vel: Vec2::new(0.0, -1.0),
            size: 16.0,
            color: TEXT_WHITE,
            life: TEXT_LIFE_TICKS,
            kind: ParticleKind::Text { label },
        },
    );
}

/// Advance every particle one tick, removing expired and arrived ones in the
/// same pass.
pub fn update(pool: &mut Vec<Particle>) {
    pool.retain_mut(|p| {
        match &mut p.kind {
            ParticleKind::Gather {
                target,
                acceleration,
            } => {
                if p.pos.distance(*target) < GATHER_ARRIVE_DIST {
                    return false;
                }
                // Re-aim at the target each tick, speed scaled and capped
                let speed = (p.vel.length() * *acceleration).min(GATHER_MAX_SPEED);
                p.vel = (*target - p.pos).normalize_or_zero() * speed;
            }
            ParticleKind::Confetti { rotation, spin } => {
                p.vel.y += CONFETTI_GRAVITY;
                *rotation += *spin;
            }
            ParticleKind::Spark | ParticleKind::Trail { .. } | ParticleKind::Text { .. } => {}
        }
        p.pos += p.vel;
        p.life -= 1.0;
        p.life > 0.0
    });
}
