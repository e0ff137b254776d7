//! Immutable render snapshot
//!
//! Plain-data view of one tick, handed to whatever draws the game. The
//! renderer never touches live simulation state; everything it needs,
//! including per-kind particle draw parameters, is captured here.

use glam::Vec2;
use serde::Serialize;

use crate::consts::*;

use super::particles::ParticleKind;
use super::state::GameState;

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub size: f32,
    pub dashing: bool,
    pub dashes_available: u8,
    /// Remaining replenish fraction, 0 when charges are usable
    pub dash_cooldown_fraction: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectileView {
    pub pos: Vec2,
    pub size: f32,
    pub bonus: bool,
    pub chained: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComboView {
    pub multiplier: f32,
    pub timer_fraction: f32,
    pub animation_scale: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct StormView {
    pub ready: bool,
    pub active: bool,
    pub fraction: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ZoneView {
    pub center: Vec2,
    pub radius: f32,
    pub fraction: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct BoltView {
    pub points: Vec<Vec2>,
    pub alpha: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct BannerView {
    pub text: &'static str,
    pub alpha: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SparkView {
    pub pos: Vec2,
    pub size: f32,
    pub color: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfettiView {
    pub pos: Vec2,
    pub size: f32,
    pub color: u32,
    pub rotation: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct FadeView {
    pub pos: Vec2,
    pub size: f32,
    pub color: u32,
    pub alpha: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct TextView {
    pub pos: Vec2,
    pub label: String,
    pub alpha: f32,
}

/// Particles partitioned by kind, each with its draw parameters
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParticleLayers {
    pub sparks: Vec<SparkView>,
    pub confetti: Vec<ConfettiView>,
    pub trails: Vec<FadeView>,
    pub gathers: Vec<FadeView>,
    pub texts: Vec<TextView>,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot {
    pub player: PlayerView,
    pub projectiles: Vec<ProjectileView>,
    pub particles: ParticleLayers,
    pub score: i64,
    pub combo: ComboView,
    pub streak: u32,
    pub bomb_ready: bool,
    pub storm: StormView,
    pub shake_offset: Vec2,
    pub zone: Option<ZoneView>,
    pub bolts: Vec<BoltView>,
    pub banner: Option<BannerView>,
    pub paused: bool,
}

impl RenderSnapshot {
    /// Capture the current tick's renderable state.
    pub fn capture(state: &GameState) -> Self {
        let mut particles = ParticleLayers::default();
        for p in &state.particles {
            match &p.kind {
                ParticleKind::Spark => particles.sparks.push(SparkView {
                    pos: p.pos,
                    size: p.size,
                    color: p.color,
                }),
                ParticleKind::Confetti { rotation, .. } => particles.confetti.push(ConfettiView {
                    pos: p.pos,
                    size: p.size,
                    color: p.color,
                    rotation: *rotation,
                }),
                ParticleKind::Trail { initial_life } => particles.trails.push(FadeView {
                    pos: p.pos,
                    size: p.size,
                    color: p.color,
                    alpha: (p.life / initial_life).clamp(0.0, 1.0),
                }),
                ParticleKind::Gather { .. } => particles.gathers.push(FadeView {
                    pos: p.pos,
                    size: p.size,
                    color: p.color,
                    alpha: (p.life / TEXT_LIFE_TICKS).clamp(0.0, 1.0),
                }),
                ParticleKind::Text { label } => particles.texts.push(TextView {
                    pos: p.pos,
                    label: label.clone(),
                    alpha: (p.life / TEXT_LIFE_TICKS).clamp(0.0, 1.0),
                }),
            }
        }

        Self {
            player: PlayerView {
                pos: state.player.pos,
                size: state.player.size,
                dashing: state.player.is_dashing(),
                dashes_available: state.player.dashes_available,
                dash_cooldown_fraction: state
                    .player
                    .dash_cooldown
                    .fraction(DASH_COOLDOWN_TICKS),
            },
            projectiles: state
                .projectiles
                .iter()
                .map(|p| ProjectileView {
                    pos: p.pos,
                    size: p.size,
                    bonus: p.bonus,
                    chained: p.chained,
                })
                .collect(),
            particles,
            score: state.score,
            combo: ComboView {
                multiplier: state.combo.multiplier,
                timer_fraction: state.combo.timer_fraction(),
                animation_scale: state.combo.animation_scale,
            },
            streak: state.streak,
            bomb_ready: state.bomb_ready,
            storm: StormView {
                ready: state.storm.ready,
                active: state.storm.is_active(),
                fraction: state.storm.timer.fraction(STORM_DURATION_TICKS),
            },
            shake_offset: state.shake.offset,
            zone: state.zone.as_ref().map(|z| ZoneView {
                center: z.center,
                radius: z.radius,
                fraction: z.timer.fraction(ZONE_DURATION_TICKS),
            }),
            bolts: state
                .bolts
                .iter()
                .map(|b| BoltView {
                    points: b.points.clone(),
                    alpha: b.timer.fraction(CHAIN_BOLT_TICKS),
                })
                .collect(),
            banner: state.banner.as_ref().map(|b| BannerView {
                text: b.kind.text(),
                alpha: b.alpha(),
            }),
            paused: state.paused,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::particles::{self, Particle};
    use crate::sim::{TickInput, tick};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn partitions_particles_by_kind() {
        let mut state = GameState::new(2);
        let mut rng = Pcg32::seed_from_u64(2);
        particles::spawn_confetti(&mut state.particles, &mut rng, Vec2::new(100.0, 100.0));
        particles::spawn_trail(&mut state.particles, Vec2::new(50.0, 50.0), 32.0);
        particles::spawn_score_text(&mut state.particles, Vec2::new(10.0, 10.0), "+5".into());

        let snapshot = RenderSnapshot::capture(&state);
        assert_eq!(snapshot.particles.confetti.len(), 40);
        assert_eq!(snapshot.particles.trails.len(), 1);
        assert_eq!(snapshot.particles.texts.len(), 1);
        assert!(snapshot.particles.sparks.is_empty());
        assert_eq!(snapshot.particles.texts[0].label, "+5");
        assert!((snapshot.particles.trails[0].alpha - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn trail_alpha_tracks_life_fraction() {
        let mut state = GameState::new(2);
        state.particles.push(Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            size: 16.0,
            color: 0x3498db,
            life: 5.0,
            kind: crate::sim::ParticleKind::Trail { initial_life: 10.0 },
        });
        let snapshot = RenderSnapshot::capture(&state);
        assert!((snapshot.particles.trails[0].alpha - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn snapshot_survives_a_live_session() {
        let mut state = GameState::new(8);
        for _ in 0..300 {
            tick(
                &mut state,
                &TickInput {
                    idle_mode: true,
                    ..Default::default()
                },
            );
        }
        let snapshot = RenderSnapshot::capture(&state);
        assert!(serde_json::to_string(&snapshot).is_ok());
        assert!((1.0..=MAX_MULTIPLIER).contains(&snapshot.combo.multiplier));
    }
}
