//! Game state and core simulation types
//!
//! All state owned by one game session lives here; `restart` rebuilds it
//! atomically from the run seed.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

use super::combo::ComboState;
use super::particles::Particle;
use super::timer::Cooldown;

/// Dash state machine phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DashState {
    /// Normal movement, dash triggers accepted while charges remain
    #[default]
    Idle,
    /// Fixed-speed burst along `dash_dir`, movement input ignored
    Dashing,
    /// Charges exhausted, waiting for replenish
    Cooldown,
}

/// The player avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner of the player square
    pub pos: Vec2,
    pub size: f32,
    /// Movement speed in units per tick
    pub speed: f32,
    pub dash_state: DashState,
    /// Unit direction of the current/last dash
    pub dash_dir: Vec2,
    /// Remaining ticks of the current dash
    pub dash_timer: Cooldown,
    /// Replenish countdown, running only while charges are exhausted
    pub dash_cooldown: Cooldown,
    /// Dash charges left before cooldown (0..=MAX_DASHES)
    pub dashes_available: u8,
    /// Tick a trail marker was last emitted (rate limiting)
    #[serde(default)]
    pub last_trail_tick: u64,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(
                (FIELD_WIDTH - PLAYER_SIZE) / 2.0,
                FIELD_HEIGHT - PLAYER_START_OFFSET,
            ),
            size: PLAYER_SIZE,
            speed: PLAYER_SPEED,
            dash_state: DashState::Idle,
            dash_dir: Vec2::ZERO,
            dash_timer: Cooldown::idle(),
            dash_cooldown: Cooldown::idle(),
            dashes_available: MAX_DASHES,
            last_trail_tick: 0,
        }
    }
}

impl Player {
    /// Center of the player square
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    pub fn is_dashing(&self) -> bool {
        self.dash_state == DashState::Dashing
    }
}

/// A falling projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    /// Top-left corner of the projectile square
    pub pos: Vec2,
    pub size: f32,
    /// Fall speed in units per tick
    pub speed: f32,
    /// Bonus (score-positive) vs penalty (score-negative)
    pub bonus: bool,
    /// Consumed by a chain cascade; still collectible, never re-chained
    #[serde(default)]
    pub chained: bool,
}

impl Projectile {
    /// Center of the projectile square
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }
}

/// Temporary circular region doubling bonus scores inside it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiplierZone {
    pub center: Vec2,
    pub radius: f32,
    pub timer: Cooldown,
}

impl MultiplierZone {
    pub fn contains(&self, point: Vec2) -> bool {
        point.distance_squared(self.center) <= self.radius * self.radius
    }
}

/// Lightning storm ability state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Storm {
    /// Armed and waiting for an explicit trigger
    pub ready: bool,
    pub timer: Cooldown,
}

impl Storm {
    pub fn is_active(&self) -> bool {
        self.timer.is_active()
    }
}

/// A jittered lightning polyline, aged and discarded by the orchestrator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightningBolt {
    pub points: Vec<Vec2>,
    pub timer: Cooldown,
}

/// Transient full-screen banner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BannerKind {
    StreakLost,
    BombReady,
}

impl BannerKind {
    pub fn text(&self) -> &'static str {
        match self {
            BannerKind::StreakLost => "STREAK LOST",
            BannerKind::BombReady => "BOMB READY",
        }
    }
}

/// Banner with fade-in / hold / fade-out phases
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Banner {
    pub kind: BannerKind,
    age: u32,
}

impl Banner {
    pub fn new(kind: BannerKind) -> Self {
        Self { kind, age: 0 }
    }

    /// Advance one tick; returns `false` once the banner has fully faded.
    pub fn advance(&mut self) -> bool {
        self.age += 1;
        self.age < BANNER_FADE_IN_TICKS + BANNER_HOLD_TICKS + BANNER_FADE_OUT_TICKS
    }

    /// Opacity for the current phase
    pub fn alpha(&self) -> f32 {
        let hold_end = BANNER_FADE_IN_TICKS + BANNER_HOLD_TICKS;
        if self.age < BANNER_FADE_IN_TICKS {
            self.age as f32 / BANNER_FADE_IN_TICKS as f32
        } else if self.age < hold_end {
            1.0
        } else {
            let faded = (self.age - hold_end) as f32 / BANNER_FADE_OUT_TICKS as f32;
            (1.0 - faded).max(0.0)
        }
    }
}

/// Screen shake intensity plus the per-tick offset derived from it
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScreenShake {
    pub intensity: f32,
    pub offset: Vec2,
}

impl ScreenShake {
    /// Add a shake pulse, capped at full intensity.
    pub fn pulse(&mut self, amount: f32) {
        self.intensity = (self.intensity + amount).min(1.0);
    }

    /// Decay intensity and pick this tick's offset.
    pub fn update(&mut self, rng: &mut Pcg32) {
        self.intensity *= 0.9; // Fast decay
        if self.intensity < 0.01 {
            self.intensity = 0.0;
            self.offset = Vec2::ZERO;
            return;
        }
        let reach = self.intensity * 8.0;
        self.offset = Vec2::new(
            rng.random_range(-reach..=reach),
            rng.random_range(-reach..=reach),
        );
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG stream; serialized so a restored run continues bit-identically
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Simulation frozen (banner fades and shake decay still run)
    pub paused: bool,
    /// Score; penalties can drive it negative
    pub score: i64,
    /// Consecutive bonus hits without an intervening penalty hit
    pub streak: u32,
    /// Bomb armed and waiting for an explicit trigger
    pub bomb_ready: bool,
    /// Combo multiplier state
    pub combo: ComboState,
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: Vec<Particle>,
    /// Live lightning polylines
    #[serde(skip)]
    pub bolts: Vec<LightningBolt>,
    pub zone: Option<MultiplierZone>,
    pub storm: Storm,
    #[serde(skip)]
    pub shake: ScreenShake,
    #[serde(skip)]
    pub banner: Option<Banner>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            paused: false,
            score: 0,
            streak: 0,
            bomb_ready: false,
            combo: ComboState::default(),
            player: Player::default(),
            projectiles: Vec::new(),
            particles: Vec::new(),
            bolts: Vec::new(),
            zone: None,
            storm: Storm::default(),
            shake: ScreenShake::default(),
            banner: None,
            next_id: 1,
        }
    }

    /// Atomically reinitialize the session from its seed.
    pub fn reset(&mut self) {
        *self = Self::new(self.seed);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Show a banner, replacing any banner still fading.
    pub fn show_banner(&mut self, kind: BannerKind) {
        self.banner = Some(Banner::new(kind));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_matches_fresh_state() {
        let mut state = GameState::new(7);
        state.score = 420;
        state.streak = 3;
        state.combo.multiplier = 5.5;
        state.player.pos.x = 0.0;
        let pid = state.next_entity_id();
        state.projectiles.push(Projectile {
            id: pid,
            pos: Vec2::new(100.0, 100.0),
            size: PROJECTILE_SIZE,
            speed: 3.0,
            bonus: true,
            chained: false,
        });

        state.reset();

        assert_eq!(state.score, 0);
        assert_eq!(state.streak, 0);
        assert!((state.combo.multiplier - 1.0).abs() < f32::EPSILON);
        assert!(state.projectiles.is_empty());
        assert!(state.particles.is_empty());
        assert_eq!(state.player.dashes_available, MAX_DASHES);
        assert_eq!(state.player.pos, Player::default().pos);
    }

    #[test]
    fn banner_fades_through_phases() {
        let mut banner = Banner::new(BannerKind::StreakLost);
        assert_eq!(banner.alpha(), 0.0);
        for _ in 0..BANNER_FADE_IN_TICKS {
            assert!(banner.advance());
        }
        assert!((banner.alpha() - 1.0).abs() < f32::EPSILON);
        for _ in 0..(BANNER_HOLD_TICKS + BANNER_FADE_OUT_TICKS - 1) {
            assert!(banner.advance());
        }
        assert!(!banner.advance());
    }
}
