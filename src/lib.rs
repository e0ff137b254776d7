//! Skyfall - a top-down dodge-and-collect arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, abilities, game state)
//!
//! Rendering, input polling, and audio are external collaborators: the sim
//! consumes normalized [`sim::TickInput`] intents and emits a
//! [`sim::RenderSnapshot`] each tick.

pub mod sim;

/// Game configuration constants
pub mod consts {
    /// Nominal simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per pacing-loop pass to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 32.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Spawn height above the bottom edge
    pub const PLAYER_START_OFFSET: f32 = 50.0;

    /// Dash tuning
    pub const DASH_SPEED: f32 = 15.0;
    pub const DASH_DURATION_TICKS: u32 = 10;
    pub const DASH_COOLDOWN_TICKS: u32 = 30;
    /// Dashes available between cooldowns
    pub const MAX_DASHES: u8 = 2;
    /// Minimum ticks between trail markers (50 ms at 60 Hz)
    pub const TRAIL_INTERVAL_TICKS: u64 = 3;

    /// Projectile tuning
    pub const PROJECTILE_SIZE: f32 = 20.0;
    pub const PROJECTILE_MIN_SPEED: f32 = 2.0;
    pub const PROJECTILE_MAX_SPEED: f32 = 5.0;
    /// Per-tick spawn probability
    pub const PROJECTILE_SPAWN_CHANCE: f64 = 0.02;
    /// Share of spawns that are bonus projectiles
    pub const BONUS_CHANCE: f64 = 0.3;

    /// Base score values
    pub const BONUS_SCORE: i64 = 5;
    pub const PENALTY_SCORE: i64 = 10;

    /// Combo tuning
    pub const MAX_MULTIPLIER: f32 = 8.0;
    pub const COMBO_TIMER_TICKS: u32 = 120;
    /// Multiplier growth on a direct bonus hit
    pub const COMBO_HIT_BUMP: f32 = 0.5;
    /// Smaller growth for ambient gather-style gains (chain links, bomb sweeps)
    pub const COMBO_GATHER_BUMP: f32 = 0.2;
    /// Passive drain per tick once the combo timer has run out
    pub const COMBO_DRAIN_RATE: f32 = 0.015;
    /// Multiplier lost to a penalty hit while above the drain threshold
    pub const COMBO_PENALTY_STEP: f32 = 1.0;

    /// Consecutive bonus hits required to arm the bomb
    pub const BOMB_STREAK: u32 = 5;
    /// Per-projectile bomb scores (penalty halved, bonus reduced)
    pub const BOMB_PENALTY_SCORE: i64 = 5;
    pub const BOMB_BONUS_SCORE: i64 = 3;

    /// Chain reaction tuning
    pub const CHAIN_RADIUS: f32 = 150.0;
    pub const CHAIN_SEGMENTS: usize = 8;
    pub const CHAIN_BOLT_TICKS: u32 = 20;
    /// Base score per chained projectile
    pub const CHAIN_SCORE: i64 = 3;

    /// Multiplier zone tuning
    pub const ZONE_SPAWN_CHANCE: f64 = 0.005;
    pub const ZONE_DURATION_TICKS: u32 = 300;
    pub const ZONE_RADIUS: f32 = 90.0;
    pub const ZONE_MULTIPLIER: f32 = 2.0;

    /// Lightning storm tuning
    pub const STORM_DURATION_TICKS: u32 = 300;
    /// Flat reward per penalty projectile cleared by the storm
    pub const STORM_PENALTY_SCORE: i64 = 2;
    /// Ticks between decorative storm bolts
    pub const STORM_BOLT_INTERVAL: u64 = 10;

    /// Floating score text base lifetime
    pub const TEXT_LIFE_TICKS: f32 = 60.0;

    /// Banner phase lengths (fade-in / hold / fade-out)
    pub const BANNER_FADE_IN_TICKS: u32 = 15;
    pub const BANNER_HOLD_TICKS: u32 = 60;
    pub const BANNER_FADE_OUT_TICKS: u32 = 30;
}
