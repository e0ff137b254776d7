//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call to [`tick`] advances exactly one frame)
//! - Seeded RNG only
//! - Stable iteration order
//! - No rendering or platform dependencies

pub mod abilities;
pub mod chain;
pub mod combo;
pub mod dash;
pub mod particles;
pub mod projectiles;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod timer;

pub use combo::ComboState;
pub use particles::{Particle, ParticleKind};
pub use projectiles::HitEvent;
pub use snapshot::RenderSnapshot;
pub use state::{
    Banner, BannerKind, DashState, GameState, LightningBolt, MultiplierZone, Player, Projectile,
    Storm,
};
pub use tick::{TickInput, tick};
pub use timer::Cooldown;
