//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (cosmetic particles use their own stream)
//! - Stable iteration order (insertion order decides collision priority)
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod death;
pub mod field;
pub mod hazards;
pub mod player;
pub mod scoring;
pub mod scroll;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{Landing, land, qualifies};
pub use death::DeathCause;
pub use snapshot::RenderSnapshot;
pub use state::{
    Bullet, GameEvent, GameState, Lives, Particle, Platform, PlatformKind, Player, RunPhase,
    Session, Turret, TurretSide,
};
pub use tick::{TickInput, tick};
