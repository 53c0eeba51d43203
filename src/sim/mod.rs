//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no wall-clock time
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod posts;
pub mod spawn;
pub mod state;
pub mod tick;

pub use clock::FixedStep;
pub use collision::Rect;
pub use state::{
    Entity, EntityKind, GameEvent, GamePhase, GameState, ObstacleKind, Particle, PostHistory,
};
pub use tick::{TickInput, activate, tick};
