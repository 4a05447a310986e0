//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per call, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (storage order, ids are monotonic)
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod geometry;
pub mod player;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod world;

pub use collision::{CollisionCause, CollisionResult, check};
pub use geometry::{DoubleGap, PipeKind, PipeShape};
pub use player::Player;
pub use spawn::{Spawn, SpawnScheduler};
pub use state::{GameEvent, GamePhase, GameState, Snapshot};
pub use tick::{TickInput, TickOutcome, tick};
pub use world::{Obstacle, ObstacleKind, Pipe, World};
