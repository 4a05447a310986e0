//! Cat Flap - a single-screen flappy arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, spawning, pipe geometry, collisions)
//! - `tuning`: Data-driven game constants
//! - `assets`: Asset loading phase that gates the first run
//! - `audio`: Sound effects triggered by simulation events
//! - `web`: wasm-bindgen surface used by the browser page

pub mod assets;
pub mod audio;
pub mod error;
pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::{AssetError, GameError, TuningError};
pub use tuning::Tuning;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Playfield dimensions
    pub const SCREEN_WIDTH: f32 = 360.0;
    pub const SCREEN_HEIGHT: f32 = 540.0;

    /// Player box
    pub const PLAYER_WIDTH: f32 = 45.0;
    pub const PLAYER_HEIGHT: f32 = 45.0;

    /// Added to vertical velocity every tick
    pub const GRAVITY: f32 = 0.4;
    /// Velocity set (not added) by a jump
    pub const JUMP_VELOCITY: f32 = -7.0;
    /// Velocity set (not added) by a dive
    pub const DIVE_VELOCITY: f32 = 5.0;

    /// Pipe defaults
    pub const PIPE_WIDTH: f32 = 70.0;
    pub const PIPE_GAP: f32 = 140.0;
    pub const PIPE_SPEED: f32 = 2.5;
    /// Ticks between spawns
    pub const SPAWN_INTERVAL: u32 = 100;
    pub const DOUBLE_GAP_PROBABILITY: f32 = 0.4;
    /// Minimum height of each double-gap solid segment
    pub const MIN_SEGMENT_HEIGHT: f32 = 30.0;
    /// Minimum height of the solids around a single gap
    pub const MIN_SOLID_HEIGHT: f32 = 40.0;

    /// Spawn-count thresholds
    pub const SINGLE_GAP_UNTIL: u32 = 10;
    pub const ALTERNATE_UNTIL: u32 = 30;
    pub const OBSTACLES_AFTER: u32 = 30;

    /// Score needed before the run may be paused
    pub const PAUSE_SCORE: u32 = 15;

    /// Obstacle sizes
    pub const FLYING_WIDTH: f32 = 40.0;
    pub const FLYING_HEIGHT: f32 = 30.0;
    pub const GROUND_WIDTH: f32 = 30.0;
    pub const GROUND_HEIGHT: f32 = 50.0;
}

/// Axis-aligned rectangle in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    /// Strict overlap on the x axis (touching edges do not overlap)
    #[inline]
    pub fn overlaps_x(&self, left: f32, right: f32) -> bool {
        self.max.x > left && self.min.x < right
    }

    /// Strict overlap on both axes
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.overlaps_x(other.min.x, other.max.x)
            && self.max.y > other.min.y
            && self.min.y < other.max.y
    }
}
