//! Player kinematics
//!
//! The player never moves horizontally; only the vertical axis integrates.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Rect;
use crate::tuning::Tuning;

/// The cat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (positive is downward)
    pub velocity_y: f32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.player_x(), tuning.player_start_y()),
            size: Vec2::new(tuning.player_width, tuning.player_height),
            velocity_y: 0.0,
        }
    }

    /// Back to the run-start position, at rest
    pub fn reset(&mut self, tuning: &Tuning) {
        *self = Self::new(tuning);
    }

    /// Integrate one tick of gravity.
    ///
    /// When `skip_gravity` is set the position moves with the current
    /// velocity unchanged and the flag is cleared.
    pub fn advance(&mut self, gravity: f32, skip_gravity: &mut bool) {
        if *skip_gravity {
            *skip_gravity = false;
        } else {
            self.velocity_y += gravity;
        }
        self.pos.y += self.velocity_y;
    }

    /// Instant upward impulse: replaces the velocity, never adds to it
    pub fn jump(&mut self, jump_velocity: f32) {
        self.velocity_y = jump_velocity;
    }

    /// Instant downward impulse
    pub fn dive(&mut self, dive_velocity: f32) {
        self.velocity_y = dive_velocity;
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }

    /// Pull the player back inside `[0, screen_height - height]`
    pub fn clamp_to_screen(&mut self, screen_height: f32) {
        self.pos.y = self.pos.y.clamp(0.0, screen_height - self.size.y);
    }
}
