//! Game tuning constants
//!
//! Everything the simulation reads as a "constant" lives here so a run can be
//! reconfigured from JSON without touching the code.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::TuningError;
use crate::sim::ObstacleKind;

/// Data-driven game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    pub gravity: f32,
    pub jump_velocity: f32,
    pub dive_velocity: f32,

    // === Pipes ===
    pub pipe_width: f32,
    /// Primary gap height (the secondary gap of a double pipe is 2/3 of it)
    pub pipe_gap: f32,
    /// Horizontal scroll per tick
    pub pipe_speed: f32,
    pub spawn_interval: u32,
    pub double_gap_probability: f32,
    pub min_segment_height: f32,
    pub min_solid_height: f32,

    // === Spawn thresholds ===
    /// Spawn counts up to this value always produce single-gap pipes
    pub single_gap_until: u32,
    /// Spawn counts up to this value alternate single/double
    pub alternate_until: u32,
    /// Obstacles spawn once the spawn count exceeds this value
    pub obstacles_after: u32,

    /// Score needed before pausing is allowed
    pub pause_score: u32,

    // === Obstacles ===
    pub flying_size: Vec2,
    pub ground_size: Vec2,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            dive_velocity: DIVE_VELOCITY,

            pipe_width: PIPE_WIDTH,
            pipe_gap: PIPE_GAP,
            pipe_speed: PIPE_SPEED,
            spawn_interval: SPAWN_INTERVAL,
            double_gap_probability: DOUBLE_GAP_PROBABILITY,
            min_segment_height: MIN_SEGMENT_HEIGHT,
            min_solid_height: MIN_SOLID_HEIGHT,

            single_gap_until: SINGLE_GAP_UNTIL,
            alternate_until: ALTERNATE_UNTIL,
            obstacles_after: OBSTACLES_AFTER,

            pause_score: PAUSE_SCORE,

            flying_size: Vec2::new(FLYING_WIDTH, FLYING_HEIGHT),
            ground_size: Vec2::new(GROUND_WIDTH, GROUND_HEIGHT),
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning =
            serde_json::from_str(json).map_err(|e| TuningError::Parse(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check that every pipe the generator can emit fits on screen
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("pipe_width", self.pipe_width),
            ("pipe_gap", self.pipe_gap),
            ("pipe_speed", self.pipe_speed),
            ("flying_size.x", self.flying_size.x),
            ("flying_size.y", self.flying_size.y),
            ("ground_size.x", self.ground_size.x),
            ("ground_size.y", self.ground_size.y),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(TuningError::NonPositive { field, value });
            }
        }

        let non_negative = [
            ("min_segment_height", self.min_segment_height),
            ("min_solid_height", self.min_solid_height),
            ("gravity", self.gravity),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(TuningError::Negative { field, value });
            }
        }

        if !self.jump_velocity.is_finite() || !self.dive_velocity.is_finite() {
            return Err(TuningError::NonFinite {
                field: "jump_velocity/dive_velocity",
            });
        }

        if self.spawn_interval == 0 {
            return Err(TuningError::ZeroSpawnInterval);
        }

        let p = self.double_gap_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(TuningError::ProbabilityOutOfRange { value: p });
        }

        let required = self.pipe_gap + 2.0 * self.min_solid_height;
        if self.screen_height < required {
            return Err(TuningError::SingleGapDoesNotFit {
                screen_height: self.screen_height,
                required,
            });
        }

        if self.player_height >= self.screen_height {
            return Err(TuningError::DoesNotFit {
                what: "player",
                height: self.player_height,
            });
        }
        // Flying obstacles are placed in [h, screen_height - h)
        if 2.0 * self.flying_size.y > self.screen_height {
            return Err(TuningError::DoesNotFit {
                what: "flying obstacle",
                height: self.flying_size.y,
            });
        }
        if self.ground_size.y > self.screen_height {
            return Err(TuningError::DoesNotFit {
                what: "ground obstacle",
                height: self.ground_size.y,
            });
        }

        Ok(())
    }

    /// Fixed horizontal position of the player's left edge
    #[inline]
    pub fn player_x(&self) -> f32 {
        self.screen_width / 4.0
    }

    /// Vertical position the player starts each run at (centered)
    #[inline]
    pub fn player_start_y(&self) -> f32 {
        self.screen_height / 2.0 - self.player_height / 2.0
    }

    /// Lower gap of a double pipe: two thirds of the primary gap, rounded down
    #[inline]
    pub fn secondary_gap(&self) -> f32 {
        (self.pipe_gap * 2.0 / 3.0).floor()
    }

    pub fn obstacle_size(&self, kind: ObstacleKind) -> Vec2 {
        match kind {
            ObstacleKind::Flying => self.flying_size,
            ObstacleKind::Ground => self.ground_size,
        }
    }
}
