//! Collision detection between the player box and everything else
//!
//! Pure predicates, no mutation. Evaluation order is bounds, then pipes in
//! storage order, then obstacles; the first violation wins.

use serde::{Deserialize, Serialize};

use super::geometry::PipeShape;
use super::world::{Obstacle, Pipe};
use crate::Rect;

/// What the player ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionCause {
    /// Touched or crossed the top edge
    Ceiling,
    /// Touched or crossed the bottom edge
    Floor,
    Pipe { id: u32 },
    Obstacle { id: u32 },
}

/// Result of a collision check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionResult {
    Clear,
    Collided(CollisionCause),
}

impl CollisionResult {
    pub fn is_collision(&self) -> bool {
        matches!(self, CollisionResult::Collided(_))
    }
}

/// Check the player against the screen bounds, every pipe and every obstacle
pub fn check(
    player: &Rect,
    pipes: &[Pipe],
    obstacles: &[Obstacle],
    screen_height: f32,
) -> CollisionResult {
    if let Some(cause) = bounds_collision(player, screen_height) {
        return CollisionResult::Collided(cause);
    }

    if let Some(pipe) = pipes.iter().find(|p| pipe_collision(player, p)) {
        return CollisionResult::Collided(CollisionCause::Pipe { id: pipe.id });
    }

    if let Some(obstacle) = obstacles.iter().find(|o| player.overlaps(&o.rect())) {
        return CollisionResult::Collided(CollisionCause::Obstacle { id: obstacle.id });
    }

    CollisionResult::Clear
}

/// Out of bounds once the box crosses an edge; flush contact is still clear
pub fn bounds_collision(player: &Rect, screen_height: f32) -> Option<CollisionCause> {
    if player.bottom() > screen_height {
        Some(CollisionCause::Floor)
    } else if player.top() < 0.0 {
        Some(CollisionCause::Ceiling)
    } else {
        None
    }
}

/// Whether the player hits a solid part of `pipe`
pub fn pipe_collision(player: &Rect, pipe: &Pipe) -> bool {
    if !player.overlaps_x(pipe.x, pipe.right()) {
        return false;
    }

    let top = player.top();
    let bottom = player.bottom();
    match pipe.shape {
        PipeShape::Single { top_height, gap } => top < top_height || bottom > top_height + gap,
        PipeShape::Double(d) => {
            let mid_y = d.mid_y();
            top < d.solid1
                || (bottom > mid_y && top < mid_y + d.solid2)
                || bottom > d.bottom_zone()
        }
    }
}
