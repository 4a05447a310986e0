//! Live entities: scrolling pipes and obstacles

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::PipeShape;
use crate::Rect;

/// A scrolling pipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    pub id: u32,
    /// Left edge
    pub x: f32,
    pub width: f32,
    pub shape: PipeShape,
    /// Set once the player's left edge is past the pipe's right edge
    pub passed: bool,
}

impl Pipe {
    pub fn new(id: u32, x: f32, width: f32, shape: PipeShape) -> Self {
        Self {
            id,
            x,
            width,
            shape,
            passed: false,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Obstacle archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Bird, floats somewhere in the middle band
    Flying,
    /// Cactus, flush with the top or bottom edge
    Ground,
}

/// A scrolling hazard with no scoring semantics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal scroll per tick
    pub speed: f32,
}

impl Obstacle {
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }
}

/// Owns every live pipe and obstacle, in spawn order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct World {
    pub pipes: Vec<Pipe>,
    pub obstacles: Vec<Obstacle>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.pipes.clear();
        self.obstacles.clear();
    }

    /// Scroll everything left, mark newly passed pipes and drop whatever has
    /// left the screen.
    ///
    /// Returns the ids of pipes passed this tick (one point each).
    pub fn advance(&mut self, pipe_speed: f32, player_x: f32) -> Vec<u32> {
        let mut passed = Vec::new();

        for pipe in &mut self.pipes {
            pipe.x -= pipe_speed;
            if !pipe.passed && pipe.right() < player_x {
                pipe.passed = true;
                passed.push(pipe.id);
            }
        }
        self.pipes.retain(|p| p.right() >= 0.0);

        for obstacle in &mut self.obstacles {
            obstacle.pos.x -= obstacle.speed;
        }
        self.obstacles.retain(|o| o.right() >= 0.0);

        passed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(id: u32, x: f32) -> Pipe {
        Pipe::new(
            id,
            x,
            70.0,
            PipeShape::Single {
                top_height: 100.0,
                gap: 140.0,
            },
        )
    }

    fn bird(id: u32, x: f32, speed: f32) -> Obstacle {
        Obstacle {
            id,
            kind: ObstacleKind::Flying,
            pos: Vec2::new(x, 200.0),
            size: Vec2::new(40.0, 30.0),
            speed,
        }
    }

    #[test]
    fn test_advance_scrolls_pipes_and_obstacles() {
        let mut world = World::new();
        world.pipes.push(single(1, 300.0));
        world.obstacles.push(bird(2, 300.0, 4.0));

        world.advance(2.5, 90.0);
        assert_eq!(world.pipes[0].x, 297.5);
        assert_eq!(world.obstacles[0].pos.x, 296.0);
    }

    #[test]
    fn test_pipe_scores_exactly_once() {
        let mut world = World::new();
        // Right edge at 91, player at 90
        world.pipes.push(single(7, 21.0));

        assert!(world.advance(0.5, 90.0).is_empty()); // right edge 90.5
        assert!(world.advance(0.5, 90.0).is_empty()); // right edge 90.0, not strictly less
        assert_eq!(world.advance(0.5, 90.0), vec![7]);
        assert!(world.pipes[0].passed);

        for _ in 0..10 {
            assert!(world.advance(0.5, 90.0).is_empty());
        }
    }

    #[test]
    fn test_offscreen_entities_are_removed() {
        let mut world = World::new();
        world.pipes.push(single(1, -69.0));
        world.pipes.push(single(2, 100.0));
        world.obstacles.push(bird(3, -39.0, 2.5));
        world.obstacles.push(bird(4, 100.0, 2.5));

        let passed = world.advance(2.5, 90.0);

        // The leaving pipe still counts as passed on its final tick
        assert_eq!(passed, vec![1]);
        assert_eq!(world.pipes.len(), 1);
        assert_eq!(world.pipes[0].id, 2);
        assert_eq!(world.obstacles.len(), 1);
        assert_eq!(world.obstacles[0].id, 4);
    }

    #[test]
    fn test_trailing_edge_at_zero_is_kept() {
        let mut world = World::new();
        world.pipes.push(single(1, -67.5));
        world.advance(2.5, 90.0);
        assert_eq!(world.pipes.len(), 1);
        world.advance(2.5, 90.0);
        assert!(world.pipes.is_empty());
    }
}
