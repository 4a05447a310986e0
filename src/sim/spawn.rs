//! Spawn scheduling
//!
//! Two counters with a fixed relationship:
//! - `frame_counter` counts playing ticks; a spawn fires every `spawn_interval`.
//! - `spawn_count` counts spawn events and selects the archetype mix.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::{PipeKind, PipeShape, generate_shape};
use super::world::ObstacleKind;
use crate::tuning::Tuning;

/// Everything produced by one spawn event
#[derive(Debug, Clone, PartialEq)]
pub struct Spawn {
    /// Spawn count after this event (1-based)
    pub count: u32,
    /// Kind the schedule asked for (the shape may still be a single-gap fallback)
    pub requested: PipeKind,
    pub pipe: PipeShape,
    /// Obstacle archetype and its vertical position
    pub obstacle: Option<(ObstacleKind, f32)>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpawnScheduler {
    frame_counter: u64,
    spawn_count: u32,
}

impl SpawnScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn frame_counter(&self) -> u64 {
        self.frame_counter
    }

    pub fn spawn_count(&self) -> u32 {
        self.spawn_count
    }

    /// Count a playing tick; true when a spawn is due on it
    pub fn on_frame(&mut self, spawn_interval: u32) -> bool {
        self.frame_counter += 1;
        self.frame_counter.is_multiple_of(u64::from(spawn_interval.max(1)))
    }

    /// Produce the next pipe and, once eligible, an obstacle
    pub fn spawn<R: Rng + ?Sized>(&mut self, rng: &mut R, tuning: &Tuning) -> Spawn {
        self.spawn_count += 1;
        let count = self.spawn_count;

        let requested = pipe_kind_for(count, rng, tuning);
        let pipe = generate_shape(requested, rng, tuning);

        let obstacle = obstacle_eligible(count, tuning).then(|| choose_obstacle(rng, tuning));

        log::debug!(
            "spawn #{count}: {:?} pipe (requested {requested:?}), obstacle {obstacle:?}",
            pipe.kind()
        );

        Spawn {
            count,
            requested,
            pipe,
            obstacle,
        }
    }
}

/// Pipe archetype for spawn count `n` (1-based)
pub fn pipe_kind_for<R: Rng + ?Sized>(n: u32, rng: &mut R, tuning: &Tuning) -> PipeKind {
    if n <= tuning.single_gap_until {
        PipeKind::Single
    } else if n <= tuning.alternate_until {
        if n % 2 == 1 {
            PipeKind::Double
        } else {
            PipeKind::Single
        }
    } else if rng.random::<f32>() < tuning.double_gap_probability {
        PipeKind::Double
    } else {
        PipeKind::Single
    }
}

#[inline]
pub fn obstacle_eligible(n: u32, tuning: &Tuning) -> bool {
    n > tuning.obstacles_after
}

/// Uniform archetype, then its placement policy:
/// - flying: uniform in `[h, screen_height - h)`
/// - ground: flush with the top or the bottom edge, equally likely
pub fn choose_obstacle<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning) -> (ObstacleKind, f32) {
    if rng.random_bool(0.5) {
        let h = tuning.flying_size.y;
        let y = rng.random::<f32>() * (tuning.screen_height - 2.0 * h) + h;
        (ObstacleKind::Flying, y)
    } else {
        let h = tuning.ground_size.y;
        let y = if rng.random_bool(0.5) {
            0.0
        } else {
            tuning.screen_height - h
        };
        (ObstacleKind::Ground, y)
    }
}

/// Top-left corner of a freshly spawned obstacle
pub fn obstacle_origin(y: f32, tuning: &Tuning) -> Vec2 {
    Vec2::new(tuning.screen_width, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_fires_every_interval() {
        let mut scheduler = SpawnScheduler::new();
        let due: Vec<u64> = (0..350)
            .filter_map(|_| scheduler.on_frame(100).then(|| scheduler.frame_counter()))
            .collect();
        assert_eq!(due, vec![100, 200, 300]);
        // Frames do not advance the spawn count on their own
        assert_eq!(scheduler.spawn_count(), 0);
    }

    #[test]
    fn test_first_thirty_spawns_follow_fixed_schedule() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        for n in 1..=10 {
            assert_eq!(pipe_kind_for(n, &mut rng, &tuning), PipeKind::Single, "n={n}");
        }
        for n in 11..=30 {
            let expected = if n % 2 == 1 {
                PipeKind::Double
            } else {
                PipeKind::Single
            };
            assert_eq!(pipe_kind_for(n, &mut rng, &tuning), expected, "n={n}");
        }
    }

    #[test]
    fn test_schedule_ignores_rng_before_thirty() {
        let tuning = Tuning::default();
        let mut a = Pcg32::seed_from_u64(1);
        let mut b = Pcg32::seed_from_u64(999);
        for n in 1..=30 {
            assert_eq!(
                pipe_kind_for(n, &mut a, &tuning),
                pipe_kind_for(n, &mut b, &tuning)
            );
        }
    }

    #[test]
    fn test_probability_extremes_after_thirty() {
        let mut rng = Pcg32::seed_from_u64(3);
        let always = Tuning {
            double_gap_probability: 1.0,
            ..Default::default()
        };
        let never = Tuning {
            double_gap_probability: 0.0,
            ..Default::default()
        };
        for n in 31..100 {
            assert_eq!(pipe_kind_for(n, &mut rng, &always), PipeKind::Double);
            assert_eq!(pipe_kind_for(n, &mut rng, &never), PipeKind::Single);
        }
    }

    #[test]
    fn test_double_gap_mix_after_thirty() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(42);
        let doubles = (0..10_000)
            .filter(|_| pipe_kind_for(31, &mut rng, &tuning) == PipeKind::Double)
            .count();
        assert!((3_500..4_500).contains(&doubles), "doubles={doubles}");
    }

    #[test]
    fn test_obstacles_only_after_thirty_spawns() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut scheduler = SpawnScheduler::new();

        for _ in 0..30 {
            assert!(scheduler.spawn(&mut rng, &tuning).obstacle.is_none());
        }
        for _ in 0..20 {
            let spawn = scheduler.spawn(&mut rng, &tuning);
            assert!(spawn.obstacle.is_some(), "spawn #{}", spawn.count);
        }
        assert_eq!(scheduler.spawn_count(), 50);
    }

    #[test]
    fn test_obstacle_placement_policy() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(11);
        let mut seen_flying = false;
        let mut seen_top = false;
        let mut seen_bottom = false;

        for _ in 0..500 {
            match choose_obstacle(&mut rng, &tuning) {
                (ObstacleKind::Flying, y) => {
                    seen_flying = true;
                    assert!(y >= 30.0 && y < 510.0, "flying y={y}");
                }
                (ObstacleKind::Ground, y) => {
                    if y == 0.0 {
                        seen_top = true;
                    } else {
                        assert_eq!(y, 490.0);
                        seen_bottom = true;
                    }
                }
            }
        }
        assert!(seen_flying && seen_top && seen_bottom);
    }

    #[test]
    fn test_reset_clears_both_counters() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut scheduler = SpawnScheduler::new();
        scheduler.on_frame(100);
        scheduler.spawn(&mut rng, &tuning);
        scheduler.reset();
        assert_eq!(scheduler.frame_counter(), 0);
        assert_eq!(scheduler.spawn_count(), 0);
    }
}
