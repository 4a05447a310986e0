//! Pipe geometry generation
//!
//! Turns random draws into pipe shapes under hard constraints:
//! - Single gap: the top solid and the bottom solid are both at least
//!   `min_solid_height` tall.
//! - Double gap: three solids, each at least `min_segment_height`, and
//!   `solid1 + gap1 + solid2 + gap2 + solid3` equals the screen height exactly.
//!
//! A double-gap proposal that cannot meet its minimums is abandoned and a
//! single-gap pipe is generated instead, so an invalid pipe is never emitted.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Which pipe archetype the scheduler asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipeKind {
    Single,
    Double,
}

/// Vertical layout of a double-gap pipe, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DoubleGap {
    pub solid1: f32,
    pub gap1: f32,
    pub solid2: f32,
    pub gap2: f32,
    pub solid3: f32,
}

impl DoubleGap {
    /// Top edge of the middle solid
    #[inline]
    pub fn mid_y(&self) -> f32 {
        self.solid1 + self.gap1
    }

    /// Top edge of the bottom solid
    #[inline]
    pub fn bottom_zone(&self) -> f32 {
        self.mid_y() + self.solid2 + self.gap2
    }

    /// Sum of all segments and gaps
    pub fn total(&self) -> f32 {
        self.solid1 + self.gap1 + self.solid2 + self.gap2 + self.solid3
    }
}

/// Vertical layout of a pipe
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PipeShape {
    /// Top solid of `top_height`, a gap of `gap`, bottom solid to the floor
    Single { top_height: f32, gap: f32 },
    Double(DoubleGap),
}

impl PipeShape {
    pub fn kind(&self) -> PipeKind {
        match self {
            PipeShape::Single { .. } => PipeKind::Single,
            PipeShape::Double(_) => PipeKind::Double,
        }
    }

    /// Centre of the primary (tallest) gap
    pub fn primary_gap_center(&self) -> f32 {
        match *self {
            PipeShape::Single { top_height, gap } => top_height + gap / 2.0,
            PipeShape::Double(d) => d.solid1 + d.gap1 / 2.0,
        }
    }
}

/// Single-gap pipe with the top height uniform over the space left after
/// reserving the gap and `min_solid_height` on each side
pub fn single_gap<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning) -> PipeShape {
    let gap = tuning.pipe_gap;
    let available = tuning.screen_height - gap - 2.0 * tuning.min_solid_height;
    let top_height = rng.random::<f32>() * available + tuning.min_solid_height;
    PipeShape::Single { top_height, gap }
}

/// Draw three proportions and build a double-gap layout from them
pub fn double_gap<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning) -> Option<DoubleGap> {
    let draws = [rng.random::<f32>(), rng.random::<f32>(), rng.random::<f32>()];
    double_gap_from_draws(draws, tuning)
}

/// Deterministic half of [`double_gap`].
///
/// Returns `None` when the draws are degenerate or the segments cannot all
/// reach `min_segment_height`.
pub fn double_gap_from_draws(draws: [f32; 3], tuning: &Tuning) -> Option<DoubleGap> {
    let min = tuning.min_segment_height;
    let gap1 = tuning.pipe_gap;
    let gap2 = tuning.secondary_gap();
    let total_solid = tuning.screen_height - gap1 - gap2;

    let sum: f32 = draws.iter().sum();
    if !(sum.is_finite() && sum > 0.0) {
        return None;
    }

    let spread = total_solid - 3.0 * min;
    let solid1 = min + (draws[0] / sum * spread).floor();
    let solid2 = min + (draws[1] / sum * spread).floor();
    // Remainder keeps the sum exact
    let solid3 = total_solid - solid1 - solid2;

    let [solid1, solid2, solid3] = repair_segments([solid1, solid2, solid3], min)?;
    if solid1 < min || solid2 < min {
        return None;
    }

    Some(DoubleGap {
        solid1,
        gap1,
        solid2,
        gap2,
        solid3,
    })
}

/// Lift the last segment up to `min` by taking the deficit from the first
/// segment, or else the second, when that segment has room to spare.
pub fn repair_segments(segments: [f32; 3], min: f32) -> Option<[f32; 3]> {
    let [mut s1, mut s2, mut s3] = segments;
    if s3 < min {
        let deficit = min - s3;
        if s1 > min + deficit {
            s1 -= deficit;
        } else if s2 > min + deficit {
            s2 -= deficit;
        } else {
            return None;
        }
        s3 += deficit;
    }
    Some([s1, s2, s3])
}

/// Shape for the requested kind, falling back to a single gap when the
/// double-gap proposal is unusable
pub fn generate_shape<R: Rng + ?Sized>(kind: PipeKind, rng: &mut R, tuning: &Tuning) -> PipeShape {
    match kind {
        PipeKind::Single => single_gap(rng, tuning),
        PipeKind::Double => match double_gap(rng, tuning) {
            Some(layout) => PipeShape::Double(layout),
            None => {
                log::debug!("double-gap proposal unrepairable, spawning a single gap instead");
                single_gap(rng, tuning)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn assert_valid_single(shape: &PipeShape, tuning: &Tuning) {
        let PipeShape::Single { top_height, gap } = *shape else {
            panic!("expected single gap, got {shape:?}");
        };
        assert!(top_height >= tuning.min_solid_height);
        assert!(top_height + gap <= tuning.screen_height - tuning.min_solid_height);
    }

    fn assert_valid_double(layout: &DoubleGap, tuning: &Tuning) {
        assert_eq!(layout.total(), tuning.screen_height);
        assert!(layout.solid1 >= tuning.min_segment_height);
        assert!(layout.solid2 >= tuning.min_segment_height);
        assert!(layout.solid3 >= tuning.min_segment_height);
    }

    #[test]
    fn test_secondary_gap_is_two_thirds_rounded_down() {
        let tuning = Tuning::default();
        let layout = double_gap_from_draws([0.2, 0.5, 0.3], &tuning).unwrap();
        assert_eq!(layout.gap1, 140.0);
        assert_eq!(layout.gap2, 93.0);
    }

    #[test]
    fn test_double_gap_from_even_draws() {
        let tuning = Tuning::default();
        // total solid = 540 - 140 - 93 = 307, spread = 307 - 90 = 217
        let layout = double_gap_from_draws([1.0, 1.0, 1.0], &tuning).unwrap();
        assert_eq!(layout.solid1, 30.0 + 72.0);
        assert_eq!(layout.solid2, 30.0 + 72.0);
        assert_eq!(layout.solid3, 307.0 - 204.0);
        assert_valid_double(&layout, &tuning);
    }

    #[test]
    fn test_double_gap_extreme_draws_stay_valid() {
        let tuning = Tuning::default();
        for draws in [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [1e-7, 1e-7, 0.9]] {
            let layout = double_gap_from_draws(draws, &tuning).unwrap();
            assert_valid_double(&layout, &tuning);
        }
    }

    #[test]
    fn test_degenerate_draws_are_rejected() {
        let tuning = Tuning::default();
        assert!(double_gap_from_draws([0.0, 0.0, 0.0], &tuning).is_none());
        assert!(double_gap_from_draws([f32::NAN, 0.5, 0.5], &tuning).is_none());
    }

    #[test]
    fn test_repair_takes_from_first_segment_first() {
        assert_eq!(
            repair_segments([100.0, 100.0, 20.0], 30.0),
            Some([90.0, 100.0, 30.0])
        );
    }

    #[test]
    fn test_repair_falls_through_to_second_segment() {
        // s1 has exactly min + deficit, which is not strictly more
        assert_eq!(
            repair_segments([40.0, 100.0, 20.0], 30.0),
            Some([40.0, 90.0, 30.0])
        );
    }

    #[test]
    fn test_repair_gives_up_without_slack() {
        assert_eq!(repair_segments([35.0, 38.0, 10.0], 30.0), None);
    }

    #[test]
    fn test_repair_leaves_valid_segments_alone() {
        assert_eq!(
            repair_segments([50.0, 60.0, 30.0], 30.0),
            Some([50.0, 60.0, 30.0])
        );
    }

    #[test]
    fn test_cramped_double_gap_falls_back_to_single() {
        // Total solid 540 - 300 - 200 = 40 < 3 * 30, so no double layout fits,
        // while a single gap (300 + 2 * 40 = 380) still does.
        let tuning = Tuning {
            pipe_gap: 300.0,
            ..Default::default()
        };
        assert!(tuning.validate().is_ok());
        assert!(double_gap_from_draws([0.3, 0.3, 0.4], &tuning).is_none());

        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..50 {
            let shape = generate_shape(PipeKind::Double, &mut rng, &tuning);
            assert_eq!(shape.kind(), PipeKind::Single);
            assert_valid_single(&shape, &tuning);
        }
    }

    #[test]
    fn test_primary_gap_center() {
        let layout = DoubleGap {
            solid1: 100.0,
            gap1: 140.0,
            solid2: 100.0,
            gap2: 93.0,
            solid3: 107.0,
        };
        assert_eq!(PipeShape::Double(layout).primary_gap_center(), 170.0);

        let single = PipeShape::Single {
            top_height: 100.0,
            gap: 140.0,
        };
        assert_eq!(single.primary_gap_center(), 170.0);
    }

    proptest! {
        #[test]
        fn prop_single_gap_within_bounds(seed in any::<u64>()) {
            let tuning = Tuning::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let shape = single_gap(&mut rng, &tuning);
            assert_valid_single(&shape, &tuning);
        }

        #[test]
        fn prop_double_gap_sums_exactly(seed in any::<u64>()) {
            let tuning = Tuning::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            match generate_shape(PipeKind::Double, &mut rng, &tuning) {
                PipeShape::Double(layout) => assert_valid_double(&layout, &tuning),
                single => assert_valid_single(&single, &tuning),
            }
        }

        #[test]
        fn prop_double_gap_from_any_draws(a in 0.0f32..1.0, b in 0.0f32..1.0, c in 0.0f32..1.0) {
            let tuning = Tuning::default();
            if let Some(layout) = double_gap_from_draws([a, b, c], &tuning) {
                assert_valid_double(&layout, &tuning);
            }
        }
    }
}
