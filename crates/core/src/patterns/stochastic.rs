//! Randomized patterns

use std::f64::consts::TAU;

use rand::{Rng, RngCore};
use tikus_domain::{Offset, PatternKind};

use super::PatternGenerator;

const RANDOM_SAMPLE_ATTEMPTS: usize = 8;

/// Uniform random steps of at most `range` pixels
///
/// Both axes are drawn from `[-range, range]`. Draws landing outside the disc
/// of radius `range` are redrawn a few times and finally scaled back onto it,
/// so the step length never exceeds the range.
#[derive(Debug, Clone)]
pub struct RandomWalk {
    range: f64,
}

impl RandomWalk {
    /// Walk with steps inside a disc of radius `range`
    pub fn new(range: f64) -> Self {
        Self { range }
    }
}

impl PatternGenerator for RandomWalk {
    fn kind(&self) -> PatternKind {
        PatternKind::Random
    }

    fn advance(&mut self, rng: &mut dyn RngCore) -> Offset {
        if self.range <= 0.0 {
            return Offset::ZERO;
        }
        let mut offset = Offset::ZERO;
        for _ in 0..RANDOM_SAMPLE_ATTEMPTS {
            offset = Offset::new(
                rng.gen_range(-self.range..=self.range),
                rng.gen_range(-self.range..=self.range),
            );
            if offset.magnitude() <= self.range {
                return offset;
            }
        }
        let scale = self.range / offset.magnitude();
        Offset::new(offset.dx * scale, offset.dy * scale)
    }
}

/// Small random twitches that stay near where the session started
///
/// Each step adds a pull of half the accumulated displacement back toward
/// the anchor, then clamps both axes to `max_distance`.
#[derive(Debug, Clone)]
pub struct Jiggle {
    max_distance: f64,
    displacement: Offset,
}

impl Jiggle {
    /// Jiggle anchored at the current cursor position
    pub fn new(max_distance: f64) -> Self {
        Self { max_distance, displacement: Offset::ZERO }
    }

    /// Accumulated displacement from the anchor point
    pub fn displacement(&self) -> Offset {
        self.displacement
    }
}

impl PatternGenerator for Jiggle {
    fn kind(&self) -> PatternKind {
        PatternKind::Jiggle
    }

    fn advance(&mut self, rng: &mut dyn RngCore) -> Offset {
        let m = self.max_distance;
        if m <= 0.0 {
            return Offset::ZERO;
        }
        let dx = rng.gen_range(-m..=m) - 0.5 * self.displacement.dx;
        let dy = rng.gen_range(-m..=m) - 0.5 * self.displacement.dy;
        let step = Offset::new(dx.clamp(-m, m), dy.clamp(-m, m));
        self.displacement = self.displacement + step;
        step
    }
}

/// Human-like strokes of varying length in random directions
///
/// A target length is drawn from `[min_distance, max_distance]` each step and
/// the actual length moves `acceleration` of the way from the previous length
/// toward it, so consecutive strokes change length gradually.
#[derive(Debug, Clone)]
pub struct Human {
    min_distance: f64,
    max_distance: f64,
    acceleration: f64,
    last_distance: Option<f64>,
}

impl Human {
    /// Stroke generator with no previous stroke
    pub fn new(min_distance: f64, max_distance: f64, acceleration: f64) -> Self {
        Self { min_distance, max_distance, acceleration, last_distance: None }
    }
}

impl PatternGenerator for Human {
    fn kind(&self) -> PatternKind {
        PatternKind::Human
    }

    fn advance(&mut self, rng: &mut dyn RngCore) -> Offset {
        if self.max_distance <= 0.0 || self.min_distance > self.max_distance {
            return Offset::ZERO;
        }
        let target = rng.gen_range(self.min_distance..=self.max_distance);
        let distance = match self.last_distance {
            Some(previous) => previous + self.acceleration * (target - previous),
            None => target,
        };
        self.last_distance = Some(distance);

        let angle = rng.gen_range(0.0..TAU);
        Offset::new(distance * angle.cos(), distance * angle.sin())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_seeded_sources_reproduce() {
        let mut a = RandomWalk::new(100.0);
        let mut b = RandomWalk::new(100.0);
        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);

        for _ in 0..10 {
            assert_eq!(a.advance(&mut rng_a), b.advance(&mut rng_b));
        }
    }

    #[test]
    fn test_jiggle_stays_near_anchor() {
        let mut jiggle = Jiggle::new(10.0);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..1_000 {
            let step = jiggle.advance(&mut rng);
            assert!(step.dx.abs() <= 10.0 && step.dy.abs() <= 10.0);
            // Pull of one half keeps the drift below twice the step size
            let d = jiggle.displacement();
            assert!(d.dx.abs() <= 20.0 && d.dy.abs() <= 20.0, "drifted to {d:?}");
        }
    }

    #[test]
    fn test_human_first_stroke_uses_target() {
        let mut human = Human::new(30.0, 30.0, 0.3);
        let mut rng = StdRng::seed_from_u64(3);

        let offset = human.advance(&mut rng);
        assert!((offset.magnitude() - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_human_acceleration_smooths_length() {
        // With zero acceleration every stroke keeps the first length
        let mut human = Human::new(20.0, 150.0, 0.0);
        let mut rng = StdRng::seed_from_u64(5);

        let first = human.advance(&mut rng).magnitude();
        for _ in 0..20 {
            assert!((human.advance(&mut rng).magnitude() - first).abs() < 1e-9);
        }
    }

    #[test]
    fn test_degenerate_ranges_do_not_move() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(RandomWalk::new(0.0).advance(&mut rng).is_zero());
        assert!(Jiggle::new(0.0).advance(&mut rng).is_zero());
        assert!(Human::new(0.0, 0.0, 0.3).advance(&mut rng).is_zero());
    }

    proptest! {
        #[test]
        fn prop_random_within_range(seed in any::<u64>(), range in 0.5f64..500.0) {
            let mut walk = RandomWalk::new(range);
            let mut rng = StdRng::seed_from_u64(seed);
            for _ in 0..50 {
                prop_assert!(walk.advance(&mut rng).magnitude() <= range + 1e-9);
            }
        }

        #[test]
        fn prop_human_within_max_distance(
            seed in any::<u64>(),
            min in 0f64..100.0,
            spread in 0f64..200.0,
            acceleration in 0f64..=1.0,
        ) {
            let max = min + spread;
            let mut human = Human::new(min, max, acceleration);
            let mut rng = StdRng::seed_from_u64(seed);
            for _ in 0..50 {
                let magnitude = human.advance(&mut rng).magnitude();
                prop_assert!(magnitude <= max + 1e-9);
            }
        }
    }
}
