//! Movement pattern generators
//!
//! Each generator owns its phase state and produces one relative offset per
//! call. Randomness is passed in on every call so a test can drive any
//! generator from a seeded source.
//!
//! Parametric curves ([`Circle`], [`Figure8`], [`Smooth`]) are deterministic;
//! the stochastic generators ([`RandomWalk`], [`Jiggle`], [`Human`]) draw
//! from the supplied RNG. Degenerate parameters (zero steps, zero amplitude,
//! zero range) yield [`Offset::ZERO`] instead of dividing by zero.

mod parametric;
mod stochastic;

pub use parametric::{Circle, Figure8, Smooth};
use rand::RngCore;
pub use stochastic::{Human, Jiggle, RandomWalk};
use tikus_domain::{Offset, PatternKind, SchedulerConfig};

/// Produces successive cursor offsets
pub trait PatternGenerator: Send {
    /// Which algorithm this is
    fn kind(&self) -> PatternKind;

    /// Next offset, advancing the internal phase
    fn advance(&mut self, rng: &mut dyn RngCore) -> Offset;
}

/// Fresh generator for `kind`, parameterized from `config`
///
/// Phase state always starts from zero, so calling this again is how a
/// session resets its pattern.
pub fn build_pattern(kind: PatternKind, config: &SchedulerConfig) -> Box<dyn PatternGenerator> {
    let p = &config.patterns;
    match kind {
        PatternKind::Random => Box::new(RandomWalk::new(config.movement_range)),
        PatternKind::Circle => Box::new(Circle::new(p.circle.radius, p.circle.steps)),
        PatternKind::Figure8 => {
            Box::new(Figure8::new(p.figure8.width, p.figure8.height, p.figure8.steps))
        }
        PatternKind::Smooth => Box::new(Smooth::new(p.smooth.amplitude, p.smooth.frequency)),
        PatternKind::Jiggle => Box::new(Jiggle::new(p.jiggle.max_distance)),
        PatternKind::Human => Box::new(Human::new(
            p.human.min_distance,
            p.human.max_distance,
            p.human.acceleration,
        )),
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_factory_builds_requested_kind() {
        let config = SchedulerConfig::default();
        for kind in PatternKind::ALL {
            assert_eq!(build_pattern(kind, &config).kind(), kind);
        }
    }

    #[test]
    fn test_every_pattern_moves_with_defaults() {
        let config = SchedulerConfig::default();
        let mut rng = StdRng::seed_from_u64(11);

        for kind in PatternKind::ALL {
            let mut pattern = build_pattern(kind, &config);
            let moved = (0..5).any(|_| !pattern.advance(&mut rng).is_zero());
            assert!(moved, "{kind} produced only zero offsets");
        }
    }
}
