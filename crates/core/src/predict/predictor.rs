use crate::state::Direction;

use super::FeatureVector;

/// Tolerance when checking that a distribution's mass sums to one.
const SUM_TOLERANCE: f32 = 1e-3;

/// Probability mass over the four movement directions, indexed per
/// [`Direction::index`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirectionDistribution([f32; 4]);

impl DirectionDistribution {
    pub fn new(mass: [f32; 4]) -> Self {
        Self(mass)
    }

    /// Equal mass on every direction — the documented cold-start output.
    pub fn uniform() -> Self {
        Self([0.25; 4])
    }

    pub fn mass(&self, direction: Direction) -> f32 {
        self.0[direction.index()]
    }

    /// A distribution is usable when every component is finite and
    /// non-negative and the total mass is one within tolerance. Anything else
    /// is treated as predictor failure and triggers the chase fallback.
    pub fn is_valid(&self) -> bool {
        let mut sum = 0.0f32;
        for &mass in &self.0 {
            if !mass.is_finite() || mass < 0.0 {
                return false;
            }
            sum += mass;
        }
        (sum - 1.0).abs() <= SUM_TOLERANCE
    }

    /// Highest-mass direction, ties broken by the fixed priority order
    /// (North > East > South > West).
    pub fn argmax(&self) -> Direction {
        let mut best = Direction::North;
        let mut best_mass = self.mass(best);
        for direction in Direction::ALL {
            let mass = self.mass(direction);
            if mass > best_mass {
                best = direction;
                best_mass = mass;
            }
        }
        best
    }
}

/// Capability contract for the supervised movement model.
///
/// Implementations may be trained classifiers or deterministic fallbacks; the
/// core only requires that `predict` is cheap, side-effect free, and safe to
/// call from the tick path. Swapping in a retrained implementation is the
/// runtime's job and must be a wholesale replacement.
pub trait MovementPredictor: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> DirectionDistribution;
}

/// Cold-start predictor: uniform over all directions.
#[derive(Clone, Copy, Debug, Default)]
pub struct UniformPredictor;

impl MovementPredictor for UniformPredictor {
    fn predict(&self, _features: &FeatureVector) -> DirectionDistribution {
        DirectionDistribution::uniform()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_distribution_is_valid() {
        assert!(DirectionDistribution::uniform().is_valid());
    }

    #[test]
    fn nan_and_negative_mass_are_invalid() {
        assert!(!DirectionDistribution::new([f32::NAN, 0.5, 0.25, 0.25]).is_valid());
        assert!(!DirectionDistribution::new([-0.1, 0.6, 0.25, 0.25]).is_valid());
    }

    #[test]
    fn mass_must_sum_to_one() {
        assert!(!DirectionDistribution::new([0.5, 0.5, 0.5, 0.5]).is_valid());
        assert!(DirectionDistribution::new([0.7, 0.1, 0.1, 0.1]).is_valid());
    }

    #[test]
    fn argmax_picks_the_heaviest_direction() {
        let distribution = DirectionDistribution::new([0.1, 0.2, 0.6, 0.1]);
        assert_eq!(distribution.argmax(), Direction::South);
    }

    #[test]
    fn argmax_ties_resolve_by_priority_order() {
        // North and West tie; North wins by priority.
        let distribution = DirectionDistribution::new([0.4, 0.1, 0.1, 0.4]);
        assert_eq!(distribution.argmax(), Direction::North);

        // East and South tie; East wins.
        let distribution = DirectionDistribution::new([0.1, 0.4, 0.4, 0.1]);
        assert_eq!(distribution.argmax(), Direction::East);
    }
}
