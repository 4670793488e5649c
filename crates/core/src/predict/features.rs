use crate::config::AiConfig;
use crate::state::Position;

/// Number of scalars in a feature vector: one (dx, dy) pair per encoded step.
pub const FEATURE_LEN: usize = AiConfig::FEATURE_STEPS * 2;

/// Fixed-size numeric encoding of recent player movement.
///
/// The vector holds the last [`AiConfig::FEATURE_STEPS`] single-step
/// displacements in order, oldest first. The same encoding is used for online
/// inference and for training samples, so a predictor trained offline stays
/// compatible with the features the engine extracts at runtime.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeatureVector(pub [f32; FEATURE_LEN]);

impl FeatureVector {
    /// Encodes the trailing window of a position history.
    ///
    /// Returns `None` until the history holds enough positions to fill the
    /// window; predictors are never asked to guess from partial features.
    pub fn from_history(history: &[Position]) -> Option<FeatureVector> {
        let needed = AiConfig::FEATURE_STEPS + 1;
        if history.len() < needed {
            return None;
        }

        let window = &history[history.len() - needed..];
        let mut values = [0.0f32; FEATURE_LEN];
        for (i, pair) in window.windows(2).enumerate() {
            values[i * 2] = (pair[1].x - pair[0].x) as f32;
            values[i * 2 + 1] = (pair[1].y - pair[0].y) as f32;
        }
        Some(FeatureVector(values))
    }

    /// The most recent encoded displacement.
    pub fn last_step(&self) -> (f32, f32) {
        (self.0[FEATURE_LEN - 2], self.0[FEATURE_LEN - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(points: &[(i32, i32)]) -> Vec<Position> {
        points.iter().map(|&(x, y)| Position::new(x, y)).collect()
    }

    #[test]
    fn short_history_yields_no_features() {
        let history = positions(&[(0, 0), (1, 0)]);
        assert!(FeatureVector::from_history(&history).is_none());
    }

    #[test]
    fn encodes_displacements_oldest_first() {
        let history = positions(&[(0, 0), (1, 0), (1, 1), (2, 1)]);
        let features = FeatureVector::from_history(&history).unwrap();
        assert_eq!(features.0, [1.0, 0.0, 0.0, 1.0, 1.0, 0.0]);
        assert_eq!(features.last_step(), (1.0, 0.0));
    }

    #[test]
    fn longer_history_uses_only_the_trailing_window() {
        let history = positions(&[(9, 9), (8, 9), (0, 0), (0, 1), (0, 2), (1, 2)]);
        let features = FeatureVector::from_history(&history).unwrap();
        // Only the last four positions contribute.
        assert_eq!(features.0, [0.0, 1.0, 0.0, 1.0, 1.0, 0.0]);
    }
}
