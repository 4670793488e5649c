use crate::state::Direction;

use super::FeatureVector;

/// One supervised observation: a movement context and the move the player
/// actually made next.
///
/// Samples are append-only. The logging collaborator produces them while
/// guards can see the player; offline retraining consumes them in batch.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrainingSample {
    pub features: FeatureVector,
    pub label: Direction,
}

impl TrainingSample {
    pub fn new(features: FeatureVector, label: Direction) -> Self {
        Self { features, label }
    }
}
