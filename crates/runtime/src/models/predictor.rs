//! Frequency-table movement predictor.
//!
//! A deliberately simple conforming implementation of
//! [`warden_core::MovementPredictor`]: it buckets the player's most recent
//! displacement and answers with the empirical distribution of moves that
//! followed that displacement in the training data. Any other trained model
//! can replace it behind the same trait.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use warden_core::{
    Direction, DirectionDistribution, FeatureVector, MovementPredictor, TrainingSample,
};

/// Displacement components are clamped to {-1, 0, 1}, giving 3x3 buckets.
const BUCKETS: usize = 9;

/// Movement predictor backed by per-bucket direction counts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyPredictor {
    counts: [[u32; 4]; BUCKETS],
}

impl FrequencyPredictor {
    /// Builds the table from a batch of observed samples.
    pub fn train(samples: &[TrainingSample]) -> Self {
        let mut model = Self::default();
        for sample in samples {
            let (dx, dy) = sample.features.last_step();
            let bucket = Self::bucket(dx, dy);
            model.counts[bucket][sample.label.index()] += 1;
        }
        model
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().flatten().all(|&count| count == 0)
    }

    fn bucket(dx: f32, dy: f32) -> usize {
        let qx = (dx.clamp(-1.0, 1.0).round() as i32 + 1) as usize;
        let qy = (dy.clamp(-1.0, 1.0).round() as i32 + 1) as usize;
        qy * 3 + qx
    }
}

impl MovementPredictor for FrequencyPredictor {
    fn predict(&self, features: &FeatureVector) -> DirectionDistribution {
        let (dx, dy) = features.last_step();
        let counts = &self.counts[Self::bucket(dx, dy)];
        let total: u32 = counts.iter().sum();
        if total == 0 {
            return DirectionDistribution::uniform();
        }
        let mut mass = [0.0f32; 4];
        for (slot, &count) in mass.iter_mut().zip(counts.iter()) {
            *slot = count as f32 / total as f32;
        }
        DirectionDistribution::new(mass)
    }
}

/// Serialized form of a trained predictor plus provenance metadata.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PredictorArtifact {
    /// When the table was trained; `None` for the cold-start default.
    pub trained_at: Option<DateTime<Utc>>,
    /// Number of samples the table was trained from.
    pub sample_count: u64,
    pub table: FrequencyPredictor,
}

impl PredictorArtifact {
    /// Cold-start artifact: an empty table that predicts uniformly.
    pub fn cold_start() -> Self {
        Self {
            trained_at: None,
            sample_count: 0,
            table: FrequencyPredictor::default(),
        }
    }

    pub fn trained(table: FrequencyPredictor, sample_count: u64) -> Self {
        Self {
            trained_at: Some(Utc::now()),
            sample_count,
            table,
        }
    }
}
