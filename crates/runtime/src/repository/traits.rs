//! Repository contracts for training data and model artifacts.

use warden_core::{ClusterSet, TrainingSample};

use crate::models::PredictorArtifact;

use super::RepositoryError;

pub type Result<T> = std::result::Result<T, RepositoryError>;

/// Append-only sink and batch source for training samples.
///
/// Samples are never mutated in place; the trainer reads the whole log when
/// retraining. Writers and readers live on the trainer side of the system —
/// nothing in the tick path touches a repository.
pub trait SampleRepository: Send + Sync {
    /// Appends a batch of samples to the log.
    fn append(&mut self, samples: &[TrainingSample]) -> Result<()>;

    /// Reads every sample recorded so far, oldest first.
    fn load_all(&self) -> Result<Vec<TrainingSample>>;

    /// Number of samples recorded so far.
    fn count(&self) -> Result<u64>;
}

/// Load/store for serialized predictor and cluster artifacts.
///
/// Loads return cold-start defaults when nothing has been stored yet; a
/// missing artifact is not an error.
pub trait ArtifactRepository: Send + Sync {
    fn load_predictor(&self) -> Result<PredictorArtifact>;
    fn store_predictor(&self, artifact: &PredictorArtifact) -> Result<()>;
    fn load_clusters(&self) -> Result<ClusterSet>;
    fn store_clusters(&self, clusters: &ClusterSet) -> Result<()>;
}
