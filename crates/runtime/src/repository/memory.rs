//! In-memory repositories for tests and ephemeral sessions.

use std::sync::{Arc, Mutex};

use warden_core::{ClusterSet, TrainingSample};

use crate::models::PredictorArtifact;

use super::traits::{ArtifactRepository, Result, SampleRepository};

/// Sample log kept entirely in memory.
///
/// Cloning shares the underlying log, which lets a test hold a handle to the
/// same storage it hands to the trainer.
#[derive(Clone, Default)]
pub struct InMemorySampleLog {
    samples: Arc<Mutex<Vec<TrainingSample>>>,
}

impl InMemorySampleLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SampleRepository for InMemorySampleLog {
    fn append(&mut self, samples: &[TrainingSample]) -> Result<()> {
        self.samples
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .extend_from_slice(samples);
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<TrainingSample>> {
        Ok(self
            .samples
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone())
    }

    fn count(&self) -> Result<u64> {
        Ok(self
            .samples
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len() as u64)
    }
}

/// Artifact store kept entirely in memory.
#[derive(Clone, Default)]
pub struct InMemoryArtifactStore {
    predictor: Arc<Mutex<Option<PredictorArtifact>>>,
    clusters: Arc<Mutex<Option<ClusterSet>>>,
}

impl InMemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ArtifactRepository for InMemoryArtifactStore {
    fn load_predictor(&self) -> Result<PredictorArtifact> {
        Ok(self
            .predictor
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
            .unwrap_or_else(PredictorArtifact::cold_start))
    }

    fn store_predictor(&self, artifact: &PredictorArtifact) -> Result<()> {
        *self
            .predictor
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(artifact.clone());
        Ok(())
    }

    fn load_clusters(&self) -> Result<ClusterSet> {
        Ok(self
            .clusters
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
            .unwrap_or_else(ClusterSet::empty))
    }

    fn store_clusters(&self, clusters: &ClusterSet) -> Result<()> {
        *self
            .clusters
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(clusters.clone());
        Ok(())
    }
}
