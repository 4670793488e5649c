//! Atomic publication point for trained models.

use std::sync::{Arc, RwLock};

use warden_core::{ClusterSet, MovementPredictor, UniformPredictor};

/// The model generation visible to the simulation at one tick boundary.
///
/// Cloning is two `Arc` bumps; the simulation worker takes one snapshot at
/// the top of each tick so every guard in that tick sees the same models.
#[derive(Clone)]
pub struct ModelSnapshot {
    pub predictor: Arc<dyn MovementPredictor>,
    pub clusters: Arc<ClusterSet>,
}

impl ModelSnapshot {
    /// Cold-start snapshot: uniform predictor, no hotspots.
    pub fn cold_start() -> Self {
        Self {
            predictor: Arc::new(UniformPredictor),
            clusters: Arc::new(ClusterSet::empty()),
        }
    }
}

/// Shared registry the trainer publishes into and the simulation reads from.
///
/// Writers replace whole `Arc`s, never mutate through them, so a reader
/// either sees the previous generation or the new one — half-updated models
/// cannot be observed.
pub struct ModelRegistry {
    current: RwLock<ModelSnapshot>,
}

impl ModelRegistry {
    pub fn new(initial: ModelSnapshot) -> Self {
        Self {
            current: RwLock::new(initial),
        }
    }

    pub fn cold_start() -> Self {
        Self::new(ModelSnapshot::cold_start())
    }

    pub fn snapshot(&self) -> ModelSnapshot {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Publishes a complete replacement generation.
    pub fn publish(&self, snapshot: ModelSnapshot) {
        *self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = snapshot;
    }

    pub fn publish_predictor(&self, predictor: Arc<dyn MovementPredictor>) {
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.predictor = predictor;
    }

    pub fn publish_clusters(&self, clusters: Arc<ClusterSet>) {
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.clusters = clusters;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_core::{Cluster, Position, Tick};

    #[test]
    fn published_generation_replaces_the_snapshot_wholesale() {
        let registry = ModelRegistry::cold_start();
        assert!(registry.snapshot().clusters.is_empty());

        let clusters = Arc::new(ClusterSet::new(vec![Cluster::new(
            Position::new(3, 3),
            5,
            Tick(1),
        )]));
        registry.publish_clusters(Arc::clone(&clusters));

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.clusters.len(), 1);
        // Earlier snapshots keep the generation they were taken from.
        assert!(Arc::ptr_eq(&snapshot.clusters, &clusters));
    }
}
