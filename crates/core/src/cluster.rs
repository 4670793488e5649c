//! Hotspot cluster snapshots and the clusterer contract.

use crate::state::{Position, Tick};

/// One spatial hotspot summarizing historically frequent player cells.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cluster {
    pub centroid: Position,
    /// Visit count attributed to this hotspot; higher weight means a more
    /// attractive patrol target.
    pub weight: u32,
    pub last_visit: Tick,
}

impl Cluster {
    pub fn new(centroid: Position, weight: u32, last_visit: Tick) -> Self {
        Self {
            centroid,
            weight,
            last_visit,
        }
    }
}

/// Complete, internally consistent set of hotspots.
///
/// A set is built once per recompute and replaced wholesale — consumers hold
/// a snapshot for the duration of a tick and never observe partial updates.
/// Clusters are kept sorted by descending weight (centroid as tie-break), so
/// claim resolution is a plain in-order scan.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClusterSet {
    clusters: Vec<Cluster>,
}

impl ClusterSet {
    /// Builds a snapshot, normalizing order for deterministic consumption.
    pub fn new(mut clusters: Vec<Cluster>) -> Self {
        clusters.sort_by(|a, b| {
            b.weight
                .cmp(&a.weight)
                .then_with(|| a.centroid.cmp(&b.centroid))
        });
        Self { clusters }
    }

    /// The cold-start snapshot: no hotspots known yet.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cluster> {
        self.clusters.iter()
    }

    /// Highest-weight cluster whose centroid has not been claimed this tick.
    pub fn highest_unclaimed(&self, claimed: &[Position]) -> Option<&Cluster> {
        self.clusters
            .iter()
            .find(|cluster| !claimed.contains(&cluster.centroid))
    }
}

/// Capability contract for the unsupervised hotspot model.
///
/// `recompute` is batch-oriented: it runs on a schedule (or at level start),
/// never inside the tick path, and returns a complete replacement set capped
/// at the configured cluster count.
pub trait HotspotClusterer: Send + Sync {
    fn recompute(&self, history: &[Position]) -> ClusterSet;
}
