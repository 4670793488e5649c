//! Coarse-grid hotspot clusterer.
//!
//! Conforming implementation of [`warden_core::HotspotClusterer`]: player
//! cells are binned into fixed-size squares, the densest bins become
//! clusters, and each centroid is the visit-weighted mean of its bin. Fully
//! deterministic — identical history always produces an identical snapshot,
//! which is what regression tests pin against.

use std::collections::BTreeMap;

use warden_core::{Cluster, ClusterSet, HotspotClusterer, Position, Tick};

/// Default bin edge length in cells.
pub const DEFAULT_BIN_SIZE: u32 = 4;

#[derive(Clone, Debug)]
pub struct GridBinClusterer {
    bin_size: u32,
    max_clusters: usize,
    /// Recency stamp attached to every produced cluster; the trainer sets
    /// this to the simulation clock at recompute time.
    stamp: Tick,
}

impl GridBinClusterer {
    pub fn new(bin_size: u32, max_clusters: usize) -> Self {
        Self {
            bin_size: bin_size.max(1),
            max_clusters,
            stamp: Tick::ZERO,
        }
    }

    pub fn with_stamp(mut self, stamp: Tick) -> Self {
        self.stamp = stamp;
        self
    }

    fn bin_of(&self, cell: Position) -> (i32, i32) {
        let size = self.bin_size as i32;
        (cell.x.div_euclid(size), cell.y.div_euclid(size))
    }
}

impl HotspotClusterer for GridBinClusterer {
    fn recompute(&self, history: &[Position]) -> ClusterSet {
        if history.is_empty() || self.max_clusters == 0 {
            return ClusterSet::empty();
        }

        // BTreeMap keeps bin iteration ordered, so equal-weight bins resolve
        // the same way on every recompute.
        let mut bins: BTreeMap<(i32, i32), (u32, i64, i64)> = BTreeMap::new();
        for &cell in history {
            let entry = bins.entry(self.bin_of(cell)).or_insert((0, 0, 0));
            entry.0 += 1;
            entry.1 += cell.x as i64;
            entry.2 += cell.y as i64;
        }

        let mut ranked: Vec<(u32, (i32, i32), i64, i64)> = bins
            .into_iter()
            .map(|(bin, (count, sum_x, sum_y))| (count, bin, sum_x, sum_y))
            .collect();
        ranked.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));

        let clusters = ranked
            .into_iter()
            .take(self.max_clusters)
            .map(|(count, _, sum_x, sum_y)| {
                let centroid = Position::new(
                    (sum_x / count as i64) as i32,
                    (sum_y / count as i64) as i32,
                );
                Cluster::new(centroid, count, self.stamp)
            })
            .collect();

        ClusterSet::new(clusters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dense_history() -> Vec<Position> {
        let mut history = Vec::new();
        // Heavy traffic around (2, 2), lighter around (10, 10).
        for _ in 0..6 {
            history.push(Position::new(2, 2));
            history.push(Position::new(3, 2));
        }
        for _ in 0..3 {
            history.push(Position::new(10, 10));
        }
        history.push(Position::new(17, 3));
        history
    }

    #[test]
    fn densest_bin_becomes_the_heaviest_cluster() {
        let clusterer = GridBinClusterer::new(DEFAULT_BIN_SIZE, 4);
        let set = clusterer.recompute(&dense_history());

        let top = set.iter().next().unwrap();
        assert_eq!(top.weight, 12);
        assert_eq!(top.centroid, Position::new(2, 2));
    }

    #[test]
    fn cluster_count_is_capped() {
        let clusterer = GridBinClusterer::new(DEFAULT_BIN_SIZE, 2);
        let set = clusterer.recompute(&dense_history());
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn empty_history_yields_the_cold_start_set() {
        let clusterer = GridBinClusterer::new(DEFAULT_BIN_SIZE, 4);
        assert!(clusterer.recompute(&[]).is_empty());
    }

    #[test]
    fn recompute_is_deterministic() {
        let history = dense_history();
        let clusterer = GridBinClusterer::new(DEFAULT_BIN_SIZE, 4).with_stamp(Tick(9));
        assert_eq!(clusterer.recompute(&history), clusterer.recompute(&history));
    }

    #[test]
    fn equal_weight_bins_break_ties_by_bin_order() {
        // Two bins with identical counts; the lower-ordered bin must win the
        // first slot on every run.
        let history = vec![
            Position::new(1, 1),
            Position::new(1, 1),
            Position::new(9, 9),
            Position::new(9, 9),
        ];
        let clusterer = GridBinClusterer::new(DEFAULT_BIN_SIZE, 1);
        let set = clusterer.recompute(&history);
        assert_eq!(set.iter().next().unwrap().centroid, Position::new(1, 1));
    }
}
