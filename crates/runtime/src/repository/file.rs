//! File-backed repositories.
//!
//! The sample log uses length-prefixed bincode frames (`[u32 len][payload]`)
//! so it can be appended to cheaply and replayed sequentially. Model
//! artifacts are stored as RON, one file per artifact, human-inspectable for
//! tuning sessions.

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use warden_core::{ClusterSet, TrainingSample};

use crate::models::PredictorArtifact;

use super::error::RepositoryError;
use super::traits::{ArtifactRepository, Result, SampleRepository};

const PREDICTOR_FILE: &str = "predictor.ron";
const CLUSTERS_FILE: &str = "clusters.ron";

/// Append-only sample log on disk.
pub struct FileSampleLog {
    path: PathBuf,
    writer: File,
    count: u64,
}

impl FileSampleLog {
    /// Opens (or creates) the log at `path`, scanning it once to recover the
    /// sample count.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| RepositoryError::io(parent, e))?;
        }
        let writer = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| RepositoryError::io(&path, e))?;

        let count = Self::decode_all(&path)?.len() as u64;
        Ok(Self {
            path,
            writer,
            count,
        })
    }

    fn decode_all(path: &Path) -> Result<Vec<TrainingSample>> {
        let mut bytes = Vec::new();
        File::open(path)
            .and_then(|mut file| file.read_to_end(&mut bytes))
            .map_err(|e| RepositoryError::io(path, e))?;

        let mut samples = Vec::new();
        let mut offset = 0usize;
        while offset + 4 <= bytes.len() {
            let len = u32::from_le_bytes([
                bytes[offset],
                bytes[offset + 1],
                bytes[offset + 2],
                bytes[offset + 3],
            ]) as usize;
            let start = offset + 4;
            let end = start + len;
            if end > bytes.len() {
                // Truncated tail (e.g. interrupted write): ignore it, the
                // next append will overwrite nothing since we only ever
                // append.
                break;
            }
            let sample = bincode::deserialize(&bytes[start..end]).map_err(|source| {
                RepositoryError::SampleDecode {
                    offset: offset as u64,
                    source,
                }
            })?;
            samples.push(sample);
            offset = end;
        }
        Ok(samples)
    }
}

impl SampleRepository for FileSampleLog {
    fn append(&mut self, samples: &[TrainingSample]) -> Result<()> {
        for sample in samples {
            let payload = bincode::serialize(sample).map_err(RepositoryError::SampleEncode)?;
            let frame_len = (payload.len() as u32).to_le_bytes();
            self.writer
                .write_all(&frame_len)
                .and_then(|_| self.writer.write_all(&payload))
                .map_err(|e| RepositoryError::io(&self.path, e))?;
        }
        self.writer
            .flush()
            .map_err(|e| RepositoryError::io(&self.path, e))?;
        self.count += samples.len() as u64;
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<TrainingSample>> {
        Self::decode_all(&self.path)
    }

    fn count(&self) -> Result<u64> {
        Ok(self.count)
    }
}

/// RON artifact store rooted at a directory.
pub struct FileArtifactStore {
    root: PathBuf,
}

impl FileArtifactStore {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| RepositoryError::io(&root, e))?;
        Ok(Self { root })
    }

    fn load_ron<T>(&self, file: &str) -> Result<Option<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        let path = self.root.join(file);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).map_err(|e| RepositoryError::io(&path, e))?;
        let value = ron::de::from_str(&content).map_err(|e| RepositoryError::ArtifactDecode {
            path: path.clone(),
            message: e.to_string(),
        })?;
        Ok(Some(value))
    }

    fn store_ron<T>(&self, file: &str, value: &T) -> Result<()>
    where
        T: serde::Serialize,
    {
        let path = self.root.join(file);
        let content = ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::default())
            .map_err(|e| RepositoryError::ArtifactEncode(e.to_string()))?;
        fs::write(&path, content).map_err(|e| RepositoryError::io(&path, e))
    }
}

impl ArtifactRepository for FileArtifactStore {
    fn load_predictor(&self) -> Result<PredictorArtifact> {
        Ok(self
            .load_ron(PREDICTOR_FILE)?
            .unwrap_or_else(PredictorArtifact::cold_start))
    }

    fn store_predictor(&self, artifact: &PredictorArtifact) -> Result<()> {
        self.store_ron(PREDICTOR_FILE, artifact)
    }

    fn load_clusters(&self) -> Result<ClusterSet> {
        Ok(self.load_ron(CLUSTERS_FILE)?.unwrap_or_else(ClusterSet::empty))
    }

    fn store_clusters(&self, clusters: &ClusterSet) -> Result<()> {
        self.store_ron(CLUSTERS_FILE, clusters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_core::{Cluster, Direction, FeatureVector, Position, Tick};

    fn sample(label: Direction) -> TrainingSample {
        TrainingSample::new(FeatureVector([0.0, -1.0, 1.0, 0.0, 0.0, 1.0]), label)
    }

    #[test]
    fn sample_log_round_trips_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("samples.log");

        {
            let mut log = FileSampleLog::open(&path).unwrap();
            log.append(&[sample(Direction::North), sample(Direction::East)])
                .unwrap();
        }

        let mut log = FileSampleLog::open(&path).unwrap();
        assert_eq!(log.count().unwrap(), 2);
        log.append(&[sample(Direction::West)]).unwrap();

        let samples = log.load_all().unwrap();
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0].label, Direction::North);
        assert_eq!(samples[2].label, Direction::West);
    }

    #[test]
    fn missing_artifacts_load_cold_start_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileArtifactStore::open(dir.path()).unwrap();

        let predictor = store.load_predictor().unwrap();
        assert!(predictor.trained_at.is_none());
        assert!(predictor.table.is_empty());
        assert!(store.load_clusters().unwrap().is_empty());
    }

    #[test]
    fn cluster_artifact_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileArtifactStore::open(dir.path()).unwrap();

        let clusters = ClusterSet::new(vec![
            Cluster::new(Position::new(4, 4), 9, Tick(12)),
            Cluster::new(Position::new(1, 7), 2, Tick(3)),
        ]);
        store.store_clusters(&clusters).unwrap();
        assert_eq!(store.load_clusters().unwrap(), clusters);
    }
}
