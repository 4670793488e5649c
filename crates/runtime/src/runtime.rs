//! High-level runtime orchestrator.
//!
//! The runtime owns the background workers, wires up command channels and the
//! event bus, and exposes a builder-based API. Construction loads any
//! persisted model artifacts so a restarted session resumes with its trained
//! predictor and hotspots instead of the cold-start defaults.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use warden_core::{AiConfig, CoreState, GuardState, MapOracle, MovementPredictor, UniformPredictor};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::models::{DEFAULT_BIN_SIZE, ModelRegistry, ModelSnapshot};
use crate::repository::{
    ArtifactRepository, InMemoryArtifactStore, InMemorySampleLog, SampleRepository,
};
use crate::workers::{SimulationWorker, TrainerWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub ai: AiConfig,
    pub event_capacity: usize,
    pub command_capacity: usize,
    /// Bin edge length used by the grid clusterer.
    pub cluster_bin_size: u32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            ai: AiConfig::default(),
            event_capacity: 128,
            command_capacity: 32,
            cluster_bin_size: DEFAULT_BIN_SIZE,
        }
    }
}

/// Owns the workers and hands out cloneable [`RuntimeHandle`]s.
pub struct Runtime {
    handle: RuntimeHandle,
    sim_worker: JoinHandle<()>,
    trainer_worker: JoinHandle<()>,
}

impl Runtime {
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Shuts the workers down by closing their command channels and waits
    /// for both to drain.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);
        self.sim_worker.await.map_err(RuntimeError::WorkerJoin)?;
        self.trainer_worker.await.map_err(RuntimeError::WorkerJoin)?;
        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    seed: u64,
    map: Option<Arc<dyn MapOracle>>,
    guards: Vec<GuardState>,
    state: Option<CoreState>,
    samples: Option<Box<dyn SampleRepository>>,
    artifacts: Option<Box<dyn ArtifactRepository>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            seed: 0,
            map: None,
            guards: Vec::new(),
            state: None,
            samples: None,
            artifacts: None,
        }
    }

    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn ai_config(mut self, ai: AiConfig) -> Self {
        self.config.ai = ai;
        self
    }

    /// Base seed for all deterministic random draws.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn map(mut self, map: impl MapOracle + 'static) -> Self {
        self.map = Some(Arc::new(map));
        self
    }

    pub fn shared_map(mut self, map: Arc<dyn MapOracle>) -> Self {
        self.map = Some(map);
        self
    }

    /// Registers a guard to exist at level load.
    pub fn guard(mut self, guard: GuardState) -> Self {
        self.guards.push(guard);
        self
    }

    /// Starts from a prebuilt state instead of seed + guards.
    pub fn state(mut self, state: CoreState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn sample_repository(mut self, repository: impl SampleRepository + 'static) -> Self {
        self.samples = Some(Box::new(repository));
        self
    }

    pub fn artifact_repository(mut self, repository: impl ArtifactRepository + 'static) -> Self {
        self.artifacts = Some(Box::new(repository));
        self
    }

    /// Wires channels, loads persisted artifacts, and spawns the workers.
    /// Must be called within a tokio runtime.
    pub fn build(self) -> Result<Runtime> {
        let map = self.map.ok_or(RuntimeError::MissingMap)?;

        let mut state = self.state.unwrap_or_else(|| CoreState::new(self.seed));
        for guard in self.guards {
            state.add_guard(guard).map_err(RuntimeError::GuardSetup)?;
        }

        let samples: Box<dyn SampleRepository> = self
            .samples
            .unwrap_or_else(|| Box::new(InMemorySampleLog::new()));
        let artifacts: Box<dyn ArtifactRepository> = self
            .artifacts
            .unwrap_or_else(|| Box::new(InMemoryArtifactStore::new()));

        // Resume from stored artifacts when they exist; otherwise the
        // registry starts with the documented cold-start defaults.
        let stored = artifacts.load_predictor()?;
        let predictor: Arc<dyn MovementPredictor> = if stored.table.is_empty() {
            Arc::new(UniformPredictor)
        } else {
            Arc::new(stored.table)
        };
        let clusters = Arc::new(artifacts.load_clusters()?);
        let registry = Arc::new(ModelRegistry::new(ModelSnapshot { predictor, clusters }));

        let bus = EventBus::with_capacity(self.config.event_capacity);
        let (sim_tx, sim_rx) = mpsc::channel(self.config.command_capacity);
        let (trainer_tx, trainer_rx) = mpsc::channel(self.config.command_capacity);

        let sim_worker = SimulationWorker::new(
            state,
            map,
            self.config.ai.clone(),
            Arc::clone(&registry),
            bus.clone(),
            sim_rx,
        );
        let trainer_worker = TrainerWorker::new(
            trainer_rx,
            sim_tx.clone(),
            registry,
            bus.clone(),
            samples,
            artifacts,
            self.config.ai.cluster_count,
            self.config.cluster_bin_size,
        );

        let handle = RuntimeHandle::new(
            sim_tx,
            trainer_tx,
            bus,
            self.config.ai.recompute_interval,
        );

        eprintln!("BUILDDBG: about to spawn workers");
        let r = Ok(Runtime {
            handle,
            sim_worker: tokio::spawn(sim_worker.run()),
            trainer_worker: tokio::spawn(trainer_worker.run()),
        });
        eprintln!("BUILDDBG: spawned workers");
        r
    }
}
