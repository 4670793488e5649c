//! Runtime orchestration for the adversary core.
//!
//! This crate wires the deterministic `warden-core` kernel into a running
//! system: a simulation worker owns the authoritative state and processes
//! ticks, a trainer worker retrains the movement predictor and recomputes
//! hotspot clusters out of band, repositories persist training samples and
//! model artifacts, and a topic-based event bus carries one-way telemetry.
//! Consumers embed [`Runtime`] and drive it through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based telemetry bus
//! - [`models`] holds conforming predictor/clusterer implementations and the
//!   swap registry
//! - [`oracle`] and [`repository`] provide collaborator adapters
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod models;
pub mod oracle;
pub mod repository;
pub mod runtime;

mod workers;

pub use api::{RepositoryError, Result, RuntimeError, RuntimeHandle};
pub use events::{Event, EventBus, ModeChangedEvent, TelemetryEvent, Topic, TrainingEvent};
pub use models::{
    FrequencyPredictor, GridBinClusterer, ModelRegistry, ModelSnapshot, PredictorArtifact,
};
pub use oracle::{GridMap, MapError};
pub use repository::{
    ArtifactRepository, FileArtifactStore, FileSampleLog, InMemoryArtifactStore, InMemorySampleLog,
    SampleRepository,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
