use serde::{Deserialize, Serialize};

use warden_core::{GuardId, GuardMode, Position, Tick};

/// Per-tick guard readout for display and analytics consumers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TelemetryEvent {
    pub tick: Tick,
    pub guard: GuardId,
    pub position: Position,
    pub mode: GuardMode,
    pub suspicion: f32,
}

/// A guard changed behavioral mode this tick.
///
/// Published for difficulty scaling and analytics; consumers must treat it
/// as informational — mode changes are never errors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ModeChangedEvent {
    pub tick: Tick,
    pub guard: GuardId,
    pub from: GuardMode,
    pub to: GuardMode,
}

/// Progress of the out-of-band training pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TrainingEvent {
    /// New samples were appended to the log.
    SamplesLogged { count: u64, total: u64 },
    /// A retrained predictor and cluster set were published; guards see them
    /// from the next tick on.
    ModelSwapped {
        tick: Tick,
        sample_count: u64,
        cluster_count: usize,
    },
}
