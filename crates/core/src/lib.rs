//! Deterministic adversary decision kernel for a grid-based stealth game.
//!
//! `warden-core` decides, once per simulation tick, where each guard moves
//! and how alert it is: perception turns world state into stimulus events,
//! suspicion integrates them with time decay, a closed mode state machine
//! picks the behavior, and per-mode target selection consults the movement
//! predictor or the hotspot snapshot. All state mutation flows through
//! [`engine::TickEngine`]; the runtime and offline tools depend on the types
//! re-exported here.
pub mod cluster;
pub mod config;
pub mod engine;
pub mod env;
pub mod mode;
pub mod patrol;
pub mod predict;
pub mod reactor;
pub mod state;
pub mod suspicion;

#[cfg(test)]
mod testing;

pub use cluster::{Cluster, ClusterSet, HotspotClusterer};
pub use config::AiConfig;
pub use engine::{AdvanceError, GuardReport, TickContext, TickEngine};
pub use env::{MapDimensions, MapOracle, RngOracle, SeedRng, derive_seed};
pub use mode::{GuardMode, ModeInputs};
pub use patrol::PatrolPlanner;
pub use predict::{
    DirectionDistribution, FEATURE_LEN, FeatureVector, MovementPredictor, TrainingSample,
    UniformPredictor,
};
pub use reactor::StimulusReactor;
pub use state::{
    CoreState, Direction, Distraction, GuardId, GuardState, PatrolProgress, PlayerState,
    PositionHistory, Position, StimulusEvent, Tick,
};
pub use suspicion::SuspicionTracker;
