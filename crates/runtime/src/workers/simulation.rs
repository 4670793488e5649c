//! Simulation worker that owns the authoritative [`CoreState`].
//!
//! Receives commands from [`crate::RuntimeHandle`], drives ticks through
//! [`warden_core::TickEngine`], and publishes telemetry. Training samples
//! derived from sightings are buffered in memory here and drained by the
//! trainer, so the tick path never touches a repository.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use warden_core::{
    AiConfig, CoreState, Direction, Distraction, FeatureVector, GuardReport, MapOracle,
    PlayerState, SeedRng, Tick, TickContext, TickEngine, TrainingSample,
};

use crate::api::Result;
use crate::events::{Event, EventBus, ModeChangedEvent, TelemetryEvent};
use crate::models::ModelRegistry;

/// Commands the simulation worker processes.
pub enum Command {
    /// Advance the simulation by one tick.
    Advance {
        player: PlayerState,
        distractions: Vec<Distraction>,
        reply: oneshot::Sender<Result<Vec<GuardReport>>>,
    },
    /// Read-only snapshot of the core state.
    QueryState { reply: oneshot::Sender<CoreState> },
    /// Drain buffered training samples and snapshot the visit log; used by
    /// the trainer when it retrains out of band.
    TakeObservations {
        reply: oneshot::Sender<Observations>,
    },
}

/// Training inputs handed from the simulation to the trainer.
pub struct Observations {
    pub samples: Vec<TrainingSample>,
    pub visits: Vec<warden_core::Position>,
    pub clock: Tick,
}

/// Background task that processes simulation commands.
pub struct SimulationWorker {
    state: CoreState,
    map: Arc<dyn MapOracle>,
    rng: SeedRng,
    config: AiConfig,
    registry: Arc<ModelRegistry>,
    bus: EventBus,
    command_rx: mpsc::Receiver<Command>,
    pending_samples: Vec<TrainingSample>,
}

impl SimulationWorker {
    pub fn new(
        state: CoreState,
        map: Arc<dyn MapOracle>,
        config: AiConfig,
        registry: Arc<ModelRegistry>,
        bus: EventBus,
        command_rx: mpsc::Receiver<Command>,
    ) -> Self {
        Self {
            state,
            map,
            rng: SeedRng,
            config,
            registry,
            bus,
            command_rx,
            pending_samples: Vec::new(),
        }
    }

    /// Main worker loop; ends when every command sender is dropped.
    pub async fn run(mut self) {
        eprintln!("SIMDBG: run started");
        while let Some(command) = self.command_rx.recv().await {
            eprintln!("SIMDBG: got command");
            self.handle_command(command);
            eprintln!("SIMDBG: handled command");
        }
        eprintln!("SIMDBG: run ended");
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Advance {
                player,
                distractions,
                reply,
            } => {
                let result = self.advance(&player, &distractions);
                let _ = reply.send(result);
            }
            Command::QueryState { reply } => {
                let _ = reply.send(self.state.clone());
            }
            Command::TakeObservations { reply } => {
                let observations = Observations {
                    samples: std::mem::take(&mut self.pending_samples),
                    visits: self.state.visit_log().to_vec(),
                    clock: self.state.clock,
                };
                let _ = reply.send(observations);
            }
        }
    }

    fn advance(
        &mut self,
        player: &PlayerState,
        distractions: &[Distraction],
    ) -> Result<Vec<GuardReport>> {
        // One model snapshot per tick: every guard sees the same generation,
        // and a concurrent swap only becomes visible at the next boundary.
        let models = self.registry.snapshot();

        let mut engine = TickEngine::new(&mut self.state);
        let reports = engine
            .advance(
                player,
                distractions,
                TickContext {
                    map: self.map.as_ref(),
                    rng: &self.rng,
                    predictor: models.predictor.as_ref(),
                    clusters: models.clusters.as_ref(),
                    config: &self.config,
                },
            )
            .inspect_err(|error| warn!(%error, "tick rejected"))?;

        let tick = self.state.clock;
        let mut seen = false;
        for report in &reports {
            seen |= report.saw_player;
            self.bus.publish(Event::Telemetry(TelemetryEvent {
                tick,
                guard: report.guard,
                position: report.position,
                mode: report.mode,
                suspicion: report.suspicion,
            }));
            if let Some((from, to)) = report.transition {
                debug!(guard = %report.guard, %from, %to, "mode transition");
                self.bus.publish(Event::Mode(ModeChangedEvent {
                    tick,
                    guard: report.guard,
                    from,
                    to,
                }));
            }
        }

        if seen && let Some(sample) = derive_sample(player) {
            self.pending_samples.push(sample);
        }

        Ok(reports)
    }
}

/// Builds a training sample from the player history: the window before the
/// latest move is the context, the latest move is the label. Requires the
/// history to be deep enough and the last move to be a single cardinal step.
fn derive_sample(player: &PlayerState) -> Option<TrainingSample> {
    let history = &player.history;
    let len = history.len();
    if len < AiConfig::FEATURE_STEPS + 2 {
        return None;
    }

    let features = FeatureVector::from_history(&history[..len - 1])?;
    let prev = history[len - 2];
    let last = history[len - 1];
    let label = Direction::from_displacement(last.x - prev.x, last.y - prev.y)?;
    Some(TrainingSample::new(features, label))
}
