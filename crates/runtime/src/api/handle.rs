//! Cloneable façade over the runtime's workers.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::trace;

use warden_core::{CoreState, Distraction, GuardReport, PlayerState};

use crate::events::{Event, EventBus, Topic};
use crate::workers::{Command, TrainerCommand};

use super::errors::{Result, RuntimeError};

/// Client-facing handle: the tick entry point plus state queries, retrain
/// requests, and event subscriptions. Cheap to clone and share across tasks.
#[derive(Clone)]
pub struct RuntimeHandle {
    sim_tx: mpsc::Sender<Command>,
    trainer_tx: mpsc::Sender<TrainerCommand>,
    bus: EventBus,
    recompute_interval: u64,
    ticks: Arc<AtomicU64>,
}

impl RuntimeHandle {
    pub(crate) fn new(
        sim_tx: mpsc::Sender<Command>,
        trainer_tx: mpsc::Sender<TrainerCommand>,
        bus: EventBus,
        recompute_interval: u64,
    ) -> Self {
        Self {
            sim_tx,
            trainer_tx,
            bus,
            recompute_interval,
            ticks: Arc::new(AtomicU64::new(0)),
        }
    }

    /// The sole externally invoked operation per simulation step: feeds the
    /// current player snapshot and any distraction actions to the core and
    /// returns each guard's new position and mode.
    ///
    /// Every `recompute_interval` ticks a retrain request is queued for the
    /// trainer; the request is fire-and-forget and never blocks the tick.
    pub async fn advance(
        &self,
        player: PlayerState,
        distractions: Vec<Distraction>,
    ) -> Result<Vec<GuardReport>> {
        eprintln!("ADVDBG: advance entered");
        let (reply_tx, reply_rx) = oneshot::channel();
        eprintln!("ADVDBG: sending command");
        self.sim_tx
            .send(Command::Advance {
                player,
                distractions,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;
        eprintln!("ADVDBG: command sent, awaiting reply");
        let reports = reply_rx
            .await
            .map_err(RuntimeError::ReplyChannelClosed)??;

        let ticks = self.ticks.fetch_add(1, Ordering::Relaxed) + 1;
        if self.recompute_interval > 0
            && ticks % self.recompute_interval == 0
            && self
                .trainer_tx
                .try_send(TrainerCommand::Retrain { reply: None })
                .is_err()
        {
            // A pass is already queued or running; skipping one scheduled
            // retrain is harmless.
            trace!("scheduled retrain skipped, trainer busy");
        }

        Ok(reports)
    }

    /// Read-only snapshot of the core state.
    pub async fn query_state(&self) -> Result<CoreState> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sim_tx
            .send(Command::QueryState { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Runs a retrain pass and waits for the new models to be published.
    pub async fn retrain_now(&self) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.trainer_tx
            .send(TrainerCommand::Retrain {
                reply: Some(reply_tx),
            })
            .await
            .map_err(|_| RuntimeError::TrainerChannelClosed)?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Subscribes to a telemetry topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.bus.subscribe(topic)
    }
}
