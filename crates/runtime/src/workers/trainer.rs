//! Out-of-band training worker.
//!
//! Retraining and cluster recomputation are batch operations that must never
//! stall the tick loop. This worker pulls buffered observations from the
//! simulation, updates the sample log, rebuilds both models, persists the
//! artifacts, and publishes the new generation into the registry — guards
//! pick it up wholesale at their next tick boundary.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{info, warn};
use warden_core::HotspotClusterer;

use crate::api::{Result, RuntimeError};
use crate::events::{Event, EventBus, TrainingEvent};
use crate::models::{
    FrequencyPredictor, GridBinClusterer, ModelRegistry, ModelSnapshot, PredictorArtifact,
};
use crate::repository::{ArtifactRepository, SampleRepository};

use super::simulation::{Command, Observations};

/// Commands the trainer worker processes.
pub enum TrainerCommand {
    /// Run one retrain pass. The reply is optional so scheduled requests can
    /// be fire-and-forget while explicit calls can await completion.
    Retrain {
        reply: Option<oneshot::Sender<Result<()>>>,
    },
}

/// Background task performing retraining passes.
pub struct TrainerWorker {
    command_rx: mpsc::Receiver<TrainerCommand>,
    sim_tx: mpsc::Sender<Command>,
    registry: Arc<ModelRegistry>,
    bus: EventBus,
    samples: Box<dyn SampleRepository>,
    artifacts: Box<dyn ArtifactRepository>,
    cluster_count: usize,
    bin_size: u32,
}

impl TrainerWorker {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        command_rx: mpsc::Receiver<TrainerCommand>,
        sim_tx: mpsc::Sender<Command>,
        registry: Arc<ModelRegistry>,
        bus: EventBus,
        samples: Box<dyn SampleRepository>,
        artifacts: Box<dyn ArtifactRepository>,
        cluster_count: usize,
        bin_size: u32,
    ) -> Self {
        Self {
            command_rx,
            sim_tx,
            registry,
            bus,
            samples,
            artifacts,
            cluster_count,
            bin_size,
        }
    }

    pub async fn run(mut self) {
        while let Some(command) = self.command_rx.recv().await {
            match command {
                TrainerCommand::Retrain { reply } => {
                    let result = self.retrain().await;
                    if let Err(error) = &result {
                        warn!(%error, "retrain pass failed");
                    }
                    if let Some(reply) = reply {
                        let _ = reply.send(result);
                    }
                }
            }
        }
    }

    async fn retrain(&mut self) -> Result<()> {
        let observations = self.take_observations().await?;

        if !observations.samples.is_empty() {
            self.samples.append(&observations.samples)?;
            self.bus.publish(Event::Training(TrainingEvent::SamplesLogged {
                count: observations.samples.len() as u64,
                total: self.samples.count()?,
            }));
        }

        let all_samples = self.samples.load_all()?;
        let table = FrequencyPredictor::train(&all_samples);
        self.artifacts
            .store_predictor(&PredictorArtifact::trained(
                table.clone(),
                all_samples.len() as u64,
            ))?;

        let clusterer =
            GridBinClusterer::new(self.bin_size, self.cluster_count).with_stamp(observations.clock);
        let clusters = clusterer.recompute(&observations.visits);
        self.artifacts.store_clusters(&clusters)?;

        let cluster_count = clusters.len();
        self.registry.publish(ModelSnapshot {
            predictor: Arc::new(table),
            clusters: Arc::new(clusters),
        });

        info!(
            samples = all_samples.len(),
            clusters = cluster_count,
            tick = %observations.clock,
            "published retrained models"
        );
        self.bus.publish(Event::Training(TrainingEvent::ModelSwapped {
            tick: observations.clock,
            sample_count: all_samples.len() as u64,
            cluster_count,
        }));

        Ok(())
    }

    async fn take_observations(&self) -> Result<Observations> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sim_tx
            .send(Command::TakeObservations { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }
}
