//! Background tasks internal to the runtime crate.
mod simulation;
mod trainer;

pub(crate) use simulation::{Command, Observations, SimulationWorker};
pub(crate) use trainer::{TrainerCommand, TrainerWorker};
