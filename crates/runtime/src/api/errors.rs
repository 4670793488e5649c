//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, repositories, and the core
//! engine so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use warden_core::AdvanceError;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("trainer worker command channel closed")]
    TrainerChannelClosed,

    #[error("worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    /// Collaborator-contract violation reported by the tick engine; indicates
    /// a misconfigured level rather than a recoverable runtime state.
    #[error(transparent)]
    Advance(#[from] AdvanceError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("runtime requires a map oracle before building")]
    MissingMap,

    #[error("failed to register guard: {0}")]
    GuardSetup(&'static str),
}
