use crate::state::{GuardId, Position};

/// Reportable failures of an `advance` call.
///
/// These indicate collaborator-contract violations (a misconfigured level or
/// a broken map implementation), not recoverable runtime states. Transient
/// signal problems never reach this type — they degrade to local fallbacks
/// inside the tick.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum AdvanceError {
    /// The input collaborator supplied a player cell outside the map.
    #[error("player position {0} is outside the map bounds")]
    PlayerOutOfBounds(Position),

    /// The pathfinder returned a step the map itself rejects.
    #[error("pathfinder returned unwalkable step {step} for {guard}")]
    UnwalkableStep { guard: GuardId, step: Position },

    /// The pathfinder returned a cell that is not adjacent to the guard.
    #[error("pathfinder returned non-adjacent step {step} for {guard}")]
    NonAdjacentStep { guard: GuardId, step: Position },
}
