use crate::mode::GuardMode;

use super::{Direction, GuardId, Position};

/// Per-guard patrol bookkeeping.
///
/// `waypoint` is the cell the guard is currently walking towards in Patrol
/// mode; `route_index` tracks progress along the cold-start default route when
/// no cluster set exists yet.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatrolProgress {
    pub waypoint: Option<Position>,
    pub route_index: usize,
}

/// Mutable state owned by a single guard.
///
/// Every field is written by exactly this guard's own per-tick update; guards
/// never mutate each other. The shared predictor and cluster snapshot are not
/// stored here — they are handed to the engine per tick as read-only context.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GuardState {
    pub id: GuardId,
    pub position: Position,
    pub facing: Direction,
    pub mode: GuardMode,
    /// Current alertness, always within `[0, max_suspicion]`.
    pub suspicion: f32,
    /// Where the player was last seen or heard, if anywhere.
    pub last_known: Option<Position>,
    /// Ticks elapsed since the last stimulus targeted this guard.
    pub ticks_since_stimulus: u64,
    pub patrol: PatrolProgress,
}

impl GuardState {
    pub fn new(id: GuardId, position: Position) -> Self {
        Self {
            id,
            position,
            facing: Direction::North,
            mode: GuardMode::Patrol,
            suspicion: 0.0,
            last_known: None,
            ticks_since_stimulus: 0,
            patrol: PatrolProgress::default(),
        }
    }

    /// Applies one pathfinder step, updating facing when the step is a single
    /// cardinal move.
    pub fn apply_step(&mut self, next: Position) {
        if let Some(direction) =
            Direction::from_displacement(next.x - self.position.x, next.y - self.position.y)
        {
            self.facing = direction;
        }
        self.position = next;
    }
}
