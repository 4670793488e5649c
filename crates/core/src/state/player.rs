use arrayvec::ArrayVec;

use crate::config::AiConfig;

use super::{Direction, Position, Tick};

/// Bounded trail of recent player cells, oldest first.
pub type PositionHistory = ArrayVec<Position, { AiConfig::MAX_HISTORY }>;

/// Snapshot of the player as seen by the adversary core.
///
/// Produced once per tick by the input collaborator and treated as read-only
/// here. The history window is what feature extraction and training sample
/// logging consume.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub position: Position,
    pub facing: Direction,
    pub history: PositionHistory,
    pub tick: Tick,
}

impl PlayerState {
    pub fn new(position: Position) -> Self {
        let mut history = PositionHistory::new();
        history.push(position);
        Self {
            position,
            facing: Direction::North,
            history,
            tick: Tick::ZERO,
        }
    }

    /// Advances the snapshot to a new cell, evicting the oldest history entry
    /// once the window is full.
    pub fn advance_to(&mut self, position: Position, tick: Tick) {
        if let Some(&last) = self.history.last()
            && let Some(direction) =
                Direction::from_displacement(position.x - last.x, position.y - last.y)
        {
            self.facing = direction;
        }
        if self.history.is_full() {
            self.history.remove(0);
        }
        self.history.push(position);
        self.position = position;
        self.tick = tick;
    }
}

/// Player-triggered noise action (a thrown object landing on a cell).
///
/// Raised by the input collaborator; the stimulus reactor turns it into
/// per-guard noise events for every guard within audible range.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Distraction {
    pub cell: Position,
    pub intensity: f32,
}

impl Distraction {
    pub fn new(cell: Position, intensity: f32) -> Self {
        Self { cell, intensity }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_window_evicts_oldest() {
        let mut player = PlayerState::new(Position::new(0, 0));
        for i in 1..=(AiConfig::MAX_HISTORY as i32 + 3) {
            player.advance_to(Position::new(i, 0), Tick(i as u64));
        }

        assert_eq!(player.history.len(), AiConfig::MAX_HISTORY);
        let oldest = player.history.first().copied().unwrap();
        assert_eq!(oldest, Position::new(4, 0));
        assert_eq!(player.position, Position::new(AiConfig::MAX_HISTORY as i32 + 3, 0));
    }

    #[test]
    fn facing_follows_last_step() {
        let mut player = PlayerState::new(Position::new(5, 5));
        player.advance_to(Position::new(5, 6), Tick(1));
        assert_eq!(player.facing, Direction::South);
        player.advance_to(Position::new(4, 6), Tick(2));
        assert_eq!(player.facing, Direction::West);
        // Teleports keep the previous facing.
        player.advance_to(Position::new(9, 9), Tick(3));
        assert_eq!(player.facing, Direction::West);
    }
}
