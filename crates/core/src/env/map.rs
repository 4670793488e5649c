use crate::state::Position;

/// Read-only map collaborator.
///
/// The adversary core never owns the grid; it issues walkability, visibility,
/// and pathfinding queries against whatever the embedding game provides.
/// Implementations must answer consistently within a tick.
pub trait MapOracle: Send + Sync {
    fn dimensions(&self) -> MapDimensions;

    /// True if the cell is inside the map and not blocked.
    fn is_walkable(&self, cell: Position) -> bool;

    /// Straight-line visibility between two cells. Endpoints do not block
    /// themselves; any obstacle strictly between them does.
    fn line_of_sight(&self, from: Position, to: Position) -> bool;

    /// One step along a shortest path from `from` towards `to`.
    ///
    /// Returns `None` when the target is unreachable or already reached; the
    /// engine treats that as "hold position" for the tick.
    fn next_step(&self, from: Position, to: Position) -> Option<Position>;

    fn contains(&self, cell: Position) -> bool {
        self.dimensions().contains(cell)
    }
}

/// Width and height of the grid in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, cell: Position) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && cell.x < self.width as i32
            && cell.y < self.height as i32
    }

    /// Clamps a cell onto the map, used to sanitize model output.
    pub fn clamp(&self, cell: Position) -> Position {
        Position::new(
            cell.x.clamp(0, self.width as i32 - 1),
            cell.y.clamp(0, self.height as i32 - 1),
        )
    }
}
