use std::fmt;

use strum::EnumIter;

/// Unique identifier for a guard tracked by the adversary core.
///
/// Guards are always processed in ascending id order so that shared-resource
/// decisions (cluster claims, patrol assignments) replay identically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GuardId(pub u32);

impl fmt::Display for GuardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "guard#{}", self.0)
    }
}

/// Discrete grid position expressed in cell coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another cell.
    pub fn distance(self, other: Position) -> f32 {
        let dx = (self.x - other.x) as f32;
        let dy = (self.y - other.y) as f32;
        (dx * dx + dy * dy).sqrt()
    }

    /// Chebyshev distance, used for hard-detection range checks.
    pub fn chebyshev(self, other: Position) -> u32 {
        let dx = (self.x - other.x).unsigned_abs();
        let dy = (self.y - other.y).unsigned_abs();
        dx.max(dy)
    }

    /// The cell one step in the given direction.
    pub fn step(self, direction: Direction) -> Position {
        let (dx, dy) = direction.offset();
        Position::new(self.x + dx, self.y + dy)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Discrete simulation time unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Self = Self(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Cardinal movement direction on the grid.
///
/// Variant order is the canonical tie-break priority (North > East > South >
/// West). [`Direction::ALL`] and [`Direction::index`] follow the same order,
/// which keeps distribution indexing and argmax tie-breaking consistent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All directions in tie-break priority order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Grid offset for one step. North decreases `y`, matching screen-space
    /// row ordering.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    /// Stable index into direction-keyed arrays (distributions, counts).
    pub const fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }

    /// Classifies a single-step displacement as a direction, if it is one.
    ///
    /// Diagonal or multi-cell displacements return `None`; the caller decides
    /// whether to skip or split them.
    pub fn from_displacement(dx: i32, dy: i32) -> Option<Direction> {
        match (dx, dy) {
            (0, -1) => Some(Direction::North),
            (1, 0) => Some(Direction::East),
            (0, 1) => Some(Direction::South),
            (-1, 0) => Some(Direction::West),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        };
        write!(f, "{}", label)
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn direction_indices_follow_priority_order() {
        for (expected, direction) in Direction::ALL.iter().enumerate() {
            assert_eq!(direction.index(), expected);
        }
    }

    #[test]
    fn derived_iteration_matches_the_priority_array() {
        let iterated: Vec<Direction> = Direction::iter().collect();
        assert_eq!(iterated, Direction::ALL.to_vec());
    }

    #[test]
    fn step_round_trips_through_displacement() {
        let origin = Position::new(4, 4);
        for direction in Direction::ALL {
            let next = origin.step(direction);
            let classified =
                Direction::from_displacement(next.x - origin.x, next.y - origin.y);
            assert_eq!(classified, Some(direction));
        }
    }

    #[test]
    fn chebyshev_tracks_the_larger_axis() {
        let a = Position::new(0, 0);
        assert_eq!(a.chebyshev(Position::new(3, -1)), 3);
        assert_eq!(a.chebyshev(Position::new(-2, 2)), 2);
        assert_eq!(a.chebyshev(a), 0);
    }
}
