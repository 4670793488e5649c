//! Concrete grid map used by tests and embedders without their own map.

use std::collections::{HashMap, VecDeque};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use warden_core::{Direction, MapDimensions, MapOracle, Position};

const WALL_GLYPH: char = '#';
const FLOOR_GLYPH: char = '.';

/// Errors from parsing an ASCII map.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("map text is empty")]
    Empty,
    #[error("row {row} has width {found}, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("unknown map glyph '{0}'")]
    UnknownGlyph(char),
}

/// Obstacle-grid implementation of [`MapOracle`].
///
/// Line of sight walks a Bresenham line and is blocked by any obstacle
/// strictly between the endpoints; `next_step` is one hop along a BFS
/// shortest path, deterministic because neighbours expand in the fixed
/// direction priority order.
#[derive(Clone, Debug)]
pub struct GridMap {
    dimensions: MapDimensions,
    blocked: Vec<bool>,
}

impl GridMap {
    /// An unobstructed map, mostly useful in tests.
    pub fn open(width: u32, height: u32) -> Self {
        Self {
            dimensions: MapDimensions::new(width, height),
            blocked: vec![false; (width * height) as usize],
        }
    }

    /// Parses `#` walls and `.` floors.
    pub fn from_ascii(text: &str) -> Result<Self, MapError> {
        let rows: Vec<&str> = text.lines().filter(|line| !line.is_empty()).collect();
        let height = rows.len();
        let width = rows.first().map(|row| row.chars().count()).unwrap_or(0);
        if width == 0 || height == 0 {
            return Err(MapError::Empty);
        }

        let mut blocked = Vec::with_capacity(width * height);
        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(MapError::RaggedRow {
                    row,
                    found,
                    expected: width,
                });
            }
            for glyph in line.chars() {
                match glyph {
                    WALL_GLYPH => blocked.push(true),
                    FLOOR_GLYPH => blocked.push(false),
                    other => return Err(MapError::UnknownGlyph(other)),
                }
            }
        }

        Ok(Self {
            dimensions: MapDimensions::new(width as u32, height as u32),
            blocked,
        })
    }

    /// Generates a random obstacle layout: clear border, obstacles at the
    /// given density, and cross corridors through the middle so the map
    /// always stays traversable.
    pub fn generate(width: u32, height: u32, density: f64, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut map = Self::open(width, height);

        for y in 1..height.saturating_sub(1) {
            for x in 1..width.saturating_sub(1) {
                if rng.gen_bool(density.clamp(0.0, 1.0)) {
                    map.set_blocked(Position::new(x as i32, y as i32), true);
                }
            }
        }

        let mid_x = (width / 2) as i32;
        let mid_y = (height / 2) as i32;
        for x in 0..width as i32 {
            map.set_blocked(Position::new(x, mid_y), false);
        }
        for y in 0..height as i32 {
            map.set_blocked(Position::new(mid_x, y), false);
        }

        map
    }

    pub fn set_blocked(&mut self, cell: Position, blocked: bool) {
        if let Some(index) = self.index(cell) {
            self.blocked[index] = blocked;
        }
    }

    fn index(&self, cell: Position) -> Option<usize> {
        self.dimensions
            .contains(cell)
            .then(|| (cell.y as u32 * self.dimensions.width + cell.x as u32) as usize)
    }

    fn is_blocked(&self, cell: Position) -> bool {
        self.index(cell).is_none_or(|index| self.blocked[index])
    }

    fn bresenham(from: Position, to: Position) -> impl Iterator<Item = Position> {
        let mut cells = Vec::new();
        let (mut x, mut y) = (from.x, from.y);
        let dx = (to.x - from.x).abs();
        let dy = (to.y - from.y).abs();
        let sx = if from.x < to.x { 1 } else { -1 };
        let sy = if from.y < to.y { 1 } else { -1 };
        let mut err = dx - dy;

        loop {
            cells.push(Position::new(x, y));
            if x == to.x && y == to.y {
                break;
            }
            let doubled = err * 2;
            if doubled > -dy {
                err -= dy;
                x += sx;
            }
            if doubled < dx {
                err += dx;
                y += sy;
            }
        }
        cells.into_iter()
    }
}

impl MapOracle for GridMap {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn is_walkable(&self, cell: Position) -> bool {
        !self.is_blocked(cell)
    }

    fn line_of_sight(&self, from: Position, to: Position) -> bool {
        let cells: Vec<Position> = Self::bresenham(from, to).collect();
        cells
            .iter()
            .skip(1)
            .take(cells.len().saturating_sub(2))
            .all(|&cell| !self.is_blocked(cell))
    }

    fn next_step(&self, from: Position, to: Position) -> Option<Position> {
        if from == to || !self.is_walkable(to) {
            return None;
        }

        let mut parents: HashMap<Position, Position> = HashMap::new();
        let mut queue = VecDeque::from([from]);
        while let Some(cell) = queue.pop_front() {
            for direction in Direction::ALL {
                let next = cell.step(direction);
                if !self.is_walkable(next) || next == from || parents.contains_key(&next) {
                    continue;
                }
                parents.insert(next, cell);
                if next == to {
                    let mut step = to;
                    while parents[&step] != from {
                        step = parents[&step];
                    }
                    return Some(step);
                }
                queue.push_back(next);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORRIDOR: &str = "\
.....
.###.
.....
";

    #[test]
    fn ascii_parsing_round_trips_walls() {
        let map = GridMap::from_ascii(CORRIDOR).unwrap();
        assert_eq!(map.dimensions(), MapDimensions::new(5, 3));
        assert!(map.is_walkable(Position::new(0, 0)));
        assert!(!map.is_walkable(Position::new(2, 1)));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        assert!(matches!(
            GridMap::from_ascii("...\n.."),
            Err(MapError::RaggedRow { row: 1, .. })
        ));
    }

    #[test]
    fn walls_break_line_of_sight_but_not_endpoints() {
        let map = GridMap::from_ascii(CORRIDOR).unwrap();
        // Vertical look across the wall row is blocked...
        assert!(!map.line_of_sight(Position::new(2, 0), Position::new(2, 2)));
        // ...but looking along the clear column is fine.
        assert!(map.line_of_sight(Position::new(0, 0), Position::new(0, 2)));
        // Adjacent cells always see each other.
        assert!(map.line_of_sight(Position::new(1, 0), Position::new(2, 0)));
    }

    #[test]
    fn next_step_routes_around_walls() {
        let map = GridMap::from_ascii(CORRIDOR).unwrap();
        let mut at = Position::new(2, 0);
        let goal = Position::new(2, 2);
        let mut hops = 0;
        while at != goal {
            at = map.next_step(at, goal).unwrap();
            assert!(map.is_walkable(at));
            hops += 1;
            assert!(hops < 20, "walked too far");
        }
        // Shortest detour around the wall segment is 6 steps.
        assert_eq!(hops, 6);
    }

    #[test]
    fn unreachable_targets_return_none() {
        let boxed = "\
.#.
###
...
";
        let map = GridMap::from_ascii(boxed).unwrap();
        assert!(map.next_step(Position::new(0, 0), Position::new(0, 2)).is_none());
    }

    #[test]
    fn generation_is_seed_deterministic_and_keeps_corridors() {
        let a = GridMap::generate(20, 20, 0.3, 7);
        let b = GridMap::generate(20, 20, 0.3, 7);
        for y in 0..20 {
            for x in 0..20 {
                let cell = Position::new(x, y);
                assert_eq!(a.is_walkable(cell), b.is_walkable(cell));
            }
        }
        for i in 0..20 {
            assert!(a.is_walkable(Position::new(i, 10)));
            assert!(a.is_walkable(Position::new(10, i)));
        }
    }
}
