//! Shared fixtures for unit tests.

use std::collections::{HashSet, VecDeque};

use crate::env::{MapDimensions, MapOracle};
use crate::state::{Direction, Position};

/// Minimal in-memory grid implementing [`MapOracle`] for tests.
pub struct GridFixture {
    dimensions: MapDimensions,
    blocked: HashSet<Position>,
}

impl GridFixture {
    pub fn open(width: u32, height: u32) -> Self {
        Self {
            dimensions: MapDimensions::new(width, height),
            blocked: HashSet::new(),
        }
    }

    pub fn block(&mut self, cell: Position) {
        self.blocked.insert(cell);
    }

    fn line(from: Position, to: Position) -> Vec<Position> {
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
        cells
    }
}

impl MapOracle for GridFixture {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn is_walkable(&self, cell: Position) -> bool {
        self.dimensions.contains(cell) && !self.blocked.contains(&cell)
    }

    fn line_of_sight(&self, from: Position, to: Position) -> bool {
        let cells = Self::line(from, to);
        cells
            .iter()
            .skip(1)
            .take(cells.len().saturating_sub(2))
            .all(|cell| !self.blocked.contains(cell))
    }

    fn next_step(&self, from: Position, to: Position) -> Option<Position> {
        if from == to || !self.is_walkable(to) {
            return None;
        }
        let mut queue = VecDeque::from([from]);
        let mut parent: std::collections::HashMap<Position, Position> =
            std::collections::HashMap::new();
        while let Some(cell) = queue.pop_front() {
            for direction in Direction::ALL {
                let next = cell.step(direction);
                if !self.is_walkable(next) || parent.contains_key(&next) || next == from {
                    continue;
                }
                parent.insert(next, cell);
                if next == to {
                    let mut step = to;
                    while parent[&step] != from {
                        step = parent[&step];
                    }
                    return Some(step);
                }
                queue.push_back(next);
            }
        }
        None
    }
}
