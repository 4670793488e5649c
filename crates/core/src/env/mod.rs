//! Traits describing the external collaborators the core queries.
//!
//! The map oracle exposes walkability, line of sight, and pathfinding; the
//! rng oracle supplies seeded randomness. Concrete implementations live in
//! the runtime (or the embedding game) — the core only depends on the
//! contracts.
mod map;
mod rng;

pub use map::{MapDimensions, MapOracle};
pub use rng::{RngOracle, SeedRng, derive_seed};
