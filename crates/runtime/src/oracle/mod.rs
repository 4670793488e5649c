//! Concrete collaborator implementations.
//!
//! Embedding games usually bring their own map; [`GridMap`] exists for tests
//! and standalone use, honoring the same [`warden_core::MapOracle`] contract.
mod map;

pub use map::{GridMap, MapError};
