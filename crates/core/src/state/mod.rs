//! Authoritative adversary state representation.
//!
//! This module owns the data structures describing guards, the player
//! snapshot, and stimulus events. Runtime layers clone or query this state but
//! mutate it exclusively through [`crate::engine::TickEngine`].
mod common;
mod guard;
mod player;
mod stimulus;

use std::collections::BTreeMap;

pub use common::{Direction, GuardId, Position, Tick};
pub use guard::{GuardState, PatrolProgress};
pub use player::{Distraction, PlayerState, PositionHistory};
pub use stimulus::StimulusEvent;

use crate::config::AiConfig;

/// Canonical snapshot of the adversary core.
///
/// Guards live in a `BTreeMap` so every traversal happens in ascending
/// [`GuardId`] order — the property that makes cluster claiming and replay
/// deterministic.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoreState {
    /// Base seed for all derived random draws (patrol jitter, sweep order).
    pub seed: u64,
    /// Simulation clock, advanced once per `advance` call.
    pub clock: Tick,
    guards: BTreeMap<GuardId, GuardState>,
    /// Player cells observed while visible to any guard, consumed in batch by
    /// the hotspot clusterer. Bounded so a long session cannot grow it
    /// without limit.
    visit_log: Vec<Position>,
}

impl CoreState {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            clock: Tick::ZERO,
            guards: BTreeMap::new(),
            visit_log: Vec::new(),
        }
    }

    /// Registers a guard at level load.
    ///
    /// Returns an error if the id is already taken; ids must be unique for
    /// deterministic ordering to mean anything.
    pub fn add_guard(&mut self, guard: GuardState) -> Result<(), &'static str> {
        if self.guards.contains_key(&guard.id) {
            return Err("guard id already registered");
        }
        self.guards.insert(guard.id, guard);
        Ok(())
    }

    /// Removes a guard at level teardown. Returns true if it existed.
    pub fn remove_guard(&mut self, id: GuardId) -> bool {
        self.guards.remove(&id).is_some()
    }

    pub fn guard(&self, id: GuardId) -> Option<&GuardState> {
        self.guards.get(&id)
    }

    pub fn guard_mut(&mut self, id: GuardId) -> Option<&mut GuardState> {
        self.guards.get_mut(&id)
    }

    /// Guards in ascending id order.
    pub fn guards(&self) -> impl Iterator<Item = &GuardState> {
        self.guards.values()
    }

    /// Guard ids in ascending order, collected so the engine can iterate
    /// while mutating individual guards.
    pub fn guard_ids(&self) -> Vec<GuardId> {
        self.guards.keys().copied().collect()
    }

    pub fn guard_count(&self) -> usize {
        self.guards.len()
    }

    /// Records an observed player cell for later clustering.
    pub fn record_visit(&mut self, position: Position) {
        if self.visit_log.len() >= AiConfig::MAX_VISIT_LOG {
            self.visit_log.remove(0);
        }
        self.visit_log.push(position);
    }

    pub fn visit_log(&self) -> &[Position] {
        &self.visit_log
    }
}
