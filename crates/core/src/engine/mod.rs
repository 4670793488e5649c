//! Per-tick orchestration of the guard roster.
//!
//! [`TickEngine`] borrows the authoritative [`CoreState`] and drives one
//! simulation step: perception, suspicion integration, mode transition,
//! target selection, and movement, for every guard in ascending id order.
//! Model inference and cluster lookups are in-memory reads of the immutable
//! snapshot handed in through [`TickContext`]; nothing here blocks.
mod errors;

pub use errors::AdvanceError;

use crate::cluster::ClusterSet;
use crate::config::AiConfig;
use crate::env::{MapOracle, RngOracle};
use crate::mode::{GuardMode, ModeInputs};
use crate::patrol::PatrolPlanner;
use crate::predict::{FeatureVector, MovementPredictor};
use crate::reactor::StimulusReactor;
use crate::state::{
    CoreState, Direction, Distraction, GuardId, GuardState, PlayerState, Position, StimulusEvent,
};
use crate::suspicion::SuspicionTracker;

/// Read-only collaborators and model snapshot for one tick.
///
/// The predictor and cluster set are whatever the runtime's model registry
/// currently publishes; they stay fixed for the duration of the call, so all
/// guards within a tick see the same model generation.
#[derive(Clone, Copy)]
pub struct TickContext<'a> {
    pub map: &'a dyn MapOracle,
    pub rng: &'a dyn RngOracle,
    pub predictor: &'a dyn MovementPredictor,
    pub clusters: &'a ClusterSet,
    pub config: &'a AiConfig,
}

/// Outcome of one guard's update, reported to the caller for telemetry,
/// difficulty scaling, and training-sample logging.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GuardReport {
    pub guard: GuardId,
    pub position: Position,
    pub mode: GuardMode,
    pub suspicion: f32,
    /// Set when the mode changed this tick.
    pub transition: Option<(GuardMode, GuardMode)>,
    pub saw_player: bool,
}

/// Borrows the core state and advances it one tick at a time.
pub struct TickEngine<'a> {
    state: &'a mut CoreState,
}

impl<'a> TickEngine<'a> {
    pub fn new(state: &'a mut CoreState) -> Self {
        Self { state }
    }

    /// The sole externally driven operation: one simulation step.
    ///
    /// Guards are updated in ascending id order so cluster claims replay
    /// identically. Transient signal problems (invalid predictor output,
    /// malformed events) degrade locally; only collaborator-contract
    /// violations surface as errors.
    pub fn advance(
        &mut self,
        player: &PlayerState,
        distractions: &[Distraction],
        ctx: TickContext<'_>,
    ) -> Result<Vec<GuardReport>, AdvanceError> {
        if !ctx.map.contains(player.position) {
            return Err(AdvanceError::PlayerOutOfBounds(player.position));
        }

        self.state.clock = self.state.clock + 1;
        let clock = self.state.clock;
        let seed = self.state.seed;

        let mut claimed: Vec<Position> = Vec::new();
        let mut reports = Vec::with_capacity(self.state.guard_count());

        for id in self.state.guard_ids() {
            let Some(mut guard) = self.state.guard(id).cloned() else {
                continue;
            };

            let events =
                StimulusReactor::evaluate(&guard, player, distractions, ctx.map, ctx.config);
            let saw_player = events.iter().any(StimulusEvent::is_sighting);

            Self::absorb_stimuli(&mut guard, &events, player);
            if saw_player {
                self.state.record_visit(player.position);
            }

            let detected = saw_player
                && guard.position.chebyshev(player.position) <= ctx.config.hard_detection_range;

            let previous_mode = guard.mode;
            guard.suspicion = SuspicionTracker::update(&guard, &events, 1.0, ctx.config);
            guard.mode = GuardMode::evaluate(
                ModeInputs {
                    current: previous_mode,
                    suspicion: guard.suspicion,
                    detected,
                    has_last_known: guard.last_known.is_some(),
                    ticks_since_stimulus: guard.ticks_since_stimulus,
                },
                ctx.config,
            );
            let transition =
                (guard.mode != previous_mode).then_some((previous_mode, guard.mode));
            if guard.mode == GuardMode::Patrol && previous_mode != GuardMode::Patrol {
                // The trail is considered lost once a guard settles back
                // into Patrol; a fresh stimulus has to re-establish it.
                guard.last_known = None;
            }

            let target = Self::select_target(&mut guard, player, &mut claimed, ctx, seed, clock);
            Self::step_towards(&mut guard, target, ctx.map)?;

            reports.push(GuardReport {
                guard: guard.id,
                position: guard.position,
                mode: guard.mode,
                suspicion: guard.suspicion,
                transition,
                saw_player,
            });

            if let Some(slot) = self.state.guard_mut(id) {
                *slot = guard;
            }
        }

        Ok(reports)
    }

    /// Updates last-known position and the stimulus staleness counter from
    /// this tick's events. Sightings dominate noises; among several noises
    /// the most recently raised distraction wins.
    fn absorb_stimuli(guard: &mut GuardState, events: &[StimulusEvent], player: &PlayerState) {
        let mut stimulated = false;
        for event in events {
            match event {
                StimulusEvent::Sighting { .. } => {
                    guard.last_known = Some(player.position);
                    stimulated = true;
                }
                StimulusEvent::Noise { origin, .. } => {
                    if !events.iter().any(StimulusEvent::is_sighting) {
                        guard.last_known = Some(*origin);
                    }
                    stimulated = true;
                }
            }
        }

        if stimulated {
            guard.ticks_since_stimulus = 0;
        } else {
            guard.ticks_since_stimulus += 1;
        }
    }

    /// Resolves the cell the guard wants to reach under its current mode.
    fn select_target(
        guard: &mut GuardState,
        player: &PlayerState,
        claimed: &mut Vec<Position>,
        ctx: TickContext<'_>,
        seed: u64,
        clock: crate::state::Tick,
    ) -> Position {
        match guard.mode {
            GuardMode::Patrol => {
                PatrolPlanner::plan(guard, ctx.clusters, claimed, ctx.map, ctx.rng, seed, clock)
            }
            GuardMode::Predict => Self::intercept_target(guard, player, ctx),
            GuardMode::Chase => guard.last_known.unwrap_or(guard.position),
            GuardMode::Search => Self::search_target(guard, ctx.map, clock),
        }
    }

    /// Predict-mode target: the player's cell plus the predicted direction.
    /// Any predictor failure (missing features, invalid distribution,
    /// unwalkable intercept) falls back to chase behavior.
    fn intercept_target(
        guard: &GuardState,
        player: &PlayerState,
        ctx: TickContext<'_>,
    ) -> Position {
        let chase_fallback = guard.last_known.unwrap_or(guard.position);

        let Some(features) = FeatureVector::from_history(&player.history) else {
            return chase_fallback;
        };
        let distribution = ctx.predictor.predict(&features);
        if !distribution.is_valid() {
            return chase_fallback;
        }

        let intercept = player.position.step(distribution.argmax());
        if ctx.map.is_walkable(intercept) {
            intercept
        } else {
            chase_fallback
        }
    }

    /// Search-mode target: walk to the last-known cell, then sweep its
    /// neighbourhood in priority order keyed by the clock so the probe
    /// pattern is deterministic.
    fn search_target<M>(guard: &GuardState, map: &M, clock: crate::state::Tick) -> Position
    where
        M: MapOracle + ?Sized,
    {
        let Some(last_known) = guard.last_known else {
            return guard.position;
        };
        if guard.position != last_known {
            return last_known;
        }

        let start = (clock.0 as usize + guard.id.0 as usize) % Direction::ALL.len();
        for offset in 0..Direction::ALL.len() {
            let direction = Direction::ALL[(start + offset) % Direction::ALL.len()];
            let probe = last_known.step(direction);
            if map.is_walkable(probe) {
                return probe;
            }
        }
        guard.position
    }

    /// Applies one pathfinder step towards the target, verifying the map
    /// collaborator honors its contract.
    fn step_towards(
        guard: &mut GuardState,
        target: Position,
        map: &dyn MapOracle,
    ) -> Result<(), AdvanceError> {
        if target == guard.position {
            return Ok(());
        }
        let Some(step) = map.next_step(guard.position, target) else {
            // Unreachable target: hold position, not an error.
            return Ok(());
        };
        if !map.is_walkable(step) {
            return Err(AdvanceError::UnwalkableStep {
                guard: guard.id,
                step,
            });
        }
        if guard.position.chebyshev(step) > 1 {
            return Err(AdvanceError::NonAdjacentStep {
                guard: guard.id,
                step,
            });
        }
        guard.apply_step(step);
        Ok(())
    }
}
