//! Patrol waypoint planning over hotspot snapshots.

use crate::cluster::ClusterSet;
use crate::env::{MapOracle, RngOracle, derive_seed};
use crate::state::{GuardState, Position, Tick};

/// Attempts made to find a walkable jittered waypoint before holding still.
const JITTER_ATTEMPTS: u32 = 20;
/// Half-width of the jitter window around the guard, in cells.
const JITTER_SPREAD: u32 = 8;

/// Chooses where a patrolling guard walks next.
///
/// With a hotspot snapshot available, guards are routed to the
/// highest-weight centroid not yet claimed this tick; claims are taken in
/// guard id order, so two guards wanting the same hotspot always resolve the
/// same way. Without hotspots (cold start) guards walk a fixed rectangular
/// circuit inset one cell from the border, phase-shifted per guard so they
/// spread out.
pub struct PatrolPlanner;

impl PatrolPlanner {
    /// Picks the guard's patrol target for this tick, recording any cluster
    /// claim in `claimed`.
    pub fn plan<M, R>(
        guard: &mut GuardState,
        clusters: &ClusterSet,
        claimed: &mut Vec<Position>,
        map: &M,
        rng: &R,
        base_seed: u64,
        tick: Tick,
    ) -> Position
    where
        M: MapOracle + ?Sized,
        R: RngOracle + ?Sized,
    {
        if let Some(target) = Self::claim_hotspot(guard, clusters, claimed, map) {
            guard.patrol.waypoint = Some(target);
            return target;
        }
        Self::default_route(guard, map, rng, base_seed, tick)
    }

    /// Highest-weight unclaimed, walkable centroid the guard is not already
    /// standing on.
    fn claim_hotspot<M>(
        guard: &GuardState,
        clusters: &ClusterSet,
        claimed: &mut Vec<Position>,
        map: &M,
    ) -> Option<Position>
    where
        M: MapOracle + ?Sized,
    {
        let target = clusters
            .iter()
            .map(|cluster| cluster.centroid)
            .find(|centroid| {
                !claimed.contains(centroid)
                    && map.is_walkable(*centroid)
                    && *centroid != guard.position
            })?;
        claimed.push(target);
        Some(target)
    }

    /// Cold-start circuit: the four border-inset corners, advanced whenever
    /// the current waypoint is reached, with the entry corner offset by guard
    /// id. Corners blocked by the map fall back to seeded jitter around the
    /// guard.
    fn default_route<M, R>(
        guard: &mut GuardState,
        map: &M,
        rng: &R,
        base_seed: u64,
        tick: Tick,
    ) -> Position
    where
        M: MapOracle + ?Sized,
        R: RngOracle + ?Sized,
    {
        let dims = map.dimensions();
        let max_x = dims.width as i32 - 2;
        let max_y = dims.height as i32 - 2;
        let corners = [
            Position::new(1, 1),
            Position::new(max_x, 1),
            Position::new(max_x, max_y),
            Position::new(1, max_y),
        ];

        let reached = guard.patrol.waypoint == Some(guard.position);
        if reached || guard.patrol.waypoint.is_none() {
            guard.patrol.route_index = (guard.patrol.route_index + 1) % corners.len();
        }

        let corner = corners[(guard.id.0 as usize + guard.patrol.route_index) % corners.len()];
        if map.is_walkable(corner) {
            guard.patrol.waypoint = Some(corner);
            return corner;
        }

        for attempt in 0..JITTER_ATTEMPTS {
            let seed = derive_seed(base_seed, tick.0, guard.id.0, attempt);
            let dx = rng.offset(seed, JITTER_SPREAD);
            let dy = rng.offset(seed.wrapping_add(1), JITTER_SPREAD);
            let candidate = Position::new(guard.position.x + dx, guard.position.y + dy);
            if candidate != guard.position && map.is_walkable(candidate) {
                guard.patrol.waypoint = Some(candidate);
                return candidate;
            }
        }

        // Nowhere sensible to go; hold position for this tick.
        guard.patrol.waypoint = None;
        guard.position
    }
}
