//! Perception: turning world state into stimulus events.

use crate::config::AiConfig;
use crate::env::MapOracle;
use crate::state::{Distraction, GuardState, PlayerState, StimulusEvent};

/// Evaluates what a single guard perceives this tick.
///
/// A pure function of the current state plus map visibility queries; it emits
/// events but never mutates suspicion itself.
pub struct StimulusReactor;

impl StimulusReactor {
    /// Collects the stimulus events targeting one guard.
    ///
    /// A sighting is emitted when the player is within `sight_radius` and an
    /// unobstructed line of sight exists. Each distraction within
    /// `audible_radius` of the guard emits a noise event carrying its
    /// intensity; attenuation by distance is the suspicion tracker's job.
    pub fn evaluate<M>(
        guard: &GuardState,
        player: &PlayerState,
        distractions: &[Distraction],
        map: &M,
        config: &AiConfig,
    ) -> Vec<StimulusEvent>
    where
        M: MapOracle + ?Sized,
    {
        let mut events = Vec::new();

        let distance = guard.position.distance(player.position);
        if distance <= config.sight_radius
            && map.line_of_sight(guard.position, player.position)
        {
            events.push(StimulusEvent::Sighting {
                guard: guard.id,
                distance,
                tick: player.tick,
            });
        }

        for distraction in distractions {
            if guard.position.distance(distraction.cell) <= config.audible_radius {
                events.push(StimulusEvent::Noise {
                    origin: distraction.cell,
                    intensity: distraction.intensity,
                    tick: player.tick,
                });
            }
        }

        events
    }
}
