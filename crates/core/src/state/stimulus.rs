use super::{GuardId, Position, Tick};

/// Discrete perception event that can raise a guard's suspicion.
///
/// Events are produced by the stimulus reactor (sightings) or derived from
/// player distraction actions (noise), consumed exactly once by the suspicion
/// tracker, then discarded.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StimulusEvent {
    /// The guard saw the player at the given Euclidean distance.
    Sighting {
        guard: GuardId,
        distance: f32,
        tick: Tick,
    },
    /// A noise reached the guard from `origin` with the given intensity.
    Noise {
        origin: Position,
        intensity: f32,
        tick: Tick,
    },
}

impl StimulusEvent {
    pub fn tick(&self) -> Tick {
        match self {
            StimulusEvent::Sighting { tick, .. } | StimulusEvent::Noise { tick, .. } => *tick,
        }
    }

    pub fn is_sighting(&self) -> bool {
        matches!(self, StimulusEvent::Sighting { .. })
    }
}
