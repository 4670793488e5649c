//! Decaying per-guard alertness integration.

use crate::config::AiConfig;
use crate::state::{GuardState, StimulusEvent};

/// Integrates stimulus events into a guard's suspicion score.
///
/// The tracker is a pure calculation: it returns the new score and leaves
/// storing it to the caller. Within any tick the result stays inside
/// `[0, max_suspicion]`, and with no events it can only decrease.
pub struct SuspicionTracker;

impl SuspicionTracker {
    /// Computes the guard's suspicion after one tick.
    ///
    /// Each sighting contributes `sighting_weight / max(distance, 1)`; each
    /// noise contributes `noise_weight * intensity / max(distance, 1)` with
    /// distance measured from the guard to the noise origin. Without events
    /// the score decays by `decay_rate * dt`, floored at zero. Malformed
    /// events (non-finite or negative magnitudes) are ignored rather than
    /// surfaced — one bad stimulus must not disturb the rest of the tick.
    pub fn update(
        guard: &GuardState,
        events: &[StimulusEvent],
        dt: f32,
        config: &AiConfig,
    ) -> f32 {
        let mut increment = 0.0f32;
        let mut stimulated = false;

        for event in events {
            match *event {
                StimulusEvent::Sighting { distance, .. } => {
                    if !distance.is_finite() || distance < 0.0 {
                        continue;
                    }
                    stimulated = true;
                    increment += config.sighting_weight / distance.max(1.0);
                }
                StimulusEvent::Noise {
                    origin, intensity, ..
                } => {
                    if !intensity.is_finite() || intensity <= 0.0 {
                        continue;
                    }
                    stimulated = true;
                    let distance = guard.position.distance(origin);
                    increment += config.noise_weight * intensity / distance.max(1.0);
                }
            }
        }

        if stimulated {
            (guard.suspicion + increment).clamp(0.0, config.max_suspicion)
        } else {
            (guard.suspicion - config.decay_rate * dt).max(0.0)
        }
    }
}
