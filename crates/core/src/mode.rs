//! Guard behavioral mode and its transition table.
//!
//! The mode is a closed variant set with one pure transition function; there
//! is no per-mode dynamic dispatch. Target selection for each mode lives in
//! the engine, which consults the predictor, the cluster planner, or the
//! last-known cell depending on the mode chosen here.

use crate::config::AiConfig;

/// Behavioral state of a guard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GuardMode {
    /// Default route-walking between hotspots or fallback waypoints.
    Patrol,
    /// Intercepting the player's predicted next cell.
    Predict,
    /// Heading straight for the last known player position.
    Chase,
    /// Sweeping the last-known area after losing the trail; reverts to
    /// Patrol once the timeout elapses without re-detection.
    Search,
}

/// Everything the transition table is allowed to look at.
///
/// Keeping the inputs explicit is what makes the transition a pure function:
/// replaying identical inputs from identical state always yields the same
/// mode.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModeInputs {
    pub current: GuardMode,
    pub suspicion: f32,
    /// A sighting placed the player within hard-detection range this tick.
    pub detected: bool,
    pub has_last_known: bool,
    pub ticks_since_stimulus: u64,
}

impl GuardMode {
    /// Evaluates the transition table. Rules are checked in priority order;
    /// the first match wins.
    pub fn evaluate(inputs: ModeInputs, config: &AiConfig) -> GuardMode {
        // Rule 1: hard detection forces Chase regardless of suspicion.
        if inputs.detected {
            return GuardMode::Chase;
        }
        // Rules 2-3: threshold-driven escalation.
        if inputs.suspicion >= config.chase_threshold {
            return GuardMode::Chase;
        }
        if inputs.suspicion >= config.predict_threshold {
            return GuardMode::Predict;
        }
        // Rule 4: stale pursuit degrades, Chase -> Search -> Patrol. A guard
        // already past twice the timeout goes straight to Patrol.
        if matches!(inputs.current, GuardMode::Chase | GuardMode::Search)
            && inputs.ticks_since_stimulus > config.search_timeout
        {
            if inputs.ticks_since_stimulus > config.search_timeout * 2 {
                return GuardMode::Patrol;
            }
            return GuardMode::Search;
        }
        // Rule 5: pursuit persists while there is somewhere to pursue;
        // everything else settles back into Patrol.
        match inputs.current {
            GuardMode::Chase if inputs.has_last_known => GuardMode::Chase,
            GuardMode::Search if inputs.has_last_known => GuardMode::Search,
            _ => GuardMode::Patrol,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(current: GuardMode) -> ModeInputs {
        ModeInputs {
            current,
            suspicion: 0.0,
            detected: false,
            has_last_known: false,
            ticks_since_stimulus: 0,
        }
    }

    #[test]
    fn hard_detection_beats_every_other_rule() {
        let config = AiConfig::default();
        let result = GuardMode::evaluate(
            ModeInputs {
                detected: true,
                suspicion: 0.0,
                ..inputs(GuardMode::Patrol)
            },
            &config,
        );
        assert_eq!(result, GuardMode::Chase);
    }

    #[test]
    fn thresholds_escalate_in_order() {
        let config = AiConfig::default();

        let chase = GuardMode::evaluate(
            ModeInputs {
                suspicion: config.chase_threshold,
                ..inputs(GuardMode::Patrol)
            },
            &config,
        );
        assert_eq!(chase, GuardMode::Chase);

        let predict = GuardMode::evaluate(
            ModeInputs {
                suspicion: config.predict_threshold,
                ..inputs(GuardMode::Patrol)
            },
            &config,
        );
        assert_eq!(predict, GuardMode::Predict);
    }

    #[test]
    fn stale_chase_degrades_to_search_then_patrol() {
        let config = AiConfig::default();

        let search = GuardMode::evaluate(
            ModeInputs {
                has_last_known: true,
                ticks_since_stimulus: config.search_timeout + 1,
                ..inputs(GuardMode::Chase)
            },
            &config,
        );
        assert_eq!(search, GuardMode::Search);

        let patrol = GuardMode::evaluate(
            ModeInputs {
                has_last_known: true,
                ticks_since_stimulus: config.search_timeout * 2 + 1,
                ..inputs(GuardMode::Search)
            },
            &config,
        );
        assert_eq!(patrol, GuardMode::Patrol);
    }

    #[test]
    fn chase_without_last_known_settles_into_patrol() {
        let config = AiConfig::default();
        let result = GuardMode::evaluate(inputs(GuardMode::Chase), &config);
        assert_eq!(result, GuardMode::Patrol);
    }

    #[test]
    fn predict_reverts_once_suspicion_drops() {
        let config = AiConfig::default();
        let result = GuardMode::evaluate(
            ModeInputs {
                suspicion: config.predict_threshold - 1.0,
                ..inputs(GuardMode::Predict)
            },
            &config,
        );
        assert_eq!(result, GuardMode::Patrol);
    }

    #[test]
    fn evaluation_is_replayable() {
        let config = AiConfig::default();
        let sample = ModeInputs {
            current: GuardMode::Search,
            suspicion: 12.5,
            detected: false,
            has_last_known: true,
            ticks_since_stimulus: 3,
        };
        let first = GuardMode::evaluate(sample, &config);
        for _ in 0..10 {
            assert_eq!(GuardMode::evaluate(sample, &config), first);
        }
    }
}
