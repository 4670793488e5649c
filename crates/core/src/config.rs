/// Adversary tuning parameters.
///
/// All thresholds and weights the design intentionally leaves to tuning live
/// here as named fields with `DEFAULT_*` companions, so levels can override
/// them without recompiling.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AiConfig {
    /// How far a guard can see, in cells (Euclidean).
    pub sight_radius: f32,
    /// Chebyshev range at which a sighting is a hard detection, forcing Chase
    /// regardless of accumulated suspicion.
    pub hard_detection_range: u32,
    /// How far a distraction noise carries, in cells (Euclidean).
    pub audible_radius: f32,
    /// Base suspicion contribution of a sighting; scaled down with distance.
    pub sighting_weight: f32,
    /// Base suspicion contribution per unit of noise intensity; scaled down
    /// with distance from the guard.
    pub noise_weight: f32,
    /// Suspicion lost per tick (times `dt`) when no stimulus arrives.
    pub decay_rate: f32,
    /// Suspicion at or above which a guard chases.
    pub chase_threshold: f32,
    /// Suspicion at or above which a guard intercepts predicted movement.
    pub predict_threshold: f32,
    /// Ticks without stimulus before Chase degrades to Search; after twice
    /// this span the guard resumes Patrol.
    pub search_timeout: u64,
    /// Maximum number of hotspot clusters a recompute may produce.
    pub cluster_count: usize,
    /// Ticks between scheduled hotspot recomputes.
    pub recompute_interval: u64,
    /// Upper bound of the suspicion scale.
    pub max_suspicion: f32,
}

impl AiConfig {
    // ===== compile-time constants used as type parameters =====
    /// Length of the player position history window.
    pub const MAX_HISTORY: usize = 8;
    /// Recent steps encoded into a feature vector, as (dx, dy) pairs.
    pub const FEATURE_STEPS: usize = 3;
    /// Upper bound on retained player cells for clustering.
    pub const MAX_VISIT_LOG: usize = 4096;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_SIGHT_RADIUS: f32 = 5.0;
    pub const DEFAULT_HARD_DETECTION_RANGE: u32 = 2;
    pub const DEFAULT_AUDIBLE_RADIUS: f32 = 8.0;
    pub const DEFAULT_SIGHTING_WEIGHT: f32 = 50.0;
    pub const DEFAULT_NOISE_WEIGHT: f32 = 10.0;
    pub const DEFAULT_DECAY_RATE: f32 = 2.0;
    pub const DEFAULT_CHASE_THRESHOLD: f32 = 75.0;
    pub const DEFAULT_PREDICT_THRESHOLD: f32 = 40.0;
    pub const DEFAULT_SEARCH_TIMEOUT: u64 = 8;
    pub const DEFAULT_CLUSTER_COUNT: usize = 4;
    pub const DEFAULT_RECOMPUTE_INTERVAL: u64 = 64;
    pub const DEFAULT_MAX_SUSPICION: f32 = 100.0;

    pub fn new() -> Self {
        Self {
            sight_radius: Self::DEFAULT_SIGHT_RADIUS,
            hard_detection_range: Self::DEFAULT_HARD_DETECTION_RANGE,
            audible_radius: Self::DEFAULT_AUDIBLE_RADIUS,
            sighting_weight: Self::DEFAULT_SIGHTING_WEIGHT,
            noise_weight: Self::DEFAULT_NOISE_WEIGHT,
            decay_rate: Self::DEFAULT_DECAY_RATE,
            chase_threshold: Self::DEFAULT_CHASE_THRESHOLD,
            predict_threshold: Self::DEFAULT_PREDICT_THRESHOLD,
            search_timeout: Self::DEFAULT_SEARCH_TIMEOUT,
            cluster_count: Self::DEFAULT_CLUSTER_COUNT,
            recompute_interval: Self::DEFAULT_RECOMPUTE_INTERVAL,
            max_suspicion: Self::DEFAULT_MAX_SUSPICION,
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::new()
    }
}
