use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Followed when a follow command names no target.
    pub reference_name: String,
    /// Duration of the hold dispatched when an inbound message can't be used.
    pub fallback_hold_seconds: f32,
    /// Band for follow commands without a `followDistance`.
    pub follow_distance: f32,
    /// Seconds to turn toward a move target after arriving.
    pub face_target_seconds: f32,
    /// Seconds to turn toward the threat after reaching cover.
    pub face_threat_seconds: f32,
    /// Distance kept between the cover object and the stand point.
    pub cover_offset: f32,
    pub scan_degrees_per_second: f32,
    pub scan_smoothing: f32,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            reference_name: "Player".to_string(),
            fallback_hold_seconds: 5.0,
            follow_distance: 3.0,
            face_target_seconds: 0.5,
            face_threat_seconds: 1.0,
            cover_offset: 2.0,
            scan_degrees_per_second: 30.0,
            scan_smoothing: 5.0,
        }
    }
}
