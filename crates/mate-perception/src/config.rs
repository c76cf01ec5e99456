#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Encoder tuning. The sampling cadence and the fallback emission interval are independent.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PerceptionConfig {
    /// Registry name of the tracked reference entity.
    pub reference_name: String,
    pub scan_radius: f32,
    /// Cap on rendered nearby entities.
    pub max_entities: usize,
    /// Agent displacement (units) that triggers an emission, strictly greater-than.
    pub move_threshold: f32,
    pub reference_move_threshold: f32,
    /// Seconds after the last emission at which one is forced.
    pub fallback_interval: f32,
    /// Seconds between samples.
    pub sample_interval: f32,
}

impl Default for PerceptionConfig {
    fn default() -> Self {
        Self {
            reference_name: "Player".to_string(),
            scan_radius: 15.0,
            max_entities: 5,
            move_threshold: 3.0,
            reference_move_threshold: 5.0,
            fallback_interval: 2.0,
            sample_interval: 0.5,
        }
    }
}
