use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Seconds a plan may run before it ends with a timeout.
    pub timeout: f32,
    /// Arrival tolerance for `move_to`/`patrol` steps without one.
    pub default_tolerance: f32,
    /// Band for `follow_player` steps without a `distance`.
    pub follow_distance: f32,
    /// Entity followed by `follow_player`.
    pub reference_name: String,
    /// Duration for timed steps without a `duration`.
    pub default_step_duration: f32,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            timeout: 30.0,
            default_tolerance: 1.0,
            follow_distance: 3.0,
            reference_name: "Player".to_string(),
            default_step_duration: 1.0,
        }
    }
}
