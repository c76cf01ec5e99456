use mate_affordance::AffordanceAction;
use mate_core::{ParamError, Vec3};
use serde::{Deserialize, Serialize};

use crate::params::{self, Params};
use crate::ExecutorConfig;

/// Wire form of one step: `{"action": "move_to", "params": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawStep {
    pub action: String,
    #[serde(default)]
    pub params: Params,
}

impl RawStep {
    pub fn new(action: impl Into<String>, params: Params) -> Self {
        Self {
            action: action.into(),
            params,
        }
    }
}

/// Where a movement or look step points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    Point(Vec3),
    /// Resolved through the entity registry when the step starts.
    Object(String),
}

/// Affordance-gated interaction verbs.
const INTERACTIONS: [&str; 6] = ["climb", "jump_on", "interact", "pickup", "open", "take_cover_at"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    MoveTo { goal: Goal, tolerance: f32 },
    FollowPlayer { distance: f32, duration: f32 },
    Patrol { waypoints: Vec<Vec3>, tolerance: f32 },
    LookAt { goal: Goal, duration: f32 },
    HoldPosition { duration: f32 },
    Wait { duration: f32 },
    Interact { verb: String, object: String },
    /// Unrecognized verb; runs as a no-op.
    Unknown { verb: String },
}

/// Why a raw step could not be typed.
#[derive(Debug, Clone, PartialEq)]
pub enum StepError {
    Param(ParamError),
    Missing(&'static str),
}

impl From<ParamError> for StepError {
    fn from(value: ParamError) -> Self {
        StepError::Param(value)
    }
}

impl Step {
    pub fn from_raw(raw: &RawStep, config: &ExecutorConfig) -> Result<Self, StepError> {
        let p = &raw.params;
        let verb = raw.action.trim().to_ascii_lowercase();
        let duration = || -> Result<f32, ParamError> {
            Ok(params::number(p, "duration")?
                .unwrap_or(config.default_step_duration)
                .max(0.0))
        };
        let tolerance = || -> Result<f32, ParamError> {
            Ok(params::number(p, "tolerance")?
                .unwrap_or(config.default_tolerance)
                .max(0.0))
        };

        let step = match verb.as_str() {
            "move_to" => Step::MoveTo {
                goal: goal(p)?.ok_or(StepError::Missing("position"))?,
                tolerance: tolerance()?,
            },
            "follow_player" => Step::FollowPlayer {
                distance: params::number(p, "distance")?
                    .unwrap_or(config.follow_distance)
                    .max(0.0),
                duration: duration()?,
            },
            "patrol" => Step::Patrol {
                waypoints: params::points(p, "waypoints")?.ok_or(StepError::Missing("waypoints"))?,
                tolerance: tolerance()?,
            },
            "look_at" => Step::LookAt {
                goal: goal(p)?.ok_or(StepError::Missing("position"))?,
                duration: duration()?,
            },
            "hold_position" => Step::HoldPosition {
                duration: duration()?,
            },
            "wait" => Step::Wait {
                duration: duration()?,
            },
            v if INTERACTIONS.contains(&v) => Step::Interact {
                verb: verb.clone(),
                object: params::text(p, "object")?.ok_or(StepError::Missing("object"))?,
            },
            _ => Step::Unknown { verb: verb.clone() },
        };
        Ok(step)
    }

    pub fn name(&self) -> &str {
        match self {
            Step::MoveTo { .. } => "move_to",
            Step::FollowPlayer { .. } => "follow_player",
            Step::Patrol { .. } => "patrol",
            Step::LookAt { .. } => "look_at",
            Step::HoldPosition { .. } => "hold_position",
            Step::Wait { .. } => "wait",
            Step::Interact { verb, .. } | Step::Unknown { verb } => verb,
        }
    }
}

/// The validator action behind an interaction verb.
pub fn interaction_action(verb: &str) -> AffordanceAction {
    match verb {
        "take_cover_at" => AffordanceAction::TakeCover,
        other => AffordanceAction::from_verb(other),
    }
}

fn goal(p: &Params) -> Result<Option<Goal>, ParamError> {
    if let Some(point) = params::point(p, "position")? {
        return Ok(Some(Goal::Point(point)));
    }
    if let Some(point) = params::point(p, "target")? {
        return Ok(Some(Goal::Point(point)));
    }
    Ok(params::text(p, "object")?.map(Goal::Object))
}
