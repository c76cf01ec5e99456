use core::fmt;

use serde::{Serialize, Serializer};

use crate::Context;

pub const DEFAULT_DURATION: f32 = 10.0;

/// Behavior verb. Anything unrecognized is kept as `Other` and runs as a hold.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BehaviorVerb {
    Follow,
    MoveTo,
    TakeCover,
    HoldPosition,
    Other(String),
}

impl BehaviorVerb {
    pub fn parse(verb: &str) -> Self {
        let verb = verb.trim().to_ascii_lowercase();
        match verb.as_str() {
            "follow" | "follow_player" => BehaviorVerb::Follow,
            "move_to" | "go_to" => BehaviorVerb::MoveTo,
            "take_cover" | "cover" => BehaviorVerb::TakeCover,
            "hold_position" | "hold" | "wait" => BehaviorVerb::HoldPosition,
            _ => BehaviorVerb::Other(verb),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            BehaviorVerb::Follow => "follow",
            BehaviorVerb::MoveTo => "move_to",
            BehaviorVerb::TakeCover => "take_cover",
            BehaviorVerb::HoldPosition => "hold_position",
            BehaviorVerb::Other(verb) => verb,
        }
    }
}

impl fmt::Display for BehaviorVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for BehaviorVerb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One high-level instruction from the planner. Read-only once dispatched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BehaviorCommand {
    pub id: String,
    #[serde(rename = "behavior")]
    pub verb: BehaviorVerb,
    pub target: Option<String>,
    /// Seconds.
    pub duration: f32,
    pub context: Context,
}

impl BehaviorCommand {
    pub fn new(verb: BehaviorVerb) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            verb,
            target: None,
            duration: DEFAULT_DURATION,
            context: Context::new(),
        }
    }

    /// Stand still for `seconds`; the safe fallback for unusable input.
    pub fn hold(seconds: f32) -> Self {
        Self::new(BehaviorVerb::HoldPosition).with_duration(seconds)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_duration(mut self, seconds: f32) -> Self {
        self.duration = seconds.max(0.0);
        self
    }

    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<crate::ContextValue>) -> Self {
        self.context.insert(key, value);
        self
    }
}
