use core::fmt;

#[cfg(feature = "serde")]
use serde::{Serialize, Serializer};

/// Why an action was refused. [`Rejection::code`] is the string reported to the planner.
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    NotClimbable,
    TooTall { max: f32 },
    NotJumpable,
    TooHigh { max: f32 },
    CannotPickup,
    NeedsKey,
    CannotOpen,
    NoCover,
    NotPossible(String),
}

impl Rejection {
    pub fn code(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NotClimbable => f.write_str("not_climbable"),
            Rejection::TooTall { max } => write!(f, "too_tall_max_{max:.1}"),
            Rejection::NotJumpable => f.write_str("not_jumpable"),
            Rejection::TooHigh { max } => write!(f, "too_high_max_{max:.1}"),
            Rejection::CannotPickup => f.write_str("cannot_pickup"),
            Rejection::NeedsKey => f.write_str("needs_key"),
            Rejection::CannotOpen => f.write_str("cannot_open"),
            Rejection::NoCover => f.write_str("no_cover_available"),
            Rejection::NotPossible(action) => write!(f, "action_{action}_not_possible"),
        }
    }
}

#[cfg(feature = "serde")]
impl Serialize for Rejection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Verdict {
    pub allowed: bool,
    pub reason: Option<Rejection>,
}

impl Verdict {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    pub fn reject(reason: Rejection) -> Self {
        Self {
            allowed: false,
            reason: Some(reason),
        }
    }

    pub fn reason_code(&self) -> Option<String> {
        self.reason.as_ref().map(Rejection::code)
    }
}
