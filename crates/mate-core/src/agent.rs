use core::fmt::Debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable identifier for an agent.
///
/// Events and logs carry the numeric `stable_id` so sinks don't need to know the world's
/// agent type.
pub trait AgentId: Copy + Ord + Eq + Debug {
    fn stable_id(self) -> u64;
}

impl AgentId for u64 {
    fn stable_id(self) -> u64 {
        self
    }
}

impl AgentId for u32 {
    fn stable_id(self) -> u64 {
        self as u64
    }
}

impl AgentId for usize {
    fn stable_id(self) -> u64 {
        self as u64
    }
}

/// Physical limits of an agent, used to gate climb/jump style actions.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AgentCapability {
    /// Maximum height the agent can climb or jump onto.
    pub max_step_height: f32,
    /// Whether the agent carries a key for locked objects.
    pub has_key: bool,
}

impl Default for AgentCapability {
    fn default() -> Self {
        Self {
            max_step_height: 2.5,
            has_key: false,
        }
    }
}

impl AgentCapability {
    pub fn with_max_step_height(max_step_height: f32) -> Self {
        Self {
            max_step_height,
            ..Self::default()
        }
    }
}
