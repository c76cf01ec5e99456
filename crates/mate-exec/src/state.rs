use core::fmt;

use mate_core::Failure;
use serde::Serialize;

/// Executor lifecycle.
///
/// At rest the executor is only ever `Idle` or `Executing`; the terminal states are reported
/// through [`ExecutionOutcome`] and the executor is `Idle` again immediately afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionState {
    Idle,
    Executing,
    Success,
    Failed,
    Timeout,
    Cancelled,
}

impl ExecutionState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, ExecutionState::Idle | ExecutionState::Executing)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ExecutionState::Idle => "idle",
            ExecutionState::Executing => "executing",
            ExecutionState::Success => "success",
            ExecutionState::Failed => "failed",
            ExecutionState::Timeout => "timeout",
            ExecutionState::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ExecutionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionOutcome {
    pub plan_id: String,
    pub state: ExecutionState,
    pub reason: Option<Failure>,
    pub steps_completed: usize,
    /// Seconds from start to end.
    pub elapsed: f32,
}

impl ExecutionOutcome {
    pub fn is_success(&self) -> bool {
        self.state == ExecutionState::Success
    }

    /// Reason string reported to the planner (`"success"` when there is none).
    pub fn reason_code(&self) -> &str {
        self.reason.as_ref().map_or("success", Failure::code)
    }
}
