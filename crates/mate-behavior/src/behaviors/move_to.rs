use mate_core::{CancelToken, EventSink, Task, TaskStatus, TickContext};
use mate_exec::primitives::{Facing, LookAtTask, MoveToTask};
use mate_exec::{Goal, MotorWorld};

use crate::{BehaviorCommand, BehaviorConfig, CommandError};

/// Arrival tolerance for an `approach` style.
pub fn approach_tolerance(approach: Option<&str>) -> f32 {
    match approach.map(str::to_ascii_lowercase).as_deref() {
        Some("cautious") => 3.0,
        Some("fast") | Some("urgent") => 2.0,
        Some("precise") => 0.5,
        _ => 1.5,
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Phase {
    Moving(MoveToTask),
    Facing(LookAtTask),
}

/// Walk to a named object, then turn to face it.
#[derive(Debug, Clone)]
pub struct MoveToBehavior {
    target: String,
    tolerance: f32,
    face_seconds: f32,
    phase: Phase,
    pub(crate) token: CancelToken,
}

impl MoveToBehavior {
    pub fn new(target: impl Into<String>, tolerance: f32, face_seconds: f32, token: CancelToken) -> Self {
        let target = target.into();
        Self {
            phase: Phase::Moving(MoveToTask::new(Goal::Object(target.clone()), tolerance)),
            target,
            tolerance,
            face_seconds,
            token,
        }
    }

    pub fn from_command(
        command: &BehaviorCommand,
        config: &BehaviorConfig,
        token: CancelToken,
    ) -> Result<Self, CommandError> {
        let tolerance = approach_tolerance(command.context.text(&["approach"])?);
        let target = command.target.clone().unwrap_or_default();
        Ok(Self::new(target, tolerance, config.face_target_seconds, token))
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn tolerance(&self) -> f32 {
        self.tolerance
    }

    pub(crate) fn tick<W>(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        events: &mut dyn EventSink,
    ) -> TaskStatus
    where
        W: MotorWorld + 'static,
    {
        match &mut self.phase {
            Phase::Moving(task) => match Task::<W>::tick(task, ctx, agent, world, events) {
                TaskStatus::Success => {
                    self.phase = Phase::Facing(LookAtTask::new(
                        Facing::Object(self.target.clone()),
                        self.face_seconds,
                    ));
                    TaskStatus::Running
                }
                other => other,
            },
            Phase::Facing(task) => Task::<W>::tick(task, ctx, agent, world, events),
        }
    }
}
