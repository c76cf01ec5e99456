use mate_core::{CancelToken, EventSink, Task, TaskStatus, TickContext};
use mate_exec::primitives::FollowTask;
use mate_exec::MotorWorld;

use crate::{BehaviorCommand, BehaviorConfig, CommandError};

/// Stay near a reference entity for the command duration.
#[derive(Debug, Clone)]
pub struct FollowBehavior {
    follow: FollowTask,
    pub(crate) token: CancelToken,
}

impl FollowBehavior {
    pub fn new(reference: impl Into<String>, distance: f32, duration: f32, token: CancelToken) -> Self {
        Self {
            follow: FollowTask::new(reference, distance, duration),
            token,
        }
    }

    pub fn from_command(
        command: &BehaviorCommand,
        config: &BehaviorConfig,
        token: CancelToken,
    ) -> Result<Self, CommandError> {
        let distance = command
            .context
            .number(&["followDistance", "follow_distance", "distance"])?
            .unwrap_or(config.follow_distance);
        let reference = command
            .target
            .clone()
            .unwrap_or_else(|| config.reference_name.clone());
        Ok(Self::new(reference, distance, command.duration, token))
    }

    pub fn reference(&self) -> &str {
        self.follow.reference()
    }

    pub fn distance(&self) -> f32 {
        self.follow.distance()
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
        Task::<W>::tick(&mut self.follow, ctx, agent, world, events)
    }
}
