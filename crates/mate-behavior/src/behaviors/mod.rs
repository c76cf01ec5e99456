//! The four behavior handlers as one tagged variant with a fixed dispatch table.
//!
//! Every handler holds the [`CancelToken`] shared with the scheduler and checks it before doing
//! any work on a tick; once it is set the handler returns `Cancelled` without touching the world.

mod follow;
mod hold;
mod move_to;
mod take_cover;

pub use follow::FollowBehavior;
pub use hold::HoldBehavior;
pub use move_to::MoveToBehavior;
pub use take_cover::TakeCoverBehavior;

use mate_core::{CancelToken, EventSink, Task, TaskKey, TaskStatus, TickContext};
use mate_exec::MotorWorld;

use crate::{BehaviorCommand, BehaviorConfig, BehaviorVerb, CommandError};

#[derive(Debug, Clone)]
pub enum Behavior {
    Follow(FollowBehavior),
    MoveTo(MoveToBehavior),
    TakeCover(TakeCoverBehavior),
    HoldPosition(HoldBehavior),
}

impl Behavior {
    /// Build the handler for `command`, reading its typed context.
    ///
    /// Unknown verbs become a hold for the command's duration.
    pub fn from_command(
        command: &BehaviorCommand,
        config: &BehaviorConfig,
        token: CancelToken,
    ) -> Result<Self, CommandError> {
        let behavior = match &command.verb {
            BehaviorVerb::Follow => {
                Behavior::Follow(FollowBehavior::from_command(command, config, token)?)
            }
            BehaviorVerb::MoveTo => {
                Behavior::MoveTo(MoveToBehavior::from_command(command, config, token)?)
            }
            BehaviorVerb::TakeCover => {
                Behavior::TakeCover(TakeCoverBehavior::from_command(command, config, token)?)
            }
            BehaviorVerb::HoldPosition => {
                Behavior::HoldPosition(HoldBehavior::from_command(command, config, token)?)
            }
            BehaviorVerb::Other(verb) => {
                tracing::warn!(verb = %verb, command = %command.id, "unknown behavior; holding position");
                Behavior::HoldPosition(HoldBehavior::new(command.duration, None, token))
            }
        };
        Ok(behavior)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Behavior::Follow(_) => "follow",
            Behavior::MoveTo(_) => "move_to",
            Behavior::TakeCover(_) => "take_cover",
            Behavior::HoldPosition(_) => "hold_position",
        }
    }

    pub fn key(&self) -> TaskKey {
        TaskKey(self.name())
    }

    pub fn token(&self) -> &CancelToken {
        match self {
            Behavior::Follow(b) => &b.token,
            Behavior::MoveTo(b) => &b.token,
            Behavior::TakeCover(b) => &b.token,
            Behavior::HoldPosition(b) => &b.token,
        }
    }
}

impl<W> Task<W> for Behavior
where
    W: MotorWorld + 'static,
{
    fn tick(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        events: &mut dyn EventSink,
    ) -> TaskStatus {
        if self.token().is_cancelled() {
            return TaskStatus::Failure(mate_core::Failure::Cancelled);
        }
        match self {
            Behavior::Follow(b) => b.tick(ctx, agent, world, events),
            Behavior::MoveTo(b) => b.tick(ctx, agent, world, events),
            Behavior::TakeCover(b) => b.tick(ctx, agent, world, events),
            Behavior::HoldPosition(b) => b.tick(ctx, agent, world, events),
        }
    }

    fn cancel(&mut self, _ctx: &TickContext, _agent: W::Agent, _events: &mut dyn EventSink) {
        self.token().cancel();
    }
}
