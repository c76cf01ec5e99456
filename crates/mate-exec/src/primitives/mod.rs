//! Motion primitives as cooperative tasks.
//!
//! Each primitive does a bounded amount of work per tick and yields; its suspension points are
//! awaiting path completion, awaiting an elapsed duration, and awaiting a rotation ramp. Behavior
//! handlers reuse these directly.

mod follow;
mod hold;
mod interact;
mod look_at;
mod move_to;
mod patrol;

pub use follow::FollowTask;
pub use hold::{HoldTask, Scan, WaitTask};
pub use interact::InteractTask;
pub use look_at::{Facing, LookAtTask};
pub use move_to::MoveToTask;
pub use patrol::PatrolTask;

use mate_affordance::AffordanceValidator;
use mate_core::{
    AgentPoseMut, EntityQuery, EventSink, Task, TaskStatus, TickContext, Vec3, WorldEntity,
};
use mate_nav::Pathfinding;

use crate::step::interaction_action;
use crate::{ExecutorConfig, Goal, Step};

/// Everything a primitive may touch: pathfinding, orientation, and the entity registry.
pub trait MotorWorld: Pathfinding + AgentPoseMut + EntityQuery {}

impl<W> MotorWorld for W where W: Pathfinding + AgentPoseMut + EntityQuery {}

/// Runtime task for one typed step.
pub fn build_task<W>(
    step: &Step,
    config: &ExecutorConfig,
    validator: AffordanceValidator,
) -> Box<dyn Task<W>>
where
    W: MotorWorld + 'static,
{
    match step {
        Step::MoveTo { goal, tolerance } => Box::new(MoveToTask::new(goal.clone(), *tolerance)),
        Step::FollowPlayer { distance, duration } => Box::new(FollowTask::new(
            config.reference_name.clone(),
            *distance,
            *duration,
        )),
        Step::Patrol {
            waypoints,
            tolerance,
        } => Box::new(PatrolTask::new(waypoints.clone(), *tolerance)),
        Step::LookAt { goal, duration } => {
            let facing = match goal {
                Goal::Point(point) => Facing::Point(*point),
                Goal::Object(name) => Facing::Object(name.clone()),
            };
            Box::new(LookAtTask::new(facing, *duration))
        }
        Step::HoldPosition { duration } => Box::new(HoldTask::new(*duration)),
        Step::Wait { duration } => Box::new(WaitTask::new(*duration)),
        Step::Interact { verb, object } => Box::new(InteractTask::new(
            interaction_action(verb),
            object.clone(),
            validator,
        )),
        Step::Unknown { verb } => {
            tracing::warn!(action = %verb, "unknown step; running as no-op");
            Box::new(NoopTask)
        }
    }
}

/// Completes immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTask;

impl<W> Task<W> for NoopTask
where
    W: MotorWorld + 'static,
{
    fn tick(
        &mut self,
        _ctx: &TickContext,
        _agent: W::Agent,
        _world: &mut W,
        _events: &mut dyn EventSink,
    ) -> TaskStatus {
        TaskStatus::Success
    }
}

pub(crate) fn resolve_goal<W>(world: &W, goal: &Goal) -> Option<(Vec3, Option<WorldEntity>)>
where
    W: EntityQuery,
{
    match goal {
        Goal::Point(point) => Some((*point, None)),
        Goal::Object(name) => world
            .find_by_name(name)
            .map(|entity| (entity.position, Some(entity))),
    }
}
