use mate_core::{AgentEvent, AgentId, EventSink, Failure, Task, TaskStatus, TickContext, Vec3};

use super::{resolve_goal, MotorWorld};
use crate::Goal;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Start,
    Moving(Vec3),
}

/// Navigate to a point (or named object) and finish once within `tolerance` path distance.
///
/// Fails upfront with `unreachable_position` when the pathfinding service can't reach the goal,
/// and with `path_failed` when the active path is invalidated mid-flight. No retries.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveToTask {
    goal: Goal,
    tolerance: f32,
    phase: Phase,
}

impl MoveToTask {
    pub fn new(goal: Goal, tolerance: f32) -> Self {
        Self {
            goal,
            tolerance: tolerance.max(0.0),
            phase: Phase::Start,
        }
    }

    pub fn to_point(point: Vec3, tolerance: f32) -> Self {
        Self::new(Goal::Point(point), tolerance)
    }

    pub fn tolerance(&self) -> f32 {
        self.tolerance
    }

    /// Resolved goal once movement has started.
    pub fn destination(&self) -> Option<Vec3> {
        match self.phase {
            Phase::Start => None,
            Phase::Moving(point) => Some(point),
        }
    }
}

impl<W> Task<W> for MoveToTask
where
    W: MotorWorld + 'static,
{
    fn tick(
        &mut self,
        _ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        events: &mut dyn EventSink,
    ) -> TaskStatus {
        let Some(position) = world.position(agent) else {
            return TaskStatus::Failure(Failure::AgentMissing);
        };

        let goal = match self.phase {
            Phase::Moving(goal) => goal,
            Phase::Start => {
                let Some((goal, _)) = resolve_goal(&*world, &self.goal) else {
                    let name = match &self.goal {
                        Goal::Object(name) => name.clone(),
                        Goal::Point(_) => String::new(),
                    };
                    tracing::warn!(agent = agent.stable_id(), target = %name, "move target not found");
                    events.emit(AgentEvent::MissingReference {
                        agent: agent.stable_id(),
                        name: name.clone(),
                    });
                    return TaskStatus::Failure(Failure::TargetNotFound(name));
                };

                if position.distance(goal) <= self.tolerance {
                    events.emit(AgentEvent::ReachedPoint {
                        agent: agent.stable_id(),
                        point: goal,
                    });
                    return TaskStatus::Success;
                }

                if !world.reachable(agent, goal) || !world.navigate(agent, goal) {
                    tracing::debug!(agent = agent.stable_id(), ?goal, "goal unreachable");
                    events.emit(AgentEvent::PathBlocked {
                        agent: agent.stable_id(),
                        goal,
                        failure: Failure::Unreachable,
                    });
                    return TaskStatus::Failure(Failure::Unreachable);
                }

                self.phase = Phase::Moving(goal);
                return TaskStatus::Running;
            }
        };

        if world.has_path(agent) && !world.path_valid(agent) {
            world.clear_path(agent);
            tracing::debug!(agent = agent.stable_id(), ?goal, "path invalidated");
            events.emit(AgentEvent::PathBlocked {
                agent: agent.stable_id(),
                goal,
                failure: Failure::PathFailed,
            });
            return TaskStatus::Failure(Failure::PathFailed);
        }

        let remaining = world
            .remaining_distance(agent)
            .unwrap_or_else(|| position.distance(goal));
        if remaining <= self.tolerance {
            world.clear_path(agent);
            events.emit(AgentEvent::ReachedPoint {
                agent: agent.stable_id(),
                point: goal,
            });
            return TaskStatus::Success;
        }

        if !world.has_path(agent) {
            // Someone else dropped our goal.
            events.emit(AgentEvent::PathBlocked {
                agent: agent.stable_id(),
                goal,
                failure: Failure::PathFailed,
            });
            return TaskStatus::Failure(Failure::PathFailed);
        }

        TaskStatus::Running
    }
}
