use mate_core::{AgentEvent, AgentId, EventSink, Failure, Task, TaskStatus, TickContext, Timer, Vec3};

use super::MotorWorld;

/// Reference displacement that warrants a fresh path.
const REPATH_DISTANCE: f32 = 0.5;

/// Keep within `distance` of a named reference for a fixed duration.
///
/// Hysteresis band: beyond `distance + 1` the agent paths toward the reference; within
/// `distance` any active path is cleared; in between, whatever is in progress continues. Ends
/// purely on elapsed time, whether or not the band was reached.
#[derive(Debug, Clone, PartialEq)]
pub struct FollowTask {
    reference: String,
    distance: f32,
    timer: Timer,
    last_goal: Option<Vec3>,
}

impl FollowTask {
    pub fn new(reference: impl Into<String>, distance: f32, duration: f32) -> Self {
        Self {
            reference: reference.into(),
            distance: distance.max(0.0),
            timer: Timer::new(duration),
            last_goal: None,
        }
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn elapsed(&self) -> f32 {
        self.timer.elapsed()
    }
}

impl<W> Task<W> for FollowTask
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
        let Some(position) = world.position(agent) else {
            return TaskStatus::Failure(Failure::AgentMissing);
        };
        let Some(reference) = world.find_by_name(&self.reference) else {
            tracing::warn!(agent = agent.stable_id(), reference = %self.reference, "follow reference not found");
            events.emit(AgentEvent::MissingReference {
                agent: agent.stable_id(),
                name: self.reference.clone(),
            });
            return TaskStatus::Failure(Failure::TargetNotFound(self.reference.clone()));
        };

        if self.timer.advance(ctx.dt()) {
            world.clear_path(agent);
            return TaskStatus::Success;
        }

        let target = reference.position;
        let gap = position.distance(target);
        if gap > self.distance + 1.0 {
            let stale = self
                .last_goal
                .is_none_or(|goal| goal.distance(target) > REPATH_DISTANCE);
            if stale || !world.has_path(agent) {
                if world.navigate(agent, target) {
                    self.last_goal = Some(target);
                } else {
                    tracing::debug!(agent = agent.stable_id(), ?target, "follow path failed; retrying next tick");
                    self.last_goal = None;
                }
            }
        } else if gap <= self.distance && world.has_path(agent) {
            world.clear_path(agent);
            self.last_goal = None;
        }

        TaskStatus::Running
    }
}
