use mate_core::{EventSink, Task, TaskStatus, TickContext, Vec3};

use super::{MotorWorld, MoveToTask};

/// Visit waypoints in order with `move_to` semantics; the first failed leg aborts the patrol.
#[derive(Debug, Clone, PartialEq)]
pub struct PatrolTask {
    waypoints: Vec<Vec3>,
    tolerance: f32,
    index: usize,
    leg: Option<MoveToTask>,
}

impl PatrolTask {
    pub fn new(waypoints: Vec<Vec3>, tolerance: f32) -> Self {
        Self {
            waypoints,
            tolerance,
            index: 0,
            leg: None,
        }
    }

    /// Waypoints reached so far.
    pub fn visited(&self) -> usize {
        self.index
    }
}

impl<W> Task<W> for PatrolTask
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
        while self.index < self.waypoints.len() {
            let tolerance = self.tolerance;
            let waypoint = self.waypoints[self.index];
            let leg = self
                .leg
                .get_or_insert_with(|| MoveToTask::to_point(waypoint, tolerance));

            match Task::<W>::tick(leg, ctx, agent, world, events) {
                TaskStatus::Running => return TaskStatus::Running,
                TaskStatus::Failure(failure) => return TaskStatus::Failure(failure),
                TaskStatus::Success => {
                    self.leg = None;
                    self.index += 1;
                }
            }
        }
        TaskStatus::Success
    }
}
