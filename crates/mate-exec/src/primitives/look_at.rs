use mate_core::math::{lerp_angle, wrap_angle, yaw_of};
use mate_core::{AgentEvent, AgentId, EventSink, Failure, Task, TaskStatus, TickContext, Timer, Vec3};

use super::MotorWorld;

/// What to turn toward.
#[derive(Debug, Clone, PartialEq)]
pub enum Facing {
    Point(Vec3),
    Object(String),
    /// Absolute heading in radians.
    Yaw(f32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Ramp {
    from: f32,
    to: f32,
}

/// Rotate to a heading linearly over `duration`, ending exactly on it.
#[derive(Debug, Clone, PartialEq)]
pub struct LookAtTask {
    facing: Facing,
    timer: Timer,
    ramp: Option<Ramp>,
}

impl LookAtTask {
    pub fn new(facing: Facing, duration: f32) -> Self {
        Self {
            facing,
            timer: Timer::new(duration),
            ramp: None,
        }
    }

    pub fn facing(&self) -> &Facing {
        &self.facing
    }
}

impl<W> Task<W> for LookAtTask
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
        let ramp = match self.ramp {
            Some(ramp) => ramp,
            None => {
                let (Some(position), Some(yaw)) = (world.position(agent), world.yaw(agent)) else {
                    return TaskStatus::Failure(Failure::AgentMissing);
                };
                let target_yaw = match &self.facing {
                    Facing::Yaw(yaw) => Some(wrap_angle(*yaw)),
                    Facing::Point(point) => yaw_of(*point - position),
                    Facing::Object(name) => match world.find_by_name(name) {
                        Some(entity) => yaw_of(entity.position - position),
                        None => {
                            events.emit(AgentEvent::MissingReference {
                                agent: agent.stable_id(),
                                name: name.clone(),
                            });
                            return TaskStatus::Failure(Failure::TargetNotFound(name.clone()));
                        }
                    },
                };
                // Directly above/below: nothing to turn toward.
                let Some(to) = target_yaw else {
                    return TaskStatus::Success;
                };
                let ramp = Ramp { from: yaw, to };
                self.ramp = Some(ramp);
                ramp
            }
        };

        if self.timer.advance(ctx.dt()) {
            world.set_yaw(agent, ramp.to);
            return TaskStatus::Success;
        }
        world.set_yaw(
            agent,
            wrap_angle(lerp_angle(ramp.from, ramp.to, self.timer.progress())),
        );
        TaskStatus::Running
    }
}
