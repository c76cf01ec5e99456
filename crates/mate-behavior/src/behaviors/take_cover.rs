use mate_core::math::yaw_of;
use mate_core::{AgentEvent, AgentId, CancelToken, EventSink, Failure, Task, TaskStatus, TickContext, Vec3};
use mate_exec::primitives::{Facing, LookAtTask, MoveToTask};
use mate_exec::MotorWorld;
use mate_perception::Direction;

use crate::{BehaviorCommand, BehaviorConfig, CommandError};

#[derive(Debug, Clone, PartialEq)]
enum Phase {
    Start,
    Moving(MoveToTask),
    Facing(LookAtTask),
}

/// Put a cover object between the agent and a threat direction, then face the threat.
///
/// The stand point is `cover - threat_dir * offset` at the agent's own elevation, where the
/// threat direction is taken relative to the agent's facing when the behavior starts.
#[derive(Debug, Clone)]
pub struct TakeCoverBehavior {
    cover: String,
    threat: Direction,
    tolerance: f32,
    offset: f32,
    face_seconds: f32,
    stand_point: Option<Vec3>,
    threat_world: Vec3,
    phase: Phase,
    pub(crate) token: CancelToken,
}

impl TakeCoverBehavior {
    pub fn from_command(
        command: &BehaviorCommand,
        config: &BehaviorConfig,
        token: CancelToken,
    ) -> Result<Self, CommandError> {
        let threat = match command.context.text(&["threatDirection", "threat_direction"])? {
            Some(label) => Direction::from_label(label).unwrap_or_else(|| {
                tracing::warn!(label, "unknown threat direction; assuming ahead");
                Direction::Ahead
            }),
            None => Direction::Ahead,
        };
        let tolerance = match command.context.text(&["urgency"])? {
            Some(urgency) if urgency.eq_ignore_ascii_case("high") => 2.0,
            _ => 1.0,
        };
        Ok(Self {
            cover: command.target.clone().unwrap_or_default(),
            threat,
            tolerance,
            offset: config.cover_offset,
            face_seconds: config.face_threat_seconds,
            stand_point: None,
            threat_world: Vec3::FORWARD,
            phase: Phase::Start,
            token,
        })
    }

    pub fn cover(&self) -> &str {
        &self.cover
    }

    pub fn threat(&self) -> Direction {
        self.threat
    }

    pub fn tolerance(&self) -> f32 {
        self.tolerance
    }

    /// Computed on the first tick.
    pub fn stand_point(&self) -> Option<Vec3> {
        self.stand_point
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
            Phase::Start => {
                let (Some(position), Some(yaw)) = (world.position(agent), world.yaw(agent)) else {
                    return TaskStatus::Failure(Failure::AgentMissing);
                };
                let Some(cover) = world.find_by_name(&self.cover) else {
                    tracing::warn!(agent = agent.stable_id(), cover = %self.cover, "cover object not found");
                    events.emit(AgentEvent::MissingReference {
                        agent: agent.stable_id(),
                        name: self.cover.clone(),
                    });
                    return TaskStatus::Failure(Failure::TargetNotFound(self.cover.clone()));
                };
                if !cover.is_cover() {
                    tracing::warn!(agent = agent.stable_id(), cover = %cover.name, "object is not declared as cover; using it anyway");
                    events.emit(AgentEvent::CoverInconsistent {
                        agent: agent.stable_id(),
                        object: cover.name.clone(),
                    });
                }

                let threat = self.threat.to_world(yaw);
                let stand = (cover.position - threat * self.offset).with_y(position.y);
                self.stand_point = Some(stand);
                self.threat_world = threat;
                tracing::debug!(agent = agent.stable_id(), cover = %cover.name, ?stand, "taking cover");

                let mut moving = MoveToTask::to_point(stand, self.tolerance);
                let status = Task::<W>::tick(&mut moving, ctx, agent, world, events);
                self.phase = Phase::Moving(moving);
                self.after_move(status, threat)
            }
            Phase::Moving(task) => {
                let status = Task::<W>::tick(task, ctx, agent, world, events);
                let threat = self.threat_world;
                self.after_move(status, threat)
            }
            Phase::Facing(task) => Task::<W>::tick(task, ctx, agent, world, events),
        }
    }

    fn after_move(&mut self, status: TaskStatus, threat: Vec3) -> TaskStatus {
        match status {
            TaskStatus::Success => {
                let facing = Facing::Yaw(yaw_of(threat).unwrap_or(0.0));
                self.phase = Phase::Facing(LookAtTask::new(facing, self.face_seconds));
                TaskStatus::Running
            }
            other => other,
        }
    }
}
