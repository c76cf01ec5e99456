use mate_affordance::{AffordanceAction, AffordanceValidator};
use mate_core::{AgentEvent, AgentId, EventSink, Failure, Task, TaskStatus, TickContext};

use super::MotorWorld;

/// Affordance-gated interaction. Validation happens here; the physical motion belongs to the
/// engine, so an allowed interaction completes immediately.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractTask {
    action: AffordanceAction,
    object: String,
    validator: AffordanceValidator,
}

impl InteractTask {
    pub fn new(action: AffordanceAction, object: impl Into<String>, validator: AffordanceValidator) -> Self {
        Self {
            action,
            object: object.into(),
            validator,
        }
    }
}

impl<W> Task<W> for InteractTask
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
        let Some(object) = world.find_by_name(&self.object) else {
            tracing::warn!(agent = agent.stable_id(), object = %self.object, "interaction target not found");
            events.emit(AgentEvent::MissingReference {
                agent: agent.stable_id(),
                name: self.object.clone(),
            });
            return TaskStatus::Failure(Failure::TargetNotFound(self.object.clone()));
        };

        let verdict = self
            .validator
            .can_perform(&object, &self.action, world.capability(agent));
        match verdict.reason {
            Some(reason) => {
                let code = reason.code();
                events.emit(AgentEvent::AffordanceRejected {
                    agent: agent.stable_id(),
                    object: object.name,
                    code: code.clone(),
                });
                TaskStatus::Failure(Failure::Affordance(code))
            }
            None => TaskStatus::Success,
        }
    }
}
