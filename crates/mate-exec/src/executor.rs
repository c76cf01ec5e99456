use mate_affordance::AffordanceValidator;
use mate_core::{
    AgentEvent, AgentId, EventSink, Failure, Task, TaskOutcome, TaskStatus, TickContext, Timer,
};

use crate::primitives::{build_task, MotorWorld};
use crate::{ExecutionOutcome, ExecutionPlan, ExecutionState, ExecutorConfig};

struct ActivePlan<W>
where
    W: MotorWorld + 'static,
{
    plan: ExecutionPlan,
    index: usize,
    current: Option<Box<dyn Task<W>>>,
    clock: Timer,
}

/// Runs one [`ExecutionPlan`] at a time as a state machine:
/// `Idle -> Executing -> {Success, Failed, Timeout, Cancelled} -> Idle`.
///
/// Steps run strictly in order. The plan clock is checked before each step and on every tick;
/// once it is past `timeout` the plan ends with `Timeout` whatever the step progress. The first
/// failing step aborts the rest of the plan.
pub struct CommandExecutor<W>
where
    W: MotorWorld + 'static,
{
    config: ExecutorConfig,
    validator: AffordanceValidator,
    active: Option<ActivePlan<W>>,
    last_outcome: Option<ExecutionOutcome>,
    /// A plan was cancelled without world access; clear the navigation goal on the next tick.
    release_pending: bool,
}

impl<W> CommandExecutor<W>
where
    W: MotorWorld + 'static,
{
    pub fn new(config: ExecutorConfig) -> Self {
        Self {
            config,
            validator: AffordanceValidator::default(),
            active: None,
            last_outcome: None,
            release_pending: false,
        }
    }

    pub fn with_validator(mut self, validator: AffordanceValidator) -> Self {
        self.validator = validator;
        self
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    pub fn state(&self) -> ExecutionState {
        if self.active.is_some() {
            ExecutionState::Executing
        } else {
            ExecutionState::Idle
        }
    }

    pub fn is_executing(&self) -> bool {
        self.active.is_some()
    }

    pub fn plan_id(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.plan.id.as_str())
    }

    /// Index of the step currently running.
    pub fn current_step(&self) -> Option<usize> {
        self.active.as_ref().map(|a| a.index)
    }

    pub fn last_outcome(&self) -> Option<&ExecutionOutcome> {
        self.last_outcome.as_ref()
    }

    /// Start `plan`, cancelling any plan in flight first. Returns the cancelled plan's outcome.
    pub fn execute(
        &mut self,
        plan: ExecutionPlan,
        ctx: &TickContext,
        agent: W::Agent,
        events: &mut dyn EventSink,
    ) -> Option<ExecutionOutcome> {
        let cancelled = self.cancel(ctx, agent, events);

        tracing::info!(
            agent = agent.stable_id(),
            plan = %plan.id,
            steps = plan.len(),
            "plan started"
        );
        events.emit(AgentEvent::PlanStarted {
            agent: agent.stable_id(),
            plan_id: plan.id.clone(),
            steps: plan.len(),
        });
        self.active = Some(ActivePlan {
            plan,
            index: 0,
            current: None,
            clock: Timer::new(self.config.timeout),
        });
        cancelled
    }

    /// Stop the plan in flight without touching the world. Returns its outcome.
    pub fn cancel(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        events: &mut dyn EventSink,
    ) -> Option<ExecutionOutcome> {
        let mut active = self.active.take()?;
        if let Some(current) = active.current.as_mut() {
            current.cancel(ctx, agent, events);
        }
        self.release_pending = true;
        Some(self.finish(
            active,
            ExecutionState::Cancelled,
            Some(Failure::Cancelled),
            agent,
            events,
        ))
    }

    /// Advance the plan by one tick. Returns the outcome on the tick the plan ends.
    pub fn tick(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        events: &mut dyn EventSink,
    ) -> Option<ExecutionOutcome> {
        if std::mem::take(&mut self.release_pending) {
            world.clear_path(agent);
        }

        let mut active = self.active.take()?;
        active.clock.advance(ctx.dt());

        // Steps after the first one in a tick start with no time budget.
        let mut step_ctx = *ctx;
        loop {
            if active.clock.exceeded() {
                world.clear_path(agent);
                tracing::warn!(
                    agent = agent.stable_id(),
                    plan = %active.plan.id,
                    elapsed = active.clock.elapsed(),
                    "plan timed out"
                );
                return Some(self.finish(
                    active,
                    ExecutionState::Timeout,
                    Some(Failure::Timeout),
                    agent,
                    events,
                ));
            }

            let Some(step) = active.plan.steps.get(active.index) else {
                return Some(self.finish(active, ExecutionState::Success, None, agent, events));
            };

            if active.current.is_none() {
                tracing::debug!(
                    agent = agent.stable_id(),
                    plan = %active.plan.id,
                    index = active.index,
                    action = step.name(),
                    "step started"
                );
                events.emit(AgentEvent::StepStarted {
                    agent: agent.stable_id(),
                    plan_id: active.plan.id.clone(),
                    index: active.index,
                    action: step.name().to_string(),
                });
            }
            let task = active
                .current
                .get_or_insert_with(|| build_task(step, &self.config, self.validator));

            let outcome = match task.tick(&step_ctx, agent, world, events) {
                TaskStatus::Running => {
                    self.active = Some(active);
                    return None;
                }
                TaskStatus::Success => TaskOutcome::Success,
                TaskStatus::Failure(failure) => TaskOutcome::Failure(failure),
            };

            events.emit(AgentEvent::StepFinished {
                agent: agent.stable_id(),
                plan_id: active.plan.id.clone(),
                index: active.index,
                outcome: outcome.clone(),
            });
            active.current = None;

            if let TaskOutcome::Failure(failure) = outcome {
                world.clear_path(agent);
                tracing::warn!(
                    agent = agent.stable_id(),
                    plan = %active.plan.id,
                    index = active.index,
                    reason = %failure,
                    "step failed; aborting plan"
                );
                return Some(self.finish(
                    active,
                    ExecutionState::Failed,
                    Some(failure),
                    agent,
                    events,
                ));
            }

            active.index += 1;
            step_ctx = TickContext::new(ctx.tick, 0.0);
        }
    }

    fn finish(
        &mut self,
        active: ActivePlan<W>,
        state: ExecutionState,
        reason: Option<Failure>,
        agent: W::Agent,
        events: &mut dyn EventSink,
    ) -> ExecutionOutcome {
        let outcome = ExecutionOutcome {
            plan_id: active.plan.id,
            state,
            reason,
            steps_completed: active.index,
            elapsed: active.clock.elapsed(),
        };

        tracing::info!(
            agent = agent.stable_id(),
            plan = %outcome.plan_id,
            state = %outcome.state,
            reason = outcome.reason_code(),
            steps_completed = outcome.steps_completed,
            "plan finished"
        );
        events.emit(AgentEvent::PlanFinished {
            agent: agent.stable_id(),
            plan_id: outcome.plan_id.clone(),
            outcome: match &outcome.reason {
                None => TaskOutcome::Success,
                Some(failure) => TaskOutcome::Failure(failure.clone()),
            },
        });

        self.last_outcome = Some(outcome.clone());
        outcome
    }
}

impl<W> Default for CommandExecutor<W>
where
    W: MotorWorld + 'static,
{
    fn default() -> Self {
        Self::new(ExecutorConfig::default())
    }
}
