use mate_core::{
    AgentEvent, AgentId, CancelToken, EventSink, Failure, TaskOutcome, TaskSlot, TickContext,
};
use mate_exec::{CommandExecutor, ExecutionOutcome, ExecutionPlan, ExecutorConfig, MotorWorld};
use serde::Serialize;

use crate::behaviors::HoldBehavior;
use crate::{parse_message, Behavior, BehaviorCommand, BehaviorConfig, CommandError, InboundMessage};

/// Behavior name reported while a multi-step plan holds control.
pub const PLAN_BEHAVIOR: &str = "plan";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulerState {
    Idle,
    Executing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchedulerStatus {
    pub behavior: Option<&'static str>,
    pub state: SchedulerState,
    pub command_id: Option<String>,
}

/// How a dispatched command ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BehaviorReport {
    pub behavior: &'static str,
    pub command_id: String,
    pub outcome: TaskOutcome,
}

impl BehaviorReport {
    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }

    pub fn reason_code(&self) -> &str {
        self.outcome.failure().map_or("success", Failure::code)
    }
}

/// Caller-side view of a dispatched command.
///
/// The token is shared with the running behavior or plan; it is set when the command is
/// preempted or cancelled. Setting it from the caller side stops the command on the next
/// [`BehaviorScheduler::tick`], which reports it as `cancelled`.
#[derive(Debug, Clone)]
pub struct DispatchHandle {
    pub command_id: String,
    pub behavior: &'static str,
    token: CancelToken,
}

impl DispatchHandle {
    pub fn token(&self) -> &CancelToken {
        &self.token
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

#[derive(Debug)]
struct ActiveCommand {
    command_id: String,
    behavior: &'static str,
    token: CancelToken,
}

impl ActiveCommand {
    fn is_plan(&self) -> bool {
        self.behavior == PLAN_BEHAVIOR
    }
}

/// Owns the agent's control: at most one behavior or plan runs at any time.
///
/// Dispatch never queues. Whatever was running has its token set and is detached before the
/// replacement is installed; since cancellation gets no world access, the navigation goal it
/// may have left behind is cleared at the start of the next [`BehaviorScheduler::tick`], before
/// the replacement's first tick.
pub struct BehaviorScheduler<W>
where
    W: MotorWorld + 'static,
{
    config: BehaviorConfig,
    slot: TaskSlot<W, Behavior>,
    executor: CommandExecutor<W>,
    active: Option<ActiveCommand>,
    last_report: Option<BehaviorReport>,
    release_pending: bool,
}

impl<W> BehaviorScheduler<W>
where
    W: MotorWorld + 'static,
{
    pub fn new(config: BehaviorConfig, executor: CommandExecutor<W>) -> Self {
        Self {
            config,
            slot: TaskSlot::default(),
            executor,
            active: None,
            last_report: None,
            release_pending: false,
        }
    }

    pub fn config(&self) -> &BehaviorConfig {
        &self.config
    }

    pub fn executor(&self) -> &CommandExecutor<W> {
        &self.executor
    }

    pub fn current(&self) -> Option<&Behavior> {
        self.slot.current()
    }

    pub fn is_executing(&self) -> bool {
        self.active.is_some()
    }

    pub fn status(&self) -> SchedulerStatus {
        match &self.active {
            Some(active) => SchedulerStatus {
                behavior: Some(active.behavior),
                state: SchedulerState::Executing,
                command_id: Some(active.command_id.clone()),
            },
            None => SchedulerStatus {
                behavior: None,
                state: SchedulerState::Idle,
                command_id: None,
            },
        }
    }

    pub fn last_report(&self) -> Option<&BehaviorReport> {
        self.last_report.as_ref()
    }

    /// Start `command`, preempting whatever holds control.
    ///
    /// The preempted command's navigation goal is released at the start of the next
    /// [`BehaviorScheduler::tick`]; the engine must not advance the agent along its path in
    /// between.
    ///
    /// A command whose context has the wrong shape is rejected and replaced by the fallback
    /// hold under the same command id.
    pub fn dispatch(
        &mut self,
        command: BehaviorCommand,
        ctx: &TickContext,
        agent: W::Agent,
        events: &mut dyn EventSink,
    ) -> DispatchHandle {
        self.stop(ctx, agent, events, true);

        let token = CancelToken::new();
        let behavior = match Behavior::from_command(&command, &self.config, token.clone()) {
            Ok(behavior) => behavior,
            Err(err) => {
                self.reject(&err, agent, events);
                self.fallback(token.clone())
            }
        };
        self.start(command.id, behavior, token, ctx, agent, events)
    }

    /// Parse an inbound message and dispatch it. Unusable messages fall back to a hold.
    pub fn dispatch_message(
        &mut self,
        raw: &str,
        ctx: &TickContext,
        agent: W::Agent,
        events: &mut dyn EventSink,
    ) -> DispatchHandle {
        match parse_message(raw, self.executor.config()) {
            Ok(InboundMessage::Behavior(command)) => self.dispatch(command, ctx, agent, events),
            Ok(InboundMessage::Plan(plan)) => self.dispatch_plan(plan, ctx, agent, events),
            Err(err) => {
                self.stop(ctx, agent, events, true);
                self.reject(&err, agent, events);
                let token = CancelToken::new();
                let command = BehaviorCommand::hold(self.config.fallback_hold_seconds);
                let behavior = self.fallback(token.clone());
                self.start(command.id, behavior, token, ctx, agent, events)
            }
        }
    }

    /// Hand control to the executor for a multi-step plan.
    pub fn dispatch_plan(
        &mut self,
        plan: ExecutionPlan,
        ctx: &TickContext,
        agent: W::Agent,
        events: &mut dyn EventSink,
    ) -> DispatchHandle {
        self.stop(ctx, agent, events, true);

        let token = CancelToken::new();
        let command_id = plan.id.clone();
        self.executor.execute(plan, ctx, agent, events);
        self.announce(&command_id, PLAN_BEHAVIOR, agent, events);
        self.active = Some(ActiveCommand {
            command_id: command_id.clone(),
            behavior: PLAN_BEHAVIOR,
            token: token.clone(),
        });
        DispatchHandle {
            command_id,
            behavior: PLAN_BEHAVIOR,
            token,
        }
    }

    /// Stop whatever holds control without replacing it.
    ///
    /// Like [`BehaviorScheduler::dispatch`], the navigation goal is only released on the next
    /// tick, so the engine should tick the scheduler before moving the agent again.
    pub fn cancel(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        events: &mut dyn EventSink,
    ) -> Option<BehaviorReport> {
        self.stop(ctx, agent, events, false)
    }

    /// Advance the active behavior or plan by one tick. Returns its report on the tick it ends.
    pub fn tick(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        events: &mut dyn EventSink,
    ) -> Option<BehaviorReport> {
        if std::mem::take(&mut self.release_pending) {
            world.clear_path(agent);
        }

        // A plan handle cancelled by the caller stops the executor before it runs another step.
        let plan_cancelled = self
            .active
            .as_ref()
            .is_some_and(|active| active.is_plan() && active.token.is_cancelled());
        if plan_cancelled {
            self.executor.cancel(ctx, agent, events);
        }

        // Always ticked: it also releases the goal of a plan cancelled since the last tick.
        let plan_outcome = self.executor.tick(ctx, agent, world, events);

        let is_plan = self.active.as_ref()?.is_plan();
        let outcome = if plan_cancelled {
            TaskOutcome::Failure(Failure::Cancelled)
        } else if is_plan {
            plan_outcome.map(plan_task_outcome)?
        } else {
            let (_, outcome) = self.slot.tick(ctx, agent, world, events)?;
            if !outcome.is_success() {
                world.clear_path(agent);
            }
            outcome
        };

        let active = self.active.take()?;
        Some(self.finish(active, outcome, agent, events))
    }

    fn start(
        &mut self,
        command_id: String,
        behavior: Behavior,
        token: CancelToken,
        ctx: &TickContext,
        agent: W::Agent,
        events: &mut dyn EventSink,
    ) -> DispatchHandle {
        let name = behavior.name();
        self.slot.replace(behavior.key(), behavior, ctx, agent, events);
        self.announce(&command_id, name, agent, events);
        self.active = Some(ActiveCommand {
            command_id: command_id.clone(),
            behavior: name,
            token: token.clone(),
        });
        DispatchHandle {
            command_id,
            behavior: name,
            token,
        }
    }

    fn announce(
        &self,
        command_id: &str,
        behavior: &'static str,
        agent: W::Agent,
        events: &mut dyn EventSink,
    ) {
        tracing::info!(agent = agent.stable_id(), behavior, command = command_id, "behavior started");
        events.emit(AgentEvent::BehaviorStarted {
            agent: agent.stable_id(),
            behavior,
            command_id: command_id.to_string(),
        });
    }

    fn fallback(&self, token: CancelToken) -> Behavior {
        Behavior::HoldPosition(HoldBehavior::new(
            self.config.fallback_hold_seconds,
            None,
            token,
        ))
    }

    fn reject(&self, err: &CommandError, agent: W::Agent, events: &mut dyn EventSink) {
        tracing::warn!(
            agent = agent.stable_id(),
            error = %err,
            fallback_seconds = self.config.fallback_hold_seconds,
            "command rejected; holding position"
        );
        events.emit(AgentEvent::CommandRejected {
            agent: agent.stable_id(),
            error: err.to_string(),
        });
    }

    /// Detach the active command. `preempted` selects the event published for it.
    fn stop(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        events: &mut dyn EventSink,
        preempted: bool,
    ) -> Option<BehaviorReport> {
        let active = self.active.take()?;
        active.token.cancel();
        if active.is_plan() {
            self.executor.cancel(ctx, agent, events);
        } else {
            self.slot.cancel_current(ctx, agent, events);
            self.release_pending = true;
        }

        let outcome = TaskOutcome::Failure(Failure::Cancelled);
        if preempted {
            tracing::info!(
                agent = agent.stable_id(),
                behavior = active.behavior,
                command = %active.command_id,
                "behavior preempted"
            );
            events.emit(AgentEvent::BehaviorPreempted {
                agent: agent.stable_id(),
                behavior: active.behavior,
                command_id: active.command_id.clone(),
            });
            let report = BehaviorReport {
                behavior: active.behavior,
                command_id: active.command_id,
                outcome,
            };
            self.last_report = Some(report.clone());
            Some(report)
        } else {
            Some(self.finish(active, outcome, agent, events))
        }
    }

    fn finish(
        &mut self,
        active: ActiveCommand,
        outcome: TaskOutcome,
        agent: W::Agent,
        events: &mut dyn EventSink,
    ) -> BehaviorReport {
        let report = BehaviorReport {
            behavior: active.behavior,
            command_id: active.command_id,
            outcome,
        };
        tracing::info!(
            agent = agent.stable_id(),
            behavior = report.behavior,
            command = %report.command_id,
            reason = report.reason_code(),
            "behavior finished"
        );
        events.emit(AgentEvent::BehaviorFinished {
            agent: agent.stable_id(),
            behavior: report.behavior,
            command_id: report.command_id.clone(),
            outcome: report.outcome.clone(),
        });
        self.last_report = Some(report.clone());
        report
    }
}

impl<W> Default for BehaviorScheduler<W>
where
    W: MotorWorld + 'static,
{
    fn default() -> Self {
        Self::new(
            BehaviorConfig::default(),
            CommandExecutor::new(ExecutorConfig::default()),
        )
    }
}

fn plan_task_outcome(outcome: ExecutionOutcome) -> TaskOutcome {
    match outcome.reason {
        None => TaskOutcome::Success,
        Some(failure) => TaskOutcome::Failure(failure),
    }
}
