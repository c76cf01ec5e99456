//! Cooperative, tick-driven tasks.
//!
//! Long-running work (navigation, holds, rotation ramps) is an explicit state object that does a
//! bounded amount of work per [`Task::tick`] and then yields by returning
//! [`TaskStatus::Running`]. Nothing here blocks; a task that never yields can't be timed out.

use core::fmt;
use core::marker::PhantomData;
use std::cell::Cell;
use std::rc::Rc;

use crate::{EventSink, TickContext, WorldMut};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Why a task (step, plan or behavior) ended without success.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "code", content = "detail", rename_all = "snake_case"))]
pub enum Failure {
    /// Pre-flight reachability query failed.
    Unreachable,
    /// Path became invalid while moving.
    PathFailed,
    /// A named target/reference is not in the registry.
    TargetNotFound(String),
    /// The agent vanished from the world mid-task.
    AgentMissing,
    Timeout,
    Cancelled,
    /// Rejected by the affordance validator; carries the rejection code.
    Affordance(String),
}

impl Failure {
    /// Stable reason code reported to the planner.
    pub fn code(&self) -> &str {
        match self {
            Failure::Unreachable => "unreachable_position",
            Failure::PathFailed => "path_failed",
            Failure::TargetNotFound(_) => "target_not_found",
            Failure::AgentMissing => "agent_missing",
            Failure::Timeout => "execution_timeout",
            Failure::Cancelled => "cancelled",
            Failure::Affordance(code) => code,
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::TargetNotFound(name) => write!(f, "target_not_found:{name}"),
            other => f.write_str(other.code()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    Running,
    Success,
    Failure(Failure),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TaskOutcome {
    Success,
    Failure(Failure),
}

impl TaskOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, TaskOutcome::Success)
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            TaskOutcome::Success => None,
            TaskOutcome::Failure(failure) => Some(failure),
        }
    }
}

impl From<TaskOutcome> for TaskStatus {
    fn from(value: TaskOutcome) -> Self {
        match value {
            TaskOutcome::Success => TaskStatus::Success,
            TaskOutcome::Failure(failure) => TaskStatus::Failure(failure),
        }
    }
}

impl TaskStatus {
    pub fn outcome(self) -> Option<TaskOutcome> {
        match self {
            TaskStatus::Running => None,
            TaskStatus::Success => Some(TaskOutcome::Success),
            TaskStatus::Failure(failure) => Some(TaskOutcome::Failure(failure)),
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, TaskStatus::Running)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskKey(pub &'static str);

/// Shared cooperative cancellation flag.
///
/// Single-threaded by construction: the whole agent runs on one tick loop.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

pub trait Task<W>: 'static
where
    W: WorldMut + 'static,
{
    fn tick(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        events: &mut dyn EventSink,
    ) -> TaskStatus;

    /// Stop the task. Cancellation never receives the world: a cancelled task can't mutate
    /// agent state.
    fn cancel(&mut self, _ctx: &TickContext, _agent: W::Agent, _events: &mut dyn EventSink) {}
}

impl<W> Task<W> for Box<dyn Task<W>>
where
    W: WorldMut + 'static,
{
    fn tick(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        events: &mut dyn EventSink,
    ) -> TaskStatus {
        (**self).tick(ctx, agent, world, events)
    }

    fn cancel(&mut self, ctx: &TickContext, agent: W::Agent, events: &mut dyn EventSink) {
        (**self).cancel(ctx, agent, events)
    }
}

struct RunningTask<T> {
    key: TaskKey,
    task: T,
}

/// Single-slot runner: at most one task is live at any time.
///
/// Installing a task always cancels and drops the previous one first, so the old task never
/// sees another tick.
pub struct TaskSlot<W, T = Box<dyn Task<W>>>
where
    W: WorldMut + 'static,
    T: Task<W>,
{
    current: Option<RunningTask<T>>,
    just_finished: Option<(TaskKey, TaskOutcome)>,
    _world: PhantomData<fn(&mut W)>,
}

impl<W, T> TaskSlot<W, T>
where
    W: WorldMut + 'static,
    T: Task<W>,
{
    pub fn current_key(&self) -> Option<TaskKey> {
        self.current.as_ref().map(|t| t.key)
    }

    pub fn current(&self) -> Option<&T> {
        self.current.as_ref().map(|t| &t.task)
    }

    pub fn is_running(&self, key: TaskKey) -> bool {
        self.current_key() == Some(key)
    }

    pub fn is_idle(&self) -> bool {
        self.current.is_none()
    }

    /// Cancel and drop the current task, returning its key.
    pub fn cancel_current(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        events: &mut dyn EventSink,
    ) -> Option<TaskKey> {
        let mut current = self.current.take()?;
        current.task.cancel(ctx, agent, events);
        self.just_finished = None;
        Some(current.key)
    }

    /// Install `task`, preempting whatever is running (even under the same key).
    ///
    /// Returns the key of the preempted task, if any.
    pub fn replace(
        &mut self,
        key: TaskKey,
        task: T,
        ctx: &TickContext,
        agent: W::Agent,
        events: &mut dyn EventSink,
    ) -> Option<TaskKey> {
        let preempted = self.cancel_current(ctx, agent, events);
        self.current = Some(RunningTask { key, task });
        self.just_finished = None;
        preempted
    }

    pub fn tick(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        events: &mut dyn EventSink,
    ) -> Option<(TaskKey, TaskOutcome)> {
        let current = self.current.as_mut()?;

        let status = current.task.tick(ctx, agent, world, events);
        let outcome = status.outcome()?;
        let key = current.key;

        self.current = None;
        self.just_finished = Some((key, outcome.clone()));
        Some((key, outcome))
    }

    pub fn take_just_finished(&mut self, key: TaskKey) -> Option<TaskOutcome> {
        let finished = matches!(&self.just_finished, Some((finished_key, _)) if *finished_key == key);
        if !finished {
            return None;
        }
        self.just_finished.take().map(|(_, outcome)| outcome)
    }
}

impl<W, T> Default for TaskSlot<W, T>
where
    W: WorldMut + 'static,
    T: Task<W>,
{
    fn default() -> Self {
        Self {
            current: None,
            just_finished: None,
            _world: PhantomData,
        }
    }
}
