//! Typed progress/ack/completion notifications.
//!
//! Subsystems publish [`AgentEvent`]s into an injected [`EventSink`]; consumers register once
//! (directly, through a [`FanoutSink`], or on the receiving end of a [`ChannelSink`]).

use std::sync::mpsc::Sender;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::{Failure, TaskOutcome, Vec3};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "event", rename_all = "snake_case"))]
pub enum AgentEvent {
    BehaviorStarted {
        agent: u64,
        behavior: &'static str,
        command_id: String,
    },
    BehaviorPreempted {
        agent: u64,
        behavior: &'static str,
        command_id: String,
    },
    BehaviorFinished {
        agent: u64,
        behavior: &'static str,
        command_id: String,
        outcome: TaskOutcome,
    },
    /// An inbound message could not be parsed; the fallback command was used instead.
    CommandRejected { agent: u64, error: String },
    PlanStarted {
        agent: u64,
        plan_id: String,
        steps: usize,
    },
    StepStarted {
        agent: u64,
        plan_id: String,
        index: usize,
        action: String,
    },
    StepFinished {
        agent: u64,
        plan_id: String,
        index: usize,
        outcome: TaskOutcome,
    },
    PlanFinished {
        agent: u64,
        plan_id: String,
        outcome: TaskOutcome,
    },
    ReachedPoint { agent: u64, point: Vec3 },
    PathBlocked {
        agent: u64,
        goal: Vec3,
        failure: Failure,
    },
    MissingReference { agent: u64, name: String },
    AffordanceRejected {
        agent: u64,
        object: String,
        code: String,
    },
    /// A cover target without a cover-capable descriptor was used anyway.
    CoverInconsistent { agent: u64, object: String },
}

impl AgentEvent {
    pub fn agent(&self) -> u64 {
        match self {
            AgentEvent::BehaviorStarted { agent, .. }
            | AgentEvent::BehaviorPreempted { agent, .. }
            | AgentEvent::BehaviorFinished { agent, .. }
            | AgentEvent::CommandRejected { agent, .. }
            | AgentEvent::PlanStarted { agent, .. }
            | AgentEvent::StepStarted { agent, .. }
            | AgentEvent::StepFinished { agent, .. }
            | AgentEvent::PlanFinished { agent, .. }
            | AgentEvent::ReachedPoint { agent, .. }
            | AgentEvent::PathBlocked { agent, .. }
            | AgentEvent::MissingReference { agent, .. }
            | AgentEvent::AffordanceRejected { agent, .. }
            | AgentEvent::CoverInconsistent { agent, .. } => *agent,
        }
    }
}

pub trait EventSink {
    fn emit(&mut self, event: AgentEvent);
}

#[derive(Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: AgentEvent) {}
}

/// In-memory event collection.
#[derive(Debug, Default, PartialEq)]
pub struct EventLog {
    pub events: Vec<AgentEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn drain(&mut self) -> Vec<AgentEvent> {
        std::mem::take(&mut self.events)
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: AgentEvent) {
        self.events.push(event);
    }
}

/// Forwards events to an `mpsc` receiver owned by another consumer.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: Sender<AgentEvent>,
}

impl ChannelSink {
    pub fn new(tx: Sender<AgentEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelSink {
    fn emit(&mut self, event: AgentEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("event receiver dropped; discarding event");
        }
    }
}

/// Delivers each event to every registered sink, in registration order.
#[derive(Default)]
pub struct FanoutSink {
    sinks: Vec<Box<dyn EventSink>>,
}

impl FanoutSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl EventSink for FanoutSink {
    fn emit(&mut self, event: AgentEvent) {
        if let Some((last, rest)) = self.sinks.split_last_mut() {
            for sink in rest {
                sink.emit(event.clone());
            }
            last.emit(event);
        }
    }
}
