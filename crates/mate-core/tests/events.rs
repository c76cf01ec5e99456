use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc;

use mate_core::{
    AgentEvent, ChannelSink, EventLog, EventSink, FanoutSink, Failure, TaskOutcome, Vec3,
};

#[derive(Clone, Default)]
struct RcSink(Rc<RefCell<Vec<AgentEvent>>>);

impl EventSink for RcSink {
    fn emit(&mut self, event: AgentEvent) {
        self.0.borrow_mut().push(event);
    }
}

#[test]
fn event_log_collects_in_order() {
    let mut log = EventLog::new();
    log.emit(AgentEvent::ReachedPoint {
        agent: 1,
        point: Vec3::new(1.0, 0.0, 2.0),
    });
    log.emit(AgentEvent::MissingReference {
        agent: 1,
        name: "crate".into(),
    });

    assert_eq!(log.events.len(), 2);
    assert_eq!(log.events[1].agent(), 1);
    assert_eq!(log.drain().len(), 2);
    assert!(log.events.is_empty());
}

#[test]
fn channel_sink_forwards_to_receiver() {
    let (tx, rx) = mpsc::channel();
    let mut sink = ChannelSink::new(tx);

    sink.emit(AgentEvent::PlanFinished {
        agent: 7,
        plan_id: "p".into(),
        outcome: TaskOutcome::Failure(Failure::Timeout),
    });

    let received = rx.try_recv().unwrap();
    assert_eq!(received.agent(), 7);
}

#[test]
fn channel_sink_ignores_dropped_receiver() {
    let (tx, rx) = mpsc::channel();
    drop(rx);
    let mut sink = ChannelSink::new(tx);
    sink.emit(AgentEvent::CommandRejected {
        agent: 1,
        error: "bad json".into(),
    });
}

#[test]
fn fanout_delivers_to_every_registered_sink() {
    let a = RcSink::default();
    let b = RcSink::default();
    let mut fanout = FanoutSink::new();
    fanout.register(Box::new(a.clone()));
    fanout.register(Box::new(b.clone()));

    fanout.emit(AgentEvent::CoverInconsistent {
        agent: 2,
        object: "bush".into(),
    });

    assert_eq!(fanout.len(), 2);
    assert_eq!(a.0.borrow().len(), 1);
    assert_eq!(b.0.borrow().len(), 1);
}

#[test]
fn failure_codes_are_stable() {
    assert_eq!(Failure::Unreachable.code(), "unreachable_position");
    assert_eq!(Failure::PathFailed.code(), "path_failed");
    assert_eq!(Failure::Timeout.code(), "execution_timeout");
    assert_eq!(
        Failure::TargetNotFound("crate".into()).to_string(),
        "target_not_found:crate"
    );
    assert_eq!(Failure::Affordance("needs_key".into()).to_string(), "needs_key");
}
