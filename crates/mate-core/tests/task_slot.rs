use mate_core::{
    EventLog, EventSink, Failure, Task, TaskKey, TaskOutcome, TaskSlot, TaskStatus, TickContext,
    WorldMut, WorldView,
};

#[derive(Default)]
struct TestWorld {
    log: Vec<&'static str>,
}

impl WorldView for TestWorld {
    type Agent = u64;
}

impl WorldMut for TestWorld {}

#[derive(Default)]
struct Canceled(std::rc::Rc<std::cell::RefCell<Vec<&'static str>>>);

struct LoopTask {
    name: &'static str,
    canceled: std::rc::Rc<std::cell::RefCell<Vec<&'static str>>>,
}

impl Task<TestWorld> for LoopTask {
    fn tick(
        &mut self,
        _ctx: &TickContext,
        _agent: u64,
        world: &mut TestWorld,
        _events: &mut dyn EventSink,
    ) -> TaskStatus {
        world.log.push(self.name);
        TaskStatus::Running
    }

    fn cancel(&mut self, _ctx: &TickContext, _agent: u64, _events: &mut dyn EventSink) {
        self.canceled.borrow_mut().push(self.name);
    }
}

struct FailOnce;

impl Task<TestWorld> for FailOnce {
    fn tick(
        &mut self,
        _ctx: &TickContext,
        _agent: u64,
        world: &mut TestWorld,
        _events: &mut dyn EventSink,
    ) -> TaskStatus {
        world.log.push("fail");
        TaskStatus::Failure(Failure::PathFailed)
    }
}

fn ctx(tick: u64) -> TickContext {
    TickContext::new(tick, 0.1)
}

#[test]
fn replace_cancels_previous_task_even_with_same_key() {
    let canceled = Canceled::default();
    let mut slot: TaskSlot<TestWorld> = TaskSlot::default();
    let mut world = TestWorld::default();
    let mut events = EventLog::new();
    let key = TaskKey("behavior");

    let first = LoopTask {
        name: "old",
        canceled: canceled.0.clone(),
    };
    assert_eq!(slot.replace(key, Box::new(first), &ctx(0), 1, &mut events), None);
    slot.tick(&ctx(0), 1, &mut world, &mut events);

    let second = LoopTask {
        name: "new",
        canceled: canceled.0.clone(),
    };
    assert_eq!(
        slot.replace(key, Box::new(second), &ctx(1), 1, &mut events),
        Some(key)
    );
    slot.tick(&ctx(1), 1, &mut world, &mut events);

    assert_eq!(*canceled.0.borrow(), vec!["old"]);
    assert_eq!(world.log, vec!["old", "new"]);
}

#[test]
fn finished_task_leaves_slot_idle_with_outcome() {
    let mut slot: TaskSlot<TestWorld> = TaskSlot::default();
    let mut world = TestWorld::default();
    let mut events = EventLog::new();
    let key = TaskKey("step");

    slot.replace(key, Box::new(FailOnce), &ctx(0), 1, &mut events);
    let finished = slot.tick(&ctx(0), 1, &mut world, &mut events);

    assert_eq!(
        finished,
        Some((key, TaskOutcome::Failure(Failure::PathFailed)))
    );
    assert!(slot.is_idle());
    assert_eq!(
        slot.take_just_finished(key),
        Some(TaskOutcome::Failure(Failure::PathFailed))
    );
    assert_eq!(slot.take_just_finished(key), None);
    assert_eq!(slot.tick(&ctx(1), 1, &mut world, &mut events), None);
}

#[test]
fn cancel_current_never_ticks_again() {
    let canceled = Canceled::default();
    let mut slot: TaskSlot<TestWorld> = TaskSlot::default();
    let mut world = TestWorld::default();
    let mut events = EventLog::new();

    slot.replace(
        TaskKey("a"),
        Box::new(LoopTask {
            name: "a",
            canceled: canceled.0.clone(),
        }),
        &ctx(0),
        1,
        &mut events,
    );
    slot.tick(&ctx(0), 1, &mut world, &mut events);
    assert_eq!(slot.cancel_current(&ctx(1), 1, &mut events), Some(TaskKey("a")));
    slot.tick(&ctx(2), 1, &mut world, &mut events);

    assert_eq!(world.log, vec!["a"]);
    assert_eq!(*canceled.0.borrow(), vec!["a"]);
}
