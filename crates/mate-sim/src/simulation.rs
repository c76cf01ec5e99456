use std::collections::VecDeque;

use mate_behavior::{BehaviorReport, BehaviorScheduler};
use mate_core::{AgentEvent, EntityQuery, EventLog, TickContext, Vec3};
use mate_exec::CommandExecutor;
use mate_perception::{PerceptionEncoder, PerceptionMessage};
use serde::Serialize;

use crate::scenario::AGENT;
use crate::{MateConfig, Scenario, ScenarioError, SimWorld, TimelineAction, TimelineEntry};

/// Tolerance when comparing the clock against timeline times.
const TIME_EPSILON: f32 = 1e-4;

/// Everything that happened during one tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickReport {
    pub tick: u64,
    /// Simulated seconds at the end of the tick.
    pub time: f32,
    pub perception: Option<PerceptionMessage>,
    /// Commands that ended this tick, including ones cancelled from the timeline.
    pub reports: Vec<BehaviorReport>,
    pub events: Vec<AgentEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub elapsed: f32,
    pub emissions: usize,
    pub reports: Vec<BehaviorReport>,
    pub final_position: Option<Vec3>,
    pub active_behavior: Option<&'static str>,
}

/// One agent's full loop: timeline, scheduler, engine step, then perception.
pub struct Simulation {
    world: SimWorld,
    scheduler: BehaviorScheduler<SimWorld>,
    encoder: PerceptionEncoder,
    timeline: VecDeque<TimelineEntry>,
    events: EventLog,
    dt: f32,
    tick: u64,
    clock: f32,
}

impl Simulation {
    pub fn new(scenario: &Scenario, config: &MateConfig) -> Result<Self, ScenarioError> {
        let world = scenario.build_world(&config.nav)?;
        let scheduler = BehaviorScheduler::new(
            config.behavior.clone(),
            CommandExecutor::new(config.executor.clone()),
        );
        Ok(Self {
            world,
            scheduler,
            encoder: PerceptionEncoder::new(config.perception.clone()),
            timeline: scenario.timeline.iter().cloned().collect(),
            events: EventLog::new(),
            dt: config.tick_seconds,
            tick: 0,
            clock: 0.0,
        })
    }

    pub fn world(&self) -> &SimWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut SimWorld {
        &mut self.world
    }

    pub fn scheduler(&self) -> &BehaviorScheduler<SimWorld> {
        &self.scheduler
    }

    pub fn clock(&self) -> f32 {
        self.clock
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Dispatch an inbound message now, outside the timeline.
    pub fn send(&mut self, raw: &str) {
        let ctx = TickContext::new(self.tick, 0.0);
        self.scheduler
            .dispatch_message(raw, &ctx, AGENT, &mut self.events);
    }

    pub fn step(&mut self) -> TickReport {
        self.tick += 1;
        let ctx = TickContext::new(self.tick, self.dt);

        let mut reports = self.apply_due();
        reports.extend(
            self.scheduler
                .tick(&ctx, AGENT, &mut self.world, &mut self.events),
        );
        self.world.step(self.dt);
        self.clock += self.dt;

        let perception = self
            .encoder
            .tick(&ctx, AGENT, &self.world)
            .map(|snapshot| PerceptionMessage::from_snapshot(&snapshot));

        TickReport {
            tick: self.tick,
            time: self.clock,
            perception,
            reports,
            events: self.events.drain(),
        }
    }

    /// Run for `seconds` of simulated time, handing every tick to `observe`.
    pub fn run_with<F>(&mut self, seconds: f32, mut observe: F) -> RunSummary
    where
        F: FnMut(&TickReport),
    {
        let ticks = (seconds / self.dt - TIME_EPSILON).ceil().max(0.0) as u64;
        let mut emissions = 0;
        let mut reports = Vec::new();
        for _ in 0..ticks {
            let tick = self.step();
            emissions += usize::from(tick.perception.is_some());
            reports.extend(tick.reports.iter().cloned());
            observe(&tick);
        }

        let summary = RunSummary {
            ticks,
            elapsed: self.clock,
            emissions,
            reports,
            final_position: mate_core::AgentPose::position(&self.world, AGENT),
            active_behavior: self.scheduler.status().behavior,
        };
        tracing::info!(
            ticks = summary.ticks,
            emissions = summary.emissions,
            reports = summary.reports.len(),
            "run finished"
        );
        summary
    }

    pub fn run(&mut self, seconds: f32) -> RunSummary {
        self.run_with(seconds, |_| {})
    }

    fn apply_due(&mut self) -> Vec<BehaviorReport> {
        let mut reports = Vec::new();
        let ctx = TickContext::new(self.tick, 0.0);
        while self
            .timeline
            .front()
            .is_some_and(|entry| entry.at <= self.clock + TIME_EPSILON)
        {
            let Some(entry) = self.timeline.pop_front() else {
                break;
            };
            tracing::debug!(at = entry.at, tick = self.tick, "timeline entry due");
            match &entry.action {
                TimelineAction::Message { .. } => {
                    if let Some(raw) = entry.action.message_text() {
                        self.scheduler
                            .dispatch_message(&raw, &ctx, AGENT, &mut self.events);
                    }
                }
                TimelineAction::Block { cell: [x, z] } => self.world.set_blocked(*x, *z, true),
                TimelineAction::Unblock { cell: [x, z] } => self.world.set_blocked(*x, *z, false),
                TimelineAction::Move { entity, position } => {
                    let [x, y, z] = *position;
                    match self.world.find_by_name(entity) {
                        Some(found) => {
                            self.world.move_entity(found.id, Vec3::new(x, y, z));
                        }
                        None => tracing::warn!(entity = %entity, "timeline names an unknown entity"),
                    }
                }
                TimelineAction::Cancel => {
                    reports.extend(self.scheduler.cancel(&ctx, AGENT, &mut self.events));
                }
            }
        }
        reports
    }
}
