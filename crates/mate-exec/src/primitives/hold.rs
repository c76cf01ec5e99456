use mate_core::math::{lerp_angle, wrap_angle};
use mate_core::{EventSink, Failure, Task, TaskStatus, TickContext, Timer};

use super::MotorWorld;

/// Continuous heading sweep while holding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scan {
    /// Radians per second.
    pub rate: f32,
    /// Per-second smoothing factor toward the sweeping target heading.
    pub smoothing: f32,
}

impl Default for Scan {
    fn default() -> Self {
        Self {
            rate: 30f32.to_radians(),
            smoothing: 5.0,
        }
    }
}

/// Stop moving and stay put for `duration`, optionally scanning.
#[derive(Debug, Clone, PartialEq)]
pub struct HoldTask {
    timer: Timer,
    scan: Option<Scan>,
    target_yaw: Option<f32>,
    started: bool,
}

impl HoldTask {
    pub fn new(duration: f32) -> Self {
        Self {
            timer: Timer::new(duration),
            scan: None,
            target_yaw: None,
            started: false,
        }
    }

    pub fn with_scan(mut self, scan: Scan) -> Self {
        self.scan = Some(scan);
        self
    }

    pub fn is_scanning(&self) -> bool {
        self.scan.is_some()
    }
}

impl<W> Task<W> for HoldTask
where
    W: MotorWorld + 'static,
{
    fn tick(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        _events: &mut dyn EventSink,
    ) -> TaskStatus {
        if !self.started {
            world.clear_path(agent);
            self.started = true;
        }

        if let Some(scan) = self.scan {
            let Some(yaw) = world.yaw(agent) else {
                return TaskStatus::Failure(Failure::AgentMissing);
            };
            let target = wrap_angle(self.target_yaw.unwrap_or(yaw) + scan.rate * ctx.dt());
            self.target_yaw = Some(target);
            let t = (scan.smoothing * ctx.dt()).min(1.0);
            world.set_yaw(agent, wrap_angle(lerp_angle(yaw, target, t)));
        }

        if self.timer.advance(ctx.dt()) {
            TaskStatus::Success
        } else {
            TaskStatus::Running
        }
    }
}

/// Pure delay with no world side effects.
#[derive(Debug, Clone, PartialEq)]
pub struct WaitTask {
    timer: Timer,
}

impl WaitTask {
    pub fn new(duration: f32) -> Self {
        Self {
            timer: Timer::new(duration),
        }
    }
}

impl<W> Task<W> for WaitTask
where
    W: MotorWorld + 'static,
{
    fn tick(
        &mut self,
        ctx: &TickContext,
        _agent: W::Agent,
        _world: &mut W,
        _events: &mut dyn EventSink,
    ) -> TaskStatus {
        if self.timer.advance(ctx.dt()) {
            TaskStatus::Success
        } else {
            TaskStatus::Running
        }
    }
}
