use mate_core::{CancelToken, EventSink, Task, TaskStatus, TickContext};
use mate_exec::primitives::{HoldTask, Scan};
use mate_exec::MotorWorld;

use crate::{BehaviorCommand, BehaviorConfig, CommandError};

/// Stop and stay put, optionally sweeping the heading.
#[derive(Debug, Clone)]
pub struct HoldBehavior {
    hold: HoldTask,
    pub(crate) token: CancelToken,
}

impl HoldBehavior {
    pub fn new(duration: f32, scan: Option<Scan>, token: CancelToken) -> Self {
        let hold = match scan {
            Some(scan) => HoldTask::new(duration).with_scan(scan),
            None => HoldTask::new(duration),
        };
        Self { hold, token }
    }

    pub fn from_command(
        command: &BehaviorCommand,
        config: &BehaviorConfig,
        token: CancelToken,
    ) -> Result<Self, CommandError> {
        let scan = command.context.flag(&["scan"])?.unwrap_or(false).then(|| Scan {
            rate: config.scan_degrees_per_second.to_radians(),
            smoothing: config.scan_smoothing,
        });
        Ok(Self::new(command.duration, scan, token))
    }

    pub fn is_scanning(&self) -> bool {
        self.hold.is_scanning()
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
        Task::<W>::tick(&mut self.hold, ctx, agent, world, events)
    }
}
