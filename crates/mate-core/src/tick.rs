/// Slack applied when comparing accumulated `f32` time against a duration, so that e.g. one
/// hundred `0.1` steps count as ten seconds.
const TIME_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickContext {
    pub tick: u64,
    pub dt_seconds: f32,
}

impl TickContext {
    pub fn new(tick: u64, dt_seconds: f32) -> Self {
        Self { tick, dt_seconds }
    }

    /// Non-negative step length.
    pub fn dt(&self) -> f32 {
        self.dt_seconds.max(0.0)
    }
}

/// Elapsed-time accumulator for timed suspension points (waits, holds, ramps).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timer {
    elapsed: f32,
    duration: f32,
}

impl Timer {
    pub fn new(duration: f32) -> Self {
        Self {
            elapsed: 0.0,
            duration: duration.max(0.0),
        }
    }

    /// Advance by `dt` and report whether the timer has finished.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.elapsed += dt.max(0.0);
        self.finished()
    }

    pub fn finished(&self) -> bool {
        self.elapsed + TIME_EPSILON >= self.duration
    }

    /// Strictly past the duration (beyond accumulation noise).
    pub fn exceeded(&self) -> bool {
        self.elapsed > self.duration + TIME_EPSILON
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Fraction of the duration elapsed, clamped to `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 || self.finished() {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }
}
