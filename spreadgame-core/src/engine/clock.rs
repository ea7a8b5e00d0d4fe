/// Market clock plus the finer micro clock.
///
/// The market clock `t` moves one step per `advance()`. The micro clock runs
/// `zeta_steps` per market step; it drives friction decay between market steps
/// and rate-limits player trades. Both only ever move forward.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationClock {
    t: usize,
    terminal_time: usize,
    micro_time: usize,
    zeta_steps: usize,
}

impl SimulationClock {
    pub fn new(terminal_time: usize, zeta_steps: usize) -> Self {
        Self {
            t: 0,
            terminal_time,
            micro_time: 0,
            zeta_steps: zeta_steps.max(1),
        }
    }

    pub fn market_time(&self) -> usize {
        self.t
    }

    pub fn micro_time(&self) -> usize {
        self.micro_time
    }

    pub fn terminal_time(&self) -> usize {
        self.terminal_time
    }

    pub fn is_exhausted(&self) -> bool {
        self.t >= self.terminal_time
    }

    /// Resilience scale for one micro step.
    pub fn micro_decay_scale(&self) -> f64 {
        1.0 / self.zeta_steps as f64
    }

    /// Move the market clock forward. Returns the new time, or `None` at the horizon.
    pub fn tick_market(&mut self) -> Option<usize> {
        if self.is_exhausted() {
            return None;
        }
        self.t += 1;
        Some(self.t)
    }

    /// Micro steps still owed to reach `t * zeta_steps`.
    pub fn micro_steps_behind(&self) -> usize {
        (self.t * self.zeta_steps).saturating_sub(self.micro_time)
    }

    /// Whether the micro clock may tick without running past the next market step.
    pub fn can_tick_micro(&self) -> bool {
        self.micro_time < (self.t + 1) * self.zeta_steps
    }

    /// Unconditionally advance the micro clock by one. Returns the new value.
    pub fn tick_micro(&mut self) -> usize {
        self.micro_time += 1;
        self.micro_time
    }

    /// Micro steps elapsed since `since`.
    pub fn micro_elapsed_since(&self, since: usize) -> usize {
        self.micro_time.saturating_sub(since)
    }

    /// Aggregation window ("candle") index of the current market time.
    pub fn window(&self, points_per_window: usize) -> usize {
        self.t / points_per_window.max(1)
    }
}
