//! Control thread timing statistics.

use std::time::Duration;

/// O(1) per-cycle timing statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CycleStats {
    /// Total cycles executed.
    pub cycle_count: u64,
    /// Cycles whose body ran longer than the control period.
    pub overruns: u64,
    /// Longest cycle body [µs].
    pub max_cycle_us: u64,
    /// Sum of cycle body durations [µs].
    pub total_cycle_us: u64,
    /// Seconds between the two most recent cycles.
    pub last_dt: f32,
}

impl CycleStats {
    /// Record one cycle. Returns `true` if it overran `budget`.
    #[inline]
    pub fn record(&mut self, body: Duration, budget: Duration, dt: f32) -> bool {
        let us = body.as_micros() as u64;
        self.cycle_count += 1;
        self.total_cycle_us += us;
        self.max_cycle_us = self.max_cycle_us.max(us);
        self.last_dt = dt;
        let overrun = body > budget;
        if overrun {
            self.overruns += 1;
        }
        overrun
    }

    /// Average cycle body [µs] (0 if no cycles).
    #[inline]
    pub fn avg_cycle_us(&self) -> u64 {
        if self.cycle_count == 0 {
            0
        } else {
            self.total_cycle_us / self.cycle_count
        }
    }
}
