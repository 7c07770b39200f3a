//! Monotonic time source.
//!
//! The control loop measures `dt` between cycles from a clock that never
//! goes backwards. Production code uses [`SystemClock`]; tests substitute
//! a manually advanced clock.

use crate::consts::HNSEC_PER_SEC;
use std::time::Instant;

/// Monotonic timestamp provider in hnsec (100 ns) units.
pub trait MonotonicClock: Send + Sync {
    /// Current monotonic time [hnsec]. Origin is implementation defined.
    fn now_hnsec(&self) -> u64;
}

/// Clock backed by [`std::time::Instant`], counting from construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    /// Create a clock whose zero is "now".
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock for SystemClock {
    fn now_hnsec(&self) -> u64 {
        let elapsed = self.epoch.elapsed();
        elapsed.as_secs() * HNSEC_PER_SEC + u64::from(elapsed.subsec_nanos() / 100)
    }
}

impl<C: MonotonicClock + ?Sized> MonotonicClock for std::sync::Arc<C> {
    fn now_hnsec(&self) -> u64 {
        (**self).now_hnsec()
    }
}

/// Convert an hnsec interval to seconds.
#[inline]
pub fn hnsec_to_secs(hnsec: u64) -> f32 {
    (hnsec as f64 / HNSEC_PER_SEC as f64) as f32
}
