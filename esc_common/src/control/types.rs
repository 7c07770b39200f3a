//! Control mode and limit flag types.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Which setpoint drives the motor. Selected by the setter called last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlMode {
    /// Duty cycle setpoint, speed fed back only as an RPM cap.
    #[default]
    OpenLoop,
    /// Target RPM setpoint.
    RpmTarget,
}

bitflags! {
    /// Limits that shaped the last control cycle's output.
    ///
    /// Recomputed every cycle; a bit is only set while the limit is active.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LimitFlags: u8 {
        /// Output capped by the commutation-period ramp.
        const RPM   = 0x01;
        /// Output slewed by the duty-cycle rate limiter.
        const ACCEL = 0x02;
    }
}

impl Default for LimitFlags {
    fn default() -> Self {
        Self::empty()
    }
}
