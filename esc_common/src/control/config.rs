//! Control loop tuning, `[control]` table.
//!
//! Every field defaults to the value the controller was tuned with, so an
//! empty table (or a missing one) reproduces the stock behaviour.

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::consts::{CONTROL_PERIOD_US, HNSEC_PER_SEC};

/// Longest setpoint timeout whose hnsec value still fits in a `u64`.
pub const MAX_SETPOINT_TIMEOUT_MS: u64 = u64::MAX / (HNSEC_PER_SEC / 1000);

/// Control loop configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Voltage applied during spin-up [V]; converted to a duty cycle
    /// against the filtered bus voltage.
    pub spinup_voltage: f32,
    /// Largest duty-cycle jump applied in one cycle without slewing.
    pub duty_step_max: f32,
    /// Slew rate once the step limit is exceeded [duty/s].
    pub duty_slope: f32,
    /// Voltage/current low-pass time constant; larger is smoother.
    pub filter_tau: f32,
    /// Motor pole count.
    pub poles: u32,
    /// Spin direction passed to the driver at start.
    pub reverse: bool,
    /// Lowest RPM setpoint that commands a start.
    pub rpm_min: u32,
    /// Nominal coordinator period [µs].
    pub control_period_us: u64,
    /// Zero the setpoints after this long without a setter call [ms].
    /// 0 disables the timeout.
    pub setpoint_timeout_ms: u64,
    /// SCHED_FIFO priority for the coordinator thread (needs the `rt`
    /// feature). 0 keeps the default scheduler.
    pub rt_priority: i32,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            spinup_voltage: 2.0,
            duty_step_max: 0.2,
            duty_slope: 1.0,
            filter_tau: 1.0 / 0.5,
            poles: 14,
            reverse: false,
            rpm_min: 500,
            control_period_us: CONTROL_PERIOD_US,
            setpoint_timeout_ms: 0,
            rt_priority: 0,
        }
    }
}

impl ControlConfig {
    /// Validate the control configuration.
    ///
    /// # Validation Rules
    /// 1. `poles` > 0
    /// 2. `spinup_voltage` > 0
    /// 3. `duty_step_max` >= 0
    /// 4. `duty_slope` > 0
    /// 5. `filter_tau` >= 0
    /// 6. `control_period_us` > 0
    /// 7. `setpoint_timeout_ms` <= [`MAX_SETPOINT_TIMEOUT_MS`]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poles == 0 {
            return Err(ConfigError::ValidationError(
                "control.poles must be greater than 0".to_string(),
            ));
        }
        if !(self.spinup_voltage > 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "control.spinup_voltage must be positive, got {}",
                self.spinup_voltage
            )));
        }
        if !(self.duty_step_max >= 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "control.duty_step_max must be non-negative, got {}",
                self.duty_step_max
            )));
        }
        if !(self.duty_slope > 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "control.duty_slope must be positive, got {}",
                self.duty_slope
            )));
        }
        if !(self.filter_tau >= 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "control.filter_tau must be non-negative, got {}",
                self.filter_tau
            )));
        }
        if self.control_period_us == 0 {
            return Err(ConfigError::ValidationError(
                "control.control_period_us must be greater than 0".to_string(),
            ));
        }
        if self.setpoint_timeout_ms > MAX_SETPOINT_TIMEOUT_MS {
            return Err(ConfigError::ValidationError(format!(
                "control.setpoint_timeout_ms must be at most {MAX_SETPOINT_TIMEOUT_MS}, got {}",
                self.setpoint_timeout_ms
            )));
        }
        Ok(())
    }
}
