//! Tuning constants derived once at startup.

use esc_common::control::config::ControlConfig;
use tracing::info;

use crate::conversion::comm_period_to_rpm;

/// Read-only control parameters.
///
/// Derived from [`ControlConfig`] and the driver's commutation-period limit
/// before the control thread starts; never mutated afterwards, so readers
/// need no lock.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    /// Volts applied during spin-up, as a fraction of the bus voltage.
    pub spinup_voltage: f32,
    /// Largest duty step applied without slewing.
    pub duty_step_max: f32,
    /// Slew rate [duty/s].
    pub duty_slope: f32,
    /// Voltage/current low-pass time constant.
    pub filter_tau: f32,
    /// Motor pole count, always > 0.
    pub poles: u32,
    /// Spin direction.
    pub reverse: bool,
    /// Shortest trackable commutation period [hnsec]; also the
    /// "fully spun up" threshold of the open-loop ramp.
    pub comm_period_limit: u32,
    /// RPM at `comm_period_limit`.
    pub rpm_max: u32,
    /// Lowest RPM setpoint that commands a start.
    pub rpm_min: u32,
}

impl Parameters {
    /// Derive parameters from configuration and the driver limit.
    ///
    /// # Panics
    /// Panics if `config.poles` is 0.
    pub fn derive(config: &ControlConfig, comm_period_limit: u32) -> Self {
        assert!(config.poles > 0, "pole count must be positive");

        let params = Self {
            spinup_voltage: config.spinup_voltage,
            duty_step_max: config.duty_step_max,
            duty_slope: config.duty_slope,
            filter_tau: config.filter_tau,
            poles: config.poles,
            reverse: config.reverse,
            comm_period_limit,
            rpm_max: comm_period_to_rpm(comm_period_limit, config.poles),
            rpm_min: config.rpm_min,
        };

        info!(
            "Motor control: RPM range: [{}, {}]; poles: {}",
            params.rpm_min, params.rpm_max, params.poles
        );
        params
    }
}
