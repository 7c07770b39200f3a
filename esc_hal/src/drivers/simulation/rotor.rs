//! Rotor physics simulator.
//!
//! First-order speed model of a sensorless BLDC motor:
//! - Idle: outputs off, rotor at rest
//! - Starting: driver-owned spin-up, ramps linearly to the spin-up speed
//! - Running: speed follows `duty * bus_voltage * kv` with a time constant
//!
//! The rotor stalls back to idle if running speed drops below `stall_rpm`.

use esc_common::consts::HNSEC_PER_SEC;
use esc_common::hal::config::SimulationConfig;
use esc_common::hal::driver::RunState;
use std::time::Duration;
use tracing::{debug, trace};

/// Rotor simulator providing speed, commutation period and bus load.
#[derive(Debug, Clone)]
pub struct RotorSimulator {
    config: SimulationConfig,
    state: RunState,
    /// Mechanical speed [RPM].
    speed_rpm: f32,
    /// Applied duty cycle.
    duty: f32,
    reverse: bool,
    /// Remaining spin-up time.
    spinup_left: Duration,
    /// Speed reached at the end of spin-up [RPM].
    spinup_target_rpm: f32,
}

impl RotorSimulator {
    /// Create a rotor at rest.
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            state: RunState::Idle,
            speed_rpm: 0.0,
            duty: 0.0,
            reverse: false,
            spinup_left: Duration::ZERO,
            spinup_target_rpm: 0.0,
        }
    }

    /// Current run state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Current mechanical speed [RPM].
    pub fn speed_rpm(&self) -> f32 {
        self.speed_rpm
    }

    /// Currently applied duty cycle.
    pub fn duty(&self) -> f32 {
        self.duty
    }

    /// Spin direction of the last start.
    pub fn is_reversed(&self) -> bool {
        self.reverse
    }

    /// Begin spin-up. Ignored unless idle.
    pub fn start(&mut self, target_duty: f32, spinup_duty: f32, reverse: bool) {
        if self.state != RunState::Idle {
            trace!("Start ignored in state {:?}", self.state);
            return;
        }
        self.state = RunState::Starting;
        self.duty = target_duty.clamp(0.0, 1.0);
        self.reverse = reverse;
        self.spinup_left = Duration::from_millis(self.config.spinup_time_ms);
        self.spinup_target_rpm = self.no_load_rpm(spinup_duty.clamp(0.0, 1.0));
        debug!(
            "Rotor spin-up: duty={:.3}, target={:.0} RPM, reverse={}",
            self.duty, self.spinup_target_rpm, reverse
        );
    }

    /// Cut outputs; the rotor is treated as braked to rest.
    pub fn stop(&mut self) {
        if self.state != RunState::Idle {
            debug!("Rotor stopped at {:.0} RPM", self.speed_rpm);
        }
        self.state = RunState::Idle;
        self.speed_rpm = 0.0;
        self.duty = 0.0;
    }

    /// Apply a duty cycle. Only effective while running.
    pub fn set_duty(&mut self, duty: f32) {
        if self.state == RunState::Running {
            self.duty = duty.clamp(0.0, 1.0);
        }
    }

    /// Advance the model by `dt`.
    pub fn step(&mut self, dt: Duration) {
        match self.state {
            RunState::Idle => {
                self.speed_rpm = 0.0;
            }
            RunState::Starting => {
                let total = Duration::from_millis(self.config.spinup_time_ms);
                self.spinup_left = self.spinup_left.saturating_sub(dt);
                if self.spinup_left.is_zero() || total.is_zero() {
                    self.speed_rpm = self.spinup_target_rpm;
                    self.state = RunState::Running;
                    debug!("Rotor running at {:.0} RPM", self.speed_rpm);
                } else {
                    let done = 1.0 - self.spinup_left.as_secs_f32() / total.as_secs_f32();
                    self.speed_rpm = self.spinup_target_rpm * done;
                }
            }
            RunState::Running => {
                let tau = Duration::from_millis(self.config.time_constant_ms).as_secs_f32();
                let dt = dt.as_secs_f32();
                let target = self.no_load_rpm(self.duty);
                self.speed_rpm += (target - self.speed_rpm) * dt / (tau + dt);
                if self.speed_rpm < self.config.stall_rpm {
                    debug!("Rotor stalled at {:.0} RPM", self.speed_rpm);
                    self.stop();
                }
            }
        }
    }

    /// Electrical commutation period [hnsec]; 0 when not turning.
    pub fn comm_period_hnsec(&self) -> u32 {
        if self.speed_rpm <= 0.0 {
            return 0;
        }
        // Six commutations per electrical revolution.
        let erpm = f64::from(self.speed_rpm) * f64::from(self.config.poles) / 2.0;
        let period = (HNSEC_PER_SEC as f64 * 60.0) / (erpm * 6.0);
        period.min(f64::from(u32::MAX)) as u32
    }

    /// Bus voltage [V] and current [A] under the present load.
    pub fn voltage_current(&self) -> (f32, f32) {
        let current = match self.state {
            RunState::Idle => 0.0,
            RunState::Starting | RunState::Running => self.duty * self.config.full_load_current,
        };
        let voltage = self.config.bus_voltage - self.config.source_resistance * current;
        (voltage, current)
    }

    fn no_load_rpm(&self, duty: f32) -> f32 {
        duty * self.config.bus_voltage * self.config.kv
    }
}
