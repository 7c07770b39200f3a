//! Simulation driver implementation.
//!
//! The `SimulationDriver` implements the `MotorDriver` trait on top of a
//! [`RotorSimulator`], advancing the model by wall-clock time on every
//! driver call.

use super::rotor::RotorSimulator;
use esc_common::hal::config::SimulationConfig;
use esc_common::hal::driver::{HalError, MotorDriver, RunState};
use std::time::Instant;
use tracing::info;

/// Simulation driver implementing the MotorDriver trait.
pub struct SimulationDriver {
    config: SimulationConfig,
    rotor: RotorSimulator,
    initialized: bool,
    last_update: Option<Instant>,
}

impl SimulationDriver {
    /// Create a new simulation driver instance.
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            rotor: RotorSimulator::new(config.clone()),
            config,
            initialized: false,
            last_update: None,
        }
    }

    /// Read-only view of the simulated rotor.
    pub fn rotor(&self) -> &RotorSimulator {
        &self.rotor
    }

    fn advance(&mut self) {
        let now = Instant::now();
        if let Some(last) = self.last_update {
            self.rotor.step(now.duration_since(last));
        }
        self.last_update = Some(now);
    }
}

impl Default for SimulationDriver {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}

impl MotorDriver for SimulationDriver {
    fn name(&self) -> &'static str {
        "simulation"
    }

    fn init(&mut self) -> Result<(), HalError> {
        self.config
            .validate()
            .map_err(|e| HalError::ConfigError(e.to_string()))?;
        info!(
            "Initializing simulation driver: bus={:.1}V, kv={:.0}, poles={}, limit={}hnsec",
            self.config.bus_voltage,
            self.config.kv,
            self.config.poles,
            self.config.min_comm_period_hnsec
        );
        self.rotor = RotorSimulator::new(self.config.clone());
        self.last_update = Some(Instant::now());
        self.initialized = true;
        Ok(())
    }

    fn run_state(&mut self) -> RunState {
        self.advance();
        self.rotor.state()
    }

    fn start(&mut self, target_duty: f32, spinup_duty: f32, reverse: bool) {
        self.advance();
        self.rotor.start(target_duty, spinup_duty, reverse);
    }

    fn stop(&mut self) {
        self.advance();
        self.rotor.stop();
    }

    fn set_duty_cycle(&mut self, duty: f32) {
        self.advance();
        self.rotor.set_duty(duty);
    }

    fn comm_period_hnsec(&mut self) -> u32 {
        self.advance();
        self.rotor.comm_period_hnsec()
    }

    fn comm_period_limit_hnsec(&self) -> u32 {
        self.config.min_comm_period_hnsec
    }

    fn input_voltage_current(&mut self) -> (f32, f32) {
        self.advance();
        self.rotor.voltage_current()
    }
}
