//! Simulation driver module.
//!
//! Software model of a sensorless BLDC motor and its driver, so the control
//! loop can run end to end without hardware.

mod driver;
mod rotor;

pub use driver::SimulationDriver;
pub use rotor::RotorSimulator;

use esc_common::config::EscConfig;
use esc_common::hal::driver::MotorDriver;

/// Factory function to create a simulation driver instance.
pub fn create_driver(config: &EscConfig) -> Box<dyn MotorDriver> {
    Box::new(SimulationDriver::new(config.simulation.clone()))
}
