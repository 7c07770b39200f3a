//! Motor driver trait and error types.
//!
//! This module defines:
//! - `MotorDriver` trait - Interface the control loop drives the motor through
//! - `RunState` enum - Driver-reported motor state
//! - `HalError` enum - Error types for driver operations
//! - `DriverFactory` type alias - Factory function type

use crate::config::EscConfig;
use thiserror::Error;

/// Error types for driver operations.
#[derive(Debug, Clone, Error)]
pub enum HalError {
    /// Driver initialization failed
    #[error("Initialization failed: {0}")]
    InitFailed(String),

    /// Driver configuration rejected
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Driver not found
    #[error("Driver not found: {0}")]
    DriverNotFound(String),
}

/// Motor state as reported by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    /// Not spinning, outputs off.
    #[default]
    Idle,
    /// Driver-owned spin-up sequence in progress.
    Starting,
    /// Commutating under control of the duty cycle.
    Running,
}

/// Factory function type for creating driver instances.
pub type DriverFactory = fn(&EscConfig) -> Box<dyn MotorDriver>;

/// Trait defining the interface of a BLDC motor driver.
///
/// The control loop owns the driver and only calls it while holding the
/// controller lock, so implementations need `Send` but not `Sync`.
///
/// # Lifecycle
///
/// 1. `init()` - Called once before the control loop starts
/// 2. `run_state()` / `comm_period_hnsec()` / `input_voltage_current()` - polled every cycle
/// 3. `start()` / `stop()` / `set_duty_cycle()` - fire-and-forget commands
///
/// Commands have no error path: driver faults are the driver's own concern.
pub trait MotorDriver: Send {
    /// Returns the driver's unique identifier (e.g., "simulation").
    fn name(&self) -> &'static str;

    /// Initialize the hardware.
    ///
    /// # Errors
    /// Return `HalError::ConfigError` for unusable driver parameters and
    /// `HalError::InitFailed` if the hardware cannot be brought up.
    fn init(&mut self) -> Result<(), HalError>;

    /// Current motor state.
    fn run_state(&mut self) -> RunState;

    /// Begin the driver's spin-up sequence.
    fn start(&mut self, target_duty: f32, spinup_duty: f32, reverse: bool);

    /// Switch the outputs off.
    fn stop(&mut self);

    /// Apply a duty cycle in `[0, 1]`.
    fn set_duty_cycle(&mut self, duty: f32);

    /// Latest electrical commutation period [hnsec]; 0 when not spinning.
    fn comm_period_hnsec(&mut self) -> u32;

    /// Shortest commutation period the driver can track [hnsec].
    /// Fixed for the lifetime of the driver.
    fn comm_period_limit_hnsec(&self) -> u32;

    /// Raw bus voltage [V] and current [A].
    fn input_voltage_current(&mut self) -> (f32, f32);
}

impl<D: MotorDriver + ?Sized> MotorDriver for Box<D> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn init(&mut self) -> Result<(), HalError> {
        (**self).init()
    }

    fn run_state(&mut self) -> RunState {
        (**self).run_state()
    }

    fn start(&mut self, target_duty: f32, spinup_duty: f32, reverse: bool) {
        (**self).start(target_duty, spinup_duty, reverse)
    }

    fn stop(&mut self) {
        (**self).stop()
    }

    fn set_duty_cycle(&mut self, duty: f32) {
        (**self).set_duty_cycle(duty)
    }

    fn comm_period_hnsec(&mut self) -> u32 {
        (**self).comm_period_hnsec()
    }

    fn comm_period_limit_hnsec(&self) -> u32 {
        (**self).comm_period_limit_hnsec()
    }

    fn input_voltage_current(&mut self) -> (f32, f32) {
        (**self).input_voltage_current()
    }
}
