//! Control core error types.

use esc_common::config::ConfigError;
use esc_common::consts::{MAX_VALID_INPUT_VOLTAGE, MIN_VALID_INPUT_VOLTAGE};
use esc_common::hal::driver::HalError;
use thiserror::Error;

/// Errors raised while bringing up motor control.
///
/// Nothing in the running control loop is an error: a cycle without a
/// valid drive target stops the motor instead.
#[derive(Debug, Error)]
pub enum ControlError {
    /// Driver failed to initialize.
    #[error("Driver error: {0}")]
    Driver(#[from] HalError),

    /// Startup bus voltage outside the accepted window.
    #[error(
        "Invalid input voltage: {voltage:.2}V (valid range {}..{}V)",
        MIN_VALID_INPUT_VOLTAGE,
        MAX_VALID_INPUT_VOLTAGE
    )]
    InvalidInputVoltage {
        /// Measured voltage [V].
        voltage: f32,
    },

    /// Configuration rejected.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Control thread could not be spawned.
    #[error("Failed to spawn control thread: {0}")]
    Spawn(#[from] std::io::Error),

    /// RT system call failed.
    #[error("RT setup error: {0}")]
    RtSetup(String),
}
