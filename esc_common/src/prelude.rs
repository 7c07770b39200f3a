//! Prelude module for common re-exports.
//!
//! ```rust
//! use esc_common::prelude::*;
//! ```

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, EscConfig, LogLevel, SharedConfig};
pub use crate::control::config::ControlConfig;
pub use crate::hal::config::{DriverConfig, SimulationConfig};

// ─── Control ────────────────────────────────────────────────────────
pub use crate::control::types::{ControlMode, LimitFlags};

// ─── Driver ─────────────────────────────────────────────────────────
pub use crate::clock::{MonotonicClock, SystemClock};
pub use crate::hal::driver::{DriverFactory, HalError, MotorDriver, RunState};

// ─── System Constants ───────────────────────────────────────────────
pub use crate::consts::{
    CONTROL_PERIOD_US, HNSEC_PER_SEC, MAX_VALID_INPUT_VOLTAGE, MIN_VALID_INPUT_VOLTAGE,
};
