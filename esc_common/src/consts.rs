//! System-wide constants for the ESC workspace.
//!
//! Single source of truth for time units and electrical limits.

/// Hundreds of nanoseconds per second. Commutation periods and clock
/// timestamps are expressed in this unit ("hnsec").
pub const HNSEC_PER_SEC: u64 = 10_000_000;

/// Nominal control period of the coordinator thread in microseconds.
pub const CONTROL_PERIOD_US: u64 = 1000;

/// Lowest input voltage accepted at startup [V].
pub const MIN_VALID_INPUT_VOLTAGE: f32 = 4.0;

/// Highest input voltage accepted at startup [V].
pub const MAX_VALID_INPUT_VOLTAGE: f32 = 40.0;

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "config/esc.toml";
