//! Driver-side configuration types.
//!
//! - `DriverConfig` - which driver to load
//! - `SimulationConfig` - parameters of the simulated BLDC motor

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

fn default_driver() -> String {
    "simulation".to_string()
}

/// Driver selection, `[driver]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverConfig {
    /// Registered driver name.
    #[serde(default = "default_driver")]
    pub name: String,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            name: default_driver(),
        }
    }
}

/// Simulated motor parameters, `[simulation]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Supply voltage at zero load [V].
    pub bus_voltage: f32,
    /// Series resistance of the supply [Ω]; sags the bus under load.
    pub source_resistance: f32,
    /// Motor velocity constant [RPM/V].
    pub kv: f32,
    /// Motor pole count.
    pub poles: u32,
    /// Duration of the driver-owned spin-up sequence [ms].
    pub spinup_time_ms: u64,
    /// First-order speed response time constant [ms].
    pub time_constant_ms: u64,
    /// Speed below which the rotor stalls and the driver goes idle [RPM].
    pub stall_rpm: f32,
    /// Current drawn at full duty [A].
    pub full_load_current: f32,
    /// Shortest commutation period the driver can track [hnsec].
    pub min_comm_period_hnsec: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            bus_voltage: 12.0,
            source_resistance: 0.05,
            kv: 920.0,
            poles: 14,
            spinup_time_ms: 200,
            time_constant_ms: 80,
            stall_rpm: 300.0,
            full_load_current: 8.0,
            min_comm_period_hnsec: 700,
        }
    }
}

impl SimulationConfig {
    /// Validate the simulation parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bus_voltage <= 0.0 {
            return Err(ConfigError::ValidationError(
                "simulation.bus_voltage must be positive".to_string(),
            ));
        }
        if self.kv <= 0.0 {
            return Err(ConfigError::ValidationError(
                "simulation.kv must be positive".to_string(),
            ));
        }
        if self.poles == 0 || self.poles % 2 != 0 {
            return Err(ConfigError::ValidationError(format!(
                "simulation.poles must be a positive even number, got {}",
                self.poles
            )));
        }
        if self.time_constant_ms == 0 {
            return Err(ConfigError::ValidationError(
                "simulation.time_constant_ms must be greater than 0".to_string(),
            ));
        }
        if self.min_comm_period_hnsec == 0 {
            return Err(ConfigError::ValidationError(
                "simulation.min_comm_period_hnsec must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
