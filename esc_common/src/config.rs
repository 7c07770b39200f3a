//! Configuration loading traits and types.
//!
//! Every ESC binary reads one TOML file with a `[shared]` table and one
//! table per subsystem.
//!
//! # Usage
//!
//! ```rust,no_run
//! use esc_common::config::{ConfigError, EscConfig};
//! use std::path::Path;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let config = EscConfig::load_validated(Path::new("config/esc.toml"))?;
//!     println!("Service: {}", config.shared.service_name);
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::control::config::ControlConfig;
use crate::hal::config::{DriverConfig, SimulationConfig};

/// Error type for configuration loading operations.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Configuration file not found at specified path.
    #[error("Configuration file not found")]
    FileNotFound,

    /// TOML parsing failed.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Semantic validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Default log level, overridden by `RUST_LOG` and `-v`.
///
/// Written in lowercase in TOML (`log_level = "warn"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Per-call driver and rotor events.
    Trace,
    /// Start/stop decisions and periodic loop statistics.
    Debug,
    /// Startup, shutdown and status reports.
    #[default]
    Info,
    /// Timing violations, setpoint timeouts, RT setup failures.
    Warn,
    /// Fatal startup errors only.
    Error,
}

impl LogLevel {
    /// Matching `tracing` level.
    pub fn as_tracing_level(&self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

/// Common configuration fields shared across all ESC applications.
///
/// # TOML Example
///
/// ```toml
/// [shared]
/// log_level = "debug"
/// service_name = "esc-sim-01"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedConfig {
    /// Default log level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Instance name; appears in the startup log line.
    pub service_name: String,
}

impl Default for SharedConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            service_name: "esc".to_string(),
        }
    }
}

impl SharedConfig {
    /// Reject an empty `service_name`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "shared.service_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Trait for loading configuration from TOML files.
///
/// # Contract
///
/// - Returns `ConfigError::FileNotFound` if the file does not exist
/// - Returns `ConfigError::ParseError` if TOML syntax is invalid
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    /// Load configuration from a TOML file.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound
            } else {
                ConfigError::ParseError(e.to_string())
            }
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

// Blanket implementation for all types that implement DeserializeOwned.
impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}

/// Top-level configuration file (`esc.toml`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EscConfig {
    /// Common service fields.
    #[serde(default)]
    pub shared: SharedConfig,
    /// Driver selection.
    #[serde(default)]
    pub driver: DriverConfig,
    /// Control loop tuning.
    #[serde(default)]
    pub control: ControlConfig,
    /// Simulated motor parameters (used by the `simulation` driver).
    #[serde(default)]
    pub simulation: SimulationConfig,
}

impl EscConfig {
    /// Validate every table.
    ///
    /// With the `simulation` driver selected, `[control] poles` must equal
    /// `[simulation] poles`: the controller converts the simulated
    /// commutation period back to RPM with its own pole count.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;
        self.control.validate()?;
        self.simulation.validate()?;
        if self.driver.name == "simulation" && self.control.poles != self.simulation.poles {
            return Err(ConfigError::ValidationError(format!(
                "control.poles ({}) must match simulation.poles ({})",
                self.control.poles, self.simulation.poles
            )));
        }
        Ok(())
    }

    /// Load and validate a configuration file.
    pub fn load_validated(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load(path)?;
        config.validate()?;
        tracing::debug!(
            "Loaded config {:?}: service={}, driver={}",
            path,
            config.shared.service_name,
            config.driver.name
        );
        Ok(config)
    }
}
