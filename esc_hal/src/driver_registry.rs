//! Name → factory lookup for motor drivers.
//!
//! The binary builds one registry at startup and picks the driver named in
//! `[driver] name` (or `--driver`). Nothing is global; tests build their own.

use esc_common::config::EscConfig;
use esc_common::hal::driver::{DriverFactory, HalError, MotorDriver};
use std::collections::BTreeMap;

/// Registered driver factories, ordered by name.
pub struct DriverRegistry {
    factories: BTreeMap<&'static str, DriverFactory>,
}

impl DriverRegistry {
    /// Registry without any drivers.
    pub fn new() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// Registry holding every driver built into this crate.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        crate::drivers::register_all_drivers(&mut registry);
        registry
    }

    /// Add `factory` under `name`.
    ///
    /// # Panics
    /// If `name` is taken. Driver names are compile-time constants, so a
    /// clash is a build mistake rather than a runtime condition.
    pub fn register(&mut self, name: &'static str, factory: DriverFactory) {
        let previous = self.factories.insert(name, factory);
        assert!(previous.is_none(), "Driver '{name}' registered twice");
    }

    /// Whether a driver called `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Build the driver called `name` from `config`.
    ///
    /// The driver is returned uninitialized; `MotorController` calls
    /// `init()` on it.
    ///
    /// # Errors
    /// `HalError::DriverNotFound` for an unknown name.
    pub fn create_driver(
        &self,
        name: &str,
        config: &EscConfig,
    ) -> Result<Box<dyn MotorDriver>, HalError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| HalError::DriverNotFound(name.to_string()))?;
        Ok(factory(config))
    }

    /// Registered names in alphabetical order.
    pub fn list_drivers(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }
}

impl Default for DriverRegistry {
    fn default() -> Self {
        Self::new()
    }
}
