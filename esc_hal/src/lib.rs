//! # ESC HAL Library
//!
//! Motor driver implementations with a pluggable driver registry.
//! Drivers implement the `MotorDriver` trait defined in
//! `esc_common::hal::driver`.
//!
//! # Module Structure
//!
//! - [`driver_registry`] - Driver factory registration
//! - [`drivers`] - Driver implementations

#![deny(missing_docs)]

pub mod driver_registry;
pub mod drivers;

pub use crate::driver_registry::DriverRegistry;
pub use crate::drivers::register_all_drivers;
