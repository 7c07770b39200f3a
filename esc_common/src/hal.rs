//! Motor driver abstraction.
//!
//! This module contains the contract between the control loop and the
//! low-level BLDC driver, plus the driver-side configuration types.

pub mod config;
pub mod driver;
