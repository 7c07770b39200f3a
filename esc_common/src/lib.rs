//! ESC Common Library
//!
//! Shared constants, the motor driver contract and configuration loading
//! for all ESC workspace crates.
//!
//! # Module Structure
//!
//! - [`consts`] - System-wide numeric constants
//! - [`clock`] - Monotonic time source used by the control loop
//! - [`hal`] - Motor driver trait, run state and HAL errors
//! - [`control`] - Control mode, limit flags and control-loop configuration
//! - [`config`] - Configuration loading traits and the top-level config file
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use esc_common::prelude::*;
//!
//! let flags = LimitFlags::ACCEL;
//! assert!(flags.contains(LimitFlags::ACCEL));
//! assert_eq!(ControlMode::default(), ControlMode::OpenLoop);
//! ```

pub mod clock;
pub mod config;
pub mod consts;
pub mod control;
pub mod hal;
pub mod prelude;
