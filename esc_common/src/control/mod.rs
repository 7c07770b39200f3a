//! Control loop shared types.
//!
//! Types shared between the control core, the drivers and the binary:
//! setpoint mode, limit flags and the `[control]` configuration table.

pub mod config;
pub mod types;
