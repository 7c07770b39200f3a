//! Control algorithms.
//!
//! - [`filters`] - voltage/current low-pass
//! - [`output`] - result of a mode controller
//! - [`cycle`] - spin-up gating, open-loop ramp, slew limiting

pub mod cycle;
pub mod filters;
pub mod output;
