//! Mutable control state.
//!
//! A single [`ControlState`] lives behind the coordinator's mutex. It is
//! written by the control cycle and the two setpoint setters and read by
//! any number of callers through [`ControlStatus`] snapshots.

use esc_common::control::types::{ControlMode, LimitFlags};

/// Runtime control state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlState {
    /// Setpoint selected by the last setter.
    pub mode: ControlMode,
    /// Limits active during the last cycle.
    pub limit_mask: LimitFlags,
    /// Last commanded duty cycle.
    pub duty_actual: f32,
    /// Open-loop target, clamped to `[0, 1]`.
    pub duty_openloop_setpoint: f32,
    /// RPM target, clamped to `rpm_max`.
    pub rpm_setpoint: u32,
    /// Filtered bus voltage [V].
    pub input_voltage: f32,
    /// Filtered bus current [A].
    pub input_current: f32,
}

/// Point-in-time view of the controller, taken under one lock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlStatus {
    /// Active control mode.
    pub mode: ControlMode,
    /// Limits active during the last cycle.
    pub limit_mask: LimitFlags,
    /// Last commanded duty cycle.
    pub duty_cycle: f32,
    /// Open-loop setpoint.
    pub duty_setpoint: f32,
    /// RPM setpoint.
    pub rpm_setpoint: u32,
    /// Measured mechanical RPM; 0 when stopped.
    pub rpm: u32,
    /// Driver not idle.
    pub running: bool,
    /// Filtered bus voltage [V].
    pub input_voltage: f32,
    /// Filtered bus current [A].
    pub input_current: f32,
}
