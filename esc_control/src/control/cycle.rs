//! One control cycle.
//!
//! Called by the coordinator with the controller lock held:
//!
//! 1. Driver not running → [`update_control_non_running`]: hold still while
//!    the driver spins up, otherwise arm the spin-up duty and decide whether
//!    to command a start.
//! 2. Driver running → mode controller ([`update_control_open_loop`] or
//!    [`update_control_rpm`]).
//! 3. No finite target → [`stop`].
//! 4. Otherwise slew-limit toward the target and apply it.

use esc_common::control::types::{ControlMode, LimitFlags};
use esc_common::hal::driver::{MotorDriver, RunState};
use tracing::{debug, warn};

use super::output::ControlOutput;
use crate::params::Parameters;
use crate::state::ControlState;

/// What a cycle did, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CycleOutcome {
    /// Driver spin-up in progress; nothing touched.
    Starting,
    /// Motor idle; spin-up duty armed.
    Idle {
        /// Start command issued this cycle.
        start_commanded: bool,
    },
    /// Duty cycle applied.
    Driving {
        /// Applied duty cycle.
        duty: f32,
        /// Slew limiter engaged.
        slewed: bool,
    },
    /// Motor stopped.
    Stopped {
        /// Stop caused by a mode without a controller.
        unavailable: bool,
    },
}

/// Run one control cycle. `dt` is the time since the previous cycle [s].
pub fn update_control<D: MotorDriver + ?Sized>(
    state: &mut ControlState,
    params: &Parameters,
    driver: &mut D,
    dt: f32,
) -> CycleOutcome {
    let run_state = driver.run_state();
    if run_state != RunState::Running {
        return update_control_non_running(state, params, driver, run_state);
    }

    let output = match state.mode {
        ControlMode::OpenLoop => update_control_open_loop(state, params, driver),
        ControlMode::RpmTarget => update_control_rpm(state, params, dt),
    };

    let Some(target) = output.drive_target() else {
        let unavailable = output == ControlOutput::Unavailable;
        if unavailable {
            warn!("RPM control is not implemented, stopping motor");
        } else {
            debug!("No valid duty cycle target, stopping motor");
        }
        stop(state, driver);
        return CycleOutcome::Stopped { unavailable };
    };

    let slewed = apply_slew_limit(state, params, target, dt);
    driver.set_duty_cycle(state.duty_actual);
    CycleOutcome::Driving {
        duty: state.duty_actual,
        slewed,
    }
}

/// Motor idle or starting.
///
/// While the driver runs its own spin-up sequence nothing is changed.
/// Idle: the spin-up duty is armed as the actual duty and a start is
/// commanded when the active setpoint asks for one.
///
/// The open-loop setpoint is compared against a duty computed from the
/// present bus voltage while the RPM setpoint is compared against
/// `rpm_min`; the two thresholds are deliberately not unified.
pub fn update_control_non_running<D: MotorDriver + ?Sized>(
    state: &mut ControlState,
    params: &Parameters,
    driver: &mut D,
    run_state: RunState,
) -> CycleOutcome {
    if run_state == RunState::Starting {
        return CycleOutcome::Starting;
    }

    let spinup_duty = params.spinup_voltage / state.input_voltage;
    state.duty_actual = spinup_duty;
    state.limit_mask = LimitFlags::empty();

    let need_start = match state.mode {
        ControlMode::OpenLoop => state.duty_openloop_setpoint >= spinup_duty,
        ControlMode::RpmTarget => state.rpm_setpoint >= params.rpm_min,
    };

    if need_start {
        debug!(
            "Starting motor: spinup_duty={:.4}, mode={:?}, reverse={}",
            spinup_duty, state.mode, params.reverse
        );
        driver.start(spinup_duty, spinup_duty, params.reverse);
    }

    CycleOutcome::Idle {
        start_commanded: need_start,
    }
}

/// Open-loop duty controller with a commutation-period RPM cap.
///
/// Below the full-speed threshold the output is capped by a proportional
/// ramp over `[limit / 2, limit)`; the cap raises [`LimitFlags::RPM`].
pub fn update_control_open_loop<D: MotorDriver + ?Sized>(
    state: &mut ControlState,
    params: &Parameters,
    driver: &mut D,
) -> ControlOutput {
    let cp = driver.comm_period_hnsec();
    if cp == 0 {
        // The motor just stopped
        return ControlOutput::Stop;
    }

    if cp < params.comm_period_limit {
        let c1 = params.comm_period_limit as f32;
        let c0 = (params.comm_period_limit / 2) as f32;
        let duty = (cp as f32 - c0) / (c1 - c0);

        if duty < state.duty_openloop_setpoint {
            state.limit_mask.insert(LimitFlags::RPM);
            return ControlOutput::Drive(duty);
        }
    }

    state.limit_mask.remove(LimitFlags::RPM);
    if state.duty_openloop_setpoint > 0.0 {
        ControlOutput::Drive(state.duty_openloop_setpoint)
    } else {
        ControlOutput::Stop
    }
}

/// RPM-target controller.
///
/// Not implemented: always [`ControlOutput::Unavailable`], so RPM mode
/// stops the motor as soon as it reaches the running state.
// TODO: closed-loop RPM controller fed by comm_period_to_rpm
pub fn update_control_rpm(
    _state: &mut ControlState,
    _params: &Parameters,
    _dt: f32,
) -> ControlOutput {
    ControlOutput::Unavailable
}

/// Stop the motor and reset every setpoint.
pub fn stop<D: MotorDriver + ?Sized>(state: &mut ControlState, driver: &mut D) {
    driver.stop();
    state.limit_mask = LimitFlags::empty();
    state.duty_actual = 0.0;
    state.duty_openloop_setpoint = 0.0;
    state.rpm_setpoint = 0;
}

/// Move `duty_actual` toward `target`, at most `duty_slope · dt` once the
/// jump exceeds `duty_step_max`. Returns whether the limiter engaged.
fn apply_slew_limit(state: &mut ControlState, params: &Parameters, target: f32, dt: f32) -> bool {
    if (target - state.duty_actual).abs() > params.duty_step_max {
        let mut step = params.duty_slope * dt;
        if target < state.duty_actual {
            step = -step;
        }
        state.duty_actual += step;
        state.limit_mask.insert(LimitFlags::ACCEL);
        true
    } else {
        state.duty_actual = target;
        state.limit_mask.remove(LimitFlags::ACCEL);
        false
    }
}
