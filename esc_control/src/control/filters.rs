//! Signal conditioning for the bus voltage and current readings.
//!
//! Discrete exponential smoother driven by the measured cycle time:
//!
//! ```text
//! y[n] = (dt · x[n] + tau · y[n-1]) / (dt + tau)
//! ```

use crate::state::ControlState;

/// Apply one sample through the low-pass filter.
///
/// Returns `sample` unchanged when `dt + tau <= 0`.
#[inline]
pub fn lowpass(previous: f32, sample: f32, tau: f32, dt: f32) -> f32 {
    let denom = dt + tau;
    if denom <= 0.0 {
        return sample;
    }
    (dt * sample + tau * previous) / denom
}

/// Seed the filters with one raw reading.
pub fn init_filters(state: &mut ControlState, (voltage, current): (f32, f32)) {
    state.input_voltage = voltage;
    state.input_current = current;
}

/// Fold a new reading into the filtered voltage and current.
pub fn update_filters(state: &mut ControlState, (voltage, current): (f32, f32), tau: f32, dt: f32) {
    state.input_voltage = lowpass(state.input_voltage, voltage, tau, dt);
    state.input_current = lowpass(state.input_current, current, tau, dt);
}
