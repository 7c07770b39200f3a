//! Mode controller output.

/// What a mode controller asks the cycle to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlOutput {
    /// Drive at this duty cycle (before slew limiting).
    Drive(f32),
    /// No valid output; stop the motor.
    Stop,
    /// Mode has no controller; treated as a stop.
    Unavailable,
}

impl ControlOutput {
    /// Duty target if this output drives the motor with a finite value.
    #[inline]
    pub fn drive_target(self) -> Option<f32> {
        match self {
            Self::Drive(duty) if duty.is_finite() => Some(duty),
            _ => None,
        }
    }
}
