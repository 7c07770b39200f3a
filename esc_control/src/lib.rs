//! # ESC Control Library
//!
//! Closed-control-loop supervisor for a sensorless BLDC motor driver.
//! Converts a duty-cycle or RPM setpoint into a continuously adjusted drive
//! command, enforcing the spin-up sequence, duty-cycle slew limits and the
//! startup voltage window.
//!
//! ## Layers
//!
//! 1. **conversion** - commutation period ⇄ RPM
//! 2. **control::filters** - voltage/current low-pass
//! 3. **params** - tuning constants derived once at startup
//! 4. **state** / **control::cycle** - mutable control state and the
//!    spin-up / open-loop / slew algorithms that mutate it
//! 5. **coordinator** - the periodic control thread and the locked
//!    setter/reader API ([`MotorController`])
//!
//! ## Known limitation
//!
//! RPM-target mode has no closed-loop controller yet: the RPM branch always
//! reports [`ControlOutput::Unavailable`] and the motor is stopped.

pub mod control;
pub mod conversion;
pub mod coordinator;
pub mod error;
pub mod params;
pub mod rt;
pub mod state;
pub mod stats;

pub use crate::control::output::ControlOutput;
pub use crate::coordinator::MotorController;
pub use crate::error::ControlError;
pub use crate::params::Parameters;
pub use crate::state::{ControlState, ControlStatus};
