//! Real-time setup for the control thread.
//!
//! With the `rt` feature the coordinator thread locks all memory pages and
//! switches itself to `SCHED_FIFO`. Without it every call is a no-op.

use crate::error::ControlError;

/// Lock all current and future memory pages.
#[cfg(feature = "rt")]
fn rt_mlockall() -> Result<(), ControlError> {
    use nix::sys::mman::{MlockallFlags, mlockall};
    mlockall(MlockallFlags::MCL_CURRENT | MlockallFlags::MCL_FUTURE)
        .map_err(|e| ControlError::RtSetup(format!("mlockall failed: {e}")))
}

#[cfg(not(feature = "rt"))]
fn rt_mlockall() -> Result<(), ControlError> {
    Ok(())
}

/// Set SCHED_FIFO with the given priority for the calling thread.
#[cfg(feature = "rt")]
fn rt_set_scheduler(priority: i32) -> Result<(), ControlError> {
    let param = libc::sched_param {
        sched_priority: priority,
    };
    let ret = unsafe { libc::sched_setscheduler(0, libc::SCHED_FIFO, &param) };
    if ret != 0 {
        let err = std::io::Error::last_os_error();
        return Err(ControlError::RtSetup(format!(
            "sched_setscheduler(SCHED_FIFO, {priority}) failed: {err}"
        )));
    }
    Ok(())
}

#[cfg(not(feature = "rt"))]
fn rt_set_scheduler(_priority: i32) -> Result<(), ControlError> {
    Ok(())
}

/// Prepare the calling thread for real-time control.
///
/// A priority of 0 or less leaves the scheduler untouched.
pub fn rt_setup(priority: i32) -> Result<(), ControlError> {
    if priority <= 0 {
        return Ok(());
    }
    rt_mlockall()?;
    rt_set_scheduler(priority)
}

/// Whether the calling thread runs under a real-time policy.
pub fn is_rt_thread() -> bool {
    #[cfg(target_os = "linux")]
    {
        let policy = unsafe { libc::sched_getscheduler(0) };
        policy == libc::SCHED_FIFO || policy == libc::SCHED_RR
    }
    #[cfg(not(target_os = "linux"))]
    {
        false
    }
}
