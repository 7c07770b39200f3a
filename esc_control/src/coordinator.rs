//! Control thread and the locked setter/reader API.
//!
//! One dedicated thread runs the control cycle every `control_period_us`,
//! or earlier when a setter signals a new setpoint. All reads and writes of
//! [`ControlState`] (and every driver call) happen under a single mutex.
//!
//! Setters release the mutex *before* raising the wake signal, so the woken
//! thread never stalls on a lock its waker still holds. The wake signal is
//! latched: a notification raised while the thread is busy makes the next
//! wait return immediately.

use esc_common::clock::{MonotonicClock, SystemClock, hnsec_to_secs};
use esc_common::consts::{HNSEC_PER_SEC, MAX_VALID_INPUT_VOLTAGE, MIN_VALID_INPUT_VOLTAGE};
use esc_common::control::config::ControlConfig;
use esc_common::control::types::{ControlMode, LimitFlags};
use esc_common::hal::driver::{MotorDriver, RunState};
use parking_lot::{Condvar, Mutex};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

use crate::control::cycle::update_control;
use crate::control::filters::{init_filters, update_filters};
use crate::conversion::comm_period_to_rpm;
use crate::error::ControlError;
use crate::params::Parameters;
use crate::rt::{is_rt_thread, rt_setup};
use crate::state::{ControlState, ControlStatus};
use crate::stats::CycleStats;

/// Latched wake-up event with a bounded wait.
struct WakeSignal {
    pending: Mutex<bool>,
    cond: Condvar,
}

impl WakeSignal {
    fn new() -> Self {
        Self {
            pending: Mutex::new(false),
            cond: Condvar::new(),
        }
    }

    fn notify(&self) {
        let mut pending = self.pending.lock();
        *pending = true;
        self.cond.notify_all();
    }

    /// Wait until notified or `timeout` elapses. Returns `true` if notified.
    fn wait(&self, timeout: Duration) -> bool {
        let mut pending = self.pending.lock();
        if !*pending {
            let _ = self.cond.wait_for(&mut pending, timeout);
        }
        std::mem::replace(&mut *pending, false)
    }
}

/// Everything guarded by the controller mutex.
struct Core<D> {
    state: ControlState,
    driver: D,
    stats: CycleStats,
    /// Clock reading of the last setter call [hnsec].
    last_setpoint_hnsec: u64,
}

struct Shared<D, C> {
    core: Mutex<Core<D>>,
    wake: WakeSignal,
    params: Parameters,
    clock: C,
    period: Duration,
    /// 0 disables the setpoint timeout.
    setpoint_timeout_hnsec: u64,
    rt_priority: i32,
    shutdown: AtomicBool,
}

/// Handle to a running motor controller.
///
/// Created by [`MotorController::init`]; the control thread runs until
/// [`MotorController::shutdown`] or drop.
pub struct MotorController<D: MotorDriver + 'static, C: MonotonicClock + 'static = SystemClock> {
    shared: Arc<Shared<D, C>>,
    worker: Option<JoinHandle<()>>,
}

impl<D: MotorDriver + 'static> MotorController<D, SystemClock> {
    /// Bring up control on the system monotonic clock.
    pub fn new(driver: D, config: &ControlConfig) -> Result<Self, ControlError> {
        Self::init(driver, SystemClock::new(), config)
    }
}

impl<D: MotorDriver + 'static, C: MonotonicClock + 'static> MotorController<D, C> {
    /// Initialize the driver, derive parameters, check the bus voltage and
    /// start the control thread.
    ///
    /// # Errors
    /// - `ControlError::Config` if `config` fails validation
    /// - `ControlError::Driver` if the driver fails to initialize
    /// - `ControlError::InvalidInputVoltage` if the startup reading is
    ///   outside `[4, 40]` V
    /// - `ControlError::Spawn` if the thread cannot be created
    pub fn init(mut driver: D, clock: C, config: &ControlConfig) -> Result<Self, ControlError> {
        config.validate()?;
        driver.init()?;
        info!("Motor driver '{}' initialized", driver.name());

        let params = Parameters::derive(config, driver.comm_period_limit_hnsec());

        let mut state = ControlState::default();
        init_filters(&mut state, driver.input_voltage_current());
        if !(MIN_VALID_INPUT_VOLTAGE..=MAX_VALID_INPUT_VOLTAGE).contains(&state.input_voltage) {
            error!("Motor control: invalid input voltage: {}", state.input_voltage);
            return Err(ControlError::InvalidInputVoltage {
                voltage: state.input_voltage,
            });
        }

        let now = clock.now_hnsec();
        let shared = Arc::new(Shared {
            core: Mutex::new(Core {
                state,
                driver,
                stats: CycleStats::default(),
                last_setpoint_hnsec: now,
            }),
            wake: WakeSignal::new(),
            params,
            clock,
            period: Duration::from_micros(config.control_period_us),
            setpoint_timeout_hnsec: config
                .setpoint_timeout_ms
                .saturating_mul(HNSEC_PER_SEC / 1000),
            rt_priority: config.rt_priority,
            shutdown: AtomicBool::new(false),
        });

        let thread_shared = Arc::clone(&shared);
        let worker = std::thread::Builder::new()
            .name("esc-control".to_string())
            .spawn(move || control_thread(thread_shared))?;

        Ok(Self {
            shared,
            worker: Some(worker),
        })
    }

    /// Select open-loop mode with a duty cycle, clamped to `[0, 1]`.
    pub fn set_duty_cycle(&self, duty: f32) {
        {
            let mut core = self.shared.core.lock();
            core.state.mode = ControlMode::OpenLoop;
            core.state.duty_openloop_setpoint = clamp_duty(duty);
            core.last_setpoint_hnsec = self.shared.clock.now_hnsec();
        }
        // Wake the control thread to process the new setpoint immediately
        self.shared.wake.notify();
    }

    /// Select RPM mode with a target RPM, clamped to `rpm_max`.
    pub fn set_rpm(&self, rpm: u32) {
        {
            let mut core = self.shared.core.lock();
            core.state.mode = ControlMode::RpmTarget;
            core.state.rpm_setpoint = rpm.min(self.shared.params.rpm_max);
            core.last_setpoint_hnsec = self.shared.clock.now_hnsec();
        }
        self.shared.wake.notify();
    }

    /// Last commanded duty cycle.
    pub fn duty_cycle(&self) -> f32 {
        self.shared.core.lock().state.duty_actual
    }

    /// Mechanical RPM from the driver's commutation period; 0 when stopped.
    pub fn rpm(&self) -> u32 {
        let mut core = self.shared.core.lock();
        let cp = core.driver.comm_period_hnsec();
        comm_period_to_rpm(cp, self.shared.params.poles)
    }

    /// Active control mode.
    pub fn mode(&self) -> ControlMode {
        self.shared.core.lock().state.mode
    }

    /// `true` unless the driver reports [`RunState::Idle`].
    pub fn is_running(&self) -> bool {
        self.shared.core.lock().driver.run_state() != RunState::Idle
    }

    /// Limits active during the last cycle.
    pub fn limit_mask(&self) -> LimitFlags {
        self.shared.core.lock().state.limit_mask
    }

    /// Filtered bus voltage [V] and current [A].
    pub fn input_voltage_current(&self) -> (f32, f32) {
        let core = self.shared.core.lock();
        (core.state.input_voltage, core.state.input_current)
    }

    /// Every readable value, under one lock.
    pub fn status(&self) -> ControlStatus {
        let mut core = self.shared.core.lock();
        let cp = core.driver.comm_period_hnsec();
        let running = core.driver.run_state() != RunState::Idle;
        let state = &core.state;
        ControlStatus {
            mode: state.mode,
            limit_mask: state.limit_mask,
            duty_cycle: state.duty_actual,
            duty_setpoint: state.duty_openloop_setpoint,
            rpm_setpoint: state.rpm_setpoint,
            rpm: comm_period_to_rpm(cp, self.shared.params.poles),
            running,
            input_voltage: state.input_voltage,
            input_current: state.input_current,
        }
    }

    /// Control thread timing statistics.
    pub fn stats(&self) -> CycleStats {
        self.shared.core.lock().stats
    }

    /// Parameters derived at init. Lock-free.
    pub fn params(&self) -> &Parameters {
        &self.shared.params
    }

    /// Stop the control thread, then stop the motor.
    pub fn shutdown(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };
        info!("Motor control shutdown requested");
        self.shared.shutdown.store(true, Ordering::Release);
        self.shared.wake.notify();
        if worker.join().is_err() {
            error!("Control thread panicked");
        }
        self.shared.core.lock().driver.stop();
    }
}

impl<D: MotorDriver + 'static, C: MonotonicClock + 'static> Drop for MotorController<D, C> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[inline]
fn clamp_duty(duty: f32) -> f32 {
    if duty.is_nan() {
        return 0.0;
    }
    duty.clamp(0.0, 1.0)
}

fn control_thread<D: MotorDriver, C: MonotonicClock>(shared: Arc<Shared<D, C>>) {
    if let Err(e) = rt_setup(shared.rt_priority) {
        warn!("Control thread RT setup failed, continuing: {e}");
    }
    info!(
        "Control thread started (period={}us, rt={})",
        shared.period.as_micros(),
        is_rt_thread()
    );

    let mut timestamp_hnsec = shared.clock.now_hnsec();

    while !shared.shutdown.load(Ordering::Acquire) {
        shared.wake.wait(shared.period);
        if shared.shutdown.load(Ordering::Acquire) {
            break;
        }

        let mut core = shared.core.lock();
        let cycle_start = Instant::now();

        let now_hnsec = shared.clock.now_hnsec();
        let dt = hnsec_to_secs(now_hnsec.saturating_sub(timestamp_hnsec));
        timestamp_hnsec = now_hnsec;

        check_setpoint_timeout(&mut *core, &shared, now_hnsec);

        let Core { state, driver, .. } = &mut *core;
        let sample = driver.input_voltage_current();
        update_filters(state, sample, shared.params.filter_tau, dt);
        update_control(state, &shared.params, driver, dt);

        let body = cycle_start.elapsed();
        let overrun = core.stats.record(body, shared.period, dt);
        let stats = core.stats;
        drop(core);

        if overrun && (stats.overruns <= 10 || stats.overruns % 1000 == 0) {
            warn!(
                "Timing violation #{}: cycle took {}us (target {}us)",
                stats.overruns,
                body.as_micros(),
                shared.period.as_micros()
            );
        }
        if stats.cycle_count % 1000 == 0 {
            debug!(
                "Control loop: {} cycles, avg={}us, max={}us, overruns={}",
                stats.cycle_count,
                stats.avg_cycle_us(),
                stats.max_cycle_us,
                stats.overruns
            );
        }
    }

    info!("Control thread stopped");
}

/// Zero the setpoints once no setter has been called for the timeout.
fn check_setpoint_timeout<D, C>(core: &mut Core<D>, shared: &Shared<D, C>, now_hnsec: u64) {
    if shared.setpoint_timeout_hnsec == 0 {
        return;
    }
    let holding = core.state.duty_openloop_setpoint > 0.0 || core.state.rpm_setpoint > 0;
    if holding && now_hnsec.saturating_sub(core.last_setpoint_hnsec) > shared.setpoint_timeout_hnsec
    {
        warn!(
            "Setpoint timeout after {:.3}s, zeroing setpoints",
            hnsec_to_secs(now_hnsec - core.last_setpoint_hnsec)
        );
        core.state.duty_openloop_setpoint = 0.0;
        core.state.rpm_setpoint = 0;
    }
}
