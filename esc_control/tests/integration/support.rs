//! Mock driver and clock shared by the integration tests.

use esc_common::clock::MonotonicClock;
use esc_common::control::config::ControlConfig;
use esc_common::hal::driver::{HalError, MotorDriver, RunState};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Observable state of a [`MockDriver`].
#[derive(Debug)]
pub struct MockState {
    pub run_state: RunState,
    pub comm_period: u32,
    pub comm_period_limit: u32,
    pub voltage: f32,
    pub current: f32,
    /// Jump straight to `Running` at `running_period` on start.
    pub start_to_running: bool,
    pub running_period: u32,
    pub init_error: Option<String>,
    pub starts: Vec<(f32, f32, bool)>,
    pub stops: u32,
    pub duties: Vec<f32>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            run_state: RunState::Idle,
            comm_period: 0,
            comm_period_limit: 700,
            voltage: 12.0,
            current: 0.0,
            start_to_running: false,
            running_period: 5000,
            init_error: None,
            starts: Vec::new(),
            stops: 0,
            duties: Vec::new(),
        }
    }
}

/// Driver whose state lives behind a shared handle the test keeps.
#[derive(Clone, Default)]
pub struct MockDriver(pub Arc<Mutex<MockState>>);

impl MockDriver {
    pub fn with(state: MockState) -> Self {
        Self(Arc::new(Mutex::new(state)))
    }

    pub fn stops(&self) -> u32 {
        self.0.lock().stops
    }

    pub fn starts(&self) -> Vec<(f32, f32, bool)> {
        self.0.lock().starts.clone()
    }

    pub fn last_duty(&self) -> Option<f32> {
        self.0.lock().duties.last().copied()
    }

    pub fn set_comm_period(&self, period: u32) {
        self.0.lock().comm_period = period;
    }
}

impl MotorDriver for MockDriver {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn init(&mut self) -> Result<(), HalError> {
        match self.0.lock().init_error.clone() {
            Some(msg) => Err(HalError::InitFailed(msg)),
            None => Ok(()),
        }
    }

    fn run_state(&mut self) -> RunState {
        self.0.lock().run_state
    }

    fn start(&mut self, target_duty: f32, spinup_duty: f32, reverse: bool) {
        let mut s = self.0.lock();
        s.starts.push((target_duty, spinup_duty, reverse));
        if s.start_to_running {
            s.run_state = RunState::Running;
            s.comm_period = s.running_period;
        } else {
            s.run_state = RunState::Starting;
        }
    }

    fn stop(&mut self) {
        let mut s = self.0.lock();
        s.stops += 1;
        s.run_state = RunState::Idle;
        s.comm_period = 0;
    }

    fn set_duty_cycle(&mut self, duty: f32) {
        self.0.lock().duties.push(duty);
    }

    fn comm_period_hnsec(&mut self) -> u32 {
        self.0.lock().comm_period
    }

    fn comm_period_limit_hnsec(&self) -> u32 {
        self.0.lock().comm_period_limit
    }

    fn input_voltage_current(&mut self) -> (f32, f32) {
        let s = self.0.lock();
        (s.voltage, s.current)
    }
}

/// Clock advanced only by the test.
#[derive(Debug, Default)]
pub struct ManualClock(AtomicU64);

impl ManualClock {
    pub fn advance_ms(&self, ms: u64) {
        self.0.fetch_add(ms * 10_000, Ordering::SeqCst);
    }
}

impl MonotonicClock for ManualClock {
    fn now_hnsec(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}

/// Config with a custom control period.
pub fn config_with_period_us(period_us: u64) -> ControlConfig {
    ControlConfig {
        control_period_us: period_us,
        ..Default::default()
    }
}

/// Poll `cond` every millisecond until it holds or `timeout` passes.
pub fn wait_until(timeout: Duration, mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(1));
    }
    cond()
}
