//! # ESC Control
//!
//! Runs the motor control loop against a registered driver and reports
//! status until Ctrl-C or the requested duration elapses.
//!
//! # Usage
//!
//! ```bash
//! # Open-loop at 40% duty on the simulated motor
//! esc_control --config config/esc.toml --duty 0.4
//!
//! # RPM target for 5 seconds with debug output
//! esc_control --rpm 3000 --duration 5 -v
//! ```

use clap::Parser;
use esc_common::config::{ConfigError, EscConfig, LogLevel};
use esc_common::consts::DEFAULT_CONFIG_PATH;
use esc_control::MotorController;
use esc_hal::DriverRegistry;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;

/// ESC Control - closed-loop BLDC motor supervisor
#[derive(Parser, Debug)]
#[command(name = "esc_control")]
#[command(author = "RTS007")]
#[command(version)]
#[command(about = "Closed-loop BLDC motor control supervisor")]
struct Args {
    /// Path to the configuration file. Falls back to config/esc.toml, then
    /// to built-in defaults.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Driver to load, overriding `[driver] name`.
    #[arg(short, long)]
    driver: Option<String>,

    /// Open-loop duty cycle setpoint in [0, 1].
    #[arg(long, conflicts_with = "rpm")]
    duty: Option<f32>,

    /// RPM setpoint.
    #[arg(long)]
    rpm: Option<u32>,

    /// Stop after this many seconds (0 runs until Ctrl-C).
    #[arg(long, default_value_t = 0.0)]
    duration: f64,

    /// Status report interval in milliseconds.
    #[arg(long, default_value_t = 500)]
    status_interval_ms: u64,

    /// Enable verbose logging (DEBUG level).
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();

    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    let config = match &args.config {
        Some(path) => EscConfig::load_validated(path),
        None if default_path.exists() => EscConfig::load_validated(default_path),
        None => Ok(EscConfig::default()),
    };
    let log_level = config
        .as_ref()
        .map(|c| c.shared.log_level)
        .unwrap_or_default();
    setup_tracing(&args, log_level);

    info!("ESC Control v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&args, config) {
        error!("FATAL: {e}");
        process::exit(1);
    }

    info!("ESC Control shutdown complete");
}

fn run(
    args: &Args,
    config: Result<EscConfig, ConfigError>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = config?;
    let driver_name = args.driver.as_deref().unwrap_or(&config.driver.name);
    info!(
        "Config OK: service={}, driver={}, period={}us",
        config.shared.service_name, driver_name, config.control.control_period_us
    );

    let registry = DriverRegistry::with_builtin();
    if !registry.contains(driver_name) {
        error!("Available drivers: {}", registry.list_drivers().join(", "));
    }
    let driver = registry.create_driver(driver_name, &config)?;
    let mut controller = MotorController::new(driver, &config.control)?;

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        r.store(false, Ordering::SeqCst);
    })?;

    if let Some(duty) = args.duty {
        info!("Setpoint: duty cycle {duty}");
        controller.set_duty_cycle(duty);
    } else if let Some(rpm) = args.rpm {
        info!("Setpoint: {rpm} RPM");
        controller.set_rpm(rpm);
    }

    let started = Instant::now();
    let deadline = (args.duration > 0.0).then(|| Duration::from_secs_f64(args.duration));
    let interval = Duration::from_millis(args.status_interval_ms.max(1));
    let mut next_report = Instant::now() + interval;

    while running.load(Ordering::SeqCst) {
        if deadline.is_some_and(|d| started.elapsed() >= d) {
            info!("Requested duration elapsed");
            break;
        }
        std::thread::sleep(Duration::from_millis(10));
        if Instant::now() >= next_report {
            next_report += interval;
            let s = controller.status();
            info!(
                "mode={:?} running={} duty={:.3} rpm={} limits={:?} V={:.2} I={:.2}",
                s.mode,
                s.running,
                s.duty_cycle,
                s.rpm,
                s.limit_mask,
                s.input_voltage,
                s.input_current
            );
        }
    }

    controller.shutdown();
    let stats = controller.stats();
    info!(
        "Control loop ran {} cycles (avg={}us, max={}us, overruns={})",
        stats.cycle_count,
        stats.avg_cycle_us(),
        stats.max_cycle_us,
        stats.overruns
    );
    Ok(())
}

/// Setup tracing subscriber based on CLI arguments and the config level.
fn setup_tracing(args: &Args, log_level: LogLevel) {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        log_level.as_tracing_level()
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .init();
    }
}
