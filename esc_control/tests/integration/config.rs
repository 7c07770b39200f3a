//! Configuration files feeding the controller.

use super::support::{MockDriver, wait_until};
use esc_common::config::{ConfigError, EscConfig};
use esc_control::{ControlError, MotorController};
use esc_hal::DriverRegistry;
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_shipped_config_loads() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../config/esc.toml");
    let config = EscConfig::load_validated(&path).unwrap();

    assert_eq!(config.driver.name, "simulation");
    assert_eq!(config.control.poles, 14);
    assert_eq!(config.control.control_period_us, 1000);
}

#[test]
fn test_control_table_reaches_controller() {
    let file = write_config(
        r#"
[control]
rpm_min = 800
setpoint_timeout_ms = 25
"#,
    );
    let config = EscConfig::load_validated(file.path()).unwrap();
    let controller = MotorController::new(MockDriver::default(), &config.control).unwrap();

    assert_eq!(controller.params().rpm_min, 800);

    // Timeout is measured on the system clock here
    controller.set_duty_cycle(0.5);
    assert!(wait_until(Duration::from_secs(2), || {
        controller.status().duty_setpoint == 0.0
    }));
}

#[test]
fn test_invalid_control_table_is_rejected_at_load() {
    let file = write_config("[control]\npoles = 0\n");

    let result = EscConfig::load_validated(file.path());
    assert!(matches!(result, Err(ConfigError::ValidationError(_))));
}

#[test]
fn test_unvalidated_config_is_rejected_by_controller() {
    let file = write_config("[control]\nduty_slope = -1.0\n");
    let config: EscConfig = esc_common::config::ConfigLoader::load(file.path()).unwrap();

    let result = MotorController::new(MockDriver::default(), &config.control);
    assert!(matches!(result, Err(ControlError::Config(_))));
}

#[test]
fn test_pole_count_mismatch_is_rejected_at_load() {
    let file = write_config("[control]\npoles = 12\n[simulation]\npoles = 14\n");

    let result = EscConfig::load_validated(file.path());
    assert!(matches!(result, Err(ConfigError::ValidationError(msg)) if msg.contains("poles")));
}

#[test]
fn test_matching_pole_count_reports_simulated_speed() {
    let file = write_config("[control]\npoles = 12\n[simulation]\npoles = 12\n");
    let config = EscConfig::load_validated(file.path()).unwrap();
    let driver = DriverRegistry::with_builtin()
        .create_driver(&config.driver.name, &config)
        .unwrap();
    let controller = MotorController::new(driver, &config.control).unwrap();

    controller.set_duty_cycle(0.5);

    // 0.5 · 12 V · 920 KV settles near 5520 RPM whatever the pole count
    assert!(wait_until(Duration::from_secs(5), || {
        (5000..=5800).contains(&controller.rpm())
    }));
}
