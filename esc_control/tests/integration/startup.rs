//! Controller initialization checks.

use super::support::{MockDriver, MockState};
use esc_common::control::config::{ControlConfig, MAX_SETPOINT_TIMEOUT_MS};
use esc_common::control::types::{ControlMode, LimitFlags};
use esc_control::{ControlError, MotorController};

fn driver_at(voltage: f32) -> MockDriver {
    MockDriver::with(MockState {
        voltage,
        current: 0.5,
        ..Default::default()
    })
}

#[test]
fn test_init_seeds_filters_from_first_sample() {
    let controller = MotorController::new(driver_at(12.0), &ControlConfig::default()).unwrap();

    let (v, i) = controller.input_voltage_current();
    assert!((v - 12.0).abs() < 1e-3);
    assert!((i - 0.5).abs() < 1e-3);
}

#[test]
fn test_init_initial_status() {
    let controller = MotorController::new(driver_at(12.0), &ControlConfig::default()).unwrap();

    let status = controller.status();
    assert_eq!(status.mode, ControlMode::OpenLoop);
    assert_eq!(status.duty_setpoint, 0.0);
    assert_eq!(status.rpm_setpoint, 0);
    assert_eq!(status.rpm, 0);
    assert!(!status.running);
    assert_eq!(status.limit_mask, LimitFlags::empty());
}

#[test]
fn test_init_rejects_low_voltage() {
    let result = MotorController::new(driver_at(3.9), &ControlConfig::default());

    match result {
        Err(ControlError::InvalidInputVoltage { voltage }) => {
            assert!((voltage - 3.9).abs() < 1e-6);
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("3.9V must be rejected"),
    }
}

#[test]
fn test_init_rejects_high_voltage() {
    let result = MotorController::new(driver_at(40.5), &ControlConfig::default());
    assert!(matches!(result, Err(ControlError::InvalidInputVoltage { .. })));
}

#[test]
fn test_init_accepts_voltage_window_edges() {
    assert!(MotorController::new(driver_at(4.0), &ControlConfig::default()).is_ok());
    assert!(MotorController::new(driver_at(40.0), &ControlConfig::default()).is_ok());
}

#[test]
fn test_init_driver_failure_propagates() {
    let driver = MockDriver::with(MockState {
        init_error: Some("no hardware".to_string()),
        ..Default::default()
    });

    let result = MotorController::new(driver, &ControlConfig::default());
    assert!(matches!(result, Err(ControlError::Driver(_))));
}

#[test]
fn test_init_invalid_config_skips_driver() {
    let driver = MockDriver::with(MockState {
        init_error: Some("must not be reached".to_string()),
        ..Default::default()
    });
    let config = ControlConfig {
        poles: 0,
        ..Default::default()
    };

    let result = MotorController::new(driver, &config);
    assert!(matches!(result, Err(ControlError::Config(_))));
}

#[test]
fn test_init_derives_rpm_range_from_driver_limit() {
    let controller = MotorController::new(driver_at(12.0), &ControlConfig::default()).unwrap();

    let params = controller.params();
    assert_eq!(params.comm_period_limit, 700);
    assert_eq!(params.rpm_max, 20408);
    assert_eq!(params.rpm_min, 500);
}

#[test]
fn test_longest_setpoint_timeout_starts_controller() {
    let config = ControlConfig {
        setpoint_timeout_ms: MAX_SETPOINT_TIMEOUT_MS,
        ..Default::default()
    };
    let controller = MotorController::new(driver_at(12.0), &config).unwrap();

    controller.set_duty_cycle(0.5);
    assert!((controller.status().duty_setpoint - 0.5).abs() < 1e-6);
}

#[test]
fn test_overflowing_setpoint_timeout_is_a_config_error() {
    let config = ControlConfig {
        setpoint_timeout_ms: u64::MAX / 1000,
        ..Default::default()
    };

    let result = MotorController::new(driver_at(12.0), &config);
    assert!(matches!(result, Err(ControlError::Config(_))));
}
