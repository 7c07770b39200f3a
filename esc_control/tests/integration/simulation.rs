//! End-to-end runs against the simulated motor.

use super::support::wait_until;
use esc_common::config::EscConfig;
use esc_common::control::config::ControlConfig;
use esc_common::hal::config::SimulationConfig;
use esc_hal::DriverRegistry;
use esc_hal::drivers::simulation::SimulationDriver;
use esc_control::MotorController;
use std::time::Duration;

#[test]
fn test_simulated_motor_reaches_open_loop_speed() {
    let driver = SimulationDriver::new(SimulationConfig::default());
    let controller = MotorController::new(driver, &ControlConfig::default()).unwrap();

    controller.set_duty_cycle(0.5);

    // duty 0.5 at 12V and 920 KV settles near 5500 RPM
    assert!(wait_until(Duration::from_secs(5), || {
        let rpm = controller.rpm();
        (4500..=6000).contains(&rpm)
    }));
    let status = controller.status();
    assert!(status.running);
    assert!((status.duty_cycle - 0.5).abs() < 1e-6);
    assert!(status.input_current > 0.0);
    assert!(status.input_voltage < 12.0);
}

#[test]
fn test_simulated_motor_stops_on_zero_setpoint() {
    let driver = SimulationDriver::new(SimulationConfig::default());
    let controller = MotorController::new(driver, &ControlConfig::default()).unwrap();

    controller.set_duty_cycle(0.4);
    assert!(wait_until(Duration::from_secs(5), || controller.rpm() > 1000));

    controller.set_duty_cycle(0.0);
    assert!(wait_until(Duration::from_secs(2), || !controller.is_running()));
    assert_eq!(controller.rpm(), 0);
}

#[test]
fn test_registry_driver_runs_under_controller() {
    let config = EscConfig::default();
    let driver = DriverRegistry::with_builtin()
        .create_driver(&config.driver.name, &config)
        .unwrap();
    let controller = MotorController::new(driver, &config.control).unwrap();

    controller.set_duty_cycle(0.3);
    assert!(wait_until(Duration::from_secs(5), || controller.is_running()));
}

#[test]
fn test_simulated_bus_outside_window_is_rejected() {
    let driver = SimulationDriver::new(SimulationConfig {
        bus_voltage: 48.0,
        ..Default::default()
    });
    assert!(MotorController::new(driver, &ControlConfig::default()).is_err());
}
