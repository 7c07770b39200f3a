//! Setters and readers racing the control thread.

use super::support::{MockDriver, MockState, wait_until};
use esc_common::control::config::ControlConfig;
use esc_common::control::types::ControlMode;
use esc_control::MotorController;
use std::thread;
use std::time::Duration;

const ITERATIONS: u32 = 2000;

#[test]
fn test_alternating_setters_under_live_loop() {
    let driver = MockDriver::with(MockState {
        start_to_running: true,
        running_period: 5000,
        ..Default::default()
    });
    let controller = MotorController::new(driver.clone(), &ControlConfig::default()).unwrap();

    thread::scope(|s| {
        for worker in 0..4u32 {
            let controller = &controller;
            s.spawn(move || {
                for i in 0..ITERATIONS {
                    if (i + worker) % 2 == 0 {
                        controller.set_duty_cycle((i % 100) as f32 / 100.0);
                    } else {
                        controller.set_rpm(i * 10);
                    }
                }
            });
        }
        for _ in 0..2 {
            let controller = &controller;
            s.spawn(move || {
                for _ in 0..ITERATIONS {
                    let status = controller.status();
                    assert!((0.0..=1.0).contains(&status.duty_setpoint));
                    assert!(status.rpm_setpoint <= controller.params().rpm_max);
                    let _ = controller.rpm();
                    let _ = controller.is_running();
                }
            });
        }
    });

    // The loop is still alive and responsive afterwards
    controller.set_duty_cycle(0.3);
    assert_eq!(controller.mode(), ControlMode::OpenLoop);
    let before = controller.stats().cycle_count;
    assert!(wait_until(Duration::from_secs(3), || {
        controller.stats().cycle_count > before + 10
    }));
}

#[test]
fn test_last_setter_wins() {
    let controller =
        MotorController::new(MockDriver::default(), &ControlConfig::default()).unwrap();

    thread::scope(|s| {
        s.spawn(|| {
            for _ in 0..ITERATIONS {
                controller.set_rpm(1000);
            }
        });
    });
    controller.set_duty_cycle(0.25);

    let status = controller.status();
    assert_eq!(status.mode, ControlMode::OpenLoop);
    assert!((status.duty_setpoint - 0.25).abs() < 1e-6);
    // The RPM setpoint is kept, only the mode switches
    assert_eq!(status.rpm_setpoint, 1000);
}

#[test]
fn test_shutdown_while_setters_active() {
    let mut controller =
        MotorController::new(MockDriver::default(), &ControlConfig::default()).unwrap();

    thread::scope(|s| {
        let c = &controller;
        s.spawn(move || {
            for i in 0..ITERATIONS {
                c.set_duty_cycle((i % 10) as f32 / 10.0);
            }
        });
    });
    controller.shutdown();

    // Setters and readers still work once the thread is gone
    controller.set_duty_cycle(0.5);
    assert!((controller.status().duty_setpoint - 0.5).abs() < 1e-6);
}
