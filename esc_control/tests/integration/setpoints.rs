//! Setter clamping and reader consistency.

use super::support::{MockDriver, MockState, config_with_period_us};
use esc_common::control::config::ControlConfig;
use esc_common::control::types::ControlMode;
use esc_control::MotorController;
use proptest::prelude::*;

// Long enough that no cycle runs between reads unless a setter wakes it.
const QUIET_PERIOD_US: u64 = 10_000_000;

fn controller() -> MotorController<MockDriver> {
    MotorController::new(MockDriver::default(), &ControlConfig::default()).unwrap()
}

#[test]
fn test_set_duty_cycle_selects_open_loop() {
    let controller = controller();
    controller.set_rpm(1000);
    assert_eq!(controller.mode(), ControlMode::RpmTarget);

    controller.set_duty_cycle(0.4);
    assert_eq!(controller.mode(), ControlMode::OpenLoop);
    assert!((controller.status().duty_setpoint - 0.4).abs() < 1e-6);
}

#[test]
fn test_set_rpm_clamps_to_rpm_max() {
    let controller = controller();

    controller.set_rpm(1_000_000);
    assert_eq!(controller.mode(), ControlMode::RpmTarget);
    assert_eq!(controller.status().rpm_setpoint, controller.params().rpm_max);
}

#[test]
fn test_set_duty_cycle_nan_is_zero() {
    let controller = controller();

    controller.set_duty_cycle(f32::NAN);
    assert_eq!(controller.status().duty_setpoint, 0.0);
}

#[test]
fn test_readers_are_idempotent() {
    let driver = MockDriver::with(MockState {
        comm_period: 5000,
        ..Default::default()
    });
    let controller =
        MotorController::new(driver, &config_with_period_us(QUIET_PERIOD_US)).unwrap();

    assert_eq!(controller.duty_cycle(), controller.duty_cycle());
    assert_eq!(controller.rpm(), controller.rpm());
    assert_eq!(controller.rpm(), 2857);
    assert_eq!(controller.mode(), controller.mode());
    assert_eq!(controller.limit_mask(), controller.limit_mask());
    assert_eq!(
        controller.input_voltage_current(),
        controller.input_voltage_current()
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_duty_setpoint_is_clamped(duty in prop::num::f32::ANY) {
        let controller = controller();
        controller.set_duty_cycle(duty);

        let status = controller.status();
        prop_assert_eq!(status.mode, ControlMode::OpenLoop);
        prop_assert!((0.0..=1.0).contains(&status.duty_setpoint));
        if duty.is_finite() && (0.0..=1.0).contains(&duty) {
            prop_assert_eq!(status.duty_setpoint, duty);
        }
    }

    #[test]
    fn prop_rpm_setpoint_is_clamped(rpm in any::<u32>()) {
        let controller = controller();
        controller.set_rpm(rpm);

        let status = controller.status();
        prop_assert_eq!(status.mode, ControlMode::RpmTarget);
        prop_assert_eq!(status.rpm_setpoint, rpm.min(controller.params().rpm_max));
    }
}
