//! Commutation period ⇄ mechanical RPM.
//!
//! A BLDC motor with `p` poles commutates six times per electrical
//! revolution and turns `2 / p` mechanical revolutions per electrical one:
//!
//! ```text
//! rpm = (120 · HNSEC_PER_SEC) / (p · 6) / period
//! ```
//!
//! All math is integer and truncating.

use esc_common::consts::HNSEC_PER_SEC;

/// Numerator shared by both conversions for a given pole count.
#[inline]
fn scale(poles: u32) -> u32 {
    assert!(poles > 0, "pole count must be positive");
    ((120 * HNSEC_PER_SEC) / (u64::from(poles) * 6)) as u32
}

/// Mechanical RPM for a commutation period [hnsec].
///
/// A period of 0 means the motor is not spinning and yields 0 RPM.
#[inline]
pub fn comm_period_to_rpm(period_hnsec: u32, poles: u32) -> u32 {
    let x = scale(poles);
    if period_hnsec == 0 {
        return 0;
    }
    x / period_hnsec
}

/// Commutation period [hnsec] for a mechanical RPM. 0 RPM yields 0.
#[inline]
pub fn rpm_to_comm_period(rpm: u32, poles: u32) -> u32 {
    let x = scale(poles);
    if rpm == 0 {
        return 0;
    }
    x / rpm
}
