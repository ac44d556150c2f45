//! Grounded phase helpers shared by both takeoff sequencers

use crate::control::PositionController;
use crate::math::constrain;

/// Throttle at which the vehicle is assumed airborne regardless of TKOFF_THR_MAX
pub const LIFTOFF_THROTTLE_CAP: f32 = 0.9;

/// Fraction of the maximum vertical acceleration that signals lift-off
pub const LIFTOFF_ACCEL_FRACTION: f32 = 0.5;

/// Fraction of the maximum climb speed used for velocity thresholds
pub const VEL_THRESHOLD_FRACTION: f32 = 0.1;

/// Throttle for this tick of the grounded ramp
///
/// Rises by `dt / slew_time_s` from the current throttle, clamped to [0, 1].
pub fn ramp_throttle(throttle_in: f32, dt: f32, slew_time_s: f32) -> f32 {
    if slew_time_s <= 0.0 {
        return 1.0;
    }
    constrain(throttle_in + dt / slew_time_s, 0.0, 1.0)
}

/// Lift-off criteria common to both sequencers
///
/// True when the ramped throttle reached its cap, the measured vertical
/// acceleration exceeds half the limit, or the desired climb rate reached
/// `vel_threshold_cms`.
pub fn liftoff_detected(
    pos_control: &dyn PositionController,
    throttle: f32,
    throttle_max: f32,
    measured_accel_u_cmss: f32,
    vel_threshold_cms: f32,
) -> bool {
    throttle >= throttle_max.min(LIFTOFF_THROTTLE_CAP)
        || measured_accel_u_cmss >= LIFTOFF_ACCEL_FRACTION * pos_control.max_accel_u_cmss()
        || pos_control.vel_desired_neu_cms().z >= vel_threshold_cms
}
