//! Float helpers shared by the control loops
//!
//! Comparisons use `f32::EPSILON` so stick inputs that went through a dead
//! zone compare equal to exact zero.

use libm::fabsf;

/// True when `value` is indistinguishable from zero
pub fn is_zero(value: f32) -> bool {
    fabsf(value) < f32::EPSILON
}

/// True when `value` is meaningfully above zero
pub fn is_positive(value: f32) -> bool {
    value >= f32::EPSILON
}

/// True when `value` is meaningfully below zero
pub fn is_negative(value: f32) -> bool {
    value <= -f32::EPSILON
}

/// True when `a` and `b` differ by less than `f32::EPSILON`
pub fn is_equal(a: f32, b: f32) -> bool {
    fabsf(a - b) < f32::EPSILON
}

/// Square of `value`
pub fn sq(value: f32) -> f32 {
    value * value
}

/// Clamp `value` into `[low, high]`
///
/// Unlike `f32::clamp` this never panics: NaN maps to the midpoint and an
/// inverted range returns `low`.
pub fn constrain(value: f32, low: f32, high: f32) -> f32 {
    if value.is_nan() {
        return (low + high) * 0.5;
    }
    if value < low {
        low
    } else if value > high && high >= low {
        high
    } else {
        value
    }
}

/// Square root that returns 0 for negative input
pub fn safe_sqrt(value: f32) -> f32 {
    if value <= 0.0 {
        0.0
    } else {
        libm::sqrtf(value)
    }
}

/// Wrap an angle in radians into `[0, 2π)`
pub fn wrap_2pi(angle: f32) -> f32 {
    const TAU: f32 = core::f32::consts::TAU;
    let wrapped = libm::fmodf(angle, TAU);
    if wrapped < 0.0 {
        let shifted = wrapped + TAU;
        if shifted >= TAU {
            0.0
        } else {
            shifted
        }
    } else {
        wrapped
    }
}

/// Wrap an angle in radians into `[-π, π]`
pub fn wrap_pi(angle: f32) -> f32 {
    let wrapped = wrap_2pi(angle);
    if wrapped > core::f32::consts::PI {
        wrapped - core::f32::consts::TAU
    } else {
        wrapped
    }
}
