//! RC input types
//!
//! Normalized pilot stick input as delivered by the (external) RC decoder,
//! per-channel calibration used by the RC pre-arm check, and the pilot
//! climb-rate mapping shared by the modes.

use crate::math::constrain;
use crate::parameters::PilotParams;

/// Calibrated minimum PWM above this fails the RC check
pub const RC_CALIB_MIN_LIMIT_PWM: u16 = 1300;

/// Calibrated maximum PWM below this fails the RC check
pub const RC_CALIB_MAX_LIMIT_PWM: u16 = 1700;

/// Normalized stick deflections for one tick
///
/// Each axis is in `[-1.0, 1.0]` with the dead zone already applied, so a
/// centred stick reads exactly `0.0`. `valid` is false while the RC link is
/// in failsafe.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PilotInput {
    /// Roll stick, positive right
    pub roll: f32,
    /// Pitch stick, positive forward
    pub pitch: f32,
    /// Yaw stick, positive clockwise
    pub yaw: f32,
    /// Throttle stick around mid, positive climb
    pub throttle: f32,
    /// Input may be acted on
    pub valid: bool,
}

impl PilotInput {
    /// Valid input with every stick centred
    pub fn centered() -> Self {
        Self {
            valid: true,
            ..Self::default()
        }
    }

    /// Copy with every axis clamped into `[-1.0, 1.0]`
    pub fn clamped(self) -> Self {
        Self {
            roll: constrain(self.roll, -1.0, 1.0),
            pitch: constrain(self.pitch, -1.0, 1.0),
            yaw: constrain(self.yaw, -1.0, 1.0),
            throttle: constrain(self.throttle, -1.0, 1.0),
            valid: self.valid,
        }
    }
}

/// Calibration of one RC input channel (PWM microseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RcChannel {
    /// Channel function name used in failure messages
    pub name: &'static str,
    pub radio_min: u16,
    pub radio_trim: u16,
    pub radio_max: u16,
}

impl RcChannel {
    pub const fn new(name: &'static str, radio_min: u16, radio_trim: u16, radio_max: u16) -> Self {
        Self {
            name,
            radio_min,
            radio_trim,
            radio_max,
        }
    }

    /// Channel with typical factory calibration (1100/1500/1900)
    pub const fn calibrated(name: &'static str) -> Self {
        Self::new(name, 1100, 1500, 1900)
    }

    /// First calibration problem on this channel, if any
    pub fn calibration_problem(&self) -> Option<&'static str> {
        if self.radio_min > RC_CALIB_MIN_LIMIT_PWM {
            Some("radio min too high")
        } else if self.radio_max < RC_CALIB_MAX_LIMIT_PWM {
            Some("radio max too low")
        } else if self.radio_trim < self.radio_min || self.radio_trim > self.radio_max {
            Some("trim out of range")
        } else {
            None
        }
    }
}

/// Pilot-desired climb rate in cm/s from the throttle stick
///
/// Zero while RC input is invalid.
pub fn pilot_desired_climb_rate(input: &PilotInput, pilot: &PilotParams) -> f32 {
    if !input.valid {
        return 0.0;
    }

    let throttle = constrain(input.throttle, -1.0, 1.0);
    if throttle >= 0.0 {
        throttle * pilot.speed_up_cms
    } else {
        throttle * pilot.speed_down_cms()
    }
}
