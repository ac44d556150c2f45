//! Per-tick mode output
//!
//! A mode's tick returns a `ModeOutput` describing what the motor and
//! attitude layers should do, instead of writing shared vehicle fields.

use nalgebra::Vector3;

use crate::control::PositionController;
use crate::vehicle::SpoolState;

/// Command for the attitude controller
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AttitudeCommand {
    /// Nothing commanded this tick
    #[default]
    None,
    /// Level attitude, zero yaw rate, motors held on the ground
    GroundHold,
    /// Thrust vector with a yaw rate
    ThrustRate {
        thrust: Vector3<f32>,
        yaw_rate_rads: f32,
        /// Reset the yaw target to the current heading first
        reset_yaw_target: bool,
    },
    /// Thrust vector with an absolute heading
    ThrustHeading {
        thrust: Vector3<f32>,
        heading_rad: f32,
    },
}

/// Direct throttle output, bypassing the vertical controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrottleOut {
    /// Throttle in [0, 1]
    pub throttle: f32,
    /// Apply tilt compensation
    pub angle_boost: bool,
}

/// Events escalated to the vehicle-wide failsafe handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FailsafeEvent {
    /// Terrain data needed for a terrain-relative target is unavailable
    Terrain,
}

/// Everything a mode asks of the vehicle for one tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ModeOutput {
    /// Desired motor spool state, `None` leaves it unchanged
    pub spool: Option<SpoolState>,
    /// Direct throttle output
    pub throttle: Option<ThrottleOut>,
    pub attitude: AttitudeCommand,
    /// Reset attitude rate controller integrators
    pub reset_rate_i_terms: bool,
    /// Lift-off detected, land-complete must be cleared
    pub clear_land_complete: bool,
    pub failsafe: Option<FailsafeEvent>,
}

impl ModeOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Output for a tick aborted by a failsafe with nothing commanded
    pub fn failsafe(event: FailsafeEvent) -> Self {
        Self {
            failsafe: Some(event),
            ..Self::default()
        }
    }
}

/// Safe output while disarmed or landed
///
/// Spools to ground idle, relaxes the vertical controller with zero throttle
/// and holds the attitude level.
pub fn make_safe_ground_handling(pos_control: &mut dyn PositionController) -> ModeOutput {
    pos_control.relax_u(0.0);
    pos_control.update_u();

    ModeOutput {
        spool: Some(SpoolState::GroundIdle),
        attitude: AttitudeCommand::GroundHold,
        reset_rate_i_terms: true,
        ..ModeOutput::default()
    }
}
