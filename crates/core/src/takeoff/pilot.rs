//! Pilot-guided takeoff
//!
//! Used by pilot-flown modes with altitude hold. The takeoff ramps throttle
//! while landed, then drives the vertical target toward
//! `start + takeoff altitude` while blending in the pilot's climb rate.

use super::error::TakeoffError;
use super::ground::{liftoff_detected, ramp_throttle};
use crate::control::PositionController;
use crate::math::{constrain, is_negative, is_positive};
use crate::mode::{ModeInfo, ModeOutput, ThrottleOut};
use crate::parameters::{TakeoffParams, VehicleConfig};
use crate::vehicle::VehicleSnapshot;

/// Fraction of the climb distance past which lift-off is assumed
const ALT_PROGRESS_FRACTION: f32 = 0.5;

/// Takeoff stops once the target is within 0.1% of the climb distance
const COMPLETE_FRACTION: f32 = 0.999;

/// Pilot-guided takeoff state
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PilotTakeoff {
    running: bool,
    start_alt_cm: f32,
    complete_alt_cm: f32,
}

impl PilotTakeoff {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a takeoff climbing `alt_cm` above the current vertical target
    pub fn start(&mut self, pos_control: &dyn PositionController, alt_cm: f32) {
        self.running = true;
        self.start_alt_cm = pos_control.pos_desired_neu_cm().z;
        self.complete_alt_cm = self.start_alt_cm + alt_cm;
        crate::log_info!(
            "Takeoff started: {} cm to {} cm",
            self.start_alt_cm,
            self.complete_alt_cm
        );
    }

    /// Stop the takeoff
    ///
    /// Returns true when throttle is already above the non-takeoff level, in
    /// which case the vehicle may have left the ground undetected and
    /// land-complete must be cleared.
    pub fn stop(&mut self, snap: &VehicleSnapshot, takeoff: &TakeoffParams) -> bool {
        self.running = false;
        snap.throttle_in > takeoff.non_takeoff_throttle()
    }

    /// Validate and start a user takeoff to `target_alt_cm` above home
    ///
    /// On success the caller must mark the vehicle auto-armed.
    pub fn request(
        &mut self,
        pos_control: &dyn PositionController,
        snap: &VehicleSnapshot,
        mode: &ModeInfo,
        target_alt_cm: f32,
    ) -> Result<(), TakeoffError> {
        if !snap.armed {
            return Err(TakeoffError::NotArmed);
        }
        if !snap.land_complete {
            return Err(TakeoffError::NotLanded);
        }
        if !mode.has_user_takeoff {
            return Err(TakeoffError::ModeUnsupported);
        }
        if target_alt_cm <= snap.altitude_above_home_cm {
            return Err(TakeoffError::BelowCurrentAltitude);
        }
        if !snap.interlock && snap.using_interlock {
            return Err(TakeoffError::InterlockDisabled);
        }

        self.start(pos_control, target_alt_cm);
        Ok(())
    }

    /// Run one tick
    ///
    /// While landed the throttle is ramped and lift-off is detected; once
    /// airborne the vertical target is fed toward the takeoff altitude. The
    /// enclosing mode still advances the vertical controller.
    pub fn run(
        &mut self,
        pos_control: &mut dyn PositionController,
        snap: &VehicleSnapshot,
        config: &VehicleConfig,
        pilot_climb_rate_cms: f32,
        dt: f32,
    ) -> ModeOutput {
        let mut output = ModeOutput::new();
        if !self.running {
            return output;
        }

        let climb_span_cm = self.complete_alt_cm - self.start_alt_cm;

        if snap.land_complete {
            let throttle = ramp_throttle(snap.throttle_in, dt, config.takeoff.throttle_slew_time_s);
            output.throttle = Some(ThrottleOut {
                throttle,
                angle_boost: true,
            });
            pos_control.init_u();

            let max_up = pos_control.max_speed_up_cms();
            let vel_threshold = constrain(pilot_climb_rate_cms, 0.1 * max_up, 0.5 * max_up);
            let progress = pos_control.pos_desired_neu_cm().z - self.start_alt_cm;
            let past_halfway =
                is_positive(climb_span_cm) && progress > ALT_PROGRESS_FRACTION * climb_span_cm;

            if past_halfway
                || liftoff_detected(
                    &*pos_control,
                    throttle,
                    config.takeoff.throttle_max,
                    snap.measured_accel_u_cmss,
                    vel_threshold,
                )
            {
                crate::log_info!("Takeoff: lift-off detected at throttle {}", throttle);
                output.clear_land_complete = true;
            }
        } else {
            pos_control.input_pos_vel_accel_u(self.complete_alt_cm, pilot_climb_rate_cms, 0.0);

            let progress = pos_control.pos_desired_neu_cm().z - self.start_alt_cm;
            if is_negative(pilot_climb_rate_cms) || climb_span_cm * COMPLETE_FRACTION < progress {
                crate::log_info!("Takeoff finished");
                output.clear_land_complete = self.stop(snap, &config.takeoff);
            }
        }

        output
    }

    pub fn running(&self) -> bool {
        self.running
    }

    /// Takeoff in progress in a mode that supports user takeoff
    pub fn is_taking_off(&self, mode: &ModeInfo) -> bool {
        mode.has_user_takeoff && self.running
    }

    pub fn start_alt_cm(&self) -> f32 {
        self.start_alt_cm
    }

    pub fn complete_alt_cm(&self) -> f32 {
        self.complete_alt_cm
    }
}
