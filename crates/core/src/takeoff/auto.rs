//! Autonomous takeoff
//!
//! Used by autonomous modes (mission and guided takeoff commands). Runs as
//! its own control loop: holds on the ground until the motors are spooled,
//! ramps throttle until lift-off, then climbs to the target altitude with
//! horizontal navigation suppressed below WP_NAVALT_MIN.
//!
//! ## Phases
//!
//! 1. Disarmed or not auto-armed: ground handling
//! 2. Spooling up: controllers relaxed, thrust decays to zero
//! 3. Landed: throttle ramp until lift-off
//! 4. Climbing: vertical target at the takeoff altitude, complete once the
//!    target is within the stopping distance and the climb rate has dropped

use nalgebra::{Vector2, Vector3};

use super::ground::{liftoff_detected, ramp_throttle, VEL_THRESHOLD_FRACTION};
use crate::control::PositionController;
use crate::math::{is_positive, sq};
use crate::mode::{make_safe_ground_handling, AttitudeCommand, FailsafeEvent, ModeOutput, ThrottleOut};
use crate::parameters::VehicleConfig;
use crate::vehicle::{SpoolState, VehicleSnapshot};

/// Distance needed to stop from 10% of the maximum climb speed
///
/// `0.5 × (0.1 × max_speed_up)² / max_accel_u`, or 0 when the acceleration
/// limit is not positive.
pub fn stopping_distance_cm(max_speed_up_cms: f32, max_accel_u_cmss: f32) -> f32 {
    if !is_positive(max_accel_u_cmss) {
        return 0.0;
    }
    0.5 * sq(VEL_THRESHOLD_FRACTION * max_speed_up_cms) / max_accel_u_cmss
}

/// Autonomous takeoff state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoTakeoff {
    complete_alt_cm: f32,
    terrain_alt: bool,
    complete: bool,
    complete_pos_neu_cm: Vector3<f32>,
    no_nav_alt_cm: f32,
    no_nav_active: bool,
    heading_rad: f32,
}

impl Default for AutoTakeoff {
    fn default() -> Self {
        Self {
            complete_alt_cm: 0.0,
            terrain_alt: false,
            complete: false,
            complete_pos_neu_cm: Vector3::zeros(),
            no_nav_alt_cm: 0.0,
            no_nav_active: false,
            heading_rad: 0.0,
        }
    }
}

impl AutoTakeoff {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a takeoff to `complete_alt_cm`
    ///
    /// With `terrain_alt` the target is relative to the terrain below. The
    /// current heading is held during the climb.
    pub fn start(
        &mut self,
        snap: &VehicleSnapshot,
        config: &VehicleConfig,
        complete_alt_cm: f32,
        terrain_alt: bool,
    ) {
        self.complete_alt_cm = complete_alt_cm;
        self.terrain_alt = terrain_alt;
        self.complete = false;
        self.heading_rad = snap.yaw_rad;

        let navalt_min_cm = config.wpnav.navalt_min_cm();
        self.no_nav_alt_cm = snap.position_neu_cm.z + navalt_min_cm;
        self.no_nav_active =
            is_positive(navalt_min_cm) && (snap.is_disarmed_or_landed() || !snap.interlock);

        crate::log_info!(
            "Auto takeoff to {} cm (no-nav until {} cm)",
            complete_alt_cm,
            self.no_nav_alt_cm
        );
    }

    /// Run one tick
    pub fn run(
        &mut self,
        pos_control: &mut dyn PositionController,
        snap: &VehicleSnapshot,
        config: &VehicleConfig,
        dt: f32,
    ) -> ModeOutput {
        let navalt_min_cm = config.wpnav.navalt_min_cm();

        if !snap.armed || !snap.auto_armed {
            self.no_nav_alt_cm = snap.position_neu_cm.z + navalt_min_cm;
            return make_safe_ground_handling(pos_control);
        }

        let terrain_offset_cm = if self.terrain_alt {
            match snap.terrain_offset_cm {
                Some(offset) => offset,
                None => {
                    crate::log_warn!("Auto takeoff: terrain data unavailable");
                    return ModeOutput::failsafe(FailsafeEvent::Terrain);
                }
            }
        } else {
            0.0
        };

        let mut output = ModeOutput {
            spool: Some(SpoolState::ThrottleUnlimited),
            ..ModeOutput::default()
        };

        if snap.spool_state != SpoolState::ThrottleUnlimited {
            pos_control.relax_velocity_ne();
            pos_control.update_ne();
            pos_control.relax_u(0.0);
            pos_control.update_u();

            output.reset_rate_i_terms = true;
            output.attitude = AttitudeCommand::ThrustRate {
                thrust: pos_control.thrust_vector(),
                yaw_rate_rads: 0.0,
                reset_yaw_target: true,
            };
            self.no_nav_alt_cm = snap.position_neu_cm.z + navalt_min_cm;
            return output;
        }

        if snap.land_complete {
            let throttle = ramp_throttle(snap.throttle_in, dt, config.takeoff.throttle_slew_time_s);
            output.throttle = Some(ThrottleOut {
                throttle,
                angle_boost: true,
            });
            pos_control.init_u();
            pos_control.relax_velocity_ne();
            pos_control.update_ne();

            output.reset_rate_i_terms = true;
            output.attitude = AttitudeCommand::ThrustRate {
                thrust: pos_control.thrust_vector(),
                yaw_rate_rads: 0.0,
                reset_yaw_target: false,
            };

            let vel_threshold = VEL_THRESHOLD_FRACTION * pos_control.max_speed_up_cms();
            let above_no_nav = self.no_nav_active && snap.position_neu_cm.z >= self.no_nav_alt_cm;
            if above_no_nav
                || liftoff_detected(
                    &*pos_control,
                    throttle,
                    config.takeoff.throttle_max,
                    snap.measured_accel_u_cmss,
                    vel_threshold,
                )
            {
                crate::log_info!("Auto takeoff: lift-off detected at throttle {}", throttle);
                output.clear_land_complete = true;
            }
            return output;
        }

        if self.no_nav_active {
            if snap.position_neu_cm.z >= self.no_nav_alt_cm {
                crate::log_debug!("Auto takeoff: navigation enabled");
                self.no_nav_active = false;
            }
            pos_control.relax_velocity_ne();
        } else {
            pos_control.input_vel_accel_ne(Vector2::zeros(), Vector2::zeros());
        }
        pos_control.update_ne();

        let target_alt_cm = self.complete_alt_cm + terrain_offset_cm;
        pos_control.input_pos_vel_accel_u(target_alt_cm, 0.0, 0.0);
        pos_control.update_u();

        output.attitude = AttitudeCommand::ThrustHeading {
            thrust: pos_control.thrust_vector(),
            heading_rad: self.heading_rad,
        };

        let max_up = pos_control.max_speed_up_cms();
        let stop_distance = stopping_distance_cm(max_up, pos_control.max_accel_u_cmss());
        let desired = pos_control.pos_desired_neu_cm();
        let reached_altitude = desired.z >= target_alt_cm - stop_distance;
        let reached_climb_rate =
            pos_control.vel_desired_neu_cms().z < max_up * VEL_THRESHOLD_FRACTION;

        if !self.complete && reached_altitude && reached_climb_rate {
            self.complete = true;
            self.complete_pos_neu_cm = Vector3::new(desired.x, desired.y, target_alt_cm);
            crate::log_info!("Auto takeoff complete at {} cm", target_alt_cm);
        }

        output
    }

    /// Takeoff reached its target; never reverts within one sequence
    pub fn complete(&self) -> bool {
        self.complete
    }

    /// Final target position, available once complete
    pub fn completion_pos(&self) -> Option<Vector3<f32>> {
        self.complete.then_some(self.complete_pos_neu_cm)
    }

    pub fn complete_alt_cm(&self) -> f32 {
        self.complete_alt_cm
    }

    pub fn terrain_alt(&self) -> bool {
        self.terrain_alt
    }

    pub fn no_nav_active(&self) -> bool {
        self.no_nav_active
    }

    pub fn no_nav_alt_cm(&self) -> f32 {
        self.no_nav_alt_cm
    }

    /// Heading held during the climb
    pub fn set_heading(&mut self, heading_rad: f32) {
        self.heading_rad = heading_rad;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::MockPositionController;

    const DT: f32 = 0.01;

    fn config_with_navalt(navalt_min_m: f32) -> VehicleConfig {
        let mut config = VehicleConfig::default();
        config.wpnav.navalt_min_m = navalt_min_m;
        config
    }

    #[test]
    fn test_stopping_distance() {
        // 0.5 * (0.1 * 250)^2 / 250
        assert!((stopping_distance_cm(250.0, 250.0) - 1.25).abs() < 1e-6);
        assert_eq!(stopping_distance_cm(250.0, 0.0), 0.0);
    }

    #[test]
    fn test_start_on_ground_activates_no_nav() {
        let mut takeoff = AutoTakeoff::new();
        takeoff.start(
            &VehicleSnapshot::armed_on_ground(),
            &config_with_navalt(2.0),
            1000.0,
            false,
        );
        assert!(takeoff.no_nav_active());
        assert_eq!(takeoff.no_nav_alt_cm(), 200.0);
        assert!(!takeoff.complete());
        assert!(takeoff.completion_pos().is_none());
    }

    #[test]
    fn test_start_without_navalt_margin() {
        let mut takeoff = AutoTakeoff::new();
        takeoff.start(
            &VehicleSnapshot::armed_on_ground(),
            &config_with_navalt(0.0),
            1000.0,
            false,
        );
        assert!(!takeoff.no_nav_active());
    }

    #[test]
    fn test_start_in_flight_keeps_navigation() {
        let mut takeoff = AutoTakeoff::new();
        let snap = VehicleSnapshot::flying(Vector3::new(0.0, 0.0, 300.0));
        takeoff.start(&snap, &config_with_navalt(2.0), 1000.0, false);
        assert!(!takeoff.no_nav_active());
        assert_eq!(takeoff.no_nav_alt_cm(), 500.0);
    }

    #[test]
    fn test_disarmed_holds_ground_and_refreshes_no_nav_alt() {
        let mut pc = MockPositionController::new(DT);
        let mut takeoff = AutoTakeoff::new();
        let config = config_with_navalt(2.0);
        takeoff.start(&VehicleSnapshot::armed_on_ground(), &config, 1000.0, false);

        let mut snap = VehicleSnapshot::default();
        snap.position_neu_cm.z = 50.0;
        let output = takeoff.run(&mut pc, &snap, &config, DT);
        assert_eq!(output.attitude, AttitudeCommand::GroundHold);
        assert_eq!(takeoff.no_nav_alt_cm(), 250.0);
    }

    #[test]
    fn test_spooling_relaxes_controllers() {
        let mut pc = MockPositionController::new(DT);
        let mut takeoff = AutoTakeoff::new();
        let config = VehicleConfig::default();
        let mut snap = VehicleSnapshot::armed_on_ground();
        snap.spool_state = SpoolState::SpoolingUp;
        takeoff.start(&snap, &config, 1000.0, false);

        let output = takeoff.run(&mut pc, &snap, &config, DT);
        assert_eq!(output.spool, Some(SpoolState::ThrottleUnlimited));
        assert!(output.reset_rate_i_terms);
        assert_eq!(pc.relaxed_throttle(), Some(0.0));
        assert!(pc.ne_relaxed());
        assert!(matches!(
            output.attitude,
            AttitudeCommand::ThrustRate {
                reset_yaw_target: true,
                ..
            }
        ));
        assert!(output.throttle.is_none());
    }

    #[test]
    fn test_terrain_missing_raises_failsafe_without_commands() {
        let mut pc = MockPositionController::new(DT);
        let mut takeoff = AutoTakeoff::new();
        let config = VehicleConfig::default();
        let snap = VehicleSnapshot::armed_on_ground();
        takeoff.start(&snap, &config, 1000.0, true);

        let output = takeoff.run(&mut pc, &snap, &config, DT);
        assert_eq!(output.failsafe, Some(FailsafeEvent::Terrain));
        assert_eq!(output.spool, None);
        assert_eq!(pc.command_count(), 0);
        assert_eq!(pc.update_count(), 0);
    }

    #[test]
    fn test_landed_liftoff_on_no_nav_altitude() {
        let mut pc = MockPositionController::new(DT);
        let mut takeoff = AutoTakeoff::new();
        let config = config_with_navalt(2.0);
        let mut snap = VehicleSnapshot::armed_on_ground();
        takeoff.start(&snap, &config, 1000.0, false);

        let output = takeoff.run(&mut pc, &snap, &config, DT);
        assert!(!output.clear_land_complete);

        snap.position_neu_cm.z = 200.0;
        let output = takeoff.run(&mut pc, &snap, &config, DT);
        assert!(output.clear_land_complete);
    }

    #[test]
    fn test_climb_suppresses_navigation_below_no_nav_alt() {
        let mut pc = MockPositionController::new(DT);
        let mut takeoff = AutoTakeoff::new();
        let config = config_with_navalt(2.0);
        takeoff.start(&VehicleSnapshot::armed_on_ground(), &config, 1000.0, false);

        let mut snap = VehicleSnapshot::flying(Vector3::new(0.0, 0.0, 100.0));
        takeoff.run(&mut pc, &snap, &config, DT);
        assert!(takeoff.no_nav_active());
        assert!(pc.ne_relaxed());

        snap.position_neu_cm.z = 200.0;
        takeoff.run(&mut pc, &snap, &config, DT);
        assert!(!takeoff.no_nav_active());

        takeoff.run(&mut pc, &snap, &config, DT);
        assert!(!pc.ne_relaxed());
    }

    #[test]
    fn test_completes_and_stays_complete() {
        let mut pc = MockPositionController::new(DT);
        pc.set_position(Vector3::new(10.0, -20.0, 0.0));
        let mut takeoff = AutoTakeoff::new();
        let config = VehicleConfig::default();
        takeoff.start(&VehicleSnapshot::flying(Vector3::zeros()), &config, 300.0, false);

        let mut snap = VehicleSnapshot::flying(Vector3::zeros());
        for _ in 0..3000 {
            takeoff.run(&mut pc, &snap, &config, DT);
            snap.position_neu_cm = pc.pos_desired_neu_cm();
            if takeoff.complete() {
                break;
            }
        }
        assert!(takeoff.complete());
        let pos = takeoff.completion_pos().unwrap();
        assert_eq!(pos.z, 300.0);
        assert!((pos.x - 10.0).abs() < 1e-3);

        // Push the target away: complete must not revert
        pc.set_position(Vector3::new(10.0, -20.0, 0.0));
        pc.set_velocity(Vector3::new(0.0, 0.0, 200.0));
        takeoff.run(&mut pc, &snap, &config, DT);
        assert!(takeoff.complete());
        assert_eq!(takeoff.completion_pos(), Some(pos));
    }
}
