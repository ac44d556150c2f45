//! Circle Mode
//!
//! Orbits a fixed centre at a configurable radius and rate while the pilot
//! controls altitude.
//!
//! ## Behavior
//!
//! - On entry: centre placed CIRCLE_RADIUS ahead along the current heading
//! - Pitch stick: shrinks (forward) or grows (back) the radius
//! - Roll stick: speeds up or slows the orbit; reversing direction requires
//!   the rate to reach zero, the stick to be released, then pushed again
//! - Throttle stick: climb rate
//! - CIRCLE_RADIUS = 0: rotate in place (panorama)
//!
//! ## References
//!
//! - ArduPilot Circle Mode: https://ardupilot.org/copter/docs/circle-mode.html

use nalgebra::Vector3;

use super::context::ModeContext;
use super::output::{make_safe_ground_handling, AttitudeCommand, FailsafeEvent, ModeOutput};
use super::traits::{Mode, ModeInfo};
use crate::control::PositionController;
use crate::math::{constrain, is_equal, is_negative, is_positive, is_zero};
use crate::navigation::OrbitTracker;
use crate::parameters::circle::MAX_RATE_DEGS;
use crate::parameters::VehicleConfig;
use crate::rc::pilot_desired_climb_rate;
use crate::vehicle::SpoolState;

const CIRCLE_INFO: ModeInfo = ModeInfo {
    name: "Circle",
    requires_position: true,
    requires_velocity: false,
    allows_arming: false,
    allows_arming_from_transmitter: false,
    is_autopilot: true,
    has_user_takeoff: false,
};

/// Circle mode state, created on entry and dropped on exit
#[derive(Debug, Clone)]
pub struct CircleState {
    orbit: OrbitTracker,
    /// Roll stick has been held away from centre since the last release
    speed_changing: bool,
}

impl CircleState {
    /// Apply pilot pitch stick to the orbit radius
    ///
    /// Forward stick (positive) tightens the orbit.
    fn apply_pitch_stick(&mut self, pitch: f32, nav_speed_cms: f32, dt: f32) {
        let radius_current = self.orbit.radius_cm();
        let radius_new = (radius_current - pitch * nav_speed_cms * dt).max(0.0);

        if !is_equal(radius_current, radius_new) {
            self.orbit.set_radius_cm(radius_new);
        }
    }

    /// Apply pilot roll stick to the orbit rate
    ///
    /// The rate keeps its sign while the stick is held. From a standstill a
    /// new rate is only accepted after the stick passed through centre.
    /// While stationary with the stick still held the new rate is exactly 0,
    /// not the ramped current rate.
    fn apply_roll_stick(&mut self, roll: f32, dt: f32) {
        if is_zero(roll) {
            self.speed_changing = false;
            return;
        }

        let rate = self.orbit.rate_degs();
        let rate_current = self.orbit.rate_current_degs();
        let change = roll * dt;

        let rate_new = if is_positive(rate) {
            constrain(rate_current + change, 0.0, MAX_RATE_DEGS)
        } else if is_negative(rate) {
            constrain(rate_current + change, -MAX_RATE_DEGS, 0.0)
        } else if !self.speed_changing {
            change
        } else {
            0.0
        };

        self.speed_changing = true;
        self.orbit.set_rate_degs(rate_new);
    }
}

/// Circle Mode
pub struct CircleMode<'a> {
    ctx: ModeContext<'a>,
    state: Option<CircleState>,
}

impl<'a> CircleMode<'a> {
    pub fn new(ctx: ModeContext<'a>) -> Self {
        Self { ctx, state: None }
    }

    fn set_limits(pos_control: &mut dyn PositionController, config: &VehicleConfig, init: bool) {
        let speed_down = -config.pilot.speed_down_cms();
        let speed_up = config.pilot.speed_up_cms;
        let accel_u = config.pilot.accel_z_cmss;

        pos_control.set_max_speed_accel_ne(config.wpnav.speed_cms, config.wpnav.accel_cmss);
        pos_control.set_max_speed_accel_u(speed_down, speed_up, accel_u);
        if init {
            pos_control
                .set_correction_speed_accel_ne(config.wpnav.speed_cms, config.wpnav.accel_cmss);
            pos_control.set_correction_speed_accel_u(speed_down, speed_up, accel_u);
        }
    }

    /// Orbit radius target (cm), `None` before entry
    pub fn radius_cm(&self) -> Option<f32> {
        self.state.as_ref().map(|s| s.orbit.radius_cm())
    }

    /// Orbit rate target (deg/s), `None` before entry
    pub fn rate_degs(&self) -> Option<f32> {
        self.state.as_ref().map(|s| s.orbit.rate_degs())
    }

    pub fn speed_changing(&self) -> bool {
        self.state.as_ref().is_some_and(|s| s.speed_changing)
    }

    pub fn orbit(&self) -> Option<&OrbitTracker> {
        self.state.as_ref().map(|s| &s.orbit)
    }

    pub fn pos_control(&self) -> &dyn PositionController {
        &*self.ctx.pos_control
    }

    /// Move the orbit centre, e.g. from a guided or mission command
    ///
    /// With `terrain_alt` the centre altitude is relative to the terrain and
    /// every tick needs terrain data.
    pub fn set_center(
        &mut self,
        center_neu_cm: Vector3<f32>,
        terrain_alt: bool,
    ) -> Result<(), &'static str> {
        let state = self.state.as_mut().ok_or("Circle mode not initialized")?;
        let snap = self.ctx.vehicle.snapshot();
        state.orbit.set_center(
            &*self.ctx.pos_control,
            center_neu_cm,
            terrain_alt,
            snap.position_neu_cm,
            snap.yaw_rad,
        );
        Ok(())
    }

    /// Distance to the orbit target in metres
    pub fn wp_distance_m(&self) -> f32 {
        self.orbit()
            .map_or(0.0, |orbit| orbit.distance_to_target_cm() * 0.01)
    }

    /// Bearing to the orbit target in degrees
    pub fn wp_bearing_deg(&self) -> f32 {
        self.orbit()
            .map_or(0.0, |orbit| orbit.bearing_to_target_rad().to_degrees())
    }
}

impl<'a> Mode for CircleMode<'a> {
    fn enter(&mut self) -> Result<(), &'static str> {
        let config = self.ctx.config.config();
        let snap = self.ctx.vehicle.snapshot();

        Self::set_limits(self.ctx.pos_control, &config, true);

        let mut orbit = OrbitTracker::new(&config.circle);
        orbit.init(
            self.ctx.pos_control,
            &config.circle,
            snap.position_neu_cm,
            snap.yaw_rad,
        );

        if orbit.roi_at_center() {
            if let Some(mount) = self.ctx.peripherals.mount.as_deref_mut() {
                // Point at the ground below the centre
                let center = orbit.center_neu_cm();
                mount.set_roi_target(Vector3::new(center.x, center.y, 0.0));
            }
        }

        crate::log_info!(
            "Circle mode entered (radius {} cm, rate {} deg/s)",
            orbit.radius_cm(),
            orbit.rate_degs()
        );

        self.state = Some(CircleState {
            orbit,
            speed_changing: false,
        });
        Ok(())
    }

    fn update(&mut self, dt: f32) -> Result<ModeOutput, &'static str> {
        let Self { ctx, state } = self;
        let state = state.as_mut().ok_or("Circle mode not initialized")?;

        let config = ctx.config.config();
        let snap = ctx.vehicle.snapshot();
        let input = ctx.pilot.pilot_input().clamped();

        Self::set_limits(ctx.pos_control, &config, false);
        state.orbit.check_param_change(&config.circle);

        if input.valid && state.orbit.pilot_control_enabled() {
            state.apply_pitch_stick(input.pitch, config.wpnav.speed_cms, dt);

            let knob_busy = ctx
                .peripherals
                .tuning
                .is_some_and(|knob| knob.adjusting_circle_rate());
            if !knob_busy {
                state.apply_roll_stick(input.roll, dt);
            }
        }

        let mut climb_rate_cms = pilot_desired_climb_rate(&input, &config.pilot);
        if let Some(avoidance) = ctx.peripherals.avoidance {
            climb_rate_cms = avoidance.adjust_climb_rate(climb_rate_cms, dt);
        }

        if snap.is_disarmed_or_landed() {
            return Ok(make_safe_ground_handling(ctx.pos_control));
        }

        let mut output = ModeOutput {
            spool: Some(SpoolState::ThrottleUnlimited),
            ..ModeOutput::default()
        };

        if let Some(tracker) = ctx.peripherals.surface_tracking.as_deref_mut() {
            if let Some(offset_cm) = tracker.surface_offset_cm() {
                ctx.pos_control.set_pos_offset_target_u(offset_cm);
            }
        }

        if !state.orbit.update(
            ctx.pos_control,
            snap.position_neu_cm,
            snap.terrain_offset_cm,
            climb_rate_cms,
            dt,
        ) {
            crate::log_warn!("Circle: terrain data unavailable");
            output.failsafe = Some(FailsafeEvent::Terrain);
        }
        ctx.pos_control.update_u();

        output.attitude = AttitudeCommand::ThrustHeading {
            thrust: ctx.pos_control.thrust_vector(),
            heading_rad: state.orbit.yaw_rad(),
        };
        Ok(output)
    }

    fn exit(&mut self) -> Result<(), &'static str> {
        crate::log_info!("Exiting Circle mode");
        self.state = None;
        Ok(())
    }

    fn name(&self) -> &'static str {
        CIRCLE_INFO.name
    }

    fn info(&self) -> ModeInfo {
        CIRCLE_INFO
    }
}
