//! Orbit tracker
//!
//! Generates the moving position target for circle flight. The orbit is
//! defined by a centre, a radius and an angular rate; the tracker ramps its
//! angular velocity toward the commanded rate and feeds the point on the
//! circle into the position controller every tick.
//!
//! ## Behavior
//!
//! - On init: centre placed radius ahead of the stopping point along the
//!   current heading (or at the stopping point with `INIT_AT_CENTER`)
//! - Angular velocity limited so the centripetal demand stays within half the
//!   horizontal acceleration limit
//! - Radius 0 is a panorama: the vehicle holds position and rotates in place
//!
//! ## References
//!
//! - ArduPilot AC_Circle: https://ardupilot.org/copter/docs/circle-mode.html

use libm::{atan2f, cosf, fabsf, sinf};
use nalgebra::{Vector2, Vector3};

use crate::control::PositionController;
use crate::math::{constrain, is_equal, is_positive, is_zero, safe_sqrt, wrap_2pi, wrap_pi};
use crate::parameters::circle::{CircleOptions, CircleParams, MAX_RADIUS_CM, MAX_RATE_DEGS};

/// Minimum angular acceleration (2 deg/s²)
pub const ANGULAR_ACCEL_MIN_RADS: f32 = 2.0 * core::f32::consts::PI / 180.0;

/// Orbit state and target generation
#[derive(Debug, Clone)]
pub struct OrbitTracker {
    center_neu_cm: Vector3<f32>,
    radius_cm: f32,
    rate_degs: f32,
    angular_vel: f32,
    angular_vel_max: f32,
    angular_accel: f32,
    angle_rad: f32,
    angle_total_rad: f32,
    terrain_alt: bool,
    last_radius_param: f32,
    last_rate_param: f32,
    options: CircleOptions,
    yaw_rad: f32,
    distance_to_target_cm: f32,
    bearing_to_target_rad: f32,
}

impl OrbitTracker {
    /// Tracker with radius and rate taken from the parameters
    pub fn new(params: &CircleParams) -> Self {
        Self {
            center_neu_cm: Vector3::zeros(),
            radius_cm: params.radius_cm,
            rate_degs: params.rate_degs,
            angular_vel: 0.0,
            angular_vel_max: 0.0,
            angular_accel: 0.0,
            angle_rad: 0.0,
            angle_total_rad: 0.0,
            terrain_alt: false,
            last_radius_param: params.radius_cm,
            last_rate_param: params.rate_degs,
            options: params.options,
            yaw_rad: 0.0,
            distance_to_target_cm: 0.0,
            bearing_to_target_rad: 0.0,
        }
    }

    /// Start an orbit from the controller's stopping point
    pub fn init(
        &mut self,
        pos_control: &mut dyn PositionController,
        params: &CircleParams,
        position_neu_cm: Vector3<f32>,
        yaw_rad: f32,
    ) {
        self.radius_cm = params.radius_cm;
        self.last_radius_param = params.radius_cm;
        self.rate_degs = params.rate_degs;
        self.last_rate_param = params.rate_degs;
        self.options = params.options;

        pos_control.init_ne();
        pos_control.init_u();

        let mut center = pos_control.pos_desired_neu_cm();
        if !self.options.contains(CircleOptions::INIT_AT_CENTER) {
            center.x += self.radius_cm * cosf(yaw_rad);
            center.y += self.radius_cm * sinf(yaw_rad);
        }
        self.center_neu_cm = center;
        self.terrain_alt = false;

        self.calc_velocities(&*pos_control, true);
        self.init_start_angle(position_neu_cm, yaw_rad);
    }

    /// Move the centre; `terrain_alt` makes `center.z` relative to terrain
    pub fn set_center(
        &mut self,
        pos_control: &dyn PositionController,
        center_neu_cm: Vector3<f32>,
        terrain_alt: bool,
        position_neu_cm: Vector3<f32>,
        yaw_rad: f32,
    ) {
        self.center_neu_cm = center_neu_cm;
        self.terrain_alt = terrain_alt;
        self.calc_velocities(pos_control, true);
        self.init_start_angle(position_neu_cm, yaw_rad);
    }

    /// Recompute angular velocity limit and acceleration
    pub fn calc_velocities(&mut self, pos_control: &dyn PositionController, init_velocity: bool) {
        let rate_rads = self.rate_degs.to_radians();

        if self.radius_cm <= 0.0 {
            self.angular_vel_max = rate_rads;
            self.angular_accel = fabsf(self.angular_vel_max).max(ANGULAR_ACCEL_MIN_RADS);
        } else {
            let accel_ne = pos_control.max_accel_ne_cmss();
            let velocity_max = pos_control
                .max_speed_ne_cms()
                .min(safe_sqrt(0.5 * accel_ne * self.radius_cm));
            let limit = velocity_max / self.radius_cm;
            self.angular_vel_max = constrain(rate_rads, -limit, limit);
            self.angular_accel = (accel_ne / self.radius_cm).max(ANGULAR_ACCEL_MIN_RADS);
        }

        if init_velocity {
            self.angular_vel = 0.0;
        }
    }

    fn init_start_angle(&mut self, position_neu_cm: Vector3<f32>, yaw_rad: f32) {
        self.angle_total_rad = 0.0;

        let at_center = is_equal(position_neu_cm.x, self.center_neu_cm.x)
            && is_equal(position_neu_cm.y, self.center_neu_cm.y);
        self.angle_rad = if at_center {
            wrap_pi(yaw_rad - core::f32::consts::PI)
        } else {
            wrap_pi(atan2f(
                position_neu_cm.y - self.center_neu_cm.y,
                position_neu_cm.x - self.center_neu_cm.x,
            ))
        };
    }

    /// Advance the orbit one tick and push the new target to the controller
    ///
    /// Returns false when the orbit is terrain-relative and no terrain offset
    /// is available; no target is sent in that case.
    pub fn update(
        &mut self,
        pos_control: &mut dyn PositionController,
        position_neu_cm: Vector3<f32>,
        terrain_offset_cm: Option<f32>,
        climb_rate_cms: f32,
        dt: f32,
    ) -> bool {
        self.calc_velocities(&*pos_control, false);

        let step = fabsf(self.angular_accel) * dt;
        if self.angular_vel < self.angular_vel_max {
            self.angular_vel = (self.angular_vel + step).min(self.angular_vel_max);
        }
        if self.angular_vel > self.angular_vel_max {
            self.angular_vel = (self.angular_vel - step).max(self.angular_vel_max);
        }

        let angle_change = self.angular_vel * dt;
        self.angle_rad = wrap_pi(self.angle_rad + angle_change);
        self.angle_total_rad += angle_change;

        let terrain_offset = if self.terrain_alt {
            match terrain_offset_cm {
                Some(offset) => offset,
                None => return false,
            }
        } else {
            0.0
        };

        let target_u = if self.terrain_alt {
            self.center_neu_cm.z + terrain_offset
        } else {
            pos_control.pos_desired_neu_cm().z
        };

        let mut target = Vector3::new(self.center_neu_cm.x, self.center_neu_cm.y, target_u);
        if is_zero(self.radius_cm) {
            self.yaw_rad = wrap_2pi(self.angle_rad);
        } else {
            target.x += self.radius_cm * cosf(self.angle_rad);
            target.y += self.radius_cm * sinf(self.angle_rad);

            let desired = pos_control.pos_desired_neu_cm();
            let mut yaw = atan2f(
                self.center_neu_cm.y - desired.y,
                self.center_neu_cm.x - desired.x,
            );
            if self.options.contains(CircleOptions::FACE_DIRECTION_OF_TRAVEL) {
                let quarter = core::f32::consts::FRAC_PI_2;
                yaw += if is_positive(self.rate_degs) { -quarter } else { quarter };
            }
            self.yaw_rad = wrap_2pi(yaw);
        }

        pos_control.input_pos_vel_accel_ne(
            Vector2::new(target.x, target.y),
            Vector2::zeros(),
            Vector2::zeros(),
        );
        if self.terrain_alt {
            pos_control.input_pos_vel_accel_u(target.z, 0.0, 0.0);
        } else {
            pos_control.input_vel_accel_u(climb_rate_cms, 0.0);
        }
        pos_control.update_ne();

        let dx = target.x - position_neu_cm.x;
        let dy = target.y - position_neu_cm.y;
        self.distance_to_target_cm = safe_sqrt(dx * dx + dy * dy);
        self.bearing_to_target_rad = wrap_2pi(atan2f(dy, dx));

        true
    }

    /// Pick up externally edited CIRCLE_RADIUS / CIRCLE_RATE / CIRCLE_OPTIONS
    pub fn check_param_change(&mut self, params: &CircleParams) {
        if !is_equal(self.last_radius_param, params.radius_cm) {
            self.radius_cm = params.radius_cm;
            self.last_radius_param = params.radius_cm;
        }
        if !is_equal(self.last_rate_param, params.rate_degs) {
            self.rate_degs = params.rate_degs;
            self.last_rate_param = params.rate_degs;
        }
        self.options = params.options;
    }

    pub fn set_radius_cm(&mut self, radius_cm: f32) {
        self.radius_cm = constrain(radius_cm, 0.0, MAX_RADIUS_CM);
    }

    pub fn set_rate_degs(&mut self, rate_degs: f32) {
        self.rate_degs = constrain(rate_degs, -MAX_RATE_DEGS, MAX_RATE_DEGS);
    }

    pub fn radius_cm(&self) -> f32 {
        self.radius_cm
    }

    /// Commanded rate (deg/s, positive clockwise)
    pub fn rate_degs(&self) -> f32 {
        self.rate_degs
    }

    /// Rate actually flown after ramping and limiting (deg/s)
    pub fn rate_current_degs(&self) -> f32 {
        self.angular_vel.to_degrees()
    }

    pub fn center_neu_cm(&self) -> Vector3<f32> {
        self.center_neu_cm
    }

    /// Current angle from the centre to the target (rad)
    pub fn angle_rad(&self) -> f32 {
        self.angle_rad
    }

    /// Total angle travelled since the orbit started (rad)
    pub fn angle_total_rad(&self) -> f32 {
        self.angle_total_rad
    }

    pub fn terrain_alt(&self) -> bool {
        self.terrain_alt
    }

    /// Heading for the attitude controller (rad, [0, 2π))
    pub fn yaw_rad(&self) -> f32 {
        self.yaw_rad
    }

    pub fn pilot_control_enabled(&self) -> bool {
        self.options.contains(CircleOptions::MANUAL_CONTROL)
    }

    pub fn roi_at_center(&self) -> bool {
        self.options.contains(CircleOptions::ROI_AT_CENTER)
    }

    pub fn distance_to_target_cm(&self) -> f32 {
        self.distance_to_target_cm
    }

    pub fn bearing_to_target_rad(&self) -> f32 {
        self.bearing_to_target_rad
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::MockPositionController;

    const DT: f32 = 0.01;

    fn params(radius_cm: f32, rate_degs: f32) -> CircleParams {
        CircleParams {
            radius_cm,
            rate_degs,
            options: CircleOptions::MANUAL_CONTROL,
        }
    }

    #[test]
    fn test_center_placed_ahead_of_vehicle() {
        let mut pc = MockPositionController::new(DT);
        let p = params(1000.0, 20.0);
        let mut orbit = OrbitTracker::new(&p);

        // Facing east
        orbit.init(&mut pc, &p, Vector3::zeros(), core::f32::consts::FRAC_PI_2);

        let center = orbit.center_neu_cm();
        assert!(fabsf(center.x) < 0.01);
        assert!(fabsf(center.y - 1000.0) < 0.01);
        // Vehicle sits due west of the centre
        assert!(fabsf(orbit.angle_rad() + core::f32::consts::FRAC_PI_2) < 1e-4);
    }

    #[test]
    fn test_init_at_center_option() {
        let mut pc = MockPositionController::new(DT);
        pc.set_position(Vector3::new(50.0, 60.0, 300.0));
        let p = CircleParams {
            options: CircleOptions::INIT_AT_CENTER,
            ..params(1000.0, 20.0)
        };
        let mut orbit = OrbitTracker::new(&p);
        orbit.init(&mut pc, &p, Vector3::new(50.0, 60.0, 300.0), 0.0);

        assert_eq!(orbit.center_neu_cm(), Vector3::new(50.0, 60.0, 300.0));
        assert!(!orbit.pilot_control_enabled());
    }

    #[test]
    fn test_angular_velocity_limited_by_acceleration() {
        let mut pc = MockPositionController::new(DT);
        pc.set_max_speed_accel_ne(500.0, 250.0);
        let p = params(1000.0, 90.0);
        let mut orbit = OrbitTracker::new(&p);
        orbit.init(&mut pc, &p, Vector3::zeros(), 0.0);

        for _ in 0..500 {
            assert!(orbit.update(&mut pc, Vector3::zeros(), None, 0.0, DT));
        }

        // sqrt(0.5 * 250 * 1000) / 1000 rad/s
        let expected = safe_sqrt(0.5 * 250.0 * 1000.0) / 1000.0;
        assert!(fabsf(orbit.rate_current_degs().to_radians() - expected) < 1e-4);
    }

    #[test]
    fn test_angular_velocity_ramps() {
        let mut pc = MockPositionController::new(DT);
        pc.set_max_speed_accel_ne(500.0, 250.0);
        let p = params(100.0, 45.0);
        let mut orbit = OrbitTracker::new(&p);
        orbit.init(&mut pc, &p, Vector3::zeros(), 0.0);

        orbit.update(&mut pc, Vector3::zeros(), None, 0.0, DT);
        // angular accel = 250 / 100 rad/s²
        assert!(fabsf(orbit.rate_current_degs().to_radians() - 0.025) < 1e-5);

        for _ in 0..100 {
            orbit.update(&mut pc, Vector3::zeros(), None, 0.0, DT);
        }
        assert!(fabsf(orbit.rate_current_degs() - 45.0) < 1e-3);
    }

    #[test]
    fn test_negative_rate_ramps_negative() {
        let mut pc = MockPositionController::new(DT);
        let p = params(100.0, -30.0);
        let mut orbit = OrbitTracker::new(&p);
        orbit.init(&mut pc, &p, Vector3::zeros(), 0.0);

        for _ in 0..100 {
            orbit.update(&mut pc, Vector3::zeros(), None, 0.0, DT);
        }
        assert!(fabsf(orbit.rate_current_degs() + 30.0) < 1e-3);
    }

    #[test]
    fn test_panorama_yaw_follows_angle() {
        let mut pc = MockPositionController::new(DT);
        let p = params(0.0, 30.0);
        let mut orbit = OrbitTracker::new(&p);
        orbit.init(&mut pc, &p, Vector3::zeros(), 0.0);

        for _ in 0..10 {
            orbit.update(&mut pc, Vector3::zeros(), None, 0.0, DT);
        }
        assert_eq!(orbit.yaw_rad(), wrap_2pi(orbit.angle_rad()));
        // Holds position at the centre
        assert_eq!(pc.pos_desired_neu_cm().x, 0.0);
        assert_eq!(pc.pos_desired_neu_cm().y, 0.0);
    }

    #[test]
    fn test_yaw_points_at_center() {
        let mut pc = MockPositionController::new(DT);
        let p = params(1000.0, 10.0);
        let mut orbit = OrbitTracker::new(&p);
        orbit.init(&mut pc, &p, Vector3::zeros(), 0.0);

        orbit.update(&mut pc, Vector3::zeros(), None, 0.0, DT);
        // Vehicle just south of a centre 10 m north: yaw near north
        let yaw = orbit.yaw_rad();
        assert!(yaw < 0.05 || yaw > 2.0 * core::f32::consts::PI - 0.05);
    }

    #[test]
    fn test_face_direction_of_travel() {
        let mut pc = MockPositionController::new(DT);
        let p = CircleParams {
            options: CircleOptions::FACE_DIRECTION_OF_TRAVEL,
            ..params(1000.0, 10.0)
        };
        let mut orbit = OrbitTracker::new(&p);
        orbit.init(&mut pc, &p, Vector3::zeros(), 0.0);

        orbit.update(&mut pc, Vector3::zeros(), None, 0.0, DT);
        // Clockwise from the south side of the centre means heading west
        let west = 3.0 * core::f32::consts::FRAC_PI_2;
        assert!(fabsf(orbit.yaw_rad() - west) < 0.05);
    }

    #[test]
    fn test_terrain_orbit_without_terrain_data() {
        let mut pc = MockPositionController::new(DT);
        let p = params(1000.0, 10.0);
        let mut orbit = OrbitTracker::new(&p);
        orbit.init(&mut pc, &p, Vector3::zeros(), 0.0);
        orbit.set_center(&pc, Vector3::new(1000.0, 0.0, 500.0), true, Vector3::zeros(), 0.0);

        let commands = pc.command_count();
        assert!(!orbit.update(&mut pc, Vector3::zeros(), None, 0.0, DT));
        assert_eq!(pc.command_count(), commands);

        assert!(orbit.update(&mut pc, Vector3::zeros(), Some(200.0), 0.0, DT));
        assert!(orbit.terrain_alt());
    }

    #[test]
    fn test_param_change_detected() {
        let mut pc = MockPositionController::new(DT);
        let p = params(1000.0, 10.0);
        let mut orbit = OrbitTracker::new(&p);
        orbit.init(&mut pc, &p, Vector3::zeros(), 0.0);

        orbit.set_radius_cm(700.0);
        orbit.check_param_change(&p);
        assert_eq!(orbit.radius_cm(), 700.0);

        let edited = params(2500.0, -15.0);
        orbit.check_param_change(&edited);
        assert_eq!(orbit.radius_cm(), 2500.0);
        assert_eq!(orbit.rate_degs(), -15.0);
    }

    #[test]
    fn test_setters_clamp() {
        let mut orbit = OrbitTracker::new(&params(1000.0, 10.0));
        orbit.set_radius_cm(-5.0);
        assert_eq!(orbit.radius_cm(), 0.0);
        orbit.set_radius_cm(1.0e9);
        assert_eq!(orbit.radius_cm(), MAX_RADIUS_CM);
        orbit.set_rate_degs(400.0);
        assert_eq!(orbit.rate_degs(), MAX_RATE_DEGS);
    }

    #[test]
    fn test_distance_and_bearing_to_target() {
        let mut pc = MockPositionController::new(DT);
        let p = params(1000.0, 0.0);
        let mut orbit = OrbitTracker::new(&p);
        orbit.init(&mut pc, &p, Vector3::zeros(), 0.0);

        // Vehicle 10 m east of the orbit start point
        orbit.update(&mut pc, Vector3::new(0.0, 1000.0, 0.0), None, 0.0, DT);
        assert!(fabsf(orbit.distance_to_target_cm() - 1000.0) < 0.5);
        // Target lies due west
        let west = 3.0 * core::f32::consts::FRAC_PI_2;
        assert!(fabsf(orbit.bearing_to_target_rad() - west) < 1e-3);
    }
}
