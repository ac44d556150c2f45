//! Position/attitude controller contract
//!
//! The control law itself lives outside this crate. Modes drive it through
//! this trait: targets go in per axis, `update_*` advances each axis at most
//! once per tick, and the resulting thrust vector is read back.
//!
//! Units are centimetres, cm/s and cm/s² in a north-east-up frame.

use nalgebra::{Vector2, Vector3};

/// Shared position controller, written by exactly one mode per tick
pub trait PositionController {
    /// Set horizontal speed and acceleration limits
    fn set_max_speed_accel_ne(&mut self, speed_cms: f32, accel_cmss: f32);

    /// Set horizontal limits used to correct position error
    fn set_correction_speed_accel_ne(&mut self, speed_cms: f32, accel_cmss: f32);

    /// Set vertical limits (`speed_down_cms` is negative)
    fn set_max_speed_accel_u(&mut self, speed_down_cms: f32, speed_up_cms: f32, accel_cmss: f32);

    /// Set vertical limits used to correct altitude error
    fn set_correction_speed_accel_u(
        &mut self,
        speed_down_cms: f32,
        speed_up_cms: f32,
        accel_cmss: f32,
    );

    /// Horizontal position, velocity and acceleration target
    fn input_pos_vel_accel_ne(
        &mut self,
        pos_cm: Vector2<f32>,
        vel_cms: Vector2<f32>,
        accel_cmss: Vector2<f32>,
    );

    /// Horizontal velocity and acceleration target
    fn input_vel_accel_ne(&mut self, vel_cms: Vector2<f32>, accel_cmss: Vector2<f32>);

    /// Vertical position, velocity and acceleration target
    fn input_pos_vel_accel_u(&mut self, pos_cm: f32, vel_cms: f32, accel_cmss: f32);

    /// Vertical velocity and acceleration target
    fn input_vel_accel_u(&mut self, vel_cms: f32, accel_cmss: f32);

    /// Vertical offset applied on top of the altitude target (surface tracking)
    fn set_pos_offset_target_u(&mut self, offset_cm: f32);

    /// Initialise the horizontal controller at its stopping point
    fn init_ne(&mut self);

    /// Reset the vertical target to the current estimate and clear I terms
    fn init_u(&mut self);

    /// Let horizontal velocity tracking go slack
    fn relax_velocity_ne(&mut self);

    /// Let vertical thrust decay toward `throttle`
    fn relax_u(&mut self, throttle: f32);

    /// Advance the horizontal controller one tick
    fn update_ne(&mut self);

    /// Advance the vertical controller one tick
    fn update_u(&mut self);

    /// Desired position (north, east, up) in cm
    fn pos_desired_neu_cm(&self) -> Vector3<f32>;

    /// Desired velocity (north, east, up) in cm/s
    fn vel_desired_neu_cms(&self) -> Vector3<f32>;

    fn max_speed_ne_cms(&self) -> f32;

    fn max_accel_ne_cmss(&self) -> f32;

    fn max_speed_up_cms(&self) -> f32;

    /// Maximum descent speed (positive)
    fn max_speed_down_cms(&self) -> f32;

    fn max_accel_u_cmss(&self) -> f32;

    /// Thrust vector for the attitude controller
    fn thrust_vector(&self) -> Vector3<f32>;
}
