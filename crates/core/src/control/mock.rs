//! Kinematic position controller for host testing
//!
//! Tracks targets with a proportional velocity demand limited by the
//! configured speeds and accelerations. Every mutating call is counted so
//! tests can assert that a tick issued no command at all.

use nalgebra::{Vector2, Vector3};

use super::position::PositionController;
use crate::math::constrain;

/// Proportional gain from altitude error to climb rate (1/s)
const POS_U_GAIN: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum VerticalTarget {
    Hold,
    PosVel { pos_cm: f32, vel_cms: f32 },
    Vel { vel_cms: f32 },
    Relax,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum HorizontalTarget {
    Hold,
    PosVel { pos_cm: Vector2<f32>, vel_cms: Vector2<f32> },
    Vel { vel_cms: Vector2<f32> },
    Relax,
}

/// Mock position controller with simple kinematics
#[derive(Debug, Clone)]
pub struct MockPositionController {
    dt: f32,
    pos_cm: Vector3<f32>,
    vel_cms: Vector3<f32>,
    offset_u_cm: f32,
    thrust: Vector3<f32>,
    max_speed_ne_cms: f32,
    max_accel_ne_cmss: f32,
    max_speed_up_cms: f32,
    max_speed_down_cms: f32,
    max_accel_u_cmss: f32,
    target_u: VerticalTarget,
    target_ne: HorizontalTarget,
    relaxed_throttle: Option<f32>,
    commands: usize,
    updates: usize,
}

impl MockPositionController {
    /// Controller advanced with a fixed tick of `dt` seconds
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            pos_cm: Vector3::zeros(),
            vel_cms: Vector3::zeros(),
            offset_u_cm: 0.0,
            thrust: Vector3::new(0.0, 0.0, 1.0),
            max_speed_ne_cms: 1000.0,
            max_accel_ne_cmss: 250.0,
            max_speed_up_cms: 250.0,
            max_speed_down_cms: 150.0,
            max_accel_u_cmss: 250.0,
            target_u: VerticalTarget::Hold,
            target_ne: HorizontalTarget::Hold,
            relaxed_throttle: None,
            commands: 0,
            updates: 0,
        }
    }

    /// Place the desired position (e.g. to mirror the estimate)
    pub fn set_position(&mut self, pos_cm: Vector3<f32>) {
        self.pos_cm = pos_cm;
    }

    pub fn set_velocity(&mut self, vel_cms: Vector3<f32>) {
        self.vel_cms = vel_cms;
    }

    pub fn set_thrust_vector(&mut self, thrust: Vector3<f32>) {
        self.thrust = thrust;
    }

    /// Number of target/limit/relax/init calls so far
    pub fn command_count(&self) -> usize {
        self.commands
    }

    /// Number of `update_ne`/`update_u` calls so far
    pub fn update_count(&self) -> usize {
        self.updates
    }

    /// Throttle passed to the last `relax_u`, cleared by any other vertical target
    pub fn relaxed_throttle(&self) -> Option<f32> {
        self.relaxed_throttle
    }

    pub fn offset_u_cm(&self) -> f32 {
        self.offset_u_cm
    }

    /// Horizontal velocity tracking currently relaxed
    pub fn ne_relaxed(&self) -> bool {
        self.target_ne == HorizontalTarget::Relax
    }

    fn command(&mut self) {
        self.commands += 1;
    }

    fn set_target_u(&mut self, target: VerticalTarget) {
        self.command();
        self.target_u = target;
        if target != VerticalTarget::Relax {
            self.relaxed_throttle = None;
        }
    }
}

impl Default for MockPositionController {
    fn default() -> Self {
        Self::new(0.01)
    }
}

impl PositionController for MockPositionController {
    fn set_max_speed_accel_ne(&mut self, speed_cms: f32, accel_cmss: f32) {
        self.command();
        self.max_speed_ne_cms = speed_cms;
        self.max_accel_ne_cmss = accel_cmss;
    }

    fn set_correction_speed_accel_ne(&mut self, _speed_cms: f32, _accel_cmss: f32) {
        self.command();
    }

    fn set_max_speed_accel_u(&mut self, speed_down_cms: f32, speed_up_cms: f32, accel_cmss: f32) {
        self.command();
        self.max_speed_down_cms = -speed_down_cms;
        self.max_speed_up_cms = speed_up_cms;
        self.max_accel_u_cmss = accel_cmss;
    }

    fn set_correction_speed_accel_u(
        &mut self,
        _speed_down_cms: f32,
        _speed_up_cms: f32,
        _accel_cmss: f32,
    ) {
        self.command();
    }

    fn input_pos_vel_accel_ne(
        &mut self,
        pos_cm: Vector2<f32>,
        vel_cms: Vector2<f32>,
        _accel_cmss: Vector2<f32>,
    ) {
        self.command();
        self.target_ne = HorizontalTarget::PosVel { pos_cm, vel_cms };
    }

    fn input_vel_accel_ne(&mut self, vel_cms: Vector2<f32>, _accel_cmss: Vector2<f32>) {
        self.command();
        self.target_ne = HorizontalTarget::Vel { vel_cms };
    }

    fn input_pos_vel_accel_u(&mut self, pos_cm: f32, vel_cms: f32, _accel_cmss: f32) {
        self.set_target_u(VerticalTarget::PosVel { pos_cm, vel_cms });
    }

    fn input_vel_accel_u(&mut self, vel_cms: f32, _accel_cmss: f32) {
        self.set_target_u(VerticalTarget::Vel { vel_cms });
    }

    fn set_pos_offset_target_u(&mut self, offset_cm: f32) {
        self.command();
        self.offset_u_cm = offset_cm;
    }

    fn init_ne(&mut self) {
        self.command();
        self.target_ne = HorizontalTarget::Hold;
        self.vel_cms.x = 0.0;
        self.vel_cms.y = 0.0;
    }

    fn init_u(&mut self) {
        self.set_target_u(VerticalTarget::Hold);
        self.vel_cms.z = 0.0;
    }

    fn relax_velocity_ne(&mut self) {
        self.command();
        self.target_ne = HorizontalTarget::Relax;
    }

    fn relax_u(&mut self, throttle: f32) {
        self.set_target_u(VerticalTarget::Relax);
        self.relaxed_throttle = Some(throttle);
    }

    fn update_ne(&mut self) {
        self.updates += 1;
        match self.target_ne {
            HorizontalTarget::Hold => {}
            HorizontalTarget::PosVel { pos_cm, vel_cms } => {
                self.pos_cm.x = pos_cm.x;
                self.pos_cm.y = pos_cm.y;
                self.vel_cms.x = vel_cms.x;
                self.vel_cms.y = vel_cms.y;
            }
            HorizontalTarget::Vel { vel_cms } => {
                self.vel_cms.x = vel_cms.x;
                self.vel_cms.y = vel_cms.y;
                self.pos_cm.x += vel_cms.x * self.dt;
                self.pos_cm.y += vel_cms.y * self.dt;
            }
            HorizontalTarget::Relax => {
                self.vel_cms.x = 0.0;
                self.vel_cms.y = 0.0;
            }
        }
    }

    fn update_u(&mut self) {
        self.updates += 1;
        let demand = match self.target_u {
            VerticalTarget::Hold | VerticalTarget::Relax => 0.0,
            VerticalTarget::PosVel { pos_cm, vel_cms } => {
                vel_cms + POS_U_GAIN * (pos_cm - self.pos_cm.z)
            }
            VerticalTarget::Vel { vel_cms } => vel_cms,
        };
        let demand = constrain(demand, -self.max_speed_down_cms, self.max_speed_up_cms);
        let dv = self.max_accel_u_cmss * self.dt;
        self.vel_cms.z = constrain(demand, self.vel_cms.z - dv, self.vel_cms.z + dv);
        self.pos_cm.z += self.vel_cms.z * self.dt;
    }

    fn pos_desired_neu_cm(&self) -> Vector3<f32> {
        self.pos_cm
    }

    fn vel_desired_neu_cms(&self) -> Vector3<f32> {
        self.vel_cms
    }

    fn max_speed_ne_cms(&self) -> f32 {
        self.max_speed_ne_cms
    }

    fn max_accel_ne_cmss(&self) -> f32 {
        self.max_accel_ne_cmss
    }

    fn max_speed_up_cms(&self) -> f32 {
        self.max_speed_up_cms
    }

    fn max_speed_down_cms(&self) -> f32 {
        self.max_speed_down_cms
    }

    fn max_accel_u_cmss(&self) -> f32 {
        self.max_accel_u_cmss
    }

    fn thrust_vector(&self) -> Vector3<f32> {
        self.thrust
    }
}
