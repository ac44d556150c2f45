//! Per-tick vehicle state snapshot
//!
//! Everything the arming gate and the mode loops read from the estimator and
//! motor layers, captured once at the start of a tick.

use nalgebra::Vector3;

/// Motor spool state as reported by the motor layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpoolState {
    /// Motors stopped
    #[default]
    ShutDown,
    /// Motors spinning at idle
    GroundIdle,
    /// Ramping between idle and full range
    SpoolingUp,
    /// Full throttle range available
    ThrottleUnlimited,
    /// Ramping down toward idle
    SpoolingDown,
}

/// Physical safety switch position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SafetySwitch {
    /// No safety switch fitted
    #[default]
    None,
    /// Switch is safe, outputs blocked
    Disarmed,
    /// Switch allows outputs
    Armed,
}

/// Read-only vehicle state for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleSnapshot {
    /// Position estimate relative to the origin (north, east, up) in cm
    pub position_neu_cm: Vector3<f32>,
    /// Velocity estimate (north, east, up) in cm/s
    pub velocity_neu_cms: Vector3<f32>,
    /// Current heading in radians
    pub yaw_rad: f32,
    /// Altitude above home in cm
    pub altitude_above_home_cm: f32,
    /// Motors armed
    pub armed: bool,
    /// Autonomous modes may drive the motors
    pub auto_armed: bool,
    /// Vehicle resting on the ground
    pub land_complete: bool,
    /// Motor interlock engaged
    pub interlock: bool,
    /// Vehicle uses a motor interlock switch
    pub using_interlock: bool,
    /// Motor spool state
    pub spool_state: SpoolState,
    /// Measured vertical acceleration in cm/s²
    pub measured_accel_u_cmss: f32,
    /// Throttle currently fed to the attitude controller (0.0-1.0)
    pub throttle_in: f32,
    /// Terrain height offset in cm, `None` when terrain data is unavailable
    pub terrain_offset_cm: Option<f32>,
}

impl Default for VehicleSnapshot {
    fn default() -> Self {
        Self {
            position_neu_cm: Vector3::zeros(),
            velocity_neu_cms: Vector3::zeros(),
            yaw_rad: 0.0,
            altitude_above_home_cm: 0.0,
            armed: false,
            auto_armed: false,
            land_complete: true,
            interlock: true,
            using_interlock: false,
            spool_state: SpoolState::ShutDown,
            measured_accel_u_cmss: 0.0,
            throttle_in: 0.0,
            terrain_offset_cm: None,
        }
    }
}

impl VehicleSnapshot {
    /// Disarmed, not auto-armed, or sitting on the ground
    pub fn is_disarmed_or_landed(&self) -> bool {
        !self.armed || !self.auto_armed || self.land_complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_snapshot_is_landed_and_disarmed() {
        let snap = VehicleSnapshot::default();
        assert!(snap.is_disarmed_or_landed());
        assert!(snap.terrain_offset_cm.is_none());
    }

    #[test]
    fn test_flying_snapshot() {
        let snap = VehicleSnapshot::flying(Vector3::new(0.0, 0.0, 1000.0));
        assert!(!snap.is_disarmed_or_landed());
        assert_eq!(snap.altitude_above_home_cm, 1000.0);
    }

    #[test]
    fn test_not_auto_armed_counts_as_landed() {
        let mut snap = VehicleSnapshot::flying(Vector3::zeros());
        snap.auto_armed = false;
        assert!(snap.is_disarmed_or_landed());
    }
}
