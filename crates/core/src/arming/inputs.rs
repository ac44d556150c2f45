//! Inputs read by the arming checks
//!
//! Gathered by the caller for one evaluation; the checks never reach into
//! global state.

use crate::mode::ModeInfo;
use crate::parameters::VehicleConfig;
use crate::rc::RcChannel;
use crate::traits::PeripheralCheck;
use crate::vehicle::SafetySwitch;

/// Roll, pitch, throttle and yaw with factory calibration
pub static CALIBRATED_CHANNELS: [RcChannel; 4] = [
    RcChannel::calibrated("Roll"),
    RcChannel::calibrated("Pitch"),
    RcChannel::calibrated("Throttle"),
    RcChannel::calibrated("Yaw"),
];

/// Attitude/position estimator readiness
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EstimatorStatus {
    /// Estimator's own pre-arm failure reason
    pub pre_arm_failure: Option<&'static str>,
    /// Estimator failsafe active
    pub ekf_failsafe: bool,
    /// Horizontal position estimate usable
    pub position_ok: bool,
}

impl Default for EstimatorStatus {
    fn default() -> Self {
        Self {
            pre_arm_failure: None,
            ekf_failsafe: false,
            position_ok: true,
        }
    }
}

/// Motor layer readiness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MotorStatus {
    /// Motor output currently active (spinning above idle)
    pub active: bool,
    /// Hardware-specific pre-arm failure reason
    pub pre_arm_failure: Option<&'static str>,
}

/// Everything the arming gate evaluates
#[derive(Clone, Copy)]
pub struct ArmingInputs<'a> {
    /// Boot sequence finished
    pub system_initialised: bool,
    /// Attitude estimate healthy
    pub attitude_healthy: bool,
    pub rc_channels: &'a [RcChannel],
    pub estimator: EstimatorStatus,
    /// Capabilities of the active mode
    pub mode: ModeInfo,
    pub motors: MotorStatus,
    pub safety_switch: SafetySwitch,
    pub config: &'a VehicleConfig,
    /// Optional peripherals with their own pre-arm checks
    pub peripherals: &'a [&'a dyn PeripheralCheck],
}

impl<'a> ArmingInputs<'a> {
    /// Healthy inputs in `mode` with calibrated RC and no peripherals
    pub fn new(config: &'a VehicleConfig, mode: ModeInfo) -> Self {
        Self {
            system_initialised: true,
            attitude_healthy: true,
            rc_channels: &CALIBRATED_CHANNELS,
            estimator: EstimatorStatus::default(),
            mode,
            motors: MotorStatus::default(),
            safety_switch: SafetySwitch::None,
            config,
            peripherals: &[],
        }
    }

    /// Position estimate is needed before arming
    pub fn requires_position(&self) -> bool {
        self.mode.requires_position || self.mode.requires_velocity || self.config.arming.require_location
    }
}
