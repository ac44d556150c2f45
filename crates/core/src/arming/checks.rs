//! Pre-Arm Checks
//!
//! Defines the `PreArmCheck` trait, the built-in checks and the
//! `ArmingChecker` that runs them against the ARMING_CHECK mask.
//!
//! Every enabled check runs even after an earlier one failed, so a single
//! evaluation reports all simultaneous problems.

use super::error::{CheckCategory, CheckMask, CheckReport};
use super::inputs::ArmingInputs;
use crate::math::is_positive;

/// Maximum number of registered checks
pub const MAX_CHECKS: usize = 16;

/// Pre-arm check trait
///
/// A check appends one failure per problem it finds to the report. It must
/// not stop at the first problem unless later ones depend on it.
pub trait PreArmCheck {
    /// Execute the check
    fn run(&self, inputs: &ArmingInputs<'_>, report: &mut CheckReport<'_>);

    /// Check name for logging
    fn name(&self) -> &'static str;

    /// Category for selective enabling via ARMING_CHECK
    fn category(&self) -> CheckCategory;
}

/// Arming checker that orchestrates pre-arm check execution
pub struct ArmingChecker {
    checks: heapless::Vec<&'static dyn PreArmCheck, MAX_CHECKS>,
}

impl ArmingChecker {
    pub fn new() -> Self {
        Self {
            checks: heapless::Vec::new(),
        }
    }

    /// Register a pre-arm check
    ///
    /// Returns Err if the maximum number of checks has been reached.
    pub fn register(&mut self, check: &'static dyn PreArmCheck) -> Result<(), &'static str> {
        self.checks
            .push(check)
            .map_err(|_| "Maximum number of checks (16) reached")
    }

    /// Number of registered checks
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Run every check enabled by `mask`
    ///
    /// Mandatory checks always run. Returns true when no check added a
    /// failure to the report.
    pub fn run_checks(
        &self,
        inputs: &ArmingInputs<'_>,
        mask: CheckMask,
        report: &mut CheckReport<'_>,
    ) -> bool {
        if mask.is_empty() {
            crate::log_warn!("ARMING_CHECK=0: only mandatory checks run");
        }

        let failures_before = report.total();
        let mut executed = 0usize;
        for check in &self.checks {
            if !check.category().is_enabled(mask) {
                crate::log_debug!("Pre-arm check skipped (disabled): {}", check.name());
                continue;
            }

            crate::log_debug!("Pre-arm check: {}", check.name());
            check.run(inputs, report);
            executed += 1;
        }

        let failed = report.total() - failures_before;
        if failed == 0 {
            crate::log_info!("All pre-arm checks passed ({} executed)", executed);
        } else {
            crate::log_warn!("{} pre-arm failures ({} checks executed)", failed, executed);
        }
        failed == 0
    }
}

impl Default for ArmingChecker {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Built-in Pre-Arm Checks
// ============================================================================

/// Boot sequence must have finished
pub struct SystemInitialisedCheck;

impl PreArmCheck for SystemInitialisedCheck {
    fn run(&self, inputs: &ArmingInputs<'_>, report: &mut CheckReport) {
        if !inputs.system_initialised {
            report.fail(CheckCategory::Mandatory, format_args!("System not initialised"));
        }
    }

    fn name(&self) -> &'static str {
        "System Initialised"
    }

    fn category(&self) -> CheckCategory {
        CheckCategory::Mandatory
    }
}

/// Attitude estimate must be healthy
pub struct AttitudeHealthCheck;

impl PreArmCheck for AttitudeHealthCheck {
    fn run(&self, inputs: &ArmingInputs<'_>, report: &mut CheckReport) {
        if !inputs.attitude_healthy {
            report.fail(CheckCategory::Mandatory, format_args!("AHRS not healthy"));
        }
    }

    fn name(&self) -> &'static str {
        "Attitude Health"
    }

    fn category(&self) -> CheckCategory {
        CheckCategory::Mandatory
    }
}

/// RC calibration of every control channel
///
/// Reports the first problem of each channel.
pub struct RcCalibrationCheck;

impl PreArmCheck for RcCalibrationCheck {
    fn run(&self, inputs: &ArmingInputs<'_>, report: &mut CheckReport) {
        for channel in inputs.rc_channels {
            if let Some(problem) = channel.calibration_problem() {
                report.fail(CheckCategory::Rc, format_args!("{} {}", channel.name, problem));
            }
        }
    }

    fn name(&self) -> &'static str {
        "RC Calibration"
    }

    fn category(&self) -> CheckCategory {
        CheckCategory::Rc
    }
}

/// Position estimate readiness
///
/// Only runs when the active mode needs position or velocity, or
/// ARMING_NEED_LOC is set. Stops at the first problem since each one
/// implies the next.
pub struct PositionCheck;

impl PreArmCheck for PositionCheck {
    fn run(&self, inputs: &ArmingInputs<'_>, report: &mut CheckReport) {
        if !inputs.requires_position() {
            return;
        }

        let estimator = &inputs.estimator;
        if let Some(reason) = estimator.pre_arm_failure {
            report.fail(CheckCategory::Position, format_args!("AHRS: {}", reason));
        } else if estimator.ekf_failsafe {
            report.fail(CheckCategory::Position, format_args!("EKF failsafe"));
        } else if !estimator.position_ok {
            report.fail(CheckCategory::Position, format_args!("Need Position Estimate"));
        }
    }

    fn name(&self) -> &'static str {
        "Position"
    }

    fn category(&self) -> CheckCategory {
        CheckCategory::Position
    }
}

/// Parameter sanity
pub struct ParameterCheck;

impl PreArmCheck for ParameterCheck {
    fn run(&self, inputs: &ArmingInputs<'_>, report: &mut CheckReport) {
        let config = inputs.config;
        if !is_positive(config.wpnav.speed_cms) {
            report.fail(CheckCategory::Parameters, format_args!("WP_SPEED too low"));
        }
        if !is_positive(config.pilot.speed_up_cms) {
            report.fail(CheckCategory::Parameters, format_args!("PILOT_SPEED_UP too low"));
        }
    }

    fn name(&self) -> &'static str {
        "Parameters"
    }

    fn category(&self) -> CheckCategory {
        CheckCategory::Parameters
    }
}

/// Active mode must allow arming
pub struct ModeCheck;

impl PreArmCheck for ModeCheck {
    fn run(&self, inputs: &ArmingInputs<'_>, report: &mut CheckReport) {
        if !inputs.mode.allows_arming {
            report.fail(CheckCategory::Mode, format_args!("Mode not armable"));
        }
    }

    fn name(&self) -> &'static str {
        "Mode"
    }

    fn category(&self) -> CheckCategory {
        CheckCategory::Mode
    }
}

/// Motor and optional peripheral readiness
pub struct MotorCheck;

impl PreArmCheck for MotorCheck {
    fn run(&self, inputs: &ArmingInputs<'_>, report: &mut CheckReport) {
        if let Some(reason) = inputs.motors.pre_arm_failure {
            report.fail(CheckCategory::Motors, format_args!("Motors: {}", reason));
        }
        for peripheral in inputs.peripherals {
            if let Err(reason) = peripheral.pre_arm_check() {
                report.fail(
                    CheckCategory::Motors,
                    format_args!("{}: {}", peripheral.name(), reason),
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "Motors"
    }

    fn category(&self) -> CheckCategory {
        CheckCategory::Motors
    }
}

// Static instances of built-in checks for registration
static SYSTEM_CHECK: SystemInitialisedCheck = SystemInitialisedCheck;
static ATTITUDE_CHECK: AttitudeHealthCheck = AttitudeHealthCheck;
static RC_CHECK: RcCalibrationCheck = RcCalibrationCheck;
static POSITION_CHECK: PositionCheck = PositionCheck;
static PARAMETER_CHECK: ParameterCheck = ParameterCheck;
static MODE_CHECK: ModeCheck = ModeCheck;
static MOTOR_CHECK: MotorCheck = MotorCheck;

/// Create an arming checker with every built-in check registered
///
/// Order: mandatory, RC, position, parameters, mode, motors.
pub fn create_default_checker() -> ArmingChecker {
    let mut checker = ArmingChecker::new();

    // Ignore registration errors since we control the count
    let _ = checker.register(&SYSTEM_CHECK);
    let _ = checker.register(&ATTITUDE_CHECK);
    let _ = checker.register(&RC_CHECK);
    let _ = checker.register(&POSITION_CHECK);
    let _ = checker.register(&PARAMETER_CHECK);
    let _ = checker.register(&MODE_CHECK);
    let _ = checker.register(&MOTOR_CHECK);

    checker
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::ModeInfo;
    use crate::parameters::VehicleConfig;
    use crate::rc::RcChannel;
    use crate::traits::PeripheralCheck;

    struct FailingPeripheral;

    impl PeripheralCheck for FailingPeripheral {
        fn name(&self) -> &'static str {
            "Rangefinder"
        }

        fn pre_arm_check(&self) -> Result<(), &'static str> {
            Err("no data")
        }
    }

    fn run(inputs: &ArmingInputs<'_>, mask: CheckMask) -> (bool, CheckReport<'static>) {
        let mut report = CheckReport::new();
        let passed = create_default_checker().run_checks(inputs, mask, &mut report);
        (passed, report)
    }

    #[test]
    fn test_default_checker_registers_all() {
        assert_eq!(create_default_checker().len(), 7);
    }

    #[test]
    fn test_healthy_inputs_pass() {
        let config = VehicleConfig::default();
        let inputs = ArmingInputs::new(&config, ModeInfo::manual("Stabilize"));
        let (passed, report) = run(&inputs, CheckMask::all());
        assert!(passed);
        assert!(report.is_empty());
    }

    #[test]
    fn test_wp_speed_zero_fails() {
        let mut config = VehicleConfig::default();
        config.wpnav.speed_cms = 0.0;
        let inputs = ArmingInputs::new(&config, ModeInfo::manual("Stabilize"));

        let (passed, report) = run(&inputs, CheckMask::all());
        assert!(!passed);
        assert!(report.contains("WP_SPEED too low"));
        assert_eq!(report.first().map(|f| f.category), Some(CheckCategory::Parameters));
    }

    #[test]
    fn test_all_failures_reported() {
        let mut config = VehicleConfig::default();
        config.wpnav.speed_cms = 0.0;
        let channels = [
            RcChannel::new("Roll", 1350, 1500, 1900),
            RcChannel::new("Pitch", 1100, 1500, 1600),
            RcChannel::new("Throttle", 1100, 1000, 1900),
        ];
        let peripherals: [&dyn PeripheralCheck; 1] = [&FailingPeripheral];
        let mut mode = ModeInfo::manual("Circle");
        mode.allows_arming = false;

        let mut inputs = ArmingInputs::new(&config, mode);
        inputs.rc_channels = &channels;
        inputs.peripherals = &peripherals;
        inputs.motors.pre_arm_failure = Some("check firmware");

        let (passed, report) = run(&inputs, CheckMask::all());
        assert!(!passed);
        assert!(report.contains("Roll radio min too high"));
        assert!(report.contains("Pitch radio max too low"));
        assert!(report.contains("Throttle trim out of range"));
        assert!(report.contains("WP_SPEED too low"));
        assert!(report.contains("Mode not armable"));
        assert!(report.contains("Motors: check firmware"));
        assert!(report.contains("Rangefinder: no data"));
        assert_eq!(report.total(), 7);
    }

    #[test]
    fn test_disabled_categories_skipped() {
        let mut config = VehicleConfig::default();
        config.wpnav.speed_cms = 0.0;
        let inputs = ArmingInputs::new(&config, ModeInfo::manual("Stabilize"));

        let (passed, _) = run(&inputs, CheckMask::RC | CheckMask::MODE);
        assert!(passed);
    }

    #[test]
    fn test_empty_mask_runs_mandatory_only() {
        let mut config = VehicleConfig::default();
        config.wpnav.speed_cms = 0.0;
        let mut inputs = ArmingInputs::new(&config, ModeInfo::manual("Stabilize"));

        let (passed, _) = run(&inputs, CheckMask::empty());
        assert!(passed);

        inputs.attitude_healthy = false;
        inputs.system_initialised = false;
        let (passed, report) = run(&inputs, CheckMask::empty());
        assert!(!passed);
        assert!(report.contains("System not initialised"));
        assert!(report.contains("AHRS not healthy"));
        assert_eq!(report.total(), 2);
    }

    #[test]
    fn test_position_check_only_when_required() {
        let config = VehicleConfig::default();
        let mut inputs = ArmingInputs::new(&config, ModeInfo::manual("Stabilize"));
        inputs.estimator.position_ok = false;

        let (passed, _) = run(&inputs, CheckMask::all());
        assert!(passed);

        inputs.mode.requires_position = true;
        let (passed, report) = run(&inputs, CheckMask::all());
        assert!(!passed);
        assert!(report.contains("Need Position Estimate"));
    }

    #[test]
    fn test_position_check_reports_estimator_reason_first() {
        let config = VehicleConfig::default();
        let mut inputs = ArmingInputs::new(&config, ModeInfo::manual("Stabilize"));
        inputs.mode.requires_velocity = true;
        inputs.estimator.pre_arm_failure = Some("gyros inconsistent");
        inputs.estimator.ekf_failsafe = true;

        let (_, report) = run(&inputs, CheckMask::POSITION);
        assert!(report.contains("AHRS: gyros inconsistent"));
        assert_eq!(report.total(), 1);
    }

    #[test]
    fn test_need_location_parameter_forces_position_check() {
        let mut config = VehicleConfig::default();
        config.arming.require_location = true;
        let mut inputs = ArmingInputs::new(&config, ModeInfo::manual("Stabilize"));
        inputs.estimator.ekf_failsafe = true;

        let (passed, report) = run(&inputs, CheckMask::POSITION);
        assert!(!passed);
        assert!(report.contains("EKF failsafe"));
    }

    #[test]
    fn test_register_capacity() {
        let mut checker = ArmingChecker::new();
        for _ in 0..MAX_CHECKS {
            assert!(checker.register(&MODE_CHECK).is_ok());
        }
        assert!(checker.register(&MODE_CHECK).is_err());
    }
}
