//! Arming Gate
//!
//! Owns the armed state and performs the disarmed/armed transitions.
//!
//! ## State machine
//!
//! ```text
//! DISARMED --(pre-arm and arm checks pass)--> ARMED
//! ARMED    --(disarm checks pass)-----------> DISARMED
//! ```
//!
//! A failed check leaves the state untouched.

use super::checks::{create_default_checker, ArmingChecker};
use super::error::{ArmingError, CheckCategory, CheckFailure, CheckMask, CheckReport, DisarmError};
use super::inputs::ArmingInputs;
use crate::parameters::ArmingParams;
use crate::traits::{format_line, ArmingHooks, Notifier, Severity};
use crate::vehicle::SafetySwitch;

/// Longest status text line sent by the gate
pub const STATUS_TEXT_LEN: usize = 60;

/// How an arm or disarm was requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ArmingMethod {
    /// Throttle-down plus yaw stick gesture
    Rudder,
    /// Ground station command
    GroundStation,
    /// RC auxiliary switch
    AuxSwitch,
    /// Vehicle logic (failsafes, landing detector)
    Internal,
}

impl ArmingMethod {
    pub fn is_rudder(self) -> bool {
        self == ArmingMethod::Rudder
    }
}

/// Process-wide arming state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArmingState {
    pub armed: bool,
    /// Armed and not blocked by the safety switch
    pub soft_armed: bool,
    /// ARMING_CHECK mask of the last successful arm
    pub enabled_checks: CheckMask,
}

/// Arming gate
pub struct ArmingGate<N: Notifier> {
    state: ArmingState,
    checker: ArmingChecker,
    notifier: N,
}

impl<N: Notifier> ArmingGate<N> {
    /// Disarmed gate with the built-in checks
    pub fn new(notifier: N, params: &ArmingParams) -> Self {
        Self::with_checker(notifier, params, create_default_checker())
    }

    /// Disarmed gate with a custom check list
    pub fn with_checker(notifier: N, params: &ArmingParams, checker: ArmingChecker) -> Self {
        Self {
            state: ArmingState {
                armed: false,
                soft_armed: false,
                enabled_checks: params.checks,
            },
            checker,
            notifier,
        }
    }

    pub fn state(&self) -> ArmingState {
        self.state
    }

    pub fn is_armed(&self) -> bool {
        self.state.armed
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    /// Run the pre-arm checks
    ///
    /// Always true while armed. The ARMING_CHECK mask is read from the live
    /// configuration in `inputs`. With `report` set, every failure found by
    /// this call is sent as a "PreArm: ..." status text as it is recorded.
    /// Failures are appended to `failures` in either case.
    pub fn pre_arm_checks(
        &mut self,
        inputs: &ArmingInputs<'_>,
        report: bool,
        failures: &mut CheckReport<'_>,
    ) -> bool {
        if self.state.armed {
            return true;
        }

        let mask = inputs.config.arming.checks;
        if !report {
            return self.checker.run_checks(inputs, mask, failures);
        }

        let notifier = &mut self.notifier;
        let mut send = |failure: &CheckFailure| {
            send_line(notifier, Severity::Critical, format_args!("PreArm: {}", failure.reason));
        };
        let mut found = CheckReport::with_sink(&mut send);
        let passed = self.checker.run_checks(inputs, mask, &mut found);
        failures.absorb(&found);
        passed
    }

    /// Checks that only apply at the moment of arming
    ///
    /// Skipped entirely when ARMING_CHECK is empty.
    pub fn arm_checks(
        &mut self,
        inputs: &ArmingInputs<'_>,
        method: ArmingMethod,
        failures: &mut CheckReport<'_>,
    ) -> bool {
        if inputs.config.arming.checks.is_empty() {
            return true;
        }

        let mut passed = true;
        if method.is_rudder() {
            if !inputs.mode.allows_arming_from_transmitter {
                passed = self.arm_check_failed(failures, "Mode not rudder-armable");
            }
            if !inputs.config.arming.rudder_can_arm() {
                passed = self.arm_check_failed(failures, "Rudder arming disabled");
            }
        }
        passed
    }

    fn arm_check_failed(&mut self, failures: &mut CheckReport<'_>, reason: &str) -> bool {
        failures.fail(CheckCategory::Mandatory, format_args!("{}", reason));
        self.send(Severity::Critical, format_args!("Arm: {}", reason));
        false
    }

    /// Arm the vehicle
    ///
    /// Runs the pre-arm and arm checks unless `do_checks` is false. On
    /// failure the state is unchanged, an arming-failed event is raised and
    /// the first failure is returned.
    pub fn arm(
        &mut self,
        inputs: &ArmingInputs<'_>,
        hooks: &mut dyn ArmingHooks,
        method: ArmingMethod,
        do_checks: bool,
    ) -> Result<(), ArmingError> {
        if self.state.armed {
            self.notifier.arming_failed();
            return Err(ArmingError::AlreadyArmed);
        }

        if do_checks {
            let mut failures = CheckReport::new();
            let pre_arm_ok = self.pre_arm_checks(inputs, true, &mut failures);
            let arm_ok = self.arm_checks(inputs, method, &mut failures);
            if !(pre_arm_ok && arm_ok) {
                crate::log_warn!("Arming refused: {} failures", failures.total());
                self.notifier.arming_failed();
                let first = failures.first().cloned().unwrap_or_else(|| {
                    CheckFailure::new(CheckCategory::Mandatory, "Arming checks failed")
                });
                return Err(ArmingError::CheckFailed(first));
            }
        } else {
            crate::log_warn!("Arming without checks ({})", method);
        }

        self.state.armed = true;
        self.state.enabled_checks = inputs.config.arming.checks;
        hooks.init_home_references();
        self.update_soft_armed(inputs.safety_switch);

        crate::log_info!("Armed ({})", method);
        self.notifier.send_text(Severity::Info, "Throttle armed");
        self.notifier.armed_changed(true);
        Ok(())
    }

    /// Disarm the vehicle
    ///
    /// A rudder disarm while motor output is active is refused without any
    /// notification; it is expected while flying with the stick held.
    pub fn disarm(
        &mut self,
        inputs: &ArmingInputs<'_>,
        hooks: &mut dyn ArmingHooks,
        method: ArmingMethod,
        do_checks: bool,
    ) -> Result<(), DisarmError> {
        if !self.state.armed {
            return Err(DisarmError::NotArmed);
        }

        if method.is_rudder() && inputs.motors.active {
            return Err(DisarmError::Refused);
        }

        if do_checks && method.is_rudder() && !inputs.config.arming.rudder_can_disarm() {
            let failure = CheckFailure::new(CheckCategory::Mandatory, "Rudder disarm disabled");
            self.send(Severity::Critical, format_args!("Disarm: {}", failure.reason));
            return Err(DisarmError::CheckFailed(failure));
        }

        self.state.armed = false;
        if !inputs.mode.is_autopilot {
            hooks.reset_mission();
        }
        self.update_soft_armed(inputs.safety_switch);

        crate::log_info!("Disarmed ({})", method);
        self.notifier.send_text(Severity::Info, "Throttle disarmed");
        self.notifier.armed_changed(false);
        Ok(())
    }

    /// Mirror the armed flag through the safety switch
    pub fn update_soft_armed(&mut self, safety_switch: SafetySwitch) {
        self.state.soft_armed = self.state.armed && safety_switch != SafetySwitch::Disarmed;
    }

    fn send(&mut self, severity: Severity, args: core::fmt::Arguments<'_>) {
        send_line(&mut self.notifier, severity, args);
    }
}

fn send_line<N: Notifier>(notifier: &mut N, severity: Severity, args: core::fmt::Arguments<'_>) {
    let line: heapless::String<STATUS_TEXT_LEN> = format_line(args);
    notifier.send_text(severity, &line);
}

impl core::fmt::Display for ArmingMethod {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ArmingMethod::Rudder => write!(f, "rudder"),
            ArmingMethod::GroundStation => write!(f, "GCS"),
            ArmingMethod::AuxSwitch => write!(f, "switch"),
            ArmingMethod::Internal => write!(f, "internal"),
        }
    }
}
