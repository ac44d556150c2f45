//! Arming System Error Types
//!
//! Defines check categories, bounded failure messages, and the error types
//! returned by arming and disarming operations.

use core::fmt;

use bitflags::bitflags;

use crate::traits::format_line;

/// Longest failure reason kept, in bytes
pub const FAILURE_MESSAGE_LEN: usize = 50;

/// Maximum number of failures collected in one report
pub const MAX_REPORTED_FAILURES: usize = 8;

/// Bounded human-readable failure reason
pub type FailureMessage = heapless::String<FAILURE_MESSAGE_LEN>;

bitflags! {
    /// ARMING_CHECK bitmask of enabled check categories
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CheckMask: u16 {
        /// GPS / position estimate readiness
        const POSITION = 0x0004;
        /// Parameter sanity
        const PARAMETERS = 0x0010;
        /// RC channel calibration
        const RC = 0x0020;
        /// Motor and peripheral readiness
        const MOTORS = 0x1000;
        /// Mode compatibility
        const MODE = 0x2000;
    }
}

/// Pre-arm check categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CheckCategory {
    /// RC channel calibration
    Rc,
    /// GPS / position estimate readiness
    Position,
    /// Parameter sanity
    Parameters,
    /// Motor and peripheral readiness
    Motors,
    /// Mode compatibility
    Mode,
    /// Always-on checks that ignore ARMING_CHECK
    Mandatory,
}

impl CheckCategory {
    /// Mask bit selecting this category, `None` for mandatory checks
    pub fn mask_bit(self) -> Option<CheckMask> {
        match self {
            CheckCategory::Rc => Some(CheckMask::RC),
            CheckCategory::Position => Some(CheckMask::POSITION),
            CheckCategory::Parameters => Some(CheckMask::PARAMETERS),
            CheckCategory::Motors => Some(CheckMask::MOTORS),
            CheckCategory::Mode => Some(CheckMask::MODE),
            CheckCategory::Mandatory => None,
        }
    }

    /// Check if this category runs under the given mask
    ///
    /// Mandatory checks are always enabled.
    pub fn is_enabled(self, mask: CheckMask) -> bool {
        match self.mask_bit() {
            Some(bit) => mask.contains(bit),
            None => true,
        }
    }
}

impl fmt::Display for CheckCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckCategory::Rc => write!(f, "RC"),
            CheckCategory::Position => write!(f, "Position"),
            CheckCategory::Parameters => write!(f, "Parameters"),
            CheckCategory::Motors => write!(f, "Motors"),
            CheckCategory::Mode => write!(f, "Mode"),
            CheckCategory::Mandatory => write!(f, "Mandatory"),
        }
    }
}

/// Format a failure reason, truncating to `FAILURE_MESSAGE_LEN`
pub fn failure_message(args: fmt::Arguments<'_>) -> FailureMessage {
    format_line(args)
}

/// A single failed check
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CheckFailure {
    /// Category of the failing check
    pub category: CheckCategory,
    /// Human-readable reason
    pub reason: FailureMessage,
}

impl CheckFailure {
    pub fn new(category: CheckCategory, reason: &str) -> Self {
        Self {
            category,
            reason: failure_message(format_args!("{}", reason)),
        }
    }
}

impl fmt::Display for CheckFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.reason, self.category)
    }
}

/// Every failure found by one evaluation pass
///
/// Failures beyond `MAX_REPORTED_FAILURES` are counted but not stored. A
/// report built with [`CheckReport::with_sink`] also hands every failure to
/// the sink as it is recorded, including the ones that do not fit.
#[derive(Default)]
pub struct CheckReport<'a> {
    failures: heapless::Vec<CheckFailure, MAX_REPORTED_FAILURES>,
    dropped: usize,
    sink: Option<&'a mut dyn FnMut(&CheckFailure)>,
}

impl<'a> CheckReport<'a> {
    pub fn new() -> Self {
        Self {
            failures: heapless::Vec::new(),
            dropped: 0,
            sink: None,
        }
    }

    /// Report that forwards each failure to `sink` when recorded
    pub fn with_sink(sink: &'a mut dyn FnMut(&CheckFailure)) -> Self {
        Self {
            sink: Some(sink),
            ..Self::new()
        }
    }

    /// Record a failure with a formatted reason
    pub fn fail(&mut self, category: CheckCategory, args: fmt::Arguments<'_>) {
        let failure = CheckFailure {
            category,
            reason: failure_message(args),
        };
        if let Some(sink) = self.sink.as_deref_mut() {
            sink(&failure);
        }
        if self.failures.push(failure).is_err() {
            self.dropped += 1;
        }
    }

    /// Append the failures of another report
    pub fn absorb(&mut self, other: &CheckReport<'_>) {
        for failure in other.failures() {
            if self.failures.push(failure.clone()).is_err() {
                self.dropped += 1;
            }
        }
        self.dropped += other.dropped;
    }

    /// Stored failures in evaluation order
    pub fn failures(&self) -> &[CheckFailure] {
        &self.failures
    }

    /// First failure found, if any
    pub fn first(&self) -> Option<&CheckFailure> {
        self.failures.first()
    }

    /// Total failures including ones that did not fit
    pub fn total(&self) -> usize {
        self.failures.len() + self.dropped
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// True when any stored failure has exactly this reason
    pub fn contains(&self, reason: &str) -> bool {
        self.failures.iter().any(|f| f.reason.as_str() == reason)
    }

    pub fn clear(&mut self) {
        self.failures.clear();
        self.dropped = 0;
    }
}

impl fmt::Debug for CheckReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckReport")
            .field("failures", &self.failures)
            .field("dropped", &self.dropped)
            .finish()
    }
}

/// Errors that can occur during arming operations
#[derive(Debug, Clone, PartialEq)]
pub enum ArmingError {
    /// A pre-arm or arm-time check failed (first failure carried)
    CheckFailed(CheckFailure),
    /// Vehicle is already armed
    AlreadyArmed,
}

impl fmt::Display for ArmingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArmingError::CheckFailed(failure) => write!(
                f,
                "Arm check failed ({}): {}",
                failure.category, failure.reason
            ),
            ArmingError::AlreadyArmed => write!(f, "Vehicle is already armed"),
        }
    }
}

/// Errors that can occur during disarming operations
#[derive(Debug, Clone, PartialEq)]
pub enum DisarmError {
    /// Vehicle is not armed
    NotArmed,
    /// Request ignored, e.g. rudder disarm while motors are running
    Refused,
    /// A disarm check failed
    CheckFailed(CheckFailure),
}

impl fmt::Display for DisarmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisarmError::NotArmed => write!(f, "Vehicle is not armed"),
            DisarmError::Refused => write!(f, "Disarm request refused"),
            DisarmError::CheckFailed(failure) => {
                write!(f, "Disarm check failed: {}", failure.reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_category_is_enabled() {
        let mask = CheckMask::RC | CheckMask::PARAMETERS;

        assert!(CheckCategory::Rc.is_enabled(mask));
        assert!(CheckCategory::Parameters.is_enabled(mask));
        assert!(!CheckCategory::Position.is_enabled(mask));
        assert!(!CheckCategory::Motors.is_enabled(mask));
    }

    #[test]
    fn test_mandatory_always_enabled() {
        assert!(CheckCategory::Mandatory.is_enabled(CheckMask::empty()));
        assert!(CheckCategory::Mandatory.mask_bit().is_none());
        assert!(!CheckCategory::Mode.is_enabled(CheckMask::empty()));
    }

    #[test]
    fn test_failure_message_truncates() {
        let long = "abcdefghij";
        let msg = failure_message(format_args!("{}{}{}{}{}{}", long, long, long, long, long, long));
        assert_eq!(msg.len(), FAILURE_MESSAGE_LEN);
        assert!(msg.starts_with("abcdefghij"));
    }

    #[test]
    fn test_report_collects_and_counts_overflow() {
        let mut report = CheckReport::new();
        assert!(report.is_empty());

        for i in 0..(MAX_REPORTED_FAILURES + 2) {
            report.fail(CheckCategory::Rc, format_args!("failure {}", i));
        }

        assert_eq!(report.failures().len(), MAX_REPORTED_FAILURES);
        assert_eq!(report.total(), MAX_REPORTED_FAILURES + 2);
        assert_eq!(report.first().map(|f| f.reason.as_str()), Some("failure 0"));
        assert!(report.contains("failure 3"));

        report.clear();
        assert!(report.is_empty());
    }

    #[test]
    fn test_sink_sees_failures_past_capacity() {
        let mut seen = 0usize;
        let mut count = |_: &CheckFailure| seen += 1;
        let mut report = CheckReport::with_sink(&mut count);

        for i in 0..(MAX_REPORTED_FAILURES + 3) {
            report.fail(CheckCategory::Motors, format_args!("esc {}", i));
        }
        assert_eq!(report.failures().len(), MAX_REPORTED_FAILURES);
        assert_eq!(report.total(), MAX_REPORTED_FAILURES + 3);

        let mut merged = CheckReport::new();
        merged.fail(CheckCategory::Rc, format_args!("Roll radio min too high"));
        merged.absorb(&report);
        assert_eq!(merged.total(), MAX_REPORTED_FAILURES + 4);
        assert_eq!(merged.first().map(|f| f.category), Some(CheckCategory::Rc));

        drop(report);
        assert_eq!(seen, MAX_REPORTED_FAILURES + 3);
    }

    #[test]
    fn test_arming_error_display() {
        let error = ArmingError::CheckFailed(CheckFailure::new(
            CheckCategory::Parameters,
            "WP_SPEED too low",
        ));
        assert_eq!(
            format!("{}", error),
            "Arm check failed (Parameters): WP_SPEED too low"
        );
        assert_eq!(
            format!("{}", ArmingError::AlreadyArmed),
            "Vehicle is already armed"
        );
    }

    #[test]
    fn test_disarm_error_display() {
        assert_eq!(
            format!("{}", DisarmError::Refused),
            "Disarm request refused"
        );
        let error = DisarmError::CheckFailed(CheckFailure::new(
            CheckCategory::Mandatory,
            "Rudder disarm disabled",
        ));
        assert_eq!(
            format!("{}", error),
            "Disarm check failed: Rudder disarm disabled"
        );
    }
}
