//! Arming system
//!
//! Decides whether it is safe to energize the motors and performs the
//! disarmed/armed transitions.
//!
//! # Contents
//!
//! - `error`: check categories, bounded failure reasons, error types
//! - `inputs`: what the checks read for one evaluation
//! - `checks`: `PreArmCheck` implementations and the `ArmingChecker`
//! - `gate`: `ArmingGate` state machine with arm/disarm operations

pub mod checks;
pub mod error;
pub mod gate;
pub mod inputs;

pub use checks::{create_default_checker, ArmingChecker, PreArmCheck};
pub use error::{
    failure_message, ArmingError, CheckCategory, CheckFailure, CheckMask, CheckReport,
    DisarmError, FailureMessage, FAILURE_MESSAGE_LEN, MAX_REPORTED_FAILURES,
};
pub use gate::{ArmingGate, ArmingMethod, ArmingState};
pub use inputs::{ArmingInputs, EstimatorStatus, MotorStatus, CALIBRATED_CHANNELS};
