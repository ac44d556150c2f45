//! Takeoff sequencers
//!
//! Two independent state machines share a grounded phase (throttle ramp
//! until lift-off) followed by a climbing phase tracked by the position
//! controller:
//!
//! - [`PilotTakeoff`]: user takeoff in pilot-flown modes with altitude hold
//! - [`AutoTakeoff`]: mission and guided takeoff in autonomous modes
//!
//! The grounded lift-off tests differ on purpose: the pilot variant also
//! accepts progress past half the climb distance, the autonomous variant
//! accepts reaching the no-nav altitude.

mod auto;
mod error;
mod ground;
mod pilot;

pub use auto::{stopping_distance_cm, AutoTakeoff};
pub use error::TakeoffError;
pub use ground::{
    liftoff_detected, ramp_throttle, LIFTOFF_ACCEL_FRACTION, LIFTOFF_THROTTLE_CAP,
    VEL_THRESHOLD_FRACTION,
};
pub use pilot::PilotTakeoff;
