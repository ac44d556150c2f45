//! Navigation target generation
//!
//! This module contains the orbit tracker that drives circle flight.

mod orbit;

pub use orbit::{OrbitTracker, ANGULAR_ACCEL_MIN_RADS};
