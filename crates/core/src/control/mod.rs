//! Position controller interface
//!
//! Trait boundary to the external position/attitude controller, plus an
//! always-available kinematic mock for host tests.

mod mock;
mod position;

pub use mock::MockPositionController;
pub use position::PositionController;
