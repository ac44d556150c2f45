//! Parameter management types and utilities
//!
//! ArduPilot-named parameters held in a `ParameterStore` and loaded into typed
//! blocks. Loaders clamp to valid ranges so downstream code never sees an
//! out-of-range value.

pub mod arming;
pub mod circle;
pub mod config;
pub mod error;
pub mod pilot;
pub mod storage;
pub mod takeoff;
pub mod wpnav;

pub use arming::{ArmingParams, RudderArming};
pub use circle::{CircleOptions, CircleParams};
pub use config::VehicleConfig;
pub use error::ParameterError;
pub use pilot::PilotParams;
pub use storage::{ParamFlags, ParamValue, ParameterStore, MAX_PARAMS, PARAM_NAME_LEN};
pub use takeoff::TakeoffParams;
pub use wpnav::WpNavParams;

/// Read a float parameter and clamp it into `[min, max]`
pub(crate) fn load_float(
    store: &ParameterStore,
    name: &str,
    default: f32,
    min: f32,
    max: f32,
) -> f32 {
    crate::math::constrain(store.get_f32(name, default), min, max)
}
