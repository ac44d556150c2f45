//! Circle Mode Parameter Definitions
//!
//! # Parameters
//!
//! - `CIRCLE_RADIUS` - Orbit radius (cm, 0 = rotate in place)
//! - `CIRCLE_RATE` - Orbit rate (deg/s, positive = clockwise)
//! - `CIRCLE_OPTIONS` - Behavior bitmask (see `CircleOptions`)

use bitflags::bitflags;

use super::error::ParameterError;
use super::load_float;
use super::storage::{ParamFlags, ParamValue, ParameterStore};

/// Largest accepted orbit radius (2 km)
pub const MAX_RADIUS_CM: f32 = 200_000.0;

/// Largest accepted orbit rate magnitude
pub const MAX_RATE_DEGS: f32 = 90.0;

const DEFAULT_RADIUS_CM: f32 = 1000.0;
const DEFAULT_RATE_DEGS: f32 = 20.0;

bitflags! {
    /// CIRCLE_OPTIONS bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CircleOptions: u16 {
        /// Pilot sticks adjust radius and rate
        const MANUAL_CONTROL = 1 << 0;
        /// Yaw along the direction of travel instead of toward the center
        const FACE_DIRECTION_OF_TRAVEL = 1 << 1;
        /// Place the center at the vehicle instead of radius ahead
        const INIT_AT_CENTER = 1 << 2;
        /// Point the camera mount at the center
        const ROI_AT_CENTER = 1 << 3;
    }
}

/// Circle parameters loaded from parameter store
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleParams {
    /// Orbit radius in cm
    pub radius_cm: f32,
    /// Orbit rate in deg/s
    pub rate_degs: f32,
    /// Behavior options
    pub options: CircleOptions,
}

impl Default for CircleParams {
    fn default() -> Self {
        Self {
            radius_cm: DEFAULT_RADIUS_CM,
            rate_degs: DEFAULT_RATE_DEGS,
            options: CircleOptions::MANUAL_CONTROL,
        }
    }
}

impl CircleParams {
    /// Register circle parameters with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        store.register(
            "CIRCLE_RADIUS",
            ParamValue::Float(DEFAULT_RADIUS_CM),
            ParamFlags::empty(),
        )?;
        store.register(
            "CIRCLE_RATE",
            ParamValue::Float(DEFAULT_RATE_DEGS),
            ParamFlags::empty(),
        )?;
        store.register(
            "CIRCLE_OPTIONS",
            ParamValue::Int(CircleOptions::MANUAL_CONTROL.bits() as i32),
            ParamFlags::empty(),
        )?;
        Ok(())
    }

    /// Load circle parameters from parameter store
    pub fn from_store(store: &ParameterStore) -> Self {
        let options = store.get_i32(
            "CIRCLE_OPTIONS",
            CircleOptions::MANUAL_CONTROL.bits() as i32,
        );

        Self {
            radius_cm: load_float(store, "CIRCLE_RADIUS", DEFAULT_RADIUS_CM, 0.0, MAX_RADIUS_CM),
            rate_degs: load_float(
                store,
                "CIRCLE_RATE",
                DEFAULT_RATE_DEGS,
                -MAX_RATE_DEGS,
                MAX_RATE_DEGS,
            ),
            options: CircleOptions::from_bits_truncate(options as u16),
        }
    }
}
