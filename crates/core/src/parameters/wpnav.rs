//! Waypoint Navigation Parameter Definitions
//!
//! # Parameters
//!
//! - `WP_SPEED` - Default horizontal navigation speed (cm/s)
//! - `WP_ACCEL` - Horizontal navigation acceleration (cm/s²)
//! - `WP_NAVALT_MIN` - Altitude above takeoff point before horizontal
//!   navigation is allowed (m, 0 = disabled)

use super::error::ParameterError;
use super::load_float;
use super::storage::{ParamFlags, ParamValue, ParameterStore};

const DEFAULT_SPEED: f32 = 1000.0;
const DEFAULT_ACCEL: f32 = 250.0;
const DEFAULT_NAVALT_MIN: f32 = 0.0;

// WP_SPEED may legitimately be stored as 0; the parameter pre-arm check
// rejects it rather than the loader.
const MIN_SPEED: f32 = 0.0;
const MAX_SPEED: f32 = 2000.0;
const MIN_ACCEL: f32 = 50.0;
const MAX_ACCEL: f32 = 500.0;
const MIN_NAVALT: f32 = 0.0;
const MAX_NAVALT: f32 = 5.0;

/// Horizontal navigation limits
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WpNavParams {
    /// Default horizontal speed in cm/s
    pub speed_cms: f32,
    /// Horizontal acceleration in cm/s²
    pub accel_cmss: f32,
    /// Navigation suppression altitude margin in meters
    pub navalt_min_m: f32,
}

impl Default for WpNavParams {
    fn default() -> Self {
        Self {
            speed_cms: DEFAULT_SPEED,
            accel_cmss: DEFAULT_ACCEL,
            navalt_min_m: DEFAULT_NAVALT_MIN,
        }
    }
}

impl WpNavParams {
    /// Register navigation parameters with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        store.register(
            "WP_SPEED",
            ParamValue::Float(DEFAULT_SPEED),
            ParamFlags::empty(),
        )?;
        store.register(
            "WP_ACCEL",
            ParamValue::Float(DEFAULT_ACCEL),
            ParamFlags::empty(),
        )?;
        store.register(
            "WP_NAVALT_MIN",
            ParamValue::Float(DEFAULT_NAVALT_MIN),
            ParamFlags::empty(),
        )?;
        Ok(())
    }

    /// Load navigation parameters from parameter store
    pub fn from_store(store: &ParameterStore) -> Self {
        Self {
            speed_cms: load_float(store, "WP_SPEED", DEFAULT_SPEED, MIN_SPEED, MAX_SPEED),
            accel_cmss: load_float(store, "WP_ACCEL", DEFAULT_ACCEL, MIN_ACCEL, MAX_ACCEL),
            navalt_min_m: load_float(
                store,
                "WP_NAVALT_MIN",
                DEFAULT_NAVALT_MIN,
                MIN_NAVALT,
                MAX_NAVALT,
            ),
        }
    }

    /// Navigation suppression margin in centimeters
    pub fn navalt_min_cm(&self) -> f32 {
        self.navalt_min_m * 100.0
    }
}
