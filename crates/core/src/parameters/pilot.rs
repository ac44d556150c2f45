//! Pilot Vertical Control Parameter Definitions
//!
//! # Parameters
//!
//! - `PILOT_SPEED_UP` - Maximum pilot climb rate (cm/s)
//! - `PILOT_SPEED_DN` - Maximum pilot descent rate (cm/s, 0 = same as up)
//! - `PILOT_ACCEL_Z` - Pilot vertical acceleration (cm/s²)

use super::error::ParameterError;
use super::load_float;
use super::storage::{ParamFlags, ParamValue, ParameterStore};

const DEFAULT_SPEED_UP: f32 = 250.0;
const DEFAULT_SPEED_DN: f32 = 0.0;
const DEFAULT_ACCEL_Z: f32 = 250.0;

const MIN_SPEED: f32 = 0.0;
const MAX_SPEED: f32 = 500.0;
const MIN_ACCEL: f32 = 50.0;
const MAX_ACCEL: f32 = 500.0;

/// Pilot vertical speed and acceleration limits
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PilotParams {
    /// Maximum climb rate in cm/s
    pub speed_up_cms: f32,
    /// Maximum descent rate in cm/s (0 means use `speed_up_cms`)
    pub speed_dn_cms: f32,
    /// Vertical acceleration in cm/s²
    pub accel_z_cmss: f32,
}

impl Default for PilotParams {
    fn default() -> Self {
        Self {
            speed_up_cms: DEFAULT_SPEED_UP,
            speed_dn_cms: DEFAULT_SPEED_DN,
            accel_z_cmss: DEFAULT_ACCEL_Z,
        }
    }
}

impl PilotParams {
    /// Register pilot parameters with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        store.register(
            "PILOT_SPEED_UP",
            ParamValue::Float(DEFAULT_SPEED_UP),
            ParamFlags::empty(),
        )?;
        store.register(
            "PILOT_SPEED_DN",
            ParamValue::Float(DEFAULT_SPEED_DN),
            ParamFlags::empty(),
        )?;
        store.register(
            "PILOT_ACCEL_Z",
            ParamValue::Float(DEFAULT_ACCEL_Z),
            ParamFlags::empty(),
        )?;
        Ok(())
    }

    /// Load pilot parameters from parameter store
    pub fn from_store(store: &ParameterStore) -> Self {
        Self {
            speed_up_cms: load_float(store, "PILOT_SPEED_UP", DEFAULT_SPEED_UP, MIN_SPEED, MAX_SPEED),
            speed_dn_cms: load_float(store, "PILOT_SPEED_DN", DEFAULT_SPEED_DN, MIN_SPEED, MAX_SPEED),
            accel_z_cmss: load_float(store, "PILOT_ACCEL_Z", DEFAULT_ACCEL_Z, MIN_ACCEL, MAX_ACCEL),
        }
    }

    /// Effective maximum descent rate (positive, cm/s)
    pub fn speed_down_cms(&self) -> f32 {
        if self.speed_dn_cms <= 0.0 {
            self.speed_up_cms
        } else {
            self.speed_dn_cms
        }
    }
}
