//! Takeoff Parameter Definitions
//!
//! # Parameters
//!
//! - `TKOFF_SLEW_TIME` - Time to ramp throttle from 0 to full while landed (s)
//! - `TKOFF_THR_MAX` - Throttle at which lift-off is assumed (0.0-1.0)
//! - `MOT_THST_HOVER` - Hover throttle estimate (0.0-1.0)

use super::error::ParameterError;
use super::load_float;
use super::storage::{ParamFlags, ParamValue, ParameterStore};

const DEFAULT_SLEW_TIME: f32 = 2.0;
const DEFAULT_THROTTLE_MAX: f32 = 0.9;
const DEFAULT_HOVER_THROTTLE: f32 = 0.35;

const MIN_SLEW_TIME: f32 = 0.25;
const MAX_SLEW_TIME: f32 = 5.0;

/// Takeoff throttle ramp configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TakeoffParams {
    /// Seconds to slew throttle from 0 to 1 while still landed
    pub throttle_slew_time_s: f32,
    /// Throttle fraction at which the vehicle is declared airborne
    pub throttle_max: f32,
    /// Hover throttle fraction
    pub hover_throttle: f32,
}

impl Default for TakeoffParams {
    fn default() -> Self {
        Self {
            throttle_slew_time_s: DEFAULT_SLEW_TIME,
            throttle_max: DEFAULT_THROTTLE_MAX,
            hover_throttle: DEFAULT_HOVER_THROTTLE,
        }
    }
}

impl TakeoffParams {
    /// Register takeoff parameters with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        store.register(
            "TKOFF_SLEW_TIME",
            ParamValue::Float(DEFAULT_SLEW_TIME),
            ParamFlags::empty(),
        )?;
        store.register(
            "TKOFF_THR_MAX",
            ParamValue::Float(DEFAULT_THROTTLE_MAX),
            ParamFlags::empty(),
        )?;
        store.register(
            "MOT_THST_HOVER",
            ParamValue::Float(DEFAULT_HOVER_THROTTLE),
            ParamFlags::empty(),
        )?;
        Ok(())
    }

    /// Load takeoff parameters from parameter store
    pub fn from_store(store: &ParameterStore) -> Self {
        Self {
            throttle_slew_time_s: load_float(
                store,
                "TKOFF_SLEW_TIME",
                DEFAULT_SLEW_TIME,
                MIN_SLEW_TIME,
                MAX_SLEW_TIME,
            ),
            throttle_max: load_float(store, "TKOFF_THR_MAX", DEFAULT_THROTTLE_MAX, 0.0, 1.0),
            hover_throttle: load_float(store, "MOT_THST_HOVER", DEFAULT_HOVER_THROTTLE, 0.125, 0.6875),
        }
    }

    /// Throttle below which a stopped takeoff leaves the vehicle landed
    pub fn non_takeoff_throttle(&self) -> f32 {
        self.hover_throttle * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_takeoff_params_defaults() {
        let mut store = ParameterStore::new();
        TakeoffParams::register_defaults(&mut store).unwrap();

        let params = TakeoffParams::from_store(&store);
        assert_eq!(params, TakeoffParams::default());
        assert!((params.non_takeoff_throttle() - 0.175).abs() < 1e-6);
    }

    #[test]
    fn test_slew_time_clamped() {
        let mut store = ParameterStore::new();
        TakeoffParams::register_defaults(&mut store).unwrap();
        store.set("TKOFF_SLEW_TIME", ParamValue::Float(0.0)).unwrap();
        store.set("TKOFF_THR_MAX", ParamValue::Float(1.5)).unwrap();

        let params = TakeoffParams::from_store(&store);
        assert_eq!(params.throttle_slew_time_s, MIN_SLEW_TIME);
        assert_eq!(params.throttle_max, 1.0);
    }
}
