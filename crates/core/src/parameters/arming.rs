//! Arming Parameter Definitions
//!
//! # Parameters
//!
//! - `ARMING_CHECK` - Pre-arm check categories bitmask (see `CheckMask`)
//! - `ARMING_RUDDER` - Stick arming policy (0 disabled, 1 arm only, 2 arm or disarm)
//! - `ARMING_NEED_LOC` - Require a position estimate regardless of mode

use super::error::ParameterError;
use super::storage::{ParamFlags, ParamValue, ParameterStore};
use crate::arming::CheckMask;

/// ARMING_RUDDER values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RudderArming {
    /// Stick arming and disarming disabled
    Disabled = 0,
    /// Stick may arm but not disarm
    ArmOnly = 1,
    /// Stick may arm and disarm
    ArmOrDisarm = 2,
}

impl From<i32> for RudderArming {
    fn from(value: i32) -> Self {
        match value {
            0 => RudderArming::Disabled,
            1 => RudderArming::ArmOnly,
            _ => RudderArming::ArmOrDisarm,
        }
    }
}

/// Arming parameters loaded from parameter store
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmingParams {
    /// Enabled pre-arm check categories (ARMING_CHECK)
    pub checks: CheckMask,
    /// Stick arming policy (ARMING_RUDDER)
    pub rudder: RudderArming,
    /// Require position estimate in every mode (ARMING_NEED_LOC)
    pub require_location: bool,
}

impl Default for ArmingParams {
    fn default() -> Self {
        Self {
            checks: CheckMask::all(),
            rudder: RudderArming::ArmOrDisarm,
            require_location: false,
        }
    }
}

impl ArmingParams {
    /// Register arming parameters with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        store.register(
            "ARMING_CHECK",
            ParamValue::Int(CheckMask::all().bits() as i32),
            ParamFlags::empty(),
        )?;
        store.register(
            "ARMING_RUDDER",
            ParamValue::Int(RudderArming::ArmOrDisarm as i32),
            ParamFlags::empty(),
        )?;
        store.register(
            "ARMING_NEED_LOC",
            ParamValue::Bool(false),
            ParamFlags::empty(),
        )?;
        Ok(())
    }

    /// Load arming parameters from parameter store
    ///
    /// Unknown bits in `ARMING_CHECK` are dropped.
    pub fn from_store(store: &ParameterStore) -> Self {
        let defaults = Self::default();
        let raw_checks = store.get_i32("ARMING_CHECK", defaults.checks.bits() as i32);

        Self {
            checks: CheckMask::from_bits_truncate(raw_checks as u16),
            rudder: RudderArming::from(store.get_i32("ARMING_RUDDER", defaults.rudder as i32)),
            require_location: store.get_i32("ARMING_NEED_LOC", 0) != 0,
        }
    }

    /// Rudder stick may arm the vehicle
    pub fn rudder_can_arm(&self) -> bool {
        self.rudder != RudderArming::Disabled
    }

    /// Rudder stick may disarm the vehicle
    pub fn rudder_can_disarm(&self) -> bool {
        self.rudder == RudderArming::ArmOrDisarm
    }
}
