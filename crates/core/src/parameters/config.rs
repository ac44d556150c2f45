//! Aggregated vehicle configuration
//!
//! `VehicleConfig` is the read-only configuration surface consumed by the
//! arming gate and the mode loops. It is a plain `Copy` value so a tick can
//! take a consistent copy at its start.

use super::arming::ArmingParams;
use super::circle::CircleParams;
use super::error::ParameterError;
use super::pilot::PilotParams;
use super::storage::ParameterStore;
use super::takeoff::TakeoffParams;
use super::wpnav::WpNavParams;
use crate::traits::ConfigProvider;

/// Complete configuration of the arming and mode core
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VehicleConfig {
    pub arming: ArmingParams,
    pub pilot: PilotParams,
    pub wpnav: WpNavParams,
    pub takeoff: TakeoffParams,
    pub circle: CircleParams,
}

impl VehicleConfig {
    /// Register every parameter block with its defaults
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        ArmingParams::register_defaults(store)?;
        PilotParams::register_defaults(store)?;
        WpNavParams::register_defaults(store)?;
        TakeoffParams::register_defaults(store)?;
        CircleParams::register_defaults(store)?;
        Ok(())
    }

    /// Load every parameter block from the store
    pub fn from_store(store: &ParameterStore) -> Self {
        Self {
            arming: ArmingParams::from_store(store),
            pilot: PilotParams::from_store(store),
            wpnav: WpNavParams::from_store(store),
            takeoff: TakeoffParams::from_store(store),
            circle: CircleParams::from_store(store),
        }
    }
}

impl ConfigProvider for ParameterStore {
    fn config(&self) -> VehicleConfig {
        VehicleConfig::from_store(self)
    }
}
