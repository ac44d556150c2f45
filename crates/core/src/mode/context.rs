//! Mode context
//!
//! Collaborators injected into a mode at construction. There is no global
//! vehicle object: everything a mode reads or writes comes through here.

use crate::control::PositionController;
use crate::traits::{
    ClimbRateAvoidance, ConfigProvider, MountRoi, PilotInputProvider, SurfaceTracker, TuningKnob,
    VehicleStateProvider,
};

/// Optional peripherals, resolved once when the mode is built
#[derive(Default)]
pub struct Peripherals<'a> {
    pub surface_tracking: Option<&'a mut dyn SurfaceTracker>,
    pub mount: Option<&'a mut dyn MountRoi>,
    pub avoidance: Option<&'a dyn ClimbRateAvoidance>,
    pub tuning: Option<&'a dyn TuningKnob>,
}

/// Everything a mode needs to run
pub struct ModeContext<'a> {
    /// Shared position controller, exclusively written by the active mode
    pub pos_control: &'a mut dyn PositionController,
    pub vehicle: &'a dyn VehicleStateProvider,
    pub pilot: &'a dyn PilotInputProvider,
    pub config: &'a dyn ConfigProvider,
    pub peripherals: Peripherals<'a>,
}

impl<'a> ModeContext<'a> {
    /// Context without optional peripherals
    pub fn new(
        pos_control: &'a mut dyn PositionController,
        vehicle: &'a dyn VehicleStateProvider,
        pilot: &'a dyn PilotInputProvider,
        config: &'a dyn ConfigProvider,
    ) -> Self {
        Self {
            pos_control,
            vehicle,
            pilot,
            config,
            peripherals: Peripherals::default(),
        }
    }

    pub fn with_peripherals(mut self, peripherals: Peripherals<'a>) -> Self {
        self.peripherals = peripherals;
        self
    }
}
