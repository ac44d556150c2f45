//! Vehicle state types shared by the arming gate and the mode loops

mod state;

pub use state::{SafetySwitch, SpoolState, VehicleSnapshot};
