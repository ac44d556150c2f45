//! Read-only state providers
//!
//! The modes read the vehicle state, pilot input and configuration through
//! these traits once per tick. Mock implementations are always available for
//! host testing.

use core::cell::Cell;

use nalgebra::Vector3;

use crate::parameters::VehicleConfig;
use crate::rc::PilotInput;
use crate::vehicle::{SpoolState, VehicleSnapshot};

/// Source of the per-tick vehicle state snapshot
pub trait VehicleStateProvider {
    fn snapshot(&self) -> VehicleSnapshot;
}

/// Source of normalized pilot stick input
pub trait PilotInputProvider {
    fn pilot_input(&self) -> PilotInput;
}

/// Read-only configuration surface
pub trait ConfigProvider {
    fn config(&self) -> VehicleConfig;
}

// ============================================================================
// Mock Implementations (always available for testing)
// ============================================================================

/// Mock vehicle state with a settable snapshot
#[derive(Default)]
pub struct MockVehicleState {
    snapshot: Cell<VehicleSnapshot>,
}

// Safety: mocks are only used in single-threaded test contexts.
unsafe impl Send for MockVehicleState {}
unsafe impl Sync for MockVehicleState {}

impl MockVehicleState {
    pub fn new(snapshot: VehicleSnapshot) -> Self {
        Self {
            snapshot: Cell::new(snapshot),
        }
    }

    /// Replace the snapshot returned from now on
    pub fn set(&self, snapshot: VehicleSnapshot) {
        self.snapshot.set(snapshot);
    }

    /// Edit the current snapshot in place
    pub fn update(&self, f: impl FnOnce(&mut VehicleSnapshot)) {
        let mut snapshot = self.snapshot.get();
        f(&mut snapshot);
        self.snapshot.set(snapshot);
    }
}

impl VehicleStateProvider for MockVehicleState {
    fn snapshot(&self) -> VehicleSnapshot {
        self.snapshot.get()
    }
}

/// Mock pilot input with settable sticks
#[derive(Default)]
pub struct MockPilotInput {
    input: Cell<PilotInput>,
}

// Safety: mocks are only used in single-threaded test contexts.
unsafe impl Send for MockPilotInput {}
unsafe impl Sync for MockPilotInput {}

impl MockPilotInput {
    /// Valid input with centred sticks
    pub fn new() -> Self {
        Self {
            input: Cell::new(PilotInput::centered()),
        }
    }

    pub fn set(&self, input: PilotInput) {
        self.input.set(input);
    }

    pub fn set_roll(&self, roll: f32) {
        let mut input = self.input.get();
        input.roll = roll;
        self.input.set(input);
    }

    pub fn set_pitch(&self, pitch: f32) {
        let mut input = self.input.get();
        input.pitch = pitch;
        self.input.set(input);
    }

    pub fn set_throttle(&self, throttle: f32) {
        let mut input = self.input.get();
        input.throttle = throttle;
        self.input.set(input);
    }

    pub fn set_valid(&self, valid: bool) {
        let mut input = self.input.get();
        input.valid = valid;
        self.input.set(input);
    }
}

impl PilotInputProvider for MockPilotInput {
    fn pilot_input(&self) -> PilotInput {
        self.input.get()
    }
}

/// Mock configuration that can be edited between ticks
#[derive(Default)]
pub struct MockConfig {
    config: Cell<VehicleConfig>,
}

// Safety: mocks are only used in single-threaded test contexts.
unsafe impl Send for MockConfig {}
unsafe impl Sync for MockConfig {}

impl MockConfig {
    pub fn new(config: VehicleConfig) -> Self {
        Self {
            config: Cell::new(config),
        }
    }

    pub fn update(&self, f: impl FnOnce(&mut VehicleConfig)) {
        let mut config = self.config.get();
        f(&mut config);
        self.config.set(config);
    }
}

impl ConfigProvider for MockConfig {
    fn config(&self) -> VehicleConfig {
        self.config.get()
    }
}

/// Canned snapshots for host tests and simulation harnesses
impl VehicleSnapshot {
    /// Armed, motors at full range and airborne
    pub fn flying(position_neu_cm: Vector3<f32>) -> Self {
        Self {
            position_neu_cm,
            altitude_above_home_cm: position_neu_cm.z,
            armed: true,
            auto_armed: true,
            land_complete: false,
            spool_state: SpoolState::ThrottleUnlimited,
            ..Self::default()
        }
    }

    /// Armed, spooled up and still on the ground
    pub fn armed_on_ground() -> Self {
        Self {
            armed: true,
            auto_armed: true,
            land_complete: true,
            spool_state: SpoolState::ThrottleUnlimited,
            ..Self::default()
        }
    }
}
