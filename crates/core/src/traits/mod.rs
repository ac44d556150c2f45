//! Core traits for platform-agnostic flight-control functionality.
//!
//! This module provides trait abstractions that decouple the arming gate and
//! the mode loops from the estimator, RC decoder, parameter storage and
//! ground-station link.
//!
//! # Design
//!
//! - Trait definitions are pure and have no feature gates
//! - Mock implementations are always available for host testing

pub mod notify;
pub mod peripherals;
pub mod providers;

pub use notify::{
    format_line, ArmingHooks, LogNotifier, Notifier, RecordingHooks, RecordingNotifier, Severity,
};
pub use peripherals::{ClimbRateAvoidance, MountRoi, PeripheralCheck, SurfaceTracker, TuningKnob};
pub use providers::{
    ConfigProvider, MockConfig, MockPilotInput, MockVehicleState, PilotInputProvider,
    VehicleStateProvider,
};
