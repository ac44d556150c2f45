//! copter_core - Pure no_std flight-control logic for multicopters
//!
//! This crate contains the arming gate and the per-tick mode control loops
//! (circle orbit, pilot-guided and autonomous takeoff). Estimation, RC
//! decoding, telemetry and motor mixing stay outside and are reached through
//! traits, so everything here can be tested on host.
//!
//! # Design Principles
//!
//! - **Pure no_std**: No std library dependencies outside tests
//! - **Trait abstractions**: Platform services injected via traits
//! - **Snapshot in, command out**: Each tick reads a `VehicleSnapshot` and
//!   returns a `ModeOutput` instead of writing shared state
//!
//! # Modules
//!
//! - [`arming`]: Pre-arm checks and the arm/disarm state machine
//! - [`control`]: Position controller contract and a kinematic mock
//! - [`mode`]: Mode trait, mode context/output, circle mode
//! - [`navigation`]: Orbit tracking around a centre
//! - [`takeoff`]: Pilot-guided and autonomous takeoff sequencers
//! - [`parameters`]: Parameter store and typed configuration blocks
//! - [`rc`]: Pilot stick input and RC channel calibration
//! - [`traits`]: Provider, notification and peripheral traits with mocks
//! - [`vehicle`]: Per-tick vehicle state snapshot
//! - [`math`]: Float helpers

#![cfg_attr(not(test), no_std)]

pub mod logging;

pub mod arming;
pub mod control;
pub mod math;
pub mod mode;
pub mod navigation;
pub mod parameters;
pub mod rc;
pub mod takeoff;
pub mod traits;
pub mod vehicle;
