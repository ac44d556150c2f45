//! Mode trait definition
//!
//! Platform-agnostic interface for flight mode state machines.

use super::output::ModeOutput;

/// Static capabilities of a flight mode
///
/// Consulted by the arming gate and by takeoff requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeInfo {
    pub name: &'static str,
    /// Needs a position estimate to fly
    pub requires_position: bool,
    /// Needs a velocity estimate to fly
    pub requires_velocity: bool,
    /// Vehicle may be armed in this mode
    pub allows_arming: bool,
    /// Vehicle may be armed with the rudder stick in this mode
    pub allows_arming_from_transmitter: bool,
    /// Mode flies autonomously (missions are kept on disarm)
    pub is_autopilot: bool,
    /// Mode accepts a user takeoff command
    pub has_user_takeoff: bool,
}

impl ModeInfo {
    /// Pilot-flown mode without navigation requirements
    pub const fn manual(name: &'static str) -> Self {
        Self {
            name,
            requires_position: false,
            requires_velocity: false,
            allows_arming: true,
            allows_arming_from_transmitter: true,
            is_autopilot: false,
            has_user_takeoff: false,
        }
    }
}

/// Flight mode trait
///
/// # Lifecycle
///
/// 1. `enter()` - Called once when entering the mode
/// 2. `update(dt)` - Called every control tick (100 Hz or more)
/// 3. `exit()` - Called once when exiting the mode
///
/// A mode transition completes, including `enter()`, before the next tick.
pub trait Mode {
    /// Initialize mode (called once on mode entry)
    ///
    /// Returns `Err` if the mode cannot be entered.
    fn enter(&mut self) -> Result<(), &'static str>;

    /// Run one control tick
    ///
    /// # Arguments
    ///
    /// * `dt` - Delta time since last update (seconds)
    fn update(&mut self, dt: f32) -> Result<ModeOutput, &'static str>;

    /// Cleanup mode (called once on mode exit)
    fn exit(&mut self) -> Result<(), &'static str>;

    /// Get mode name for logging and telemetry
    fn name(&self) -> &'static str;

    /// Static capabilities of this mode
    fn info(&self) -> ModeInfo;
}
