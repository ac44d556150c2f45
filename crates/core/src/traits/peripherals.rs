//! Optional peripheral collaborators
//!
//! Peripherals that may or may not be fitted are resolved once at
//! construction as `Option<&dyn ...>` and checked for presence every tick.

use nalgebra::Vector3;

/// Rangefinder-based surface tracking
pub trait SurfaceTracker {
    /// Vertical position offset (cm) to hold the surface distance, `None` if
    /// tracking is unavailable this tick
    fn surface_offset_cm(&mut self) -> Option<f32>;
}

/// Camera mount region-of-interest control
pub trait MountRoi {
    /// Point the mount at a location (north, east, up in cm)
    fn set_roi_target(&mut self, target_neu_cm: Vector3<f32>);
}

/// Vertical obstacle avoidance
pub trait ClimbRateAvoidance {
    /// Limit a desired climb rate (cm/s) against nearby obstacles
    fn adjust_climb_rate(&self, climb_rate_cms: f32, dt: f32) -> f32;
}

/// In-flight tuning knob
pub trait TuningKnob {
    /// The knob currently drives the circle rate
    fn adjusting_circle_rate(&self) -> bool;
}

/// Pre-arm check for an auxiliary peripheral (e.g. a propulsion driver)
pub trait PeripheralCheck {
    /// Name prefixed to failure reasons
    fn name(&self) -> &'static str;

    /// `Err(reason)` when the peripheral is not ready to arm
    fn pre_arm_check(&self) -> Result<(), &'static str>;
}
