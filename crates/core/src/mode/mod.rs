//! Flight modes
//!
//! # Contents
//!
//! - `Mode` trait and static `ModeInfo` capabilities
//! - `ModeContext`: collaborators injected at construction
//! - `ModeOutput`: the command value each tick returns
//! - `CircleMode`: orbit around a fixed centre

pub mod circle;
mod context;
mod output;
mod traits;

pub use circle::{CircleMode, CircleState};
pub use context::{ModeContext, Peripherals};
pub use output::{
    make_safe_ground_handling, AttitudeCommand, FailsafeEvent, ModeOutput, ThrottleOut,
};
pub use traits::{Mode, ModeInfo};
