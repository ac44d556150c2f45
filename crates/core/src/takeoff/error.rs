//! Takeoff Error Types

use core::fmt;

/// Reasons a user takeoff request is refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TakeoffError {
    /// Motors are not armed
    NotArmed,
    /// Vehicle is already flying
    NotLanded,
    /// Active mode does not accept takeoff commands
    ModeUnsupported,
    /// Target altitude is not above the current altitude
    BelowCurrentAltitude,
    /// Motor interlock is in use but disengaged
    InterlockDisabled,
}

impl fmt::Display for TakeoffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TakeoffError::NotArmed => write!(f, "Takeoff refused: not armed"),
            TakeoffError::NotLanded => write!(f, "Takeoff refused: already flying"),
            TakeoffError::ModeUnsupported => write!(f, "Takeoff refused: mode has no takeoff"),
            TakeoffError::BelowCurrentAltitude => {
                write!(f, "Takeoff refused: target below current altitude")
            }
            TakeoffError::InterlockDisabled => {
                write!(f, "Takeoff refused: motor interlock disabled")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_takeoff_error_display() {
        assert_eq!(
            format!("{}", TakeoffError::NotArmed),
            "Takeoff refused: not armed"
        );
        assert_eq!(
            format!("{}", TakeoffError::InterlockDisabled),
            "Takeoff refused: motor interlock disabled"
        );
    }
}
