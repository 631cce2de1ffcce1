//! Heading control module
//!
//! Proportional control loop converging the current heading onto a target
//! heading. Used standalone for turn-in-place manoeuvres, and its
//! error/steer calculations are reused by translation control for heading
//! holds while driving.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use params::*;
pub use state::*;

use util::maths::{clamp, norm_deg_180};
use util::params::LoadError;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during HeadCtrl operation.
#[derive(Debug, thiserror::Error)]
pub enum HeadCtrlError {
    #[error("Could not load parameters: {0}")]
    ParamLoadError(LoadError),

    #[error("Expected there to be a turn command but couldn't find one")]
    NoTurnCmd,

    #[error("Recieved an invalid turn command: {0:#?}")]
    InvalidTurnCmd(TurnCmd),

    /// A turn is already running. To replace it the current turn must first
    /// be cancelled through the executive probe.
    #[error("Attempted to start a turn while one is already active")]
    TurnAlreadyActive,
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Get the error between the target heading and the current heading.
///
/// The error is normalised into (-180, 180] degrees. A positive error means
/// the robot should turn left (counter-clockwise) to reduce it.
pub fn heading_error(target_deg: f64, current_deg: f64) -> f64 {
    norm_deg_180(target_deg - current_deg)
}

/// Get the steering demand for the given heading error and proportional
/// gain.
///
/// The demand is clipped into [-1, +1]. Positive steer turns the robot left.
pub fn steer(error_deg: f64, gain: f64) -> f64 {
    clamp(&(error_deg * gain), &-1.0, &1.0)
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_heading_error() {
        assert_eq!(heading_error(15.0, 10.0), 5.0);
        assert_eq!(heading_error(10.0, 15.0), -5.0);

        // Errors wrap through the half-turn point
        assert_eq!(heading_error(175.0, -175.0), -10.0);
        assert_eq!(heading_error(-175.0, 175.0), 10.0);
    }

    #[test]
    fn test_steer_is_clipped() {
        assert!((steer(5.0, 0.01) - 0.05).abs() < 1e-12);
        assert_eq!(steer(500.0, 0.01), 1.0);
        assert_eq!(steer(-500.0, 0.01), -1.0);
        assert_eq!(steer(1.0, 1e9), 1.0);
        assert_eq!(steer(-1.0, 1e9), -1.0);
        assert_eq!(steer(0.0, 1e9), 0.0);
    }
}
