//! Command structures for TransCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A command to translate the robot a given distance.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct MoveCmd {
    /// Peak speed magnitude to ramp up to, in (0, 1].
    pub speed: f64,

    /// Signed distance to travel in inches. Negative drives backwards.
    pub distance_in: f64,

    /// Maximum duration of the move in seconds.
    pub timeout_s: f64,

    /// Heading to hold while driving, or `None` to drive open-loop.
    pub heading_hold: Option<HeadingHold>,

    /// Wall standoff to hold while driving. Requires a heading hold, as the
    /// standoff is implemented as a bias on the held heading.
    pub range_hold: Option<RangeHold>,
}

/// Heading hold configuration for a move.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct HeadingHold {
    /// Heading to hold in degrees relative to the last calibration.
    pub target_deg: f64,

    /// Use the aggressive steering gain. Suited to long straight runs where
    /// a slack correction would let the robot drift.
    pub aggressive: bool,
}

/// Wall standoff hold configuration for a move.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct RangeHold {
    /// Distance to hold between the range sensor and the wall, in
    /// centimetres.
    pub target_cm: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl MoveCmd {
    /// Determine if the command is valid.
    pub fn is_valid(&self) -> bool {
        self.speed > 0.0
            && self.speed <= 1.0
            && self.distance_in.is_finite()
            && self.distance_in != 0.0
            && self.timeout_s > 0.0
            && !(self.range_hold.is_some() && self.heading_hold.is_none())
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
