//! Parameters structure for TransCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for translation control.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct Params {
    /// Encoder counts per inch of wheel travel.
    pub counts_per_inch: f64,

    /// Half the track width, the turning radius of a spin about the robot's
    /// central axis.
    ///
    /// Units: inches
    pub wheelbase_radius_in: f64,

    /// Speed at which a move starts before ramping up to the commanded
    /// speed.
    pub ramp_min_speed: f64,

    /// Speed added each control cycle during the ramp.
    pub ramp_increment: f64,

    /// Heading error above which the encoder targets are compensated with a
    /// turning arc at the start of a move.
    ///
    /// Units: degrees
    pub turn_comp_threshold_deg: f64,

    /// Proportional steering gain for heading holds.
    pub drive_gain: f64,

    /// Steering gain used when the heading hold is flagged aggressive.
    pub drive_gain_aggressive: f64,

    /// Range error below which no heading bias is applied during a range
    /// hold.
    ///
    /// Units: centimetres
    pub range_threshold_cm: f64,

    /// Heading bias applied per centimetre of range error during a range
    /// hold.
    ///
    /// Units: degrees/centimetre
    pub range_gain_deg_cm: f64,
}
