//! Parameters structure for HeadCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for heading control.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct Params {
    /// Heading error below which a turn is considered on target.
    ///
    /// Units: degrees
    pub heading_threshold_deg: f64,

    /// Proportional gain applied to the heading error during turns. Larger
    /// is more responsive, but also less accurate.
    pub turn_gain: f64,
}
