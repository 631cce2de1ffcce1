//! Parameters structure for beacon classification

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for beacon classification.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct Params {
    /// Scale applied to each colour channel before the hue calculation,
    /// mapping the sensor's raw range onto [0, 255].
    pub channel_scale: f64,

    /// Alpha channel value below which a sample is too dim to classify.
    pub alpha_min: f64,

    /// Lower edge of the blue hue band (exclusive).
    ///
    /// Units: degrees
    pub blue_hue_min_deg: f64,

    /// Upper edge of the blue hue band (exclusive).
    ///
    /// Units: degrees
    pub blue_hue_max_deg: f64,

    /// Lower edge of the red hue band (exclusive).
    ///
    /// Units: degrees
    pub red_hue_min_deg: f64,

    /// Upper edge of the red hue band (exclusive).
    ///
    /// Units: degrees
    pub red_hue_max_deg: f64,
}
