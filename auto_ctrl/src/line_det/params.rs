//! Parameters structure for LineDet

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for line detection.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct Params {
    /// Reflectance brightness at or above which the floor is considered to
    /// carry the white marking. Sits between the plain-floor and marking
    /// readings with the illumination on.
    pub white_threshold: f64,
}
