//! # Sensor equipment interfaces

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A single raw reading of the colour sensor.
///
/// Channel values are unscaled sensor counts. The alpha channel is the
/// overall brightness of the reading.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq)]
pub struct ColorSample {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Absolute orientation sensor.
pub trait HeadingSensor {
    /// The raw absolute heading about the vertical axis in degrees.
    ///
    /// The value wraps and is not zeroed at match start, callers must apply
    /// their own calibration bias.
    fn absolute_heading_deg(&self) -> f64;
}

/// Wall standoff range sensor.
pub trait RangeSensor {
    /// Distance to the nearest surface in centimeters.
    fn distance_cm(&self) -> f64;
}

/// Downward-facing optical reflectance sensor used for floor markings.
pub trait ReflectanceSensor {
    /// Reflected brightness of the surface under the sensor.
    fn brightness(&self) -> f64;

    /// Switch the illumination source on or off.
    fn set_illumination(&mut self, on: bool);
}

/// RGB + alpha colour sensor used for beacon classification.
pub trait ColorSensor {
    /// Read the current raw channel counts.
    fn read_channels(&self) -> ColorSample;
}
