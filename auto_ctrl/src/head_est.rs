//! # Heading estimation module
//!
//! Wraps the raw absolute orientation sensor with a one-time calibration
//! bias, so that a heading of zero means "the direction the robot faced at
//! calibration".

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use log::info;
use serde::Serialize;

// Internal
use hw_if::HeadingSensor;
use util::maths::norm_deg_180;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A calibrated heading estimate source.
///
/// The bias is captured once at calibration and is immutable until the next
/// calibration. The estimator raises no error for an uncalibrated or noisy
/// sensor, callers must poll their hardware layer's readiness signal before
/// trusting early readings.
#[derive(Debug, Default, Clone, Copy, Serialize)]
pub struct HeadingEst {
    /// Raw sensor angle recorded at calibration, degrees.
    bias_deg: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl HeadingEst {
    /// Capture the current raw orientation as the zero-heading bias.
    ///
    /// Immediately after calibration [`HeadingEst::read`] returns
    /// approximately zero.
    pub fn calibrate<H: HeadingSensor + ?Sized>(sensor: &H) -> Self {
        let bias_deg = sensor.absolute_heading_deg();

        info!("Heading bias set to {:.2} deg", bias_deg);

        Self { bias_deg }
    }

    /// Read the current heading relative to the calibration direction,
    /// normalised into (-180, 180] degrees.
    pub fn read<H: HeadingSensor + ?Sized>(&self, sensor: &H) -> f64 {
        norm_deg_180(sensor.absolute_heading_deg() - self.bias_deg)
    }

    /// The recorded calibration bias in degrees.
    pub fn bias_deg(&self) -> f64 {
        self.bias_deg
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use hw_if::sim::SimHw;

    #[test]
    fn test_calibrate_zeroes_heading() {
        let mut sim = SimHw::new();
        sim.heading_deg = 0.0;
        sim.mount_bias_deg = 57.3;

        let est = HeadingEst::calibrate(&sim);
        assert_eq!(est.bias_deg(), 57.3);
        assert!(est.read(&sim).abs() < 1e-9);

        // The bias holds as the robot turns
        sim.heading_deg = 30.0;
        assert!((est.read(&sim) - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_read_is_normalised() {
        let mut sim = SimHw::new();
        sim.mount_bias_deg = -10.0;

        let est = HeadingEst::calibrate(&sim);

        // A three-quarter turn to the right reads as a quarter turn left
        sim.heading_deg = -270.0;
        assert!((est.read(&sim) - 90.0).abs() < 1e-9);
    }
}
