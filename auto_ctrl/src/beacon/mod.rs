//! Beacon classification module
//!
//! Converts a raw colour sensor sample into a beacon colour verdict. The
//! sample's hue is computed from the scaled colour channels and matched
//! against the blue and red hue bands, with an alpha (overall brightness)
//! gate rejecting samples taken too far from the beacon to be trustworthy.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod calc_hue;
mod params;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::debug;
use serde::Serialize;

// Internal
pub use calc_hue::*;
pub use params::*;

use hw_if::{ColorSample, ColorSensor};
use util::params::LoadError;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Colour verdict for a beacon sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BeaconColor {
    Blue,
    Red,

    /// The sample was too dim, or its hue fell outside both bands.
    Unknown,
}

/// Possible errors that can occur during beacon classification setup.
#[derive(Debug, thiserror::Error)]
pub enum BeaconError {
    #[error("Could not load parameters: {0}")]
    ParamLoadError(LoadError),
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A classified beacon sample.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Classification {
    /// The colour verdict.
    pub color: BeaconColor,

    /// Hue of the sample in (-180, 180] degrees.
    pub hue_deg: f64,

    /// Raw alpha channel of the sample.
    pub alpha: f64,
}

/// Beacon colour classifier.
#[derive(Debug, Default, Clone)]
pub struct BeaconClassifier {
    params: Params,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl BeaconClassifier {
    /// Create a new classifier from the given parameters.
    pub fn new(params: Params) -> Self {
        Self { params }
    }

    /// Create a new classifier, loading parameters from the given file.
    pub fn init(param_file_path: &str) -> Result<Self, BeaconError> {
        let params = match util::params::load(param_file_path) {
            Ok(p) => p,
            Err(e) => return Err(BeaconError::ParamLoadError(e)),
        };

        Ok(Self::new(params))
    }

    /// Classify a raw colour sample.
    pub fn classify(&self, sample: &ColorSample) -> Classification {
        let scale = self.params.channel_scale;
        let hue_deg = rgb_to_hue_deg(
            sample.red * scale,
            sample.green * scale,
            sample.blue * scale,
        );

        Classification {
            color: self.color_for(hue_deg, sample.alpha),
            hue_deg,
            alpha: sample.alpha,
        }
    }

    /// Read the colour sensor and classify the sample.
    pub fn read_and_classify<H: ColorSensor + ?Sized>(&self, sensor: &H) -> Classification {
        self.classify(&sensor.read_channels())
    }

    /// Get the colour verdict for a hue and alpha.
    ///
    /// The hue bands are open intervals, a hue exactly on a band edge is
    /// `Unknown`.
    pub fn color_for(&self, hue_deg: f64, alpha: f64) -> BeaconColor {
        if alpha < self.params.alpha_min {
            debug!(
                "Beacon sample too dim to classify: alpha {:.1} < {:.1}",
                alpha, self.params.alpha_min
            );
            return BeaconColor::Unknown;
        }

        if hue_deg > self.params.blue_hue_min_deg && hue_deg < self.params.blue_hue_max_deg {
            BeaconColor::Blue
        } else if hue_deg > self.params.red_hue_min_deg && hue_deg < self.params.red_hue_max_deg {
            BeaconColor::Red
        } else {
            BeaconColor::Unknown
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    fn test_params() -> Params {
        Params {
            channel_scale: 0.31875,
            alpha_min: 100.0,
            blue_hue_min_deg: -180.0,
            blue_hue_max_deg: -100.0,
            red_hue_min_deg: -40.0,
            red_hue_max_deg: 40.0,
        }
    }

    fn sample(red: f64, green: f64, blue: f64, alpha: f64) -> ColorSample {
        ColorSample {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[test]
    fn test_pure_blue_sample() {
        let classifier = BeaconClassifier::new(test_params());

        let c = classifier.classify(&sample(0.0, 0.0, 255.0, 150.0));
        assert_eq!(c.color, BeaconColor::Blue);
        assert!((c.hue_deg + 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_pure_red_sample() {
        let classifier = BeaconClassifier::new(test_params());

        let c = classifier.classify(&sample(255.0, 0.0, 0.0, 150.0));
        assert_eq!(c.color, BeaconColor::Red);
        assert_eq!(c.hue_deg, 0.0);
    }

    #[test]
    fn test_dim_sample_is_unknown() {
        let classifier = BeaconClassifier::new(test_params());

        // Strongly blue but too dim to trust
        let c = classifier.classify(&sample(0.0, 0.0, 255.0, 50.0));
        assert_eq!(c.color, BeaconColor::Unknown);
    }

    #[test]
    fn test_out_of_band_hue_is_unknown() {
        let classifier = BeaconClassifier::new(test_params());

        // Green is in neither band
        let c = classifier.classify(&sample(0.0, 255.0, 0.0, 150.0));
        assert_eq!(c.color, BeaconColor::Unknown);
        assert!((c.hue_deg - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_band_edges_are_open() {
        let classifier = BeaconClassifier::new(test_params());

        assert_eq!(classifier.color_for(-100.0, 150.0), BeaconColor::Unknown);
        assert_eq!(classifier.color_for(40.0, 150.0), BeaconColor::Unknown);
        assert_eq!(classifier.color_for(-101.0, 150.0), BeaconColor::Blue);
        assert_eq!(classifier.color_for(39.0, 150.0), BeaconColor::Red);
    }
}
