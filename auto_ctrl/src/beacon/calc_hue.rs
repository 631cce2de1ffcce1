//! Hue calculation for colour samples

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use util::maths::norm_deg_180;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Compute the hue of an RGB triple in degrees, normalised into
/// (-180, 180].
///
/// An achromatic sample (all channels equal, including all-zero) has no hue
/// and returns zero.
pub fn rgb_to_hue_deg(red: f64, green: f64, blue: f64) -> f64 {
    let max = red.max(green).max(blue);
    let min = red.min(green).min(blue);
    let delta = max - min;

    if delta == 0.0 {
        return 0.0;
    }

    let hue_deg = if max == red {
        60.0 * ((green - blue) / delta).rem_euclid(6.0)
    } else if max == green {
        60.0 * ((blue - red) / delta + 2.0)
    } else {
        60.0 * ((red - green) / delta + 4.0)
    };

    norm_deg_180(hue_deg)
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_primary_hues() {
        assert_eq!(rgb_to_hue_deg(255.0, 0.0, 0.0), 0.0);
        assert!((rgb_to_hue_deg(0.0, 255.0, 0.0) - 120.0).abs() < 1e-9);

        // 240 wraps to -120
        assert!((rgb_to_hue_deg(0.0, 0.0, 255.0) + 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_secondary_hues() {
        assert!((rgb_to_hue_deg(255.0, 255.0, 0.0) - 60.0).abs() < 1e-9);
        assert!((rgb_to_hue_deg(0.0, 255.0, 255.0) - 180.0).abs() < 1e-9);

        // Magenta at 300 wraps to -60
        assert!((rgb_to_hue_deg(255.0, 0.0, 255.0) + 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_achromatic_has_no_hue() {
        assert_eq!(rgb_to_hue_deg(0.0, 0.0, 0.0), 0.0);
        assert_eq!(rgb_to_hue_deg(128.0, 128.0, 128.0), 0.0);
    }

    #[test]
    fn test_hue_is_scale_invariant() {
        let a = rgb_to_hue_deg(200.0, 50.0, 100.0);
        let b = rgb_to_hue_deg(100.0, 25.0, 50.0);
        assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn test_negative_green_blue_difference_wraps_positive() {
        // Red-dominant with blue above green sits just below 360, not
        // negative
        let hue = rgb_to_hue_deg(255.0, 0.0, 10.0);
        assert!(hue < 0.0 && hue > -10.0);
    }
}
