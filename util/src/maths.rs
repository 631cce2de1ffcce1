//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Normalise an angle in degrees into the half-open range (-180, 180].
///
/// Exact multiples of 360 map to 0, and both +180 and -180 map to +180. The
/// function is total and idempotent.
pub fn norm_deg_180<T>(angle_deg: T) -> T
where
    T: Float
{
    let full: T = T::from(360.0).unwrap();
    let half: T = T::from(180.0).unwrap();

    let mut a = angle_deg % full;

    if a <= -half {
        a = a + full;
    }
    if a > half {
        a = a - full;
    }

    a
}

pub fn clamp<T>(value: &T, min: &T, max: &T) -> T
where
    T: Float + std::ops::Mul + std::ops::Add + std::ops::AddAssign
{
    let mut ret = *value;

    if ret > *max {
        ret = *max
    }
    if ret < *min {
        ret = *min
    }

    ret
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_norm_deg_180() {
        assert_eq!(norm_deg_180(0f64), 0f64);
        assert_eq!(norm_deg_180(90f64), 90f64);
        assert_eq!(norm_deg_180(-90f64), -90f64);

        // Both half-turn representations land on +180
        assert_eq!(norm_deg_180(180f64), 180f64);
        assert_eq!(norm_deg_180(-180f64), 180f64);
        assert_eq!(norm_deg_180(540f64), 180f64);
        assert_eq!(norm_deg_180(-540f64), 180f64);

        // Full turns collapse to zero
        assert_eq!(norm_deg_180(360f64), 0f64);
        assert_eq!(norm_deg_180(-360f64), 0f64);
        assert_eq!(norm_deg_180(720f64), 0f64);

        assert_eq!(norm_deg_180(190f64), -170f64);
        assert_eq!(norm_deg_180(-190f64), 170f64);
        assert_eq!(norm_deg_180(365f64), 5f64);
    }

    #[test]
    fn test_norm_deg_180_idempotent() {
        for a in [-1234.5f64, -360.0, -180.0, -10.0, 0.0, 10.0, 180.0, 359.0,
            1234.5].iter()
        {
            let n = norm_deg_180(*a);
            assert!(n > -180.0 && n <= 180.0);
            assert_eq!(norm_deg_180(n), n);
        }
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(&0.5f64, &-1f64, &1f64), 0.5f64);
        assert_eq!(clamp(&7f64, &-1f64, &1f64), 1f64);
        assert_eq!(clamp(&-7f64, &-1f64, &1f64), -1f64);
    }
}
