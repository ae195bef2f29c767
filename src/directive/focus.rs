//! Focus-point calculation
//!
//! Pure functions turning one axis of a rectangle into a center coordinate.
//! Callers compute the horizontal and vertical axes independently.

/// Midpoint of a span along one axis: `offset + size / 2`.
///
/// Use this when the rectangle is already expressed in normalized
/// coordinates.
///
/// ```
/// use imgproxy_uri::directive::calculate_center;
///
/// assert_eq!(calculate_center(10.0, 20.0), 20.0);
/// assert_eq!(calculate_center(0.25, 0.5), 0.5);
/// ```
pub fn calculate_center(offset: f64, size: f64) -> f64 {
    offset + size / 2.0
}

/// Midpoint of a pixel span as a fraction of the governing dimension.
///
/// Returns `None` when the dimension is unknown (zero or negative). The
/// result is clamped into `[0, 1]`.
pub fn calculate_relative_center(offset: f64, size: f64, dimension: f64) -> Option<f64> {
    if dimension.is_nan() || dimension <= 0.0 {
        return None;
    }
    Some((calculate_center(offset, size) / dimension).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midpoint_formula() {
        assert_eq!(calculate_center(10.0, 20.0), 20.0);
        assert_eq!(calculate_center(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_axes_are_independent() {
        // Same rectangle described as (x, y, w, h) and (y, x, h, w)
        let horizontal = calculate_center(10.0, 20.0);
        let vertical = calculate_center(30.0, 40.0);

        assert_eq!(horizontal, 20.0);
        assert_eq!(vertical, 50.0);
        assert_eq!(calculate_center(30.0, 40.0), vertical);
    }

    #[test]
    fn test_relative_center() {
        assert_eq!(calculate_relative_center(0.0, 200.0, 200.0), Some(0.5));
        assert_eq!(calculate_relative_center(100.0, 100.0, 400.0), Some(0.375));
    }

    #[test]
    fn test_relative_center_is_clamped() {
        assert_eq!(calculate_relative_center(300.0, 200.0, 200.0), Some(1.0));
    }

    #[test]
    fn test_relative_center_unknown_dimension() {
        assert_eq!(calculate_relative_center(0.0, 200.0, 0.0), None);
        assert_eq!(calculate_relative_center(0.0, 200.0, -5.0), None);
    }
}
