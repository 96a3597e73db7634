//! Vector helpers and output rounding.
//!
//! Scene vectors travel as plain `[f64; 3]` arrays so they serialize as JSON
//! sequences; arithmetic goes through `glam::DVec3`.

use glam::DVec3;

/// 3-component vector as it appears in scene files.
pub type Vec3 = [f64; 3];

/// The origin.
pub const ORIGIN: Vec3 = [0.0, 0.0, 0.0];

/// Direction returned when normalizing a degenerate vector.
pub const DEFAULT_UP: Vec3 = [0.0, 1.0, 0.0];

/// Vectors shorter than this are treated as zero-length.
pub const DEGENERATE_LENGTH: f64 = 1e-10;

/// Decimal places kept for derived scalars (heights, radii).
pub const SCALAR_DIGITS: i32 = 4;

/// Decimal places kept for normalized direction components.
pub const DIRECTION_DIGITS: i32 = 6;

/// Component-wise `a - b`.
pub fn sub(a: Vec3, b: Vec3) -> Vec3 {
    (DVec3::from_array(a) - DVec3::from_array(b)).to_array()
}

/// Euclidean length.
pub fn length(v: Vec3) -> f64 {
    DVec3::from_array(v).length()
}

/// Scale `v` to unit length, rounding each component to 6 places.
///
/// Degenerate input (length below [`DEGENERATE_LENGTH`]) yields [`DEFAULT_UP`]
/// instead of dividing by near-zero.
pub fn normalize(v: Vec3) -> Vec3 {
    let v = DVec3::from_array(v);
    let len = v.length();
    if len < DEGENERATE_LENGTH {
        return DEFAULT_UP;
    }
    (v / len).to_array().map(|c| round_to(c, DIRECTION_DIGITS))
}

/// Round to `digits` decimal places.
pub fn round_to(value: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    (value * scale).round() / scale
}

/// Round a derived scalar to 4 places for clean output.
///
/// Integral results collapse to their truncation, so `-0.0` and float noise
/// such as `1.99999999` print as `0.0` and `2.0`.
pub fn clean(value: f64) -> f64 {
    let rounded = round_to(value, SCALAR_DIGITS);
    if rounded == rounded.trunc() {
        // +0.0 turns a negative zero positive
        rounded.trunc() + 0.0
    } else {
        rounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sub_and_length() {
        let axis = sub([1.0, 5.0, 3.0], [1.0, 1.0, 0.0]);
        assert_eq!(axis, [0.0, 4.0, 3.0]);
        assert_eq!(length(axis), 5.0);
    }

    #[test]
    fn test_normalize_degenerate_returns_up() {
        assert_eq!(normalize(ORIGIN), DEFAULT_UP);
        assert_eq!(normalize([1e-11, 0.0, 0.0]), DEFAULT_UP);
    }

    #[test]
    fn test_normalize_unit_length_and_direction() {
        for v in [[3.0, 0.0, 4.0], [-2.0, 7.5, 0.1], [0.0, 0.0, -9.0], [1e-6, 1e-6, 0.0]] {
            let n = normalize(v);
            assert!((length(n) - 1.0).abs() < 1e-5, "{:?} -> {:?}", v, n);
            // same direction: positive dot product equal to |v|
            let dot = v[0] * n[0] + v[1] * n[1] + v[2] * n[2];
            assert!((dot - length(v)).abs() < 1e-5 * length(v).max(1.0));
        }
    }

    #[test]
    fn test_normalize_rounds_to_six_places() {
        let n = normalize([1.0, 1.0, 1.0]);
        assert_eq!(n, [0.57735, 0.57735, 0.57735]);
    }

    #[test]
    fn test_clean() {
        assert_eq!(clean(1.23456789), 1.2346);
        assert_eq!(clean(1.99999999), 2.0);
        assert_eq!(clean(-0.00001).to_bits(), 0.0f64.to_bits());
        assert_eq!(clean(2.5), 2.5);
    }
}
