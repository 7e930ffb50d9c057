//! Bearing and angle normalization
//!
//! Pure functions used by the decision policy. All angles are radians.

use core::f32::consts::{PI, TAU};

use libm::{atan2f, remainderf};

use super::Position;

/// Normalize an angle into the half-open range (-PI, PI].
///
/// Any finite input lands in range, however many turns away. `-PI` maps
/// to `PI`. Non-finite input is returned unchanged.
pub fn normalize_pi(angle: f32) -> f32 {
    if !angle.is_finite() {
        return angle;
    }
    // Within [-PI, PI] up to rounding; the loops settle the boundary
    let mut a = remainderf(angle, TAU);
    while a > PI {
        a -= TAU;
    }
    while a <= -PI {
        a += TAU;
    }
    a
}

/// Bearing from `(x, y)` to `target` in radians, measured by `atan2(dy, dx)`.
pub fn bearing_to(x: f32, y: f32, target: &Position) -> f32 {
    atan2f(target.y() - y, target.x() - x)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_normalize_within_range_unchanged() {
        assert!((normalize_pi(0.0) - 0.0).abs() < EPS);
        assert!((normalize_pi(1.0) - 1.0).abs() < EPS);
        assert!((normalize_pi(-1.0) - -1.0).abs() < EPS);
    }

    #[test]
    fn test_normalize_just_past_pi_wraps_negative() {
        let normalized = normalize_pi(PI + 0.1);
        assert!(normalized > -PI && normalized <= PI);
        assert!((normalized - (-PI + 0.1)).abs() < EPS);
    }

    #[test]
    fn test_normalize_pi_boundaries() {
        assert!((normalize_pi(PI) - PI).abs() < EPS);
        assert!((normalize_pi(-PI) - PI).abs() < EPS);
    }

    #[test]
    fn test_normalize_multiple_turns() {
        assert!((normalize_pi(3.0 * TAU + 0.5) - 0.5).abs() < 1e-4);
        assert!((normalize_pi(-3.0 * TAU - 0.5) - -0.5).abs() < 1e-4);
    }

    #[test]
    fn test_normalize_huge_angles_terminate() {
        for angle in [2.0e8_f32, -2.0e8, 1.0e30, -f32::MAX, f32::MAX] {
            let normalized = normalize_pi(angle);
            assert!(normalized > -PI && normalized <= PI, "{angle} -> {normalized}");
        }
    }

    #[test]
    fn test_bearing_cardinal_directions() {
        let origin_target = |x, y| Position::new(x, y, 0.0);
        assert!((bearing_to(0.0, 0.0, &origin_target(10.0, 0.0)) - 0.0).abs() < EPS);
        assert!((bearing_to(0.0, 0.0, &origin_target(0.0, 10.0)) - PI / 2.0).abs() < EPS);
        assert!((bearing_to(0.0, 0.0, &origin_target(0.0, -10.0)) + PI / 2.0).abs() < EPS);
        assert!((bearing_to(0.0, 0.0, &origin_target(-10.0, 0.0)) - PI).abs() < EPS);
    }

    #[test]
    fn test_bearing_is_relative_to_current_position() {
        let target = Position::new(10.0, 10.0, 0.0);
        assert!((bearing_to(10.0, 0.0, &target) - PI / 2.0).abs() < EPS);
    }
}
