//! Classic parametric involute-of-a-circle math.
//!
//! All inputs are clamped into valid domains rather than rejected: below the
//! base circle the involute is undefined, and the flat zero return degrades
//! malformed extreme parameters into the base circle instead of signalling
//! failure.

use crate::float_types::Real;

/// Converts polar coordinates to cartesian coordinates.
#[inline]
pub fn polar(radius: Real, angle: Real) -> (Real, Real) {
    (radius * angle.cos(), radius * angle.sin())
}

/// Calculate the involute angle at a given radius.
///
/// For a base circle of radius `base_radius`, the involute reaches `radius`
/// after unrolling through
///
/// ```text
/// φ = sqrt((r/rb)² - 1) - acos(rb/r)
/// ```
///
/// Returns 0 when `radius <= base_radius` (clamped domain).
pub fn involute_angle(base_radius: Real, radius: Real) -> Real {
    if radius <= base_radius {
        return 0.0;
    }
    let ratio = radius / base_radius;
    (ratio * ratio - 1.0).sqrt() - (base_radius / radius).acos()
}

/// Get a point on the involute curve at `radius`.
///
/// `side` selects the flank (+1.0 or -1.0) and mirrors the curve across the
/// tooth centerline; `angle_offset` rotates the whole curve into its angular
/// slot. Radii below the base circle are clamped up onto it.
pub fn involute_point(
    base_radius: Real,
    side: Real,
    angle_offset: Real,
    radius: Real,
) -> (Real, Real) {
    let radius = radius.max(base_radius);
    let phi = involute_angle(base_radius, radius);
    polar(radius, side * (phi + angle_offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn involute_angle_is_zero_on_the_base_circle() {
        for rb in [0.25, 1.0, 7.5] {
            assert_eq!(involute_angle(rb, rb), 0.0);
        }
    }

    #[test]
    fn involute_angle_is_zero_below_the_base_circle() {
        assert_eq!(involute_angle(2.0, 1.0), 0.0);
        assert_eq!(involute_angle(2.0, 0.0), 0.0);
    }

    #[test]
    fn involute_angle_is_strictly_increasing_in_radius() {
        let rb = 1.0;
        let mut previous = 0.0;
        for i in 1..200 {
            let radius = rb + i as Real * 0.01;
            let phi = involute_angle(rb, radius);
            assert!(
                phi > previous,
                "involute angle not increasing at r = {radius}"
            );
            previous = phi;
        }
    }

    #[test]
    fn involute_point_clamps_to_the_base_circle() {
        let rb = 2.0;
        let (x, y) = involute_point(rb, 1.0, 0.0, 0.5);
        assert!(((x * x + y * y).sqrt() - rb).abs() < 1e-12);
    }

    #[test]
    fn involute_point_lands_on_the_requested_radius() {
        let rb = 1.0;
        let r = 1.4;
        let (x, y) = involute_point(rb, -1.0, 0.1, r);
        assert!(((x * x + y * y).sqrt() - r).abs() < 1e-12);
    }
}
