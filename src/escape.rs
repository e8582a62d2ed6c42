// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time test.  A point on the complex plane is iterated
//! under z -> z^2 + c, starting with z = c, and we count how many
//! steps it takes for the orbit to leave the circle of radius 2.
//! Anything that gets that far is known to run off to infinity, so
//! the count is a fair measure of how "far" the point is from the set.

use num::Complex;

/// Squared escape radius.  Comparing against |z|^2 saves a sqrt.
const ESCAPE: f64 = 4.0;

/// Returns the number of iterations taken before the orbit of
/// `(x0, y0)` escapes, or `max_iterations` if it never does.  A bound
/// of zero returns zero without iterating at all.
#[inline]
pub fn iterations_at_point(x0: f64, y0: f64, max_iterations: u32) -> u32 {
    let c = Complex::new(x0, y0);
    let mut z = c;
    let mut count = 0;
    while z.norm_sqr() <= ESCAPE && count < max_iterations {
        z = z * z + c;
        count += 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_bound_returns_zero() {
        assert_eq!(iterations_at_point(0.0, 0.0, 0), 0);
        assert_eq!(iterations_at_point(-0.75, 0.1, 0), 0);
        assert_eq!(iterations_at_point(10.0, 10.0, 0), 0);
    }

    #[test]
    fn origin_never_escapes() {
        for n in &[1, 2, 17, 1000, 65_536] {
            assert_eq!(iterations_at_point(0.0, 0.0, *n), *n);
        }
    }

    #[test]
    fn points_outside_radius_escape_immediately() {
        assert_eq!(iterations_at_point(2.5, 0.0, 1000), 0);
        assert_eq!(iterations_at_point(0.0, -3.0, 1000), 0);
        assert_eq!(iterations_at_point(1.5, 1.5, 1000), 0);
    }

    #[test]
    fn boundary_of_radius_is_inside() {
        // |c|^2 == 4 is not an escape; the first step takes it to 6.
        assert_eq!(iterations_at_point(2.0, 0.0, 1000), 1);
        assert_eq!(iterations_at_point(-2.0, 0.0, 1000), 1000);
    }

    #[test]
    fn known_members_stay_bounded() {
        assert_eq!(iterations_at_point(-1.0, 0.0, 500), 500);
        assert_eq!(iterations_at_point(-0.1, 0.1, 500), 500);
        assert_eq!(iterations_at_point(0.25, 0.0, 500), 500);
    }

    #[test]
    fn count_never_exceeds_bound() {
        let mut y = -2.0;
        while y <= 2.0 {
            let mut x = -2.5;
            while x <= 1.5 {
                assert!(iterations_at_point(x, y, 64) <= 64);
                x += 0.125;
            }
            y += 0.125;
        }
    }

    #[test]
    fn nearby_outside_point_escapes_quickly() {
        // 1 -> 2 -> 5: escapes on the third test.
        assert_eq!(iterations_at_point(1.0, 0.0, 1000), 2);
    }
}
