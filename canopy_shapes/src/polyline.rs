// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An open chain of points with proportional interpolation.

use alloc::vec::Vec;

use canopy_index::Point;

use crate::approx::{almost_equals, almost_zero};
use crate::error::Error;
use crate::util::sqrt;
use crate::vector::Vector;

/// A chain of at least two points.
///
/// Interpolation walks the chain by accumulated segment length, so a
/// proportion of 0.5 is the halfway point of the whole path, not of the
/// middle segment.
#[derive(Clone, Debug, PartialEq)]
pub struct Polyline {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl Polyline {
    /// Creates a polyline from its points.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TooFewPoints`] for fewer than 2 points.
    pub fn new(points: &[Point]) -> Result<Self, Error> {
        if points.len() < 2 {
            return Err(Error::TooFewPoints {
                count: points.len(),
            });
        }
        Ok(Self {
            xs: points.iter().map(|p| p.x).collect(),
            ys: points.iter().map(|p| p.y).collect(),
        })
    }

    /// The point a `proportion` of the path length along the chain.
    ///
    /// A proportion of 0 yields the first point and 1 the last.
    pub fn interpolate(&self, proportion: f64) -> Point {
        self.interpolate_offset(proportion, 0.0)
    }

    /// Like [`interpolate`](Self::interpolate), shifted sideways by
    /// `offset`, positive to the right of the direction of travel.
    ///
    /// At an interior vertex the offset follows the corner bisector, so the
    /// shifted path turns with the chain instead of overshooting. The offset
    /// is ignored when the landing segment has (almost) zero length, which
    /// leaves no direction to offset against.
    pub fn interpolate_offset(&self, proportion: f64, offset: f64) -> Point {
        let n = self.xs.len();
        let mut lengths = Vec::with_capacity(n - 1);
        let mut total = 0.0;
        for i in 1..n {
            let length = self.distance(i - 1, i);
            lengths.push(length);
            total += length;
        }

        // Find the segment the target position lands on.
        let mut pos = total * proportion;
        let mut index = 0;
        let mut fraction = 1.0;
        while index < lengths.len() {
            let length = lengths[index];
            if pos <= length {
                fraction = pos / length;
                break;
            }
            pos -= length;
            index += 1;
        }
        if index == lengths.len() {
            // Accumulated rounding pushed the position past the end.
            index -= 1;
            fraction = 1.0;
        }

        let from = Point::new(self.xs[index], self.ys[index]);
        let to = Point::new(self.xs[index + 1], self.ys[index + 1]);
        let p = from.interpolate(to, fraction);

        if offset == 0.0 || almost_zero(lengths[index]) {
            return p;
        }

        let near = |p: Point, q: Point| almost_equals(p.x, q.x) && almost_equals(p.y, q.y);
        let direction = if index > 0 && near(p, from) {
            // Landed on an interior vertex: bisect the incoming and
            // outgoing directions.
            let before = Point::new(self.xs[index - 1], self.ys[index - 1]);
            let v1 = Vector::between(before, from).normalize();
            let v2 = Vector::between(from, to).normalize();
            v1.add(v2).turn_right().normalize()
        } else if index < n - 2 && near(p, to) {
            let after = Point::new(self.xs[index + 2], self.ys[index + 2]);
            let v1 = Vector::between(from, to).normalize();
            let v2 = Vector::between(to, after).normalize();
            v1.add(v2).turn_right().normalize()
        } else {
            Vector::between(from, to)
                .turn_right()
                .scale(1.0 / lengths[index])
        };
        Point::new(p.x + offset * direction.dx, p.y + offset * direction.dy)
    }

    fn distance(&self, i: usize, j: usize) -> f64 {
        let dx = self.xs[i] - self.xs[j];
        let dy = self.ys[i] - self.ys[j];
        sqrt(dx * dx + dy * dy)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    fn polyline(points: &[(f64, f64)]) -> Polyline {
        let points: Vec<Point> = points.iter().map(|&(x, y)| Point::new(x, y)).collect();
        Polyline::new(&points).unwrap()
    }

    fn assert_near(p1: Point, p2: Point) {
        assert!(
            p1.distance_squared(p2) < 1e-30,
            "{p1:?} is not near {p2:?}"
        );
    }

    #[test]
    fn interpolation_along_one_segment() {
        let line = polyline(&[(0.0, 0.0), (1.0, 1.0)]);
        assert_near(line.interpolate(0.0), Point::new(0.0, 0.0));
        assert_near(line.interpolate(1.0), Point::new(1.0, 1.0));
        assert_near(line.interpolate(0.5), Point::new(0.5, 0.5));
    }

    #[test]
    fn offsets_follow_corners() {
        let chevron = polyline(&[(1.0, -1.0), (0.0, 0.0), (1.0, 1.0)]);
        let half = core::f64::consts::FRAC_1_SQRT_2;

        assert_near(
            chevron.interpolate_offset(1.0, 1.0),
            Point::new(1.0 + half, 1.0 - half),
        );
        assert_near(chevron.interpolate_offset(0.75, half), Point::new(1.0, 0.0));
        // Halfway lands exactly on the corner; the offset runs along the
        // bisector.
        assert_near(chevron.interpolate_offset(0.5, 1.0), Point::new(1.0, 0.0));
        assert_near(chevron.interpolate_offset(0.5, -1.0), Point::new(-1.0, 0.0));
    }

    #[test]
    fn full_proportion_reaches_the_last_point() {
        let line = polyline(&[
            (-0.097_872_404_853_810_68, 0.272_206_020_235_156_5),
            (0.0, 0.0),
            (0.013_221_234_941_833_667, -0.026_686_811_786_558_81),
        ]);
        let p = line.interpolate_offset(1.0, 0.0);
        assert_eq!(
            p,
            Point::new(0.013_221_234_941_833_667, -0.026_686_811_786_558_81)
        );
    }

    #[test]
    fn too_few_points_rejected() {
        assert_eq!(
            Polyline::new(&[Point::new(0.0, 0.0)]),
            Err(Error::TooFewPoints { count: 1 })
        );
    }
}
