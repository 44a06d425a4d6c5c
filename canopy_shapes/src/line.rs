// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An infinite line on the plane.

use canopy_index::Point;

use crate::approx::{almost_equals, almost_zero};
use crate::error::Error;

/// A line described by `a*x + b*y = c`.
///
/// The coefficients are kept as given; lines that differ only by a scale
/// factor compare unequal but are [`is_identical`](Self::is_identical).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Line {
    a: f64,
    b: f64,
    c: f64,
}

impl Line {
    /// Creates a line from the coefficients of `a*x + b*y = c`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateLine`] if both `a` and `b` are zero.
    pub fn new(a: f64, b: f64, c: f64) -> Result<Self, Error> {
        if a == 0.0 && b == 0.0 {
            return Err(Error::DegenerateLine);
        }
        Ok(Self { a, b, c })
    }

    /// The vertical line through `x`.
    pub const fn vertical(x: f64) -> Self {
        Self { a: 1.0, b: 0.0, c: x }
    }

    /// The horizontal line through `y`.
    pub const fn horizontal(y: f64) -> Self {
        Self { a: 0.0, b: 1.0, c: y }
    }

    /// Creates the line through two points.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CoincidentPoints`] if the points are equal.
    pub fn through(p1: Point, p2: Point) -> Result<Self, Error> {
        if p1 == p2 {
            return Err(Error::CoincidentPoints);
        }
        Ok(Self {
            a: p2.y - p1.y,
            b: p1.x - p2.x,
            c: p1.x * p2.y - p2.x * p1.y,
        })
    }

    /// The intersection point with another line, `None` for parallels.
    pub fn intersect(&self, other: &Self) -> Option<Point> {
        let det = self.a * other.b - self.b * other.a;
        if almost_zero(det) {
            return None;
        }

        let x = (self.c * other.b - self.b * other.c) / det;
        let y = (self.a * other.c - self.c * other.a) / det;
        if x.is_infinite() || y.is_infinite() {
            return None;
        }
        Some(Point::new(x, y))
    }

    /// The x coordinate where this line passes `y`, `NaN` for a horizontal
    /// line.
    pub fn x_at(&self, y: f64) -> f64 {
        if self.a == 0.0 {
            return f64::NAN;
        }
        (self.c - self.b * y) / self.a
    }

    /// The y coordinate where this line passes `x`, `NaN` for a vertical
    /// line.
    pub fn y_at(&self, x: f64) -> f64 {
        if self.b == 0.0 {
            return f64::NAN;
        }
        (self.c - self.a * x) / self.b
    }

    /// Returns `true` if this line is vertical.
    pub fn is_vertical(&self) -> bool {
        almost_zero(self.b)
    }

    /// Returns `true` if this line is horizontal.
    pub fn is_horizontal(&self) -> bool {
        almost_zero(self.a)
    }

    /// Returns `true` if the coordinate lies on this line, up to
    /// [`almost_equals`] tolerance.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        almost_equals(self.a * x + self.b * y, self.c)
    }

    /// Returns `true` if the point lies on this line.
    pub fn contains_point(&self, p: Point) -> bool {
        self.contains(p.x, p.y)
    }

    /// Returns `true` if `other` describes the same line, allowing the
    /// coefficients to differ by a common factor.
    pub fn is_identical(&self, other: &Self) -> bool {
        *self == *other
            || (almost_equals(self.a * other.b, other.a * self.b)
                && almost_equals(self.a * other.c, other.a * self.c)
                && almost_equals(self.b * other.c, other.b * self.c))
    }
}
