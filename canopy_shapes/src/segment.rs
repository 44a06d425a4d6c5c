// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A line segment.

use canopy_index::Point;

use crate::error::Error;
use crate::line::Line;

/// A segment of a [`Line`] between two end points.
///
/// End points are normalized on construction: [`left`](Self::left) is the
/// lexicographically smaller one by `(x, y)`, so equal segments compare equal
/// regardless of the order their end points were given in.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Segment {
    line: Line,
    left: Point,
    right: Point,
}

impl Segment {
    /// Creates a segment between two points.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CoincidentPoints`] if the points are equal.
    pub fn new(p1: Point, p2: Point) -> Result<Self, Error> {
        let (left, right) = if p1.x < p2.x || (p1.x == p2.x && p1.y <= p2.y) {
            (p1, p2)
        } else {
            (p2, p1)
        };
        // Derive the line from the normalized end points, so reversed
        // construction yields identical coefficients and equal segments
        // compare equal.
        let line = Line::through(left, right)?;
        Ok(Self { line, left, right })
    }

    /// The end point with the smaller `(x, y)`.
    pub fn left(&self) -> Point {
        self.left
    }

    /// The end point with the greater `(x, y)`.
    pub fn right(&self) -> Point {
        self.right
    }

    /// The line this segment lies on.
    pub fn line(&self) -> &Line {
        &self.line
    }

    /// The intersection point with a line, `None` if parallel or outside
    /// this segment.
    pub fn intersect_line(&self, line: &Line) -> Option<Point> {
        self.line
            .intersect(line)
            .filter(|p| self.covers(p.x, p.y))
    }

    /// The intersection point with another segment, `None` if the lines are
    /// parallel or the crossing lies outside either segment.
    pub fn intersect(&self, other: &Self) -> Option<Point> {
        self.line
            .intersect(&other.line)
            .filter(|p| self.covers(p.x, p.y) && other.covers(p.x, p.y))
    }

    /// Returns `true` if `p` is one of the end points.
    pub fn is_end_point(&self, p: Point) -> bool {
        p == self.left || p == self.right
    }

    /// Returns `true` if the segments share an end point.
    pub fn is_joined(&self, other: &Self) -> bool {
        self.is_end_point(other.left) || self.is_end_point(other.right)
    }

    /// Returns `true` if the coordinate lies on this segment.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.line.contains(x, y) && self.covers(x, y)
    }

    /// End-point-inclusive coordinate span check, both axes.
    fn covers(&self, x: f64, y: f64) -> bool {
        let (min_y, max_y) = if self.left.y <= self.right.y {
            (self.left.y, self.right.y)
        } else {
            (self.right.y, self.left.y)
        };
        x >= self.left.x && x <= self.right.x && y >= min_y && y <= max_y
    }
}
