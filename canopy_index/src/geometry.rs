// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Points, bounding boxes, and the box accumulator shared by both trees.

use core::cmp::Ordering;

use crate::Error;

/// A point on the 2D plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Point {
    /// The x coordinate.
    pub x: f64,
    /// The y coordinate.
    pub y: f64,
}

impl Point {
    /// Creates a point from its coordinates.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns `true` if neither coordinate is `NaN`.
    pub fn is_valid(&self) -> bool {
        !self.x.is_nan() && !self.y.is_nan()
    }

    /// Returns the squared distance to another point.
    pub fn distance_squared(&self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Returns `true` if this point lies strictly inside the coordinate span
    /// of `p1` and `p2` on both axes.
    pub fn between(&self, p1: Self, p2: Self) -> bool {
        (if p1.x < p2.x {
            self.x > p1.x && self.x < p2.x
        } else {
            self.x > p2.x && self.x < p1.x
        }) && (if p1.y < p2.y {
            self.y > p1.y && self.y < p2.y
        } else {
            self.y > p2.y && self.y < p1.y
        })
    }

    /// Linearly interpolates between this point and `to`.
    ///
    /// A `proportion` of 0 yields this point and 1 yields `to`.
    pub fn interpolate(&self, to: Self, proportion: f64) -> Self {
        if proportion == 0.0 || *self == to {
            *self
        } else if proportion == 1.0 {
            to
        } else {
            Self::new(
                self.x + (to.x - self.x) * proportion,
                self.y + (to.y - self.y) * proportion,
            )
        }
    }
}

/// An axis-aligned rectangle on the 2D plane.
///
/// Boxes are immutable. The constructor enforces finite, strictly ordered
/// bounds, so every box has positive width and height.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundingBox {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl BoundingBox {
    /// Creates a box from its corner coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnorderedBounds`] unless `min < max` holds on both
    /// axes (`NaN` coordinates fail that comparison too), and
    /// [`Error::NonFiniteBounds`] if any coordinate is infinite.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Result<Self, Error> {
        if min_x.partial_cmp(&max_x) != Some(Ordering::Less) {
            return Err(Error::UnorderedBounds {
                axis: "x",
                min: min_x,
                max: max_x,
            });
        }
        if min_y.partial_cmp(&max_y) != Some(Ordering::Less) {
            return Err(Error::UnorderedBounds {
                axis: "y",
                min: min_y,
                max: max_y,
            });
        }
        if min_x.is_infinite() || min_y.is_infinite() || max_x.is_infinite() || max_y.is_infinite()
        {
            return Err(Error::NonFiniteBounds);
        }
        Ok(Self {
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }

    /// The min x coordinate.
    pub const fn min_x(&self) -> f64 {
        self.min_x
    }

    /// The min y coordinate.
    pub const fn min_y(&self) -> f64 {
        self.min_y
    }

    /// The max x coordinate.
    pub const fn max_x(&self) -> f64 {
        self.max_x
    }

    /// The max y coordinate.
    pub const fn max_y(&self) -> f64 {
        self.max_y
    }

    /// The width of this box.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// The height of this box.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// The area of this box.
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// The perimeter of this box.
    pub fn margin(&self) -> f64 {
        (self.width() + self.height()) * 2.0
    }

    /// The centre point of this box.
    pub fn centre(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns `true` if the coordinate lies inside this box, borders
    /// included.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.min_x <= x && self.max_x >= x && self.min_y <= y && self.max_y >= y
    }

    /// Returns `true` if the point lies inside this box, borders included.
    pub fn contains_point(&self, p: Point) -> bool {
        self.contains(p.x, p.y)
    }

    /// Returns `true` if `other` lies entirely inside this box, borders
    /// included.
    pub fn contains_box(&self, other: &Self) -> bool {
        self.min_x <= other.min_x
            && self.max_x >= other.max_x
            && self.min_y <= other.min_y
            && self.max_y >= other.max_y
    }

    /// Returns `true` if the interiors of the two boxes intersect.
    ///
    /// Boxes that only share an edge or a corner do not overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min_x < other.max_x
            && self.max_x > other.min_x
            && self.min_y < other.max_y
            && self.max_y > other.min_y
    }

    /// Returns the area shared with `other`, 0.0 when the interiors are
    /// disjoint.
    pub fn overlap_area(&self, other: &Self) -> f64 {
        let min_x = self.min_x.max(other.min_x);
        let min_y = self.min_y.max(other.min_y);
        let max_x = self.max_x.min(other.max_x);
        let max_y = self.max_y.min(other.max_y);
        if min_x < max_x && min_y < max_y {
            (max_x - min_x) * (max_y - min_y)
        } else {
            0.0
        }
    }

    /// Returns the smallest box containing both this box and `other`.
    pub fn join(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Returns `true` if the segment from `p1` to `p2` crosses an edge of
    /// this box.
    ///
    /// A segment that lies strictly inside the box crosses no edge and does
    /// not intersect; callers that also care about containment test the
    /// endpoints separately. A degenerate segment with equal endpoints never
    /// intersects.
    pub fn intersects_segment(&self, p1: Point, p2: Point) -> bool {
        let (min_px, max_px) = if p1.x <= p2.x {
            (p1.x, p2.x)
        } else {
            (p2.x, p1.x)
        };
        let (min_py, max_py) = if p1.y < p2.y {
            (p1.y, p2.y)
        } else {
            (p2.y, p1.y)
        };

        // Coefficients of the carrying line `a*x + b*y = c`. An axis-aligned
        // segment zeroes one coefficient; the evaluation against the
        // corresponding pair of edges then yields a non-finite value and
        // fails the range check.
        let a = p2.y - p1.y;
        let b = p1.x - p2.x;
        let c = p1.x * p2.y - p2.x * p1.y;

        if self.min_x >= min_px && self.min_x <= max_px {
            let y = (c - a * self.min_x) / b;
            if y >= self.min_y && y <= self.max_y {
                return true;
            }
        }
        if self.max_x >= min_px && self.max_x <= max_px {
            let y = (c - a * self.max_x) / b;
            if y >= self.min_y && y <= self.max_y {
                return true;
            }
        }
        if self.min_y >= min_py && self.min_y <= max_py {
            let x = (c - b * self.min_y) / a;
            if x >= self.min_x && x <= self.max_x {
                return true;
            }
        }
        if self.max_y >= min_py && self.max_y <= max_py {
            let x = (c - b * self.max_y) / a;
            if x >= self.min_x && x <= self.max_x {
                return true;
            }
        }
        false
    }
}

/// Accumulates boxes into their smallest common bounding box.
///
/// A fresh builder is empty; [`build`](Self::build) returns `None` until at
/// least one box has been added.
#[derive(Copy, Clone, Debug)]
pub struct BoundingBoxBuilder {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl BoundingBoxBuilder {
    /// Creates an empty builder.
    pub const fn new() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    /// Extends the accumulated bounds to cover `bb`.
    pub fn add(&mut self, bb: &BoundingBox) {
        if self.min_x > bb.min_x {
            self.min_x = bb.min_x;
        }
        if self.max_x < bb.max_x {
            self.max_x = bb.max_x;
        }
        if self.min_y > bb.min_y {
            self.min_y = bb.min_y;
        }
        if self.max_y < bb.max_y {
            self.max_y = bb.max_y;
        }
    }

    /// The width of the accumulated bounds.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// The height of the accumulated bounds.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// The area of the accumulated bounds.
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Returns the accumulated box, or `None` if nothing was added.
    pub fn build(&self) -> Option<BoundingBox> {
        // Added boxes all carry ordered finite bounds, so a non-empty
        // accumulator does too.
        if self.min_x < self.max_x && self.min_y < self.max_y {
            Some(BoundingBox {
                min_x: self.min_x,
                min_y: self.min_y,
                max_x: self.max_x,
                max_y: self.max_y,
            })
        } else {
            None
        }
    }
}

impl Default for BoundingBoxBuilder {
    fn default() -> Self {
        Self::new()
    }
}
