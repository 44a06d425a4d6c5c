// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The capability indexed values provide.

use crate::{BoundingBox, Point};

/// A 2D shape that can be stored in a tree.
///
/// The trees see stored values only through this trait. The bounding box
/// drives tree structure and coarse filtering; the two predicates refine
/// query candidates whose boxes matched. A shape's bounding box is sampled
/// once at insertion time, so it must not change while the shape is stored.
pub trait Shape {
    /// Returns the bounding box of this shape.
    fn bounding_box(&self) -> BoundingBox;

    /// Returns `true` if this shape contains the coordinate.
    fn contains(&self, x: f64, y: f64) -> bool;

    /// Returns `true` if this shape overlaps the box.
    fn overlaps(&self, bb: &BoundingBox) -> bool;

    /// Returns `true` if this shape contains the point.
    fn contains_point(&self, p: Point) -> bool {
        self.contains(p.x, p.y)
    }
}
