// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An axis-aligned rectangle shape.

use canopy_index::{BoundingBox, Shape};

use crate::error::Error;

/// An axis-aligned rectangle, the simplest indexable shape.
///
/// A rectangle is its own bounding box: containment is border-inclusive and
/// overlap is strict, exactly as for [`BoundingBox`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect {
    bounds: BoundingBox,
}

impl Rect {
    /// Creates a rectangle from its corner coordinates.
    ///
    /// # Errors
    ///
    /// Fails like [`BoundingBox::new`]: bounds must be finite and strictly
    /// ordered on both axes.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Result<Self, Error> {
        Ok(Self {
            bounds: BoundingBox::new(min_x, min_y, max_x, max_y)?,
        })
    }

    /// Creates a rectangle covering a bounding box.
    pub const fn from_box(bounds: BoundingBox) -> Self {
        Self { bounds }
    }

    /// The extent of this rectangle.
    pub const fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }
}

impl Shape for Rect {
    fn bounding_box(&self) -> BoundingBox {
        self.bounds
    }

    fn contains(&self, x: f64, y: f64) -> bool {
        self.bounds.contains(x, y)
    }

    fn overlaps(&self, bb: &BoundingBox) -> bool {
        self.bounds.overlaps(bb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopy_index::{Point, RTree};

    #[test]
    fn shape_predicates() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0).unwrap();
        assert!(r.contains(0.0, 10.0), "borders included");
        assert!(!r.contains(11.0, 5.0));
        assert!(r.overlaps(&BoundingBox::new(5.0, 5.0, 15.0, 15.0).unwrap()));
        assert!(
            !r.overlaps(&BoundingBox::new(10.0, 0.0, 20.0, 10.0).unwrap()),
            "edge touch is not overlap"
        );
        assert_eq!(r.bounding_box(), *r.bounds());
    }

    #[test]
    fn invalid_bounds_rejected() {
        assert!(Rect::new(10.0, 0.0, 0.0, 10.0).is_err());
        assert!(Rect::new(0.0, 0.0, 0.0, 10.0).is_err());
    }

    #[test]
    fn indexable() {
        let mut tree = RTree::new(4, 2).unwrap();
        for i in 0..10 {
            let x = f64::from(i) * 3.0;
            tree.insert(Rect::new(x, 0.0, x + 2.0, 2.0).unwrap());
        }
        assert_eq!(tree.len(), 10);
        assert_eq!(tree.search_point(Point::new(4.0, 1.0)).len(), 1);
        assert!(tree.delete(&Rect::new(3.0, 0.0, 5.0, 2.0).unwrap()));
        assert!(tree.search_point(Point::new(4.0, 1.0)).is_empty());
    }
}
