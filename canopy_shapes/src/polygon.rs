// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An OpenGIS polygon: an outer ring with optional holes.

use alloc::vec::Vec;

use canopy_index::{BoundingBox, Shape};

use crate::ring::LinearRing;

/// A polygon bounded by an outer [`LinearRing`], with zero or more inner
/// rings cut out as holes.
///
/// This is the OpenGIS polygon, which differs from the computational-
/// geometry one: the boundary is a set of rings rather than a single vertex
/// chain. Containment counts ray crossings against the outer ring and every
/// hole whose box is in range; an odd total means inside.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    outer: LinearRing,
    inner: Vec<LinearRing>,
    bounds: BoundingBox,
}

impl Polygon {
    /// Creates a polygon from its outer ring.
    pub fn new(outer: LinearRing) -> Self {
        let bounds = outer.bounding_box();
        Self {
            outer,
            inner: Vec::new(),
            bounds,
        }
    }

    /// Cuts a hole into this polygon.
    ///
    /// The ring is taken as given; call [`is_valid`](Self::is_valid) after
    /// assembling a polygon from untrusted data.
    pub fn add_inner_ring(&mut self, ring: LinearRing) {
        self.inner.push(ring);
    }

    /// Returns `true` if every hole lies within the outer ring's bounds.
    pub fn is_valid(&self) -> bool {
        self.inner
            .iter()
            .all(|ring| self.bounds.contains_box(&ring.bounding_box()))
    }

    /// The outer ring.
    pub fn outer(&self) -> &LinearRing {
        &self.outer
    }

    /// The holes.
    pub fn inner_rings(&self) -> &[LinearRing] {
        &self.inner
    }
}

impl Shape for Polygon {
    fn bounding_box(&self) -> BoundingBox {
        self.bounds
    }

    fn contains(&self, x: f64, y: f64) -> bool {
        if !self.bounds.contains(x, y) {
            return false;
        }
        let mut count = self.outer.intersect_ray(x, y);
        for ring in &self.inner {
            if ring.bounding_box().contains(x, y) {
                count += ring.intersect_ray(x, y);
            }
        }
        count % 2 != 0
    }

    fn overlaps(&self, bb: &BoundingBox) -> bool {
        if bb.contains_box(&self.bounds) {
            return true;
        }
        if !self.outer.overlaps(bb) {
            return false;
        }
        // A hole that swallows the box whole cancels the outer overlap.
        !self.inner.iter().any(|ring| ring.contains_box(bb))
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use canopy_index::Point;

    fn ring(points: &[(f64, f64)]) -> LinearRing {
        let vertices: Vec<Point> = points.iter().map(|&(x, y)| Point::new(x, y)).collect();
        LinearRing::new(&vertices).unwrap()
    }

    /// A square with the left edge dented in to `(0, 0)`.
    fn dented_square() -> Polygon {
        Polygon::new(ring(&[
            (1.0, 1.0),
            (1.0, -1.0),
            (-1.0, -1.0),
            (0.0, 0.0),
            (-1.0, 1.0),
        ]))
    }

    /// The dented square with a hole over `(0.1, -0.9, 0.9, -0.1)`.
    fn with_hole() -> Polygon {
        let mut polygon = dented_square();
        polygon.add_inner_ring(ring(&[
            (0.1, -0.9),
            (0.9, -0.9),
            (0.9, -0.1),
            (0.1, -0.1),
        ]));
        polygon
    }

    fn bb(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> BoundingBox {
        BoundingBox::new(min_x, min_y, max_x, max_y).unwrap()
    }

    #[test]
    fn contains_respects_dent() {
        let polygon = dented_square();
        assert!(polygon.is_valid());
        assert!(polygon.contains(0.5, -0.5));
        assert!(!polygon.contains(-0.5, 0.0), "inside the dent");
        assert!(!polygon.contains(2.0, 0.0), "outside the bounds");
    }

    #[test]
    fn contains_respects_holes() {
        let polygon = with_hole();
        assert!(polygon.is_valid());
        assert!(polygon.contains(0.0, -0.5), "solid part");
        assert!(!polygon.contains(0.5, -0.5), "inside the hole");
    }

    #[test]
    fn overlap_respects_holes() {
        let polygon = with_hole();
        assert!(polygon.overlaps(&bb(-1.5, 0.0, -0.5, 1.0)));
        assert!(polygon.overlaps(&bb(-2.0, -2.0, 2.0, 2.0)), "covers polygon");
        assert!(
            polygon.overlaps(&bb(0.09, -0.9, 0.9, -0.1)),
            "pokes out of the hole"
        );
        assert!(
            !polygon.overlaps(&bb(0.11, -0.89, 0.89, -0.11)),
            "entirely inside the hole"
        );
        assert!(!polygon.overlaps(&bb(2.0, 2.0, 3.0, 3.0)));
    }

    #[test]
    fn hole_outside_bounds_is_invalid() {
        let mut polygon = dented_square();
        polygon.add_inner_ring(ring(&[(5.0, 5.0), (6.0, 5.0), (6.0, 6.0)]));
        assert!(!polygon.is_valid());
    }
}
