// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A closed chain of vertices, the building block of polygons.

use alloc::vec::Vec;

use canopy_index::{BoundingBox, Point};

use crate::error::Error;

/// The vertex order of a [`LinearRing`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Winding {
    /// Vertices run clockwise.
    Clockwise,
    /// Vertices run counter-clockwise.
    CounterClockwise,
    /// The vertices are collinear and enclose no area.
    Collinear,
}

/// A linear ring as defined by OpenGIS: a closed boundary of at least three
/// vertices, the last implicitly connected back to the first.
///
/// The ring itself does not verify simplicity; pass the vertices through
/// [`is_simple`](crate::is_simple) first when that matters.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearRing {
    xs: Vec<f64>,
    ys: Vec<f64>,
    bounds: BoundingBox,
}

impl LinearRing {
    /// Creates a ring from its vertices.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TooFewVertices`] for fewer than 3 vertices, and
    /// [`Error::Bounds`] when the vertices span no area on some axis or
    /// carry non-finite coordinates.
    pub fn new(vertices: &[Point]) -> Result<Self, Error> {
        if vertices.len() < 3 {
            return Err(Error::TooFewVertices {
                count: vertices.len(),
            });
        }
        let xs: Vec<f64> = vertices.iter().map(|p| p.x).collect();
        let ys: Vec<f64> = vertices.iter().map(|p| p.y).collect();
        let fold = |vs: &[f64]| {
            vs.iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &v| {
                    (min.min(v), max.max(v))
                })
        };
        let (min_x, max_x) = fold(&xs);
        let (min_y, max_y) = fold(&ys);
        let bounds = BoundingBox::new(min_x, min_y, max_x, max_y)?;
        Ok(Self { xs, ys, bounds })
    }

    /// The bounding box of this ring.
    pub fn bounding_box(&self) -> BoundingBox {
        self.bounds
    }

    /// The number of sides, equal to the number of vertices.
    pub fn sides(&self) -> usize {
        self.xs.len()
    }

    /// Counts the edges crossed by the ray running from `(x, y)` towards
    /// positive x.
    ///
    /// An odd count means the point is inside the ring. Edges are half-open
    /// at their upper y end, so a ray through a vertex counts its two edges
    /// once, not twice.
    pub fn intersect_ray(&self, x: f64, y: f64) -> usize {
        let n = self.xs.len();
        let mut x0 = self.xs[n - 1];
        let mut y0 = self.ys[n - 1];
        let mut count = 0;
        for i in 0..n {
            let x1 = self.xs[i];
            let y1 = self.ys[i];
            if (y0 < y && y1 < y) || (y0 >= y && y1 >= y) || (x0 < x && x1 < x) {
                x0 = x1;
                y0 = y1;
                continue;
            }

            // The edge crosses the ray's horizontal, so y0 != y1.
            let a = y1 - y0;
            let b = x0 - x1;
            let c = x0 * y1 - x1 * y0;
            let ix = (c - b * y) / a;
            if ix >= x && within(ix, x0, x1) {
                count += 1;
            }
            x0 = x1;
            y0 = y1;
        }
        count
    }

    /// The orientation of the vertex order, by the signed shoelace area.
    pub fn winding(&self) -> Winding {
        let n = self.xs.len();
        let mut sum = 0.0;
        let mut x0 = self.xs[n - 1];
        let mut y0 = self.ys[n - 1];
        for i in 0..n {
            sum += x0 * self.ys[i] - self.xs[i] * y0;
            x0 = self.xs[i];
            y0 = self.ys[i];
        }
        if sum > 0.0 {
            Winding::CounterClockwise
        } else if sum < 0.0 {
            Winding::Clockwise
        } else {
            Winding::Collinear
        }
    }

    /// Returns `true` if this ring and the box share any area.
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        if other.contains_box(&self.bounds) {
            return true;
        }
        if !other.overlaps(&self.bounds) {
            return false;
        }
        // An edge crosses the box, or the box sits entirely inside the ring.
        self.edge_intersects(other) || self.intersect_ray(other.max_x(), other.max_y()) % 2 != 0
    }

    /// Returns `true` if the box lies entirely inside this ring.
    pub fn contains_box(&self, other: &BoundingBox) -> bool {
        self.intersect_ray(other.max_x(), other.max_y()) % 2 != 0 && !self.edge_intersects(other)
    }

    /// Returns `true` if any edge of this ring crosses an edge of the box.
    fn edge_intersects(&self, bb: &BoundingBox) -> bool {
        let (min_x, min_y) = (bb.min_x(), bb.min_y());
        let (max_x, max_y) = (bb.max_x(), bb.max_y());
        let n = self.xs.len();
        let mut x0 = self.xs[n - 1];
        let mut y0 = self.ys[n - 1];
        for i in 0..n {
            let x1 = self.xs[i];
            let y1 = self.ys[i];
            if (x0 < min_x && x1 < min_x)
                || (x0 > max_x && x1 > max_x)
                || (y0 < min_y && y1 < min_y)
                || (y0 > max_y && y1 > max_y)
            {
                x0 = x1;
                y0 = y1;
                continue;
            }

            let a = y1 - y0;
            let b = x0 - x1;
            let c = x0 * y1 - x1 * y0;

            if a != 0.0 {
                // Crossings with the two horizontal box edges.
                for edge_y in [min_y, max_y] {
                    let ix = (c - b * edge_y) / a;
                    if ix >= min_x && ix <= max_x && within(ix, x0, x1) {
                        return true;
                    }
                }
            }
            if b != 0.0 {
                // Crossings with the two vertical box edges.
                for edge_x in [min_x, max_x] {
                    let iy = (c - a * edge_x) / b;
                    if iy >= min_y && iy <= max_y && within(iy, y0, y1) {
                        return true;
                    }
                }
            }
            x0 = x1;
            y0 = y1;
        }
        false
    }
}

/// Whether `v` lies between `v0` and `v1`, inclusive, in either order.
fn within(v: f64, v0: f64, v1: f64) -> bool {
    if v0 < v1 {
        v >= v0 && v <= v1
    } else {
        v <= v0 && v >= v1
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    /// An arrowhead: a square with the left edge dented in to `(0, 0)`.
    fn dented_square() -> LinearRing {
        ring(&[(1.0, 1.0), (1.0, -1.0), (-1.0, -1.0), (0.0, 0.0), (-1.0, 1.0)])
    }

    fn ring(points: &[(f64, f64)]) -> LinearRing {
        let vertices: Vec<Point> = points.iter().map(|&(x, y)| Point::new(x, y)).collect();
        LinearRing::new(&vertices).unwrap()
    }

    fn bb(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> BoundingBox {
        BoundingBox::new(min_x, min_y, max_x, max_y).unwrap()
    }

    #[test]
    fn construction() {
        let r = dented_square();
        assert_eq!(r.sides(), 5);
        assert_eq!(r.bounding_box(), bb(-1.0, -1.0, 1.0, 1.0));
        assert_eq!(r, dented_square());

        assert_eq!(
            LinearRing::new(&[Point::new(0.0, 0.0)]),
            Err(Error::TooFewVertices { count: 1 })
        );
        assert!(
            LinearRing::new(&[
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(2.0, 0.0)
            ])
            .is_err(),
            "flat ring spans no area"
        );
    }

    #[test]
    fn winding_orders() {
        let clockwise = dented_square();
        assert_eq!(clockwise.winding(), Winding::Clockwise);

        let reversed = ring(&[(-1.0, 1.0), (0.0, 0.0), (-1.0, -1.0), (1.0, -1.0), (1.0, 1.0)]);
        assert_eq!(reversed.winding(), Winding::CounterClockwise);

        let collinear = ring(&[(1.0, 1.0), (2.0, 2.0), (-1.0, -1.0), (0.0, 0.0), (4.0, 4.0)]);
        assert_eq!(collinear.winding(), Winding::Collinear);
    }

    #[test]
    fn ray_parity() {
        let r = dented_square();
        assert_eq!(r.intersect_ray(0.5, -0.5) % 2, 1, "inside");
        assert_eq!(r.intersect_ray(-0.5, 0.0) % 2, 0, "inside the dent");
        assert_eq!(r.intersect_ray(2.0, 0.0), 0, "right of everything");
    }

    #[test]
    fn overlaps_boxes() {
        let r = dented_square();
        assert!(r.overlaps(&bb(-1.5, 0.0, -0.5, 1.0)), "crosses the dent");
        assert!(r.overlaps(&bb(-2.0, -2.0, 2.0, 2.0)), "box swallows ring");
        assert!(r.overlaps(&bb(0.1, -0.9, 0.9, -0.1)), "box inside ring");
        assert!(!r.overlaps(&bb(2.0, 2.0, 3.0, 3.0)));
    }

    #[test]
    fn contains_boxes() {
        let r = dented_square();
        assert!(r.contains_box(&bb(0.1, -0.9, 0.9, -0.1)));
        assert!(!r.contains_box(&bb(-1.5, 0.0, -0.5, 1.0)), "crosses edges");
        assert!(!r.contains_box(&bb(-2.0, -2.0, 2.0, 2.0)), "covers ring");
        assert!(!r.contains_box(&bb(2.0, 2.0, 3.0, 3.0)), "disjoint");
    }
}
