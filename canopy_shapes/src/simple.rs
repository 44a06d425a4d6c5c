// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A sweep-line test for polygon simplicity.

use alloc::vec::Vec;

use canopy_index::Point;

use crate::segment::Segment;

/// Returns `true` if `vertices` bound a simple polygon: at least three
/// distinct vertices whose edges meet only at shared end points.
///
/// This is the Shamos-Hoey sweep: end points are visited left to right, and
/// each edge is checked against its vertical neighbours in the list of edges
/// the sweep line currently crosses. Self-touching chains and crossing edges
/// both fail the test; a [`LinearRing`](crate::LinearRing) built from
/// vertices that pass it encloses a well-defined region.
pub fn is_simple(vertices: &[Point]) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }

    // segments[i] runs from vertices[i - 1] (wrapping) to vertices[i].
    let mut segments = Vec::with_capacity(n);
    let mut last = vertices[n - 1];
    for &current in vertices {
        if current == last {
            return false;
        }
        let Ok(segment) = Segment::new(last, current) else {
            return false;
        };
        segments.push(segment);
        last = current;
    }

    let mut end_points: Vec<(Point, Segment, Segment)> = vertices
        .iter()
        .enumerate()
        .map(|(i, &vertex)| (vertex, segments[(i + 1) % n], segments[i]))
        .collect();
    end_points.sort_by(|(p1, ..), (p2, ..)| {
        p1.x.total_cmp(&p2.x).then(p1.y.total_cmp(&p2.y))
    });
    if end_points.windows(2).any(|pair| pair[0].0 == pair[1].0) {
        // A repeated vertex pinches the boundary.
        return false;
    }

    let mut active: Vec<Segment> = Vec::new();
    for &(vertex, first, second) in &end_points {
        if !check(vertex, &first, &mut active) || !check(vertex, &second, &mut active) {
            return false;
        }
    }
    true
}

/// Advances the sweep over one end point of `segment`, returning `false` on
/// a crossing that breaks simplicity.
fn check(vertex: Point, segment: &Segment, active: &mut Vec<Segment>) -> bool {
    if vertex == segment.left() {
        let x = vertex.x;
        let y = sweep_y(segment, x);
        let index = active.partition_point(|s| sweep_y(s, x) <= y);
        active.insert(index, *segment);
        let above = active.get(index + 1);
        let below = index.checked_sub(1).and_then(|i| active.get(i));
        if crosses(above, Some(segment)) || crosses(below, Some(segment)) {
            return false;
        }
    } else {
        let index = active
            .iter()
            .position(|s| s == segment)
            .expect("active edge list lost a segment");
        let above = active.get(index + 1);
        let below = index.checked_sub(1).and_then(|i| active.get(i));
        if crosses(above, below) {
            return false;
        }
        active.remove(index);
    }
    true
}

/// The sweep-line ordinate of a segment at `x`; vertical segments order by
/// their lower end point.
fn sweep_y(segment: &Segment, x: f64) -> f64 {
    let y = segment.line().y_at(x);
    if y.is_nan() || y.is_infinite() {
        segment.left().y
    } else {
        y
    }
}

/// A crossing between two edges that do not share an end point.
fn crosses(s1: Option<&Segment>, s2: Option<&Segment>) -> bool {
    match (s1, s2) {
        (Some(s1), Some(s2)) => !s1.is_joined(s2) && s1.intersect(s2).is_some(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    fn points(coordinates: &[(f64, f64)]) -> Vec<Point> {
        coordinates.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn degenerate_chains() {
        assert!(!is_simple(&[]));
        assert!(!is_simple(&points(&[(1.0, 1.0), (2.0, 2.0)])));
    }

    #[test]
    fn triangle_and_square() {
        assert!(is_simple(&points(&[(1.0, 1.0), (2.0, 2.0), (1.0, 2.0)])));
        assert!(is_simple(&points(&[
            (0.0, 0.0),
            (2.0, 0.0),
            (2.0, 2.0),
            (0.0, 2.0)
        ])));
    }

    #[test]
    fn crossing_edges() {
        // A bowtie: the diagonals cross at (1, 1).
        assert!(!is_simple(&points(&[
            (0.0, 0.0),
            (2.0, 2.0),
            (2.0, 0.0),
            (0.0, 2.0)
        ])));
    }

    #[test]
    fn repeated_vertices() {
        assert!(!is_simple(&points(&[
            (0.0, 0.0),
            (2.0, 0.0),
            (2.0, 2.0),
            (0.0, 0.0),
            (0.0, 2.0)
        ])));
        assert!(
            !is_simple(&points(&[(0.0, 0.0), (1.0, 1.0), (1.0, 1.0), (0.0, 2.0)])),
            "consecutive duplicates"
        );
    }

    #[test]
    fn dented_square_is_simple() {
        assert!(is_simple(&points(&[
            (1.0, 1.0),
            (1.0, -1.0),
            (-1.0, -1.0),
            (0.0, 0.0),
            (-1.0, 1.0)
        ])));
    }
}
