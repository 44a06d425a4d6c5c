// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Validation errors for the fallible constructors.

use thiserror::Error;

/// Errors reported when constructing a shape or a geometric primitive.
///
/// As in `canopy_index`, construction is the only fallible surface: every
/// operation on an existing shape is total.
#[derive(Copy, Clone, Debug, PartialEq, Error)]
pub enum Error {
    /// Both line coefficients were zero, so `ax + by = c` describes no line.
    #[error("a line needs a nonzero coefficient")]
    DegenerateLine,
    /// A line or segment was constructed through two equal points.
    #[error("end points must be distinct")]
    CoincidentPoints,
    /// A linear ring was constructed from fewer than 3 vertices.
    #[error("a linear ring needs at least 3 vertices, got {count}")]
    TooFewVertices {
        /// The rejected vertex count.
        count: usize,
    },
    /// A polyline was constructed from fewer than 2 points.
    #[error("a polyline needs at least 2 points, got {count}")]
    TooFewPoints {
        /// The rejected point count.
        count: usize,
    },
    /// The vertices produced an invalid bounding box.
    ///
    /// Rings whose vertices all share one x or one y coordinate span no area
    /// and are rejected through this variant, as are non-finite coordinates.
    #[error(transparent)]
    Bounds(#[from] canopy_index::Error),
}
