// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Validation errors for the fallible constructors.

use thiserror::Error;

/// Errors reported when constructing a bounding box or a tree.
///
/// Construction is the only fallible surface of this crate: once a
/// [`BoundingBox`](crate::BoundingBox) or a tree exists, every operation on it
/// is total.
#[derive(Copy, Clone, Debug, PartialEq, Error)]
pub enum Error {
    /// A bounding box min coordinate was not strictly below its max.
    ///
    /// `NaN` coordinates fail the same ordering comparison, so they are
    /// rejected here as well.
    #[error("min {axis} ({min}) must be less than max {axis} ({max})")]
    UnorderedBounds {
        /// The offending axis, `"x"` or `"y"`.
        axis: &'static str,
        /// The rejected min coordinate.
        min: f64,
        /// The rejected max coordinate.
        max: f64,
    },
    /// A bounding box coordinate was infinite.
    #[error("infinite bounding box coordinates are not supported")]
    NonFiniteBounds,
    /// Tree fanout limits were out of range.
    ///
    /// A tree needs `max_entries > 1` and `min_entries` in
    /// `1..=max_entries / 2`.
    #[error("invalid entry limits: min {min}, max {max}")]
    InvalidEntryLimits {
        /// The rejected minimum fanout.
        min: usize,
        /// The rejected maximum fanout.
        max: usize,
    },
}
