// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Shapes: computational-geometry collaborators for the canopy
//! indexes.
//!
//! The trees in `canopy_index` see stored values only through the
//! [`Shape`] trait. This crate provides the concrete geometry that goes into
//! them, plus the predicates those shapes are built from:
//!
//! - [`Rect`], [`Polygon`] – indexable shapes implementing [`Shape`].
//! - [`LinearRing`] – a simple polygon boundary with ray-parity containment
//!   and winding tests; the building block of [`Polygon`].
//! - [`Polyline`] – an open chain of points with length-proportional
//!   interpolation and corner-aware side offsets.
//! - [`Line`], [`Segment`], [`Vector`] – the primitives behind the
//!   predicates.
//! - [`is_simple`] – a sweep-line check that a vertex list bounds a simple
//!   polygon.
//! - [`almost_zero`] / [`almost_equals`] – ulps-based approximate float
//!   comparison used by the line and segment predicates.
//!
//! # Features
//!
//! - `std` *(default)*: float functions from the standard library.
//! - `libm`: float functions from [`libm`], for `no_std` targets. At least
//!   one of the two must be enabled.
//!
//! # Example
//!
//! ```
//! use canopy_index::{Point, RsTree};
//! use canopy_shapes::{LinearRing, Polygon, Rect, Shape};
//!
//! let ring = LinearRing::new(&[
//!     Point::new(0.0, 0.0),
//!     Point::new(4.0, 0.0),
//!     Point::new(4.0, 4.0),
//!     Point::new(0.0, 4.0),
//! ])?;
//! let polygon = Polygon::new(ring);
//! assert!(polygon.contains(2.0, 2.0));
//!
//! let mut tree = RsTree::new(8, 2).unwrap();
//! tree.insert(Rect::new(10.0, 10.0, 12.0, 12.0)?);
//! assert_eq!(tree.search_point(Point::new(11.0, 11.0)).len(), 1);
//! # Ok::<(), canopy_shapes::Error>(())
//! ```

#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

#[cfg(all(not(feature = "std"), not(feature = "libm")))]
compile_error!("canopy_shapes requires either the `std` or `libm` feature");

mod approx;
mod error;
mod line;
mod polygon;
mod polyline;
mod rect;
mod ring;
mod segment;
mod simple;
pub(crate) mod util;
mod vector;

pub use approx::{almost_equals, almost_zero};
pub use error::Error;
pub use line::Line;
pub use polygon::Polygon;
pub use polyline::Polyline;
pub use rect::Rect;
pub use ring::{LinearRing, Winding};
pub use segment::Segment;
pub use simple::is_simple;
pub use vector::Vector;

pub use canopy_index::{BoundingBox, Point, Shape};
