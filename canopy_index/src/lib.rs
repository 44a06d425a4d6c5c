// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Index: dynamic 2D R-tree and R*-tree indexes.
//!
//! Canopy Index answers point-containment and box-overlap queries over a
//! growing and shrinking set of shapes in sub-linear time.
//!
//! - Insert and delete shapes implementing the [`Shape`] trait.
//! - Query by point or by overlapping [`BoundingBox`].
//! - Two insertion strategies behind the same surface: [`RTree`] (classic
//!   least-enlargement descent with linear-cost seed splits) and [`RsTree`]
//!   (R*-tree overlap-minimizing descent, margin-driven splits, and forced
//!   reinsertion).
//!
//! The crate defines its own [`Point`] and [`BoundingBox`] and does not
//! depend on a geometry crate. Shapes are opaque to the index: their bounding
//! boxes drive the tree structure, and their own `contains`/`overlaps`
//! predicates refine query candidates, so any geometry with a finite bounding
//! box can be stored. The `canopy_shapes` crate provides ready-made
//! rectangle, polygon, and polyline shapes.
//!
//! Trees are not internally synchronized; a caller must serialize all access
//! to one tree. Every operation runs to completion with recursion bounded by
//! the tree height.
//!
//! # Example
//!
//! ```
//! use canopy_index::{BoundingBox, Point, RTree, Shape};
//!
//! struct Block(BoundingBox);
//!
//! impl Shape for Block {
//!     fn bounding_box(&self) -> BoundingBox {
//!         self.0
//!     }
//!     fn contains(&self, x: f64, y: f64) -> bool {
//!         self.0.contains(x, y)
//!     }
//!     fn overlaps(&self, bb: &BoundingBox) -> bool {
//!         self.0.overlaps(bb)
//!     }
//! }
//!
//! let mut tree = RTree::new(16, 4)?;
//! for i in 0..32 {
//!     let x = f64::from(i) * 2.0;
//!     tree.insert(Block(BoundingBox::new(x, 0.0, x + 1.5, 1.0)?));
//! }
//!
//! let hits = tree.search_point(Point::new(0.5, 0.5));
//! assert_eq!(hits.len(), 1);
//! assert_eq!(tree.len(), 32);
//! # Ok::<(), canopy_index::Error>(())
//! ```

#![no_std]

extern crate alloc;

mod error;
mod geometry;
mod node;
mod rstar;
mod rtree;
mod shape;
mod tree;

pub use error::Error;
pub use geometry::{BoundingBox, BoundingBoxBuilder, Point};
pub use rstar::RsTree;
pub use rtree::RTree;
pub use shape::Shape;
