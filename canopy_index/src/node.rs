// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arena node and entry model shared by both trees.

use alloc::vec::Vec;

use crate::{BoundingBox, BoundingBoxBuilder, Shape};

/// Index of a node slot in the tree arena.
///
/// Ids are internal: nodes are never exposed, so a plain slot index without a
/// generation tag is enough.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) fn idx(self) -> usize {
        self.0 as usize
    }
}

/// A stored shape together with its cached bounding box.
#[derive(Debug)]
pub(crate) struct LeafEntry<S> {
    pub(crate) bounds: BoundingBox,
    pub(crate) shape: S,
}

impl<S: Shape> LeafEntry<S> {
    /// Samples the shape's bounding box once and caches it.
    pub(crate) fn new(shape: S) -> Self {
        Self {
            bounds: shape.bounding_box(),
            shape,
        }
    }
}

/// A child pointer together with the child's cached bounds and area.
///
/// The area is queried on every subtree choice, so it is cached alongside the
/// box and refreshed by [`adjust`](Self::adjust) whenever the child changes.
#[derive(Debug)]
pub(crate) struct BranchEntry {
    pub(crate) bounds: BoundingBox,
    pub(crate) area: f64,
    pub(crate) child: NodeId,
}

impl BranchEntry {
    pub(crate) fn new(bounds: BoundingBox, child: NodeId) -> Self {
        Self {
            bounds,
            area: bounds.area(),
            child,
        }
    }

    /// Replaces the cached bounds after the child's contents changed.
    pub(crate) fn adjust(&mut self, bounds: BoundingBox) {
        self.bounds = bounds;
        self.area = bounds.area();
    }
}

/// One slot of a node.
///
/// Leaf nodes hold only `Leaf` entries and branch nodes only `Branch`
/// entries; the accessors panic on a mismatch because mixing them is a
/// structural bug, not a recoverable state.
#[derive(Debug)]
pub(crate) enum Entry<S> {
    Leaf(LeafEntry<S>),
    Branch(BranchEntry),
}

impl<S> Entry<S> {
    pub(crate) fn bounds(&self) -> &BoundingBox {
        match self {
            Self::Leaf(e) => &e.bounds,
            Self::Branch(e) => &e.bounds,
        }
    }

    pub(crate) fn as_leaf(&self) -> &LeafEntry<S> {
        match self {
            Self::Leaf(e) => e,
            Self::Branch(_) => panic!("branch entry in a leaf node"),
        }
    }

    pub(crate) fn as_branch(&self) -> &BranchEntry {
        match self {
            Self::Branch(e) => e,
            Self::Leaf(_) => panic!("leaf entry in a branch node"),
        }
    }

    pub(crate) fn as_branch_mut(&mut self) -> &mut BranchEntry {
        match self {
            Self::Branch(e) => e,
            Self::Leaf(_) => panic!("leaf entry in a branch node"),
        }
    }
}

/// A tree node: a leaf (level 0) holding shapes or a branch holding children.
#[derive(Debug)]
pub(crate) struct Node<S> {
    pub(crate) parent: Option<NodeId>,
    pub(crate) level: usize,
    pub(crate) entries: Vec<Entry<S>>,
}

impl<S> Node<S> {
    pub(crate) fn new(level: usize, max_entries: usize) -> Self {
        Self {
            parent: None,
            level,
            entries: Vec::with_capacity(max_entries),
        }
    }

    pub(crate) fn is_leaf(&self) -> bool {
        self.level == 0
    }

    /// The smallest box covering every entry, or `None` for an empty node.
    ///
    /// Folds the entries in slot order. Cached parent boxes are always
    /// produced by this fold, so recomputing one yields a bitwise identical
    /// box.
    pub(crate) fn bounds(&self) -> Option<BoundingBox> {
        let mut builder = BoundingBoxBuilder::new();
        for entry in &self.entries {
            builder.add(entry.bounds());
        }
        builder.build()
    }
}

/// The area growth `entry` would need to also cover `with`.
pub(crate) fn enlargement(entry: &BranchEntry, with: &BoundingBox) -> f64 {
    entry.bounds.join(with).area() - entry.area
}
