// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The classic R-tree: least-enlargement descent and linear-cost splits.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::node::{Entry, Node, NodeId, enlargement};
use crate::tree::{Policy, TreeCore};
use crate::{BoundingBox, BoundingBoxBuilder, Error, Point, Shape};

/// A dynamic 2D index over shapes using the classic R-tree insertion
/// strategy.
///
/// Insertion descends to the leaf whose box needs the least area enlargement
/// and resolves overflow by a linear-cost seed split. Deletion condenses
/// under-filled nodes and reinserts their entries. Both queries prune by the
/// cached node boxes and then ask each surviving shape itself.
///
/// # Example
///
/// ```
/// use canopy_index::{BoundingBox, Point, RTree, Shape};
/// # #[derive(PartialEq)]
/// # struct Rect(BoundingBox);
/// # impl Shape for Rect {
/// #     fn bounding_box(&self) -> BoundingBox {
/// #         self.0
/// #     }
/// #     fn contains(&self, x: f64, y: f64) -> bool {
/// #         self.0.contains(x, y)
/// #     }
/// #     fn overlaps(&self, bb: &BoundingBox) -> bool {
/// #         self.0.overlaps(bb)
/// #     }
/// # }
/// let mut tree = RTree::new(8, 4)?;
/// tree.insert(Rect(BoundingBox::new(0.0, 0.0, 10.0, 10.0)?));
/// tree.insert(Rect(BoundingBox::new(20.0, 0.0, 30.0, 10.0)?));
///
/// assert_eq!(tree.search_point(Point::new(5.0, 5.0)).len(), 1);
/// assert!(tree.delete(&Rect(BoundingBox::new(20.0, 0.0, 30.0, 10.0)?)));
/// assert_eq!(tree.len(), 1);
/// # Ok::<(), canopy_index::Error>(())
/// ```
pub struct RTree<S> {
    core: TreeCore<S>,
}

impl<S: Shape> RTree<S> {
    /// Creates an empty tree holding at most `max_entries` and, except for
    /// the root, at least `min_entries` entries per node.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEntryLimits`] unless `max_entries > 1` and
    /// `min_entries` is in `1..=max_entries / 2`.
    pub fn new(max_entries: usize, min_entries: usize) -> Result<Self, Error> {
        Ok(Self {
            core: TreeCore::new(max_entries, min_entries, Policy::Guttman)?,
        })
    }

    /// Inserts a shape.
    pub fn insert(&mut self, shape: S) {
        self.core.insert_shape(shape);
    }

    /// Removes the first stored shape equal to `shape`.
    ///
    /// Returns `false` if no equal shape is stored. With several equal
    /// shapes present, which one is removed depends on traversal order.
    pub fn delete(&mut self, shape: &S) -> bool
    where
        S: PartialEq,
    {
        self.core.delete_shape(shape)
    }

    /// Returns every stored shape that contains the point.
    pub fn search_point(&self, p: Point) -> Vec<&S> {
        self.core.search_point(p)
    }

    /// Returns every stored shape that overlaps the box.
    pub fn search_box(&self, bb: &BoundingBox) -> Vec<&S> {
        self.core.search_box(bb)
    }

    /// The number of stored shapes.
    pub fn len(&self) -> usize {
        self.core.len()
    }

    /// Returns `true` if no shapes are stored.
    pub fn is_empty(&self) -> bool {
        self.core.is_empty()
    }

    /// The number of tree levels, 1 for an empty tree.
    pub fn height(&self) -> usize {
        self.core.height()
    }
}

impl<S> fmt::Debug for RTree<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RTree")
            .field("len", &self.core.len())
            .field("height", &self.core.height())
            .finish_non_exhaustive()
    }
}

impl<S> TreeCore<S> {
    /// Picks the child whose box grows least to absorb `bounds`, ties going
    /// to the smaller box.
    pub(crate) fn least_enlargement_child(
        &self,
        node: &Node<S>,
        bounds: &BoundingBox,
    ) -> NodeId {
        let mut best: Option<(f64, f64, NodeId)> = None;
        for entry in &node.entries {
            let branch = entry.as_branch();
            let delta = enlargement(branch, bounds);
            if best.is_none_or(|(d, a, _)| delta < d || (delta == d && branch.area < a)) {
                best = Some((delta, branch.area, branch.child));
            }
        }
        best.expect("branch node has no entries").2
    }

    /// Splits `id` and the extra `entry` into two groups seeded by the most
    /// separated pair, assigning the rest greedily by least group growth.
    pub(crate) fn split_linear(&mut self, id: NodeId, entry: Entry<S>) -> NodeId {
        let mut candidates: Vec<Entry<S>> = self.node_mut(id).entries.drain(..).collect();
        candidates.push(entry);

        let (first_seed, second_seed) = pick_seeds(&candidates);
        let mut slots: Vec<Option<Entry<S>>> = candidates.into_iter().map(Some).collect();
        let mut group1 = EntryGroup::new(slots[first_seed].take().expect("seed slot taken"));
        let mut group2 = EntryGroup::new(slots[second_seed].take().expect("seed slot taken"));

        let remainder: Vec<Entry<S>> = slots.into_iter().flatten().collect();
        let total = remainder.len();
        for (i, entry) in remainder.into_iter().enumerate() {
            // Entries left to place, this one included.
            let remaining = total - i;
            if group1.entries.len() + remaining <= self.min_entries {
                group1.push(entry);
            } else if group2.entries.len() + remaining <= self.min_entries {
                group2.push(entry);
            } else {
                let d1 = group1.delta(entry.bounds());
                let d2 = group2.delta(entry.bounds());
                if d1 < d2 || (d1 == d2 && group1.bounds.area() <= group2.bounds.area()) {
                    group1.push(entry);
                } else {
                    group2.push(entry);
                }
            }
        }

        self.apply_split(id, group1.entries, group2.entries)
    }
}

/// One side of an in-progress linear split.
struct EntryGroup<S> {
    bounds: BoundingBoxBuilder,
    entries: Vec<Entry<S>>,
}

impl<S> EntryGroup<S> {
    fn new(seed: Entry<S>) -> Self {
        let mut bounds = BoundingBoxBuilder::new();
        bounds.add(seed.bounds());
        Self {
            bounds,
            entries: vec![seed],
        }
    }

    /// The area growth this group would need to also cover `bb`.
    fn delta(&self, bb: &BoundingBox) -> f64 {
        let mut probe = self.bounds;
        probe.add(bb);
        probe.area() - self.bounds.area()
    }

    fn push(&mut self, entry: Entry<S>) {
        self.bounds.add(entry.bounds());
        self.entries.push(entry);
    }
}

/// Picks the two split seeds: per axis, the entry with the lowest high edge
/// and the one with the highest low edge; the axis with the larger
/// separation relative to the total span wins, ties going to y.
///
/// When every candidate shares the chosen axis's edges the two picks
/// coincide; fall back to the other axis's pair and finally to the first two
/// candidates.
fn pick_seeds<S>(candidates: &[Entry<S>]) -> (usize, usize) {
    let mut low_high_x = 0;
    let mut high_low_x = 0;
    let mut low_high_y = 0;
    let mut high_low_y = 0;
    let mut span = BoundingBoxBuilder::new();
    for (i, entry) in candidates.iter().enumerate() {
        let bb = entry.bounds();
        if bb.max_x() < candidates[low_high_x].bounds().max_x() {
            low_high_x = i;
        }
        if bb.min_x() > candidates[high_low_x].bounds().min_x() {
            high_low_x = i;
        }
        if bb.max_y() < candidates[low_high_y].bounds().max_y() {
            low_high_y = i;
        }
        if bb.min_y() > candidates[high_low_y].bounds().min_y() {
            high_low_y = i;
        }
        span.add(bb);
    }

    let sep_x = (candidates[high_low_x].bounds().min_x()
        - candidates[low_high_x].bounds().max_x())
        / span.width();
    let sep_y = (candidates[high_low_y].bounds().min_y()
        - candidates[low_high_y].bounds().max_y())
        / span.height();

    let (seeds, fallback) = if sep_x > sep_y {
        ((low_high_x, high_low_x), (low_high_y, high_low_y))
    } else {
        ((low_high_y, high_low_y), (low_high_x, high_low_x))
    };
    if seeds.0 != seeds.1 {
        seeds
    } else if fallback.0 != fallback.1 {
        fallback
    } else {
        (0, 1)
    }
}
