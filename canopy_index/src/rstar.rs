// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The R*-tree refinements: overlap-aware descent, margin-driven splits, and
//! forced reinsertion.

use alloc::vec::Vec;
use core::fmt;

use log::debug;

use crate::node::{Entry, Node, NodeId, enlargement};
use crate::tree::{Policy, TreeCore};
use crate::{BoundingBox, BoundingBoxBuilder, Error, Point, Shape};

/// How many of the least-enlargement children are worth the quadratic
/// overlap computation during descent.
const OVERLAP_COST_ENTRIES: usize = 32;

/// A dynamic 2D index over shapes using the R*-tree insertion strategy.
///
/// The public surface matches [`RTree`](crate::RTree); only the insertion
/// heuristics differ. Descent at the level above the leaves minimizes overlap
/// enlargement instead of pure area enlargement, splits pick the axis with
/// the smallest total margin and the distribution with the least overlap, and
/// the first overflow at each level evicts the entries farthest from the node
/// centre and reinserts them instead of splitting.
///
/// # Example
///
/// ```
/// use canopy_index::{BoundingBox, Point, RsTree, Shape};
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
/// let mut tree = RsTree::new(8, 4)?;
/// tree.insert(Rect(BoundingBox::new(0.0, 0.0, 10.0, 10.0)?));
/// tree.insert(Rect(BoundingBox::new(20.0, 0.0, 30.0, 10.0)?));
///
/// assert_eq!(tree.search_point(Point::new(5.0, 5.0)).len(), 1);
/// assert!(tree.delete(&Rect(BoundingBox::new(20.0, 0.0, 30.0, 10.0)?)));
/// assert_eq!(tree.len(), 1);
/// # Ok::<(), canopy_index::Error>(())
/// ```
pub struct RsTree<S> {
    core: TreeCore<S>,
}

impl<S: Shape> RsTree<S> {
    /// Creates an empty tree holding at most `max_entries` and, except for
    /// the root, at least `min_entries` entries per node.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEntryLimits`] unless `max_entries > 1` and
    /// `min_entries` is in `1..=max_entries / 2`.
    pub fn new(max_entries: usize, min_entries: usize) -> Result<Self, Error> {
        Ok(Self {
            core: TreeCore::new(max_entries, min_entries, Policy::RStar)?,
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

impl<S> fmt::Debug for RsTree<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsTree")
            .field("len", &self.core.len())
            .field("height", &self.core.height())
            .finish_non_exhaustive()
    }
}

impl<S> TreeCore<S> {
    /// Picks the child at the level above the leaves whose overlap with its
    /// siblings grows least when absorbing `bounds`.
    ///
    /// Only the [`OVERLAP_COST_ENTRIES`] least-enlargement children pay the
    /// quadratic sibling scan; ties fall back to area enlargement and then
    /// absolute area, the same chain the plain descent uses.
    pub(crate) fn overlap_aware_child(&self, node: &Node<S>, bounds: &BoundingBox) -> NodeId {
        let mut ranked: Vec<(f64, f64, usize)> = node
            .entries
            .iter()
            .enumerate()
            .map(|(slot, entry)| {
                let branch = entry.as_branch();
                (enlargement(branch, bounds), branch.area, slot)
            })
            .collect();
        ranked.sort_by(|l, r| l.0.total_cmp(&r.0).then(l.1.total_cmp(&r.1)));
        ranked.truncate(OVERLAP_COST_ENTRIES);

        let mut best: Option<(f64, f64, f64, NodeId)> = None;
        for (delta, area, slot) in ranked {
            let branch = node.entries[slot].as_branch();
            let grown = branch.bounds.join(bounds);
            let mut overlap_delta = 0.0;
            for (sibling_slot, sibling) in node.entries.iter().enumerate() {
                if sibling_slot == slot {
                    continue;
                }
                let sibling = sibling.as_branch().bounds;
                let grown_overlap = grown.overlap_area(&sibling);
                if grown_overlap == 0.0 {
                    continue;
                }
                overlap_delta += grown_overlap - branch.bounds.overlap_area(&sibling);
            }
            let better = best.is_none_or(|(o, d, a, _)| {
                overlap_delta < o
                    || (overlap_delta == o && (delta < d || (delta == d && area < a)))
            });
            if better {
                best = Some((overlap_delta, delta, area, branch.child));
            }
        }
        best.expect("branch node has no entries").3
    }

    /// Splits `id` and the extra `entry` along the axis with the smallest
    /// total margin, at the distribution with the least overlap.
    pub(crate) fn split_min_overlap(&mut self, id: NodeId, entry: Entry<S>) -> NodeId {
        let mut candidates: Vec<Entry<S>> = self.node_mut(id).entries.drain(..).collect();
        candidates.push(entry);

        let (order, split) = choose_distribution(&candidates, self.min_entries);
        let mut slots: Vec<Option<Entry<S>>> = candidates.into_iter().map(Some).collect();
        let take = |slots: &mut Vec<Option<Entry<S>>>, indices: &[usize]| {
            indices
                .iter()
                .map(|&i| slots[i].take().expect("distribution index repeated"))
                .collect::<Vec<_>>()
        };
        let first = take(&mut slots, &order[..split]);
        let second = take(&mut slots, &order[split..]);
        self.apply_split(id, first, second)
    }

    /// Resolves an overflow of `id` by forced reinsertion on the first
    /// overflow at this node's level, by a split otherwise.
    ///
    /// The root always splits: reinserting from the root back into itself
    /// would spend the budget without changing the structure. A maximum
    /// fanout below 4 makes the 30% eviction count zero, and rather than
    /// dropping entries the node splits then too.
    pub(crate) fn treat_overflow(&mut self, id: NodeId, entry: Entry<S>, reinsert_allowed: bool) {
        let evict = (self.max_entries * 3) / 10;
        let parent = self.node(id).parent;
        let Some(parent) = parent.filter(|_| reinsert_allowed && evict > 0) else {
            self.split_and_adjust(id, entry);
            return;
        };

        let centre = self.parent_entry_bounds(parent, id).centre();
        let level = self.node(id).level;
        let mut candidates: Vec<Entry<S>> = self.node_mut(id).entries.drain(..).collect();
        candidates.push(entry);
        candidates.sort_by(|l, r| {
            let dl = l.bounds().centre().distance_squared(centre);
            let dr = r.bounds().centre().distance_squared(centre);
            dr.total_cmp(&dl)
        });

        // Farthest `evict` entries leave the node; the rest stay put.
        let keep = candidates.split_off(evict);
        for e in keep {
            self.push_entry(id, e);
        }
        self.adjust_upward(id);
        debug!("forced reinsertion of {evict} entries at level {level}");

        for e in candidates {
            self.insert_entry(e, level, false);
        }
    }
}

/// One way of splitting a sorted candidate list in two.
struct Distribution {
    split: usize,
    margin: f64,
    overlap: f64,
    area: f64,
}

/// Evaluates the four sort orders and picks the winning distribution.
///
/// Returns the chosen order as an index permutation and the first-group size
/// to split it at. The x and y axes each contribute the distributions of two
/// orders, sorted by lower and by upper bound; the axis whose distributions
/// sum to the smaller total margin is split, at the distribution with the
/// least overlap between the two group boxes, ties going to the smaller
/// combined area.
fn choose_distribution<S>(candidates: &[Entry<S>], min_entries: usize) -> (Vec<usize>, usize) {
    let mut orders = [
        sorted_order(candidates, |bb| bb.min_x(), false),
        sorted_order(candidates, |bb| bb.max_x(), true),
        sorted_order(candidates, |bb| bb.min_y(), false),
        sorted_order(candidates, |bb| bb.max_y(), true),
    ];

    let distributions: Vec<Vec<Distribution>> = orders
        .iter()
        .map(|order| distributions(candidates, order, min_entries))
        .collect();
    let total_margin = |range: core::ops::Range<usize>| {
        distributions[range]
            .iter()
            .flatten()
            .map(|d| d.margin)
            .sum::<f64>()
    };
    let axis = if total_margin(0..2) < total_margin(2..4) {
        0
    } else {
        2
    };

    let mut best: Option<(f64, f64, usize, usize)> = None;
    for order in axis..axis + 2 {
        for d in &distributions[order] {
            if best.is_none_or(|(o, a, _, _)| d.overlap < o || (d.overlap == o && d.area < a)) {
                best = Some((d.overlap, d.area, order, d.split));
            }
        }
    }
    let (_, _, order, split) = best.expect("no distributions for a split");
    (core::mem::take(&mut orders[order]), split)
}

/// Candidate indices sorted by a bound, upper bounds descending.
fn sorted_order<S>(
    candidates: &[Entry<S>],
    key: impl Fn(&BoundingBox) -> f64,
    descending: bool,
) -> Vec<usize> {
    let mut order: Vec<usize> = (0..candidates.len()).collect();
    order.sort_by(|&l, &r| {
        let cmp = key(candidates[l].bounds()).total_cmp(&key(candidates[r].bounds()));
        if descending { cmp.reverse() } else { cmp }
    });
    order
}

/// Every legal distribution of one sort order: first-group sizes from
/// `min_entries` up to `len - min_entries`, keeping both groups within the
/// fanout bounds.
fn distributions<S>(
    candidates: &[Entry<S>],
    order: &[usize],
    min_entries: usize,
) -> Vec<Distribution> {
    let n = order.len();
    let mut prefix = Vec::with_capacity(n);
    let mut acc = BoundingBoxBuilder::new();
    for &i in order {
        acc.add(candidates[i].bounds());
        prefix.push(acc);
    }
    let mut suffix = prefix.clone();
    let mut acc = BoundingBoxBuilder::new();
    for (k, &i) in order.iter().enumerate().rev() {
        acc.add(candidates[i].bounds());
        suffix[k] = acc;
    }

    (min_entries..=n - min_entries)
        .map(|split| {
            let first = prefix[split - 1].build().expect("empty first group");
            let second = suffix[split].build().expect("empty second group");
            Distribution {
                split,
                margin: first.margin() + second.margin(),
                overlap: first.overlap_area(&second),
                area: first.area() + second.area(),
            }
        })
        .collect()
}
