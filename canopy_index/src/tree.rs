// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The arena-backed engine shared by both tree flavors.

use alloc::vec;
use alloc::vec::Vec;

use log::debug;

use crate::node::{BranchEntry, Entry, LeafEntry, Node, NodeId};
use crate::{BoundingBox, Error, Point, Shape};

/// Which insertion strategy a tree runs.
///
/// The two strategies share all structural machinery and differ at exactly
/// three seams: how a child is chosen during descent, how an overflowing
/// node is resolved, and how a node is split.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Policy {
    /// Least-enlargement descent with linear seed-pick splits.
    Guttman,
    /// Overlap-aware descent above leaves, margin-driven splits, and forced
    /// reinsertion on first overflow.
    RStar,
}

/// The tree engine behind [`RTree`](crate::RTree) and
/// [`RsTree`](crate::RsTree).
///
/// Nodes live in a slot arena and reference each other by [`NodeId`]. Every
/// structural mutation keeps the cached parent-entry boxes tight: a cached
/// box is always exactly the fold of its child's entries, so invariant
/// checks can compare boxes bitwise.
pub(crate) struct TreeCore<S> {
    pub(crate) nodes: Vec<Option<Node<S>>>,
    pub(crate) free_list: Vec<usize>,
    pub(crate) root: NodeId,
    pub(crate) max_entries: usize,
    pub(crate) min_entries: usize,
    pub(crate) policy: Policy,
    len: usize,
}

impl<S> TreeCore<S> {
    /// Creates an empty tree with the given fanout bounds.
    pub(crate) fn new(max_entries: usize, min_entries: usize, policy: Policy) -> Result<Self, Error> {
        if max_entries <= 1 || min_entries == 0 || min_entries > max_entries / 2 {
            return Err(Error::InvalidEntryLimits {
                min: min_entries,
                max: max_entries,
            });
        }
        Ok(Self {
            nodes: vec![Some(Node::new(0, max_entries))],
            free_list: Vec::new(),
            root: NodeId(0),
            max_entries,
            min_entries,
            policy,
            len: 0,
        })
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node<S> {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<S> {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn alloc_node(&mut self, level: usize) -> NodeId {
        let node = Node::new(level, self.max_entries);
        let idx = if let Some(idx) = self.free_list.pop() {
            self.nodes[idx] = Some(node);
            idx
        } else {
            self.nodes.push(Some(node));
            self.nodes.len() - 1
        };
        #[allow(clippy::cast_possible_truncation, reason = "NodeId uses 32-bit indices by design")]
        NodeId(idx as u32)
    }

    fn free_node(&mut self, id: NodeId) -> Node<S> {
        let node = self.nodes[id.idx()].take().expect("dangling NodeId");
        self.free_list.push(id.idx());
        node
    }

    /// The number of stored shapes.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The number of levels, 1 for a tree that is only a root leaf.
    pub(crate) fn height(&self) -> usize {
        self.node(self.root).level + 1
    }

    /// Inserts `entry` into a node at `level`, resolving overflow per the
    /// policy.
    ///
    /// `reinsert_allowed` is the once-per-level forced-reinsertion budget;
    /// only the R* overflow strategy consults it.
    pub(crate) fn insert_entry(&mut self, entry: Entry<S>, level: usize, reinsert_allowed: bool) {
        let target = self.choose_node(entry.bounds(), level);
        match self.try_add(target, entry) {
            Ok(()) => self.adjust_upward(target),
            Err(entry) => self.handle_overflow(target, entry, reinsert_allowed),
        }
    }

    /// Descends from the root to the node at `level` that should absorb a
    /// box, per the policy's choice at each step.
    fn choose_node(&self, bounds: &BoundingBox, level: usize) -> NodeId {
        let mut id = self.root;
        while self.node(id).level != level {
            id = self.choose_child(id, bounds);
        }
        id
    }

    fn choose_child(&self, id: NodeId, bounds: &BoundingBox) -> NodeId {
        let node = self.node(id);
        match self.policy {
            Policy::RStar if node.level == 1 => self.overlap_aware_child(node, bounds),
            _ => self.least_enlargement_child(node, bounds),
        }
    }

    /// Adds `entry` if the node has room, handing it back on overflow.
    fn try_add(&mut self, id: NodeId, entry: Entry<S>) -> Result<(), Entry<S>> {
        if self.node(id).entries.len() < self.max_entries {
            self.push_entry(id, entry);
            Ok(())
        } else {
            Err(entry)
        }
    }

    /// Appends `entry` without a capacity check, reparenting a branch child.
    pub(crate) fn push_entry(&mut self, id: NodeId, entry: Entry<S>) {
        debug_assert_eq!(
            self.node(id).is_leaf(),
            matches!(entry, Entry::Leaf(_)),
            "entry variant must match node level"
        );
        if let Entry::Branch(ref branch) = entry {
            self.node_mut(branch.child).parent = Some(id);
        }
        self.node_mut(id).entries.push(entry);
    }

    fn handle_overflow(&mut self, id: NodeId, entry: Entry<S>, reinsert_allowed: bool) {
        match self.policy {
            Policy::Guttman => self.split_and_adjust(id, entry),
            Policy::RStar => self.treat_overflow(id, entry, reinsert_allowed),
        }
    }

    /// Splits the overflowing node and links the new sibling into the
    /// parent, cascading upward as needed.
    pub(crate) fn split_and_adjust(&mut self, id: NodeId, entry: Entry<S>) {
        let partner = match self.policy {
            Policy::Guttman => self.split_linear(id, entry),
            Policy::RStar => self.split_min_overlap(id, entry),
        };
        self.link_partner(id, partner);
    }

    fn link_partner(&mut self, id: NodeId, partner: NodeId) {
        let Some(parent) = self.node(id).parent else {
            self.grow_root(id, partner);
            return;
        };
        self.refresh_child_entry(parent, id);
        let bounds = self.node(partner).bounds().expect("split sibling is empty");
        match self.try_add(parent, Entry::Branch(BranchEntry::new(bounds, partner))) {
            Ok(()) => self.adjust_upward(parent),
            // A fresh level grants the R* strategy a fresh reinsertion
            // budget.
            Err(entry) => self.handle_overflow(parent, entry, true),
        }
    }

    /// Replaces the root with a new branch over `first` and `second`.
    fn grow_root(&mut self, first: NodeId, second: NodeId) {
        let level = self.node(first).level + 1;
        let new_root = self.alloc_node(level);
        for child in [first, second] {
            let bounds = self.node(child).bounds().expect("root child is empty");
            self.push_entry(new_root, Entry::Branch(BranchEntry::new(bounds, child)));
        }
        self.root = new_root;
        debug!("root split, height now {}", level + 1);
    }

    /// Moves `second` into a fresh sibling node at `id`'s level, leaving
    /// `first` behind in `id`.
    pub(crate) fn apply_split(
        &mut self,
        id: NodeId,
        first: Vec<Entry<S>>,
        second: Vec<Entry<S>>,
    ) -> NodeId {
        let level = self.node(id).level;
        let partner = self.alloc_node(level);
        self.node_mut(id).entries.clear();
        for entry in first {
            self.push_entry(id, entry);
        }
        for entry in second {
            self.push_entry(partner, entry);
        }
        partner
    }

    /// Recomputes the box cached in `parent`'s entry for child `id`.
    pub(crate) fn refresh_child_entry(&mut self, parent: NodeId, id: NodeId) {
        let bounds = self.node(id).bounds().expect("child node is empty");
        self.node_mut(parent)
            .entries
            .iter_mut()
            .find(|e| e.as_branch().child == id)
            .expect("parent has no entry for child")
            .as_branch_mut()
            .adjust(bounds);
    }

    /// Refreshes cached boxes from `id` up to the root.
    pub(crate) fn adjust_upward(&mut self, mut id: NodeId) {
        while let Some(parent) = self.node(id).parent {
            self.refresh_child_entry(parent, id);
            id = parent;
        }
    }

    /// The box currently cached in `parent` for child `id`.
    pub(crate) fn parent_entry_bounds(&self, parent: NodeId, id: NodeId) -> BoundingBox {
        *self
            .node(parent)
            .entries
            .iter()
            .find(|e| e.as_branch().child == id)
            .expect("parent has no entry for child")
            .bounds()
    }

    /// Finds the first leaf holding an entry equal to `shape` with box
    /// `bounds`, pruning by box overlap.
    fn find_leaf(&self, id: NodeId, bounds: &BoundingBox, shape: &S) -> Option<(NodeId, usize)>
    where
        S: PartialEq,
    {
        let node = self.node(id);
        if node.is_leaf() {
            let slot = node.entries.iter().position(|e| {
                let leaf = e.as_leaf();
                leaf.bounds == *bounds && leaf.shape == *shape
            })?;
            return Some((id, slot));
        }
        for entry in &node.entries {
            let branch = entry.as_branch();
            if branch.bounds.overlaps(bounds)
                && let Some(found) = self.find_leaf(branch.child, bounds, shape)
            {
                return Some(found);
            }
        }
        None
    }

    /// Walks from `leaf` to the root, detaching nodes that fell below the
    /// minimum fanout and re-tightening the surviving boxes, then reinserts
    /// the orphaned entries at their original level.
    fn condense(&mut self, leaf: NodeId) {
        let mut orphans: Vec<(usize, Vec<Entry<S>>)> = Vec::new();
        let mut id = leaf;
        while let Some(parent) = self.node(id).parent {
            if self.node(id).entries.len() < self.min_entries {
                self.detach_child(parent, id);
                let node = self.free_node(id);
                orphans.push((node.level, node.entries));
            } else {
                self.refresh_child_entry(parent, id);
            }
            id = parent;
        }
        for (level, entries) in orphans {
            for entry in entries {
                self.insert_entry(entry, level, true);
            }
        }
    }

    fn detach_child(&mut self, parent: NodeId, id: NodeId) {
        let node = self.node_mut(parent);
        let slot = node
            .entries
            .iter()
            .position(|e| e.as_branch().child == id)
            .expect("parent has no entry for child");
        node.entries.remove(slot);
    }

    /// Collapses a branch root left with fewer than two entries onto its
    /// sole child. Runs at most once per delete.
    fn maybe_collapse_root(&mut self) {
        let root = self.node(self.root);
        if root.level == 0 || root.entries.len() >= 2 {
            return;
        }
        let child = root
            .entries
            .first()
            .expect("branch root has no entries")
            .as_branch()
            .child;
        self.free_node(self.root);
        self.root = child;
        self.node_mut(child).parent = None;
        debug!("root collapse, height now {}", self.node(child).level + 1);
    }
}

impl<S: Shape> TreeCore<S> {
    pub(crate) fn insert_shape(&mut self, shape: S) {
        self.len += 1;
        self.insert_entry(Entry::Leaf(LeafEntry::new(shape)), 0, true);
    }

    /// Removes the first stored shape equal to `shape`, returning whether
    /// one was found.
    pub(crate) fn delete_shape(&mut self, shape: &S) -> bool
    where
        S: PartialEq,
    {
        let bounds = shape.bounding_box();
        let Some((leaf, slot)) = self.find_leaf(self.root, &bounds, shape) else {
            return false;
        };
        self.node_mut(leaf).entries.remove(slot);
        self.len -= 1;
        self.condense(leaf);
        self.maybe_collapse_root();
        true
    }

    /// Collects every stored shape that contains `p`.
    ///
    /// The cached boxes prune the descent; a shape's own `contains`
    /// predicate decides membership. Results come in entry iteration order.
    pub(crate) fn search_point(&self, p: Point) -> Vec<&S> {
        let mut results = Vec::new();
        self.collect_point(self.root, p, &mut results);
        results
    }

    fn collect_point<'t>(&'t self, id: NodeId, p: Point, results: &mut Vec<&'t S>) {
        let node = self.node(id);
        if node.is_leaf() {
            for entry in &node.entries {
                let leaf = entry.as_leaf();
                if leaf.bounds.contains_point(p) && leaf.shape.contains_point(p) {
                    results.push(&leaf.shape);
                }
            }
            return;
        }
        for entry in &node.entries {
            let branch = entry.as_branch();
            if branch.bounds.contains_point(p) {
                self.collect_point(branch.child, p, results);
            }
        }
    }

    /// Collects every stored shape that overlaps `bb`.
    pub(crate) fn search_box(&self, bb: &BoundingBox) -> Vec<&S> {
        let mut results = Vec::new();
        self.collect_box(self.root, bb, &mut results);
        results
    }

    fn collect_box<'t>(&'t self, id: NodeId, bb: &BoundingBox, results: &mut Vec<&'t S>) {
        let node = self.node(id);
        if node.is_leaf() {
            for entry in &node.entries {
                let leaf = entry.as_leaf();
                if leaf.bounds.overlaps(bb) && leaf.shape.overlaps(bb) {
                    results.push(&leaf.shape);
                }
            }
            return;
        }
        for entry in &node.entries {
            let branch = entry.as_branch();
            if branch.bounds.overlaps(bb) {
                self.collect_box(branch.child, bb, results);
            }
        }
    }
}

/// Test helpers shared by the tree test modules.
#[cfg(test)]
pub(crate) mod test_support {
    use super::TreeCore;
    use crate::node::{Entry, NodeId};
    use crate::{BoundingBox, Shape};

    /// An axis-aligned rectangle, the minimal indexable shape.
    #[derive(Clone, Debug, PartialEq)]
    pub(crate) struct TestRect {
        bounds: BoundingBox,
    }

    impl TestRect {
        pub(crate) fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
            Self {
                bounds: BoundingBox::new(min_x, min_y, max_x, max_y).unwrap(),
            }
        }
    }

    impl Shape for TestRect {
        fn bounding_box(&self) -> BoundingBox {
            self.bounds
        }

        fn contains(&self, x: f64, y: f64) -> bool {
            self.bounds.contains(x, y)
        }

        fn overlaps(&self, bb: &BoundingBox) -> bool {
            self.bounds.overlaps(bb)
        }
    }

    /// Walks the whole tree asserting the structural invariants: parent
    /// links, level steps of one, fanout bounds, tight cached boxes, and
    /// arena slot accounting.
    pub(crate) fn check_invariants<S: Shape>(tree: &TreeCore<S>) {
        assert!(tree.node(tree.root).parent.is_none(), "root has a parent");
        let mut seen = 0;
        walk(tree, tree.root, &mut seen);
        assert_eq!(seen, tree.len(), "len out of sync with stored shapes");
        let live = tree.nodes.iter().filter(|slot| slot.is_some()).count();
        assert_eq!(
            live + tree.free_list.len(),
            tree.nodes.len(),
            "arena slot accounting broken"
        );
    }

    fn walk<S: Shape>(tree: &TreeCore<S>, id: NodeId, seen: &mut usize) {
        let node = tree.node(id);
        if id != tree.root {
            assert!(
                node.entries.len() >= tree.min_entries,
                "node below minimum fanout"
            );
        } else if node.level > 0 {
            assert!(node.entries.len() >= 2, "branch root below two entries");
        }
        assert!(
            node.entries.len() <= tree.max_entries,
            "node above maximum fanout"
        );
        for entry in &node.entries {
            match entry {
                Entry::Leaf(leaf) => {
                    assert!(node.is_leaf(), "leaf entry above level 0");
                    assert_eq!(leaf.bounds, leaf.shape.bounding_box(), "stale leaf box");
                    *seen += 1;
                }
                Entry::Branch(branch) => {
                    assert!(!node.is_leaf(), "branch entry at level 0");
                    let child = tree.node(branch.child);
                    assert_eq!(child.parent, Some(id), "child parent link broken");
                    assert_eq!(child.level + 1, node.level, "level step is not one");
                    assert_eq!(Some(branch.bounds), child.bounds(), "loose branch box");
                    assert_eq!(branch.area, branch.bounds.area(), "stale cached area");
                    walk(tree, branch.child, seen);
                }
            }
        }
    }
}
