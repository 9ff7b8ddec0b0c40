// Copyright 2026 the Trademap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arena-backed hierarchy with bottom-up sums and value-sorted children.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Ordering;

use trademap_records::AggregatedTree;

/// Index of a node inside a [`Hierarchy`].
///
/// Ids are only meaningful for the hierarchy that produced them. Re-rooting
/// with [`Hierarchy::find_by_category`] produces a new arena with fresh ids.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NodeId(u32);

impl NodeId {
    const ROOT: Self = Self(0);

    fn from_index(idx: usize) -> Self {
        Self(u32::try_from(idx).expect("too many hierarchy nodes for NodeId (u32)"))
    }

    /// Returns this id as an index into the arena.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Whether a node carries its own amount or derives it from children.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    /// A leaf category with its aggregated amount.
    Leaf(f64),
    /// A grouping node; its value is the sum of these children, largest first.
    Internal(Vec<NodeId>),
}

/// One node of a [`Hierarchy`].
#[derive(Clone, Debug, PartialEq)]
pub struct HierarchyNode {
    name: String,
    value: f64,
    depth: usize,
    parent: Option<NodeId>,
    kind: NodeKind,
}

impl HierarchyNode {
    /// Category name; empty for the synthetic root of a full build.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Own amount for a leaf, sum of descendant leaves otherwise.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Distance from the root of this hierarchy.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Parent id, used for lookup only.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Leaf amount or children.
    #[must_use]
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Children sorted by descending value; empty for leaves.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Leaf(_) => &[],
            NodeKind::Internal(children) => children,
        }
    }

    /// Returns `true` if the node has at least one child.
    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children().is_empty()
    }

    /// Returns `true` for leaf categories.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }
}

/// An immutable category tree.
///
/// The root lives at [`Hierarchy::root`]. Every internal node's value equals
/// the sum of its children, and children are ordered by descending value with
/// ties kept in their original key order. That ordering is the rank order used
/// by [`compare_ranks`](crate::compare_ranks).
#[derive(Clone, Debug, PartialEq)]
pub struct Hierarchy {
    nodes: Vec<HierarchyNode>,
}

impl Hierarchy {
    /// Builds a hierarchy from an aggregation.
    ///
    /// The root is a nameless node at depth 0; the three category levels sit at
    /// depths 1 to 3. An empty aggregation yields a root with no children and
    /// value 0.
    #[must_use]
    pub fn build(tree: &AggregatedTree) -> Self {
        let mut b = Builder::default();
        let root = b.push_internal("", 0, None);
        for (d1, branch) in tree.groups().iter() {
            let n1 = b.push_internal(d1, 1, Some(root));
            for (d2, leaves) in branch.iter() {
                let n2 = b.push_internal(d2, 2, Some(n1));
                for (d3, value) in leaves.iter() {
                    b.push_leaf(d3, *value, 3, n2);
                }
            }
        }
        let out = b.finish();
        tracing::debug!(
            nodes = out.len(),
            total = out.node(out.root()).value(),
            "built category hierarchy"
        );
        out
    }

    /// Builds a two-level hierarchy: a root named `name` over leaf children.
    ///
    /// Handy for comparison panels and tests that do not need three levels.
    #[must_use]
    pub fn flat<'a>(name: &str, leaves: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        let mut b = Builder::default();
        let root = b.push_internal(name, 0, None);
        for (leaf, value) in leaves {
            b.push_leaf(leaf, value, 1, root);
        }
        b.finish()
    }

    /// The root id.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Number of nodes, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a hierarchy has at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the node for `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` did not come from this hierarchy.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &HierarchyNode {
        &self.nodes[id.index()]
    }

    /// Returns the node for `id`, or `None` if it is out of range.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&HierarchyNode> {
        self.nodes.get(id.index())
    }

    /// Sorted children of `id`.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).children()
    }

    /// Total of the whole hierarchy.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.node(self.root()).value
    }

    /// Percentage of the root's value held by `id`.
    ///
    /// Returns `0.0` when the root total is zero.
    #[must_use]
    pub fn share(&self, id: NodeId) -> f64 {
        let total = self.total();
        if total == 0.0 {
            0.0
        } else {
            self.node(id).value / total * 100.0
        }
    }

    /// Iterates `id` and its descendants, each node before its children.
    #[must_use]
    pub fn pre_order(&self, id: NodeId) -> PreOrder<'_> {
        PreOrder {
            tree: self,
            stack: vec![id],
        }
    }

    /// `id` and its descendants level by level.
    #[must_use]
    pub fn breadth_first(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = vec![id];
        let mut i = 0;
        while let Some(&next) = out.get(i) {
            out.extend_from_slice(self.children(next));
            i += 1;
        }
        out
    }

    /// The leaves under `id`, in pre-order.
    pub fn leaves(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.pre_order(id).filter(|&n| !self.node(n).has_children())
    }

    /// `id` followed by each of its ancestors up to the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        core::iter::successors(Some(id), |&n| self.node(n).parent)
    }

    /// Finds the first node named `name` in pre-order.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.pre_order(self.root())
            .find(|&n| self.node(n).name == name)
    }

    /// The first child of `id` named `name`.
    #[must_use]
    pub fn child_named(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|&c| self.node(c).name == name)
    }

    /// Re-roots the view at the first node named `name`.
    ///
    /// Searches in pre-order (self before children, children in sorted order)
    /// and returns a structural copy of the match's subtree as an independent
    /// hierarchy: its root has depth 0 and no parent. The original is left
    /// untouched. An empty `name` matches the nameless root of a full build.
    ///
    /// `None` is the expected outcome for a category that is absent from this
    /// snapshot; callers fall back to the previous or root view.
    #[must_use]
    pub fn find_by_category(&self, name: &str) -> Option<Self> {
        self.find(name).map(|id| self.subtree(id))
    }

    /// Copies the subtree at `id` into a new, detached hierarchy.
    #[must_use]
    pub fn subtree(&self, id: NodeId) -> Self {
        let mut nodes = Vec::new();
        self.copy_into(id, None, 0, &mut nodes);
        Self { nodes }
    }

    fn copy_into(
        &self,
        id: NodeId,
        parent: Option<NodeId>,
        depth: usize,
        out: &mut Vec<HierarchyNode>,
    ) -> NodeId {
        let src = self.node(id);
        let new_id = NodeId::from_index(out.len());
        out.push(HierarchyNode {
            name: src.name.clone(),
            value: src.value,
            depth,
            parent,
            kind: match src.kind {
                NodeKind::Leaf(v) => NodeKind::Leaf(v),
                NodeKind::Internal(_) => NodeKind::Internal(Vec::new()),
            },
        });
        let children: Vec<NodeId> = src
            .children()
            .iter()
            .map(|&c| self.copy_into(c, Some(new_id), depth + 1, out))
            .collect();
        if let NodeKind::Internal(slot) = &mut out[new_id.index()].kind {
            *slot = children;
        }
        new_id
    }
}

/// Pre-order traversal over a [`Hierarchy`].
#[derive(Clone, Debug)]
pub struct PreOrder<'a> {
    tree: &'a Hierarchy,
    stack: Vec<NodeId>,
}

impl Iterator for PreOrder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}

#[derive(Default)]
struct Builder {
    nodes: Vec<HierarchyNode>,
}

impl Builder {
    fn push(&mut self, name: &str, depth: usize, parent: Option<NodeId>, kind: NodeKind) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        let value = match kind {
            NodeKind::Leaf(v) => v,
            NodeKind::Internal(_) => 0.0,
        };
        self.nodes.push(HierarchyNode {
            name: name.into(),
            value,
            depth,
            parent,
            kind,
        });
        if let Some(p) = parent
            && let NodeKind::Internal(children) = &mut self.nodes[p.index()].kind
        {
            children.push(id);
        }
        id
    }

    fn push_internal(&mut self, name: &str, depth: usize, parent: Option<NodeId>) -> NodeId {
        self.push(name, depth, parent, NodeKind::Internal(Vec::new()))
    }

    fn push_leaf(&mut self, name: &str, value: f64, depth: usize, parent: NodeId) -> NodeId {
        self.push(name, depth, Some(parent), NodeKind::Leaf(value))
    }

    fn finish(mut self) -> Hierarchy {
        // Children are always pushed after their parent, so a reverse sweep sees
        // every child's final value before the parent sums it.
        for idx in (0..self.nodes.len()).rev() {
            let NodeKind::Internal(children) = &self.nodes[idx].kind else {
                continue;
            };
            let mut sorted = children.clone();
            let sum = sorted.iter().map(|c| self.nodes[c.index()].value).sum();
            // `sort_by` is stable: equal values keep their key insertion order.
            sorted.sort_by(|a, b| {
                let av = self.nodes[a.index()].value;
                let bv = self.nodes[b.index()].value;
                bv.partial_cmp(&av).unwrap_or(Ordering::Equal)
            });
            let node = &mut self.nodes[idx];
            node.value = sum;
            node.kind = NodeKind::Internal(sorted);
        }
        Hierarchy { nodes: self.nodes }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    fn sample() -> Hierarchy {
        let mut agg = AggregatedTree::new();
        agg.add("A", "B", "C", 100.0);
        agg.add("A", "B", "D", 50.0);
        agg.add("E", "F", "G", 400.0);
        agg.add("E", "H", "I", 10.0);
        Hierarchy::build(&agg)
    }

    fn names(h: &Hierarchy, ids: &[NodeId]) -> Vec<String> {
        ids.iter().map(|&i| h.node(i).name().into()).collect()
    }

    #[test]
    fn sums_bottom_up_and_sorts_descending() {
        let h = sample();
        let root = h.node(h.root());
        assert_eq!(root.value(), 560.0);
        assert_eq!(root.name(), "");
        assert_eq!(names(&h, root.children()), ["E", "A"]);

        let e = root.children()[0];
        assert_eq!(h.node(e).value(), 410.0);
        assert_eq!(h.node(e).depth(), 1);
        assert_eq!(names(&h, h.children(e)), ["F", "H"]);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let h = Hierarchy::flat("root", [("x", 1.0), ("y", 2.0), ("z", 1.0), ("w", 2.0)]);
        assert_eq!(names(&h, h.children(h.root())), ["y", "w", "x", "z"]);
    }

    #[test]
    fn empty_aggregation_is_a_childless_root() {
        let h = Hierarchy::build(&AggregatedTree::new());
        assert_eq!(h.len(), 1);
        assert_eq!(h.total(), 0.0);
        assert!(!h.node(h.root()).has_children());
        assert_eq!(h.share(h.root()), 0.0);
    }

    #[test]
    fn pre_order_visits_parents_first_in_sorted_order() {
        let h = sample();
        let order: Vec<String> = h
            .pre_order(h.root())
            .map(|n| h.node(n).name().into())
            .collect();
        assert_eq!(order, ["", "E", "F", "G", "H", "I", "A", "B", "C", "D"]);
        let bfs = h.breadth_first(h.root());
        assert_eq!(names(&h, &bfs), ["", "E", "A", "F", "H", "B", "G", "I", "C", "D"]);
    }

    #[test]
    fn find_by_category_detaches_copy() {
        let h = sample();
        let b = h.find_by_category("B").unwrap();
        let root = b.node(b.root());
        assert_eq!(root.name(), "B");
        assert_eq!(root.depth(), 0);
        assert_eq!(root.parent(), None);
        assert_eq!(root.value(), 150.0);
        assert_eq!(names(&b, root.children()), ["C", "D"]);
        assert_eq!(b.node(root.children()[0]).depth(), 1);
        // The original still has B under A at depth 2.
        let original = h.find("B").unwrap();
        assert_eq!(h.node(original).depth(), 2);
        assert!(h.node(original).parent().is_some());
    }

    #[test]
    fn child_named_looks_one_level_down() {
        let h = sample();
        let e = h.child_named(h.root(), "E").unwrap();
        assert_eq!(h.node(e).value(), 410.0);
        assert!(h.child_named(e, "G").is_none());
        assert!(h.child_named(h.root(), "B").is_none());
    }

    #[test]
    fn find_by_category_misses_and_root() {
        let h = sample();
        assert!(h.find_by_category("nope").is_none());
        let whole = h.find_by_category("").unwrap();
        assert_eq!(whole.len(), h.len());
        assert_eq!(whole.total(), h.total());
        assert_eq!(names(&whole, whole.children(whole.root())), ["E", "A"]);
    }

    #[test]
    fn share_is_percentage_of_root() {
        let h = sample();
        let a = h.find("A").unwrap();
        let share = h.share(a);
        assert!((share - 150.0 / 560.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn ancestors_and_leaves() {
        let h = sample();
        let c = h.find("C").unwrap();
        let path: Vec<String> = h
            .ancestors(c)
            .map(|n| h.node(n).name().into())
            .collect();
        assert_eq!(path, ["C", "B", "A", ""]);
        let leaves: Vec<NodeId> = h.leaves(h.root()).collect();
        assert_eq!(names(&h, &leaves), ["G", "I", "C", "D"]);
    }
}
