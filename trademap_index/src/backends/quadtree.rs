// Copyright 2026 the Trademap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quad-tree backend keyed by each box's top-left corner.
//!
//! Boxes are partitioned by their `(x0, y0)` corner into quadrants of the
//! corner set's bounding box. Every node also caches the union of the boxes
//! below it, so a query skips a subtree whose boxes all start right of or
//! below the point, or all end left of or above it.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::ops::ControlFlow;

use kurbo::{Point, Rect};
use smallvec::SmallVec;

use crate::backend::{Backend, contains_inclusive, overlaps_inclusive};

/// Slots per leaf before it splits.
const LEAF_CAPACITY: usize = 8;

/// Splits stop at this depth even if keys keep colliding.
const MAX_DEPTH: usize = 24;

#[derive(Clone, Debug)]
enum QuadKind {
    Leaf(SmallVec<[u32; LEAF_CAPACITY]>),
    /// Children in fixed order: top-left, top-right, bottom-left, bottom-right.
    Branch(SmallVec<[u32; 4]>),
}

#[derive(Clone, Debug)]
struct Quad {
    /// Union of every box in the subtree.
    extent: Rect,
    kind: QuadKind,
}

/// Quad-tree backend.
///
/// Queries visit quadrants in a fixed order and, inside a leaf, slots in
/// ascending order, so the first hit for a point is deterministic.
#[derive(Clone, Default)]
pub struct QuadTree {
    rects: Vec<Rect>,
    nodes: Vec<Quad>,
}

impl Debug for QuadTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("QuadTree")
            .field("slots", &self.rects.len())
            .field("nodes", &self.nodes.len())
            .finish_non_exhaustive()
    }
}

impl QuadTree {
    /// Number of internal and leaf nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn slot_id(slot: usize) -> u32 {
        u32::try_from(slot).expect("too many slots for QuadTree (u32)")
    }

    fn union_of(&self, slots: &[u32]) -> Rect {
        slots
            .iter()
            .map(|&s| self.rects[s as usize])
            .reduce(|a, b| a.union(b))
            .unwrap_or(Rect::ZERO)
    }

    /// Builds the subtree for `slots` and returns its node index.
    fn build_node(&mut self, slots: Vec<u32>, depth: usize) -> u32 {
        let extent = self.union_of(&slots);
        let id = Self::slot_id(self.nodes.len());
        self.nodes.push(Quad {
            extent,
            kind: QuadKind::Leaf(SmallVec::new()),
        });

        let keys = slots
            .iter()
            .map(|&s| self.rects[s as usize].origin())
            .fold(None, |acc: Option<Rect>, p| {
                Some(acc.map_or(Rect::from_points(p, p), |r| r.union_pt(p)))
            })
            .unwrap_or(Rect::ZERO);
        let splittable = slots.len() > LEAF_CAPACITY
            && depth < MAX_DEPTH
            && (keys.width() > 0.0 || keys.height() > 0.0);
        if !splittable {
            self.nodes[id as usize].kind = QuadKind::Leaf(slots.into_iter().collect());
            return id;
        }

        let mid = keys.center();
        let mut quadrants: [Vec<u32>; 4] = Default::default();
        for s in slots {
            let o = self.rects[s as usize].origin();
            let q = usize::from(o.x >= mid.x) + 2 * usize::from(o.y >= mid.y);
            quadrants[q].push(s);
        }
        let mut children = SmallVec::new();
        for q in quadrants {
            if !q.is_empty() {
                children.push(self.build_node(q, depth + 1));
            }
        }
        self.nodes[id as usize].kind = QuadKind::Branch(children);
        id
    }
}

impl Backend for QuadTree {
    fn build(rects: &[Rect]) -> Self {
        let mut tree = Self {
            rects: rects.to_vec(),
            nodes: Vec::new(),
        };
        if !rects.is_empty() {
            let slots = (0..rects.len()).map(Self::slot_id).collect();
            tree.build_node(slots, 0);
        }
        tracing::trace!(slots = tree.rects.len(), nodes = tree.nodes.len(), "built quad-tree");
        tree
    }

    fn len(&self) -> usize {
        self.rects.len()
    }

    fn visit_point<F>(&self, pt: Point, mut f: F) -> ControlFlow<()>
    where
        F: FnMut(usize) -> ControlFlow<()>,
    {
        if self.nodes.is_empty() {
            return ControlFlow::Continue(());
        }
        let mut stack: SmallVec<[u32; 32]> = SmallVec::new();
        stack.push(0);
        while let Some(n) = stack.pop() {
            let node = &self.nodes[n as usize];
            if !contains_inclusive(&node.extent, pt) {
                continue;
            }
            match &node.kind {
                QuadKind::Leaf(slots) => {
                    for &s in slots {
                        if contains_inclusive(&self.rects[s as usize], pt) {
                            f(s as usize)?;
                        }
                    }
                }
                QuadKind::Branch(children) => stack.extend(children.iter().rev().copied()),
            }
        }
        ControlFlow::Continue(())
    }

    fn visit_rect<F: FnMut(usize)>(&self, rect: Rect, mut f: F) {
        if self.nodes.is_empty() {
            return;
        }
        let mut stack: SmallVec<[u32; 32]> = SmallVec::new();
        stack.push(0);
        while let Some(n) = stack.pop() {
            let node = &self.nodes[n as usize];
            if !overlaps_inclusive(&node.extent, &rect) {
                continue;
            }
            match &node.kind {
                QuadKind::Leaf(slots) => {
                    for &s in slots {
                        if overlaps_inclusive(&self.rects[s as usize], &rect) {
                            f(s as usize);
                        }
                    }
                }
                QuadKind::Branch(children) => stack.extend(children.iter().rev().copied()),
            }
        }
    }
}
