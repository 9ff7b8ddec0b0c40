// Copyright 2026 the Trademap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Front-chain circle packing.
//!
//! Leaves get radius `sqrt(value)`. Siblings are placed one at a time tangent
//! to a pair on the current front chain, then the parent becomes the smallest
//! circle enclosing the chain. A first pass sizes the tree without padding so
//! the padding can be expressed in output pixels for the second pass; the
//! result is then scaled to fit the area and centered.

use alloc::vec;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `sqrt`
use kurbo::{Circle, Point, Size, Vec2};
use trademap_hierarchy::{Hierarchy, NodeId};

use crate::config::PackConfig;
use crate::enclose::{Disc, Lcg, enclose, enclose_conservative};

/// Absolute circles for every node of a [`Hierarchy`].
///
/// Indexed by [`NodeId`] of the hierarchy passed to [`layout_pack`]. Sibling
/// circles do not overlap and every child lies inside its parent.
#[derive(Clone, Debug, PartialEq)]
pub struct PackLayout {
    circles: Vec<Circle>,
    size: Size,
}

impl PackLayout {
    /// Circle of `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a node of the laid-out hierarchy.
    #[must_use]
    pub fn circle(&self, id: NodeId) -> Circle {
        self.circles[id.index()]
    }

    /// Circle of `id`, or `None` if it is out of range.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<Circle> {
        self.circles.get(id.index()).copied()
    }

    /// The area the layout was computed for.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Number of circles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.circles.len()
    }

    /// Returns `true` if there are no circles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.circles.is_empty()
    }
}

/// Packs `tree` into circles fitting `width` x `height`.
///
/// The root circle is centered in the area with radius `min(width, height) / 2`.
/// A tree whose total is zero collapses to zero-radius circles at the center.
#[must_use]
pub fn layout_pack(tree: &Hierarchy, width: f64, height: f64, config: &PackConfig) -> PackLayout {
    let width = width.max(0.0);
    let height = height.max(0.0);
    let side = width.min(height);
    let mut discs = vec![Disc::default(); tree.len()];
    let mut rng = Lcg::new();

    for id in tree.pre_order(tree.root()) {
        let node = tree.node(id);
        if !node.has_children() {
            // NaN from a negative value clamps to zero.
            discs[id.index()].r = node.value().sqrt().max(0.0);
        }
    }

    let post = post_order(tree);
    for &id in &post {
        pack_children(tree, &mut discs, id, 0.0, &mut rng);
    }
    let root = tree.root();
    let root_r = discs[root.index()].r;
    let k = if root_r > 0.0 && side > 0.0 {
        root_r / side
    } else {
        0.0
    };
    for &id in &post {
        pack_children(tree, &mut discs, id, config.padding * k, &mut rng);
    }

    let root_r = discs[root.index()].r;
    let scale = if root_r > 0.0 { side / (2.0 * root_r) } else { 0.0 };
    let mut circles = vec![Circle::new(Point::ZERO, 0.0); tree.len()];
    for id in tree.pre_order(root) {
        let d = discs[id.index()];
        let center = match tree.node(id).parent() {
            None => Point::new(width / 2.0, height / 2.0),
            Some(p) => circles[p.index()].center + Vec2::new(d.x, d.y) * scale,
        };
        circles[id.index()] = Circle::new(center, d.r * scale);
    }
    tracing::debug!(nodes = circles.len(), width, height, "pack layout");
    PackLayout {
        circles,
        size: Size::new(width, height),
    }
}

/// Children before parents, siblings in rank order.
fn post_order(tree: &Hierarchy) -> Vec<NodeId> {
    let mut stack = vec![tree.root()];
    let mut out = Vec::with_capacity(tree.len());
    while let Some(id) = stack.pop() {
        out.push(id);
        stack.extend_from_slice(tree.children(id));
    }
    out.reverse();
    out
}

/// Packs the children of `id` around the origin and sizes `id` to enclose them.
fn pack_children(tree: &Hierarchy, discs: &mut [Disc], id: NodeId, padding: f64, rng: &mut Lcg) {
    let children = tree.children(id);
    if children.is_empty() {
        return;
    }
    let pad = if padding.is_finite() { padding } else { 0.0 };
    let mut local: Vec<Disc> = children
        .iter()
        .map(|c| {
            let d = discs[c.index()];
            Disc { r: d.r + pad, ..d }
        })
        .collect();
    let e = pack_siblings(&mut local, rng);
    for (c, d) in children.iter().zip(local) {
        discs[c.index()] = Disc { r: d.r - pad, ..d };
    }
    discs[id.index()].r = e + pad;
}

/// Places `circles` without overlap and recenters them on their enclosure.
///
/// Returns the enclosing radius.
fn pack_siblings(circles: &mut [Disc], rng: &mut Lcg) -> f64 {
    let n = circles.len();
    if n == 0 {
        return 0.0;
    }
    circles[0].x = 0.0;
    circles[0].y = 0.0;
    if n == 1 {
        return circles[0].r;
    }
    circles[0].x = -circles[1].r;
    circles[1].x = circles[0].r;
    circles[1].y = 0.0;
    if n == 2 {
        return circles[0].r + circles[1].r;
    }
    circles[2] = place(circles[1], circles[0], circles[2]);

    // The front chain is a ring over circle indices; circles that never made it
    // into the ring keep stale links that are never followed.
    let mut next = vec![0_usize; n];
    let mut prev = vec![0_usize; n];
    let (mut a, mut b) = (0_usize, 1_usize);
    next[0] = 1;
    prev[2] = 1;
    next[1] = 2;
    prev[0] = 2;
    next[2] = 0;
    prev[1] = 0;

    let mut i = 3;
    'pack: while i < n {
        circles[i] = place(circles[a], circles[b], circles[i]);
        let c = circles[i];

        // Look for the nearest intersecting circle along the chain, walking both
        // directions by accumulated radius.
        let mut j = next[b];
        let mut k = prev[a];
        let mut sj = circles[b].r;
        let mut sk = circles[a].r;
        loop {
            if sj <= sk {
                if intersects(circles[j], c) {
                    b = j;
                    next[a] = b;
                    prev[b] = a;
                    continue 'pack;
                }
                sj += circles[j].r;
                j = next[j];
            } else {
                if intersects(circles[k], c) {
                    a = k;
                    next[a] = b;
                    prev[b] = a;
                    continue 'pack;
                }
                sk += circles[k].r;
                k = prev[k];
            }
            if j == next[k] {
                break;
            }
        }

        prev[i] = a;
        next[i] = b;
        next[a] = i;
        prev[b] = i;

        // Restart from the adjacent pair closest to the origin.
        let mut best = score(circles, &next, a);
        let mut cur = next[i];
        while cur != i {
            let s = score(circles, &next, cur);
            if s < best {
                a = cur;
                best = s;
            }
            cur = next[cur];
        }
        b = next[a];
        i += 1;
    }

    let mut chain = vec![circles[b]];
    let mut cur = next[b];
    while cur != b {
        chain.push(circles[cur]);
        cur = next[cur];
    }
    let e = enclose(&chain, rng).unwrap_or_else(|| {
        tracing::warn!(
            circles = chain.len(),
            "enclosing circle did not converge; using a conservative bound"
        );
        enclose_conservative(circles)
    });
    for c in circles.iter_mut() {
        c.x -= e.x;
        c.y -= e.y;
    }
    e.r
}

/// Positions `c` tangent to both `a` and `b`.
fn place(b: Disc, a: Disc, c: Disc) -> Disc {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let d2 = dx * dx + dy * dy;
    if d2 == 0.0 {
        return Disc {
            x: a.x + c.r,
            y: a.y,
            r: c.r,
        };
    }
    let a2 = (a.r + c.r) * (a.r + c.r);
    let b2 = (b.r + c.r) * (b.r + c.r);
    if a2 > b2 {
        let x = (d2 + b2 - a2) / (2.0 * d2);
        let y = (b2 / d2 - x * x).max(0.0).sqrt();
        Disc {
            x: b.x - x * dx - y * dy,
            y: b.y - x * dy + y * dx,
            r: c.r,
        }
    } else {
        let x = (d2 + a2 - b2) / (2.0 * d2);
        let y = (a2 / d2 - x * x).max(0.0).sqrt();
        Disc {
            x: a.x + x * dx - y * dy,
            y: a.y + x * dy + y * dx,
            r: c.r,
        }
    }
}

fn intersects(a: Disc, b: Disc) -> bool {
    let dr = a.r + b.r - 1e-6;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dr > 0.0 && dr * dr > dx * dx + dy * dy
}

/// Squared distance from the origin to the weighted midpoint of `node` and its
/// successor on the chain.
fn score(circles: &[Disc], next: &[usize], node: usize) -> f64 {
    let a = circles[node];
    let b = circles[next[node]];
    let ab = a.r + b.r;
    let dx = (a.x * b.r + b.x * a.r) / ab;
    let dy = (a.y * b.r + b.y * a.r) / ab;
    dx * dx + dy * dy
}
