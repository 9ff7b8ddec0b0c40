// Copyright 2026 the Trademap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Squarified rectangular tiling.
//!
//! Every node is positioned top-down: it first gives up its own share of the
//! padding inherited from the parent level, then reserves outer padding for
//! its children and tiles them into what remains. Rows are chosen greedily so
//! that the worst aspect ratio in the row stays as close as possible to the
//! target ratio.

use alloc::vec;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `round`
use kurbo::{Rect, Size};
use trademap_hierarchy::{Hierarchy, NodeId};

use crate::config::TreemapConfig;

/// Absolute pixel boxes for every node of a [`Hierarchy`].
///
/// Boxes are indexed by [`NodeId`] of the hierarchy passed to
/// [`layout_rect`]. A node's box contains its children's boxes and sibling
/// boxes do not overlap.
#[derive(Clone, Debug, PartialEq)]
pub struct RectLayout {
    rects: Vec<Rect>,
    size: Size,
}

impl RectLayout {
    /// Box of `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a node of the laid-out hierarchy.
    #[must_use]
    pub fn rect(&self, id: NodeId) -> Rect {
        self.rects[id.index()]
    }

    /// Box of `id`, or `None` if it is out of range.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<Rect> {
        self.rects.get(id.index()).copied()
    }

    /// The area the layout was computed for.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Number of boxes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    /// Returns `true` if there are no boxes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// The children of `id` together with their boxes, in rank order.
    pub fn child_rects<'a>(
        &'a self,
        tree: &'a Hierarchy,
        id: NodeId,
    ) -> impl Iterator<Item = (NodeId, Rect)> + 'a {
        tree.children(id).iter().map(|&c| (c, self.rect(c)))
    }
}

/// Lays `tree` out as a squarified treemap filling `width` x `height`.
///
/// The root occupies `(0, 0)..(width, height)`. Zero-value nodes receive
/// zero-area boxes, and a root without children is just its own box.
#[must_use]
pub fn layout_rect(tree: &Hierarchy, width: f64, height: f64, config: &TreemapConfig) -> RectLayout {
    let width = width.max(0.0);
    let height = height.max(0.0);
    let ratio = config.effective_ratio(width, height);
    let mut rects = vec![Rect::ZERO; tree.len()];
    rects[tree.root().index()] = Rect::new(0.0, 0.0, width, height);

    let mut padding_stack: Vec<f64> = vec![0.0];
    for id in tree.pre_order(tree.root()) {
        position_node(tree, &mut rects, &mut padding_stack, id, config, ratio);
    }
    if config.round {
        for r in &mut rects {
            *r = Rect::new(r.x0.round(), r.y0.round(), r.x1.round(), r.y1.round());
        }
    }
    tracing::debug!(nodes = rects.len(), width, height, "treemap layout");
    RectLayout {
        rects,
        size: Size::new(width, height),
    }
}

fn collapse(r: &mut Rect) {
    if r.x1 < r.x0 {
        r.x0 = (r.x0 + r.x1) / 2.0;
        r.x1 = r.x0;
    }
    if r.y1 < r.y0 {
        r.y0 = (r.y0 + r.y1) / 2.0;
        r.y1 = r.y0;
    }
}

fn inset(r: Rect, by: f64) -> Rect {
    let mut out = Rect::new(r.x0 + by, r.y0 + by, r.x1 - by, r.y1 - by);
    collapse(&mut out);
    out
}

/// Clamps each edge of `r` into `bounds`. `bounds` must not be inverted.
fn clamp_into(r: Rect, bounds: Rect) -> Rect {
    Rect::new(
        r.x0.clamp(bounds.x0, bounds.x1),
        r.y0.clamp(bounds.y0, bounds.y1),
        r.x1.clamp(bounds.x0, bounds.x1),
        r.y1.clamp(bounds.y0, bounds.y1),
    )
}

fn position_node(
    tree: &Hierarchy,
    rects: &mut [Rect],
    padding_stack: &mut Vec<f64>,
    id: NodeId,
    config: &TreemapConfig,
    ratio: f64,
) {
    let depth = tree.node(id).depth();
    if padding_stack.len() <= depth + 1 {
        padding_stack.resize(depth + 2, 0.0);
    }
    let mut own = inset(rects[id.index()], padding_stack[depth]);
    if let Some(parent) = tree.node(id).parent() {
        // Outer padding below half the inner padding widens the tiling area past
        // the parent, so children are pulled back inside it.
        own = clamp_into(own, rects[parent.index()]);
    }
    rects[id.index()] = own;
    if !tree.node(id).has_children() {
        return;
    }
    let half_inner = config.padding_inner / 2.0;
    padding_stack[depth + 1] = half_inner;
    // Children each give back `half_inner`, so the gap between siblings is the
    // full inner padding while the gap to this box stays `padding_outer`.
    let area = inset(own, config.padding_outer - half_inner);
    squarify(tree, rects, id, area, ratio);
}

fn squarify(tree: &Hierarchy, rects: &mut [Rect], parent: NodeId, area: Rect, ratio: f64) {
    let children = tree.children(parent);
    let n = children.len();
    let value_of = |i: usize| tree.node(children[i]).value();
    let Rect {
        mut x0,
        mut y0,
        x1,
        y1,
    } = area;
    let mut value = tree.node(parent).value();
    let mut i0 = 0;
    let mut i1 = 0;

    while i0 < n {
        let dx = x1 - x0;
        let dy = y1 - y0;

        // Leading zero-value nodes join the next row.
        let mut sum_value = value_of(i1);
        i1 += 1;
        while sum_value == 0.0 && i1 < n {
            sum_value = value_of(i1);
            i1 += 1;
        }
        let mut min_value = sum_value;
        let mut max_value = sum_value;
        let alpha = (dy / dx).max(dx / dy) / (value * ratio);
        let mut beta = sum_value * sum_value * alpha;
        let mut min_ratio = (max_value / beta).max(beta / min_value);

        while i1 < n {
            let node_value = value_of(i1);
            sum_value += node_value;
            min_value = min_value.min(node_value);
            max_value = max_value.max(node_value);
            beta = sum_value * sum_value * alpha;
            let new_ratio = (max_value / beta).max(beta / min_value);
            if new_ratio > min_ratio {
                sum_value -= node_value;
                break;
            }
            min_ratio = new_ratio;
            i1 += 1;
        }

        let row = &children[i0..i1];
        let share = if value > 0.0 { sum_value / value } else { 1.0 };
        if dx < dy {
            let y2 = if dy != 0.0 { y0 + dy * share } else { y1 };
            dice(tree, rects, row, sum_value, Rect::new(x0, y0, x1, y2));
            y0 = y2;
        } else {
            let x2 = if dx != 0.0 { x0 + dx * share } else { x1 };
            slice(tree, rects, row, sum_value, Rect::new(x0, y0, x2, y1));
            x0 = x2;
        }
        value -= sum_value;
        i0 = i1;
    }
}

/// Splits `area` horizontally among `row`, proportional to value.
fn dice(tree: &Hierarchy, rects: &mut [Rect], row: &[NodeId], row_value: f64, area: Rect) {
    let k = if row_value != 0.0 {
        area.width() / row_value
    } else {
        0.0
    };
    let mut x = area.x0;
    for &child in row {
        let x_next = x + tree.node(child).value() * k;
        rects[child.index()] = Rect::new(x, area.y0, x_next, area.y1);
        x = x_next;
    }
}

/// Splits `area` vertically among `row`, proportional to value.
fn slice(tree: &Hierarchy, rects: &mut [Rect], row: &[NodeId], row_value: f64, area: Rect) {
    let k = if row_value != 0.0 {
        area.height() / row_value
    } else {
        0.0
    };
    let mut y = area.y0;
    for &child in row {
        let y_next = y + tree.node(child).value() * k;
        rects[child.index()] = Rect::new(area.x0, y, area.x1, y_next);
        y = y_next;
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn single_child_fills_padded_root() {
        let tree = Hierarchy::flat("", [("A", 10.0)]);
        let layout = layout_rect(&tree, 100.0, 50.0, &TreemapConfig::default());
        assert_eq!(layout.rect(tree.root()), Rect::new(0.0, 0.0, 100.0, 50.0));
        let a = tree.children(tree.root())[0];
        assert_eq!(layout.rect(a), Rect::new(5.0, 5.0, 95.0, 45.0));
    }

    #[test]
    fn siblings_keep_inner_gap() {
        let tree = Hierarchy::flat("", [("A", 1.0), ("B", 1.0)]);
        let cfg = TreemapConfig::default().with_padding_outer(0.0).with_padding_inner(2.0);
        // A 10:1 target ratio stacks two equal siblings into one wide row.
        let layout = layout_rect(&tree, 100.0, 10.0, &cfg);
        let ids = tree.children(tree.root());
        let a = layout.rect(ids[0]);
        let b = layout.rect(ids[1]);
        assert_eq!(a, Rect::new(0.0, 0.0, 100.0, 4.0));
        assert_eq!(b, Rect::new(0.0, 6.0, 100.0, 10.0));
    }

    #[test]
    fn areas_follow_values_without_padding() {
        let tree = Hierarchy::flat("", [("A", 6.0), ("B", 3.0), ("C", 1.0)]);
        let cfg = TreemapConfig::default()
            .with_padding_outer(0.0)
            .with_padding_inner(0.0)
            .with_round(false);
        let layout = layout_rect(&tree, 100.0, 100.0, &cfg);
        for &id in tree.children(tree.root()) {
            let area = layout.rect(id).area();
            let expected = tree.node(id).value() / 10.0 * 10_000.0;
            assert!((area - expected).abs() < 1e-6, "{area} vs {expected}");
        }
    }

    #[test]
    fn zero_values_get_zero_area() {
        let tree = Hierarchy::flat("", [("A", 5.0), ("B", 0.0), ("C", 0.0)]);
        let layout = layout_rect(&tree, 60.0, 40.0, &TreemapConfig::default());
        let ids = tree.children(tree.root());
        assert!(layout.rect(ids[0]).area() > 0.0);
        for &id in &ids[1..] {
            let r = layout.rect(id);
            assert_eq!(r.area(), 0.0);
            assert!(r.x0.is_finite() && r.y0.is_finite());
        }
    }

    #[test]
    fn all_zero_and_empty_trees_are_finite() {
        let zeros = Hierarchy::flat("", [("A", 0.0), ("B", 0.0)]);
        let layout = layout_rect(&zeros, 30.0, 30.0, &TreemapConfig::default());
        for &id in zeros.children(zeros.root()) {
            let r = layout.rect(id);
            assert!(r.x0.is_finite() && r.x1.is_finite() && r.y0.is_finite() && r.y1.is_finite());
        }
        let empty = Hierarchy::flat("", []);
        let layout = layout_rect(&empty, 30.0, 30.0, &TreemapConfig::default());
        assert_eq!(layout.len(), 1);
    }

    #[test]
    fn small_outer_padding_keeps_children_inside() {
        let tree = Hierarchy::flat("", [("A", 5.0), ("B", 3.0), ("C", 1.0), ("D", 1.0)]);
        let cfg = TreemapConfig::default()
            .with_padding_outer(0.0)
            .with_padding_inner(4.0);
        let layout = layout_rect(&tree, 30.0, 8.0, &cfg);
        let root = layout.rect(tree.root());
        for &id in tree.children(tree.root()) {
            let r = layout.rect(id);
            assert!(
                r.x0 >= root.x0 && r.y0 >= root.y0 && r.x1 <= root.x1 && r.y1 <= root.y1,
                "{r:?} escapes {root:?}"
            );
        }
    }

    #[test]
    fn zero_sized_targets_give_zero_area_boxes() {
        let tree = Hierarchy::flat("", [("A", 3.0), ("B", 2.0), ("C", 1.0), ("D", 0.0)]);
        for (w, h) in [(0.0, 0.0), (0.0, 100.0), (100.0, 0.0)] {
            let layout = layout_rect(&tree, w, h, &TreemapConfig::default());
            for id in tree.pre_order(tree.root()) {
                let r = layout.rect(id);
                assert!(
                    r.x0.is_finite() && r.y0.is_finite() && r.x1.is_finite() && r.y1.is_finite(),
                    "{w}x{h}: {r:?}"
                );
                assert!(r.x1 >= r.x0 && r.y1 >= r.y0, "{w}x{h}: {r:?} is inverted");
                assert_eq!(r.area(), 0.0, "{w}x{h}: {r:?}");
            }
        }
    }

    #[test]
    fn tiny_area_collapses_instead_of_inverting() {
        let tree = Hierarchy::flat("", [("A", 3.0), ("B", 1.0)]);
        let layout = layout_rect(&tree, 4.0, 4.0, &TreemapConfig::default());
        for &id in tree.children(tree.root()) {
            let r = layout.rect(id);
            assert!(r.x1 >= r.x0 && r.y1 >= r.y0);
        }
    }
}
