// Copyright 2026 the Trademap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Popup placement next to a hovered box.

use kurbo::{Rect, Size};

/// Gap left between a box and a popup placed on its left or top side.
pub const TOOLTIP_GAP: f64 = 3.0;

/// Places a `max` sized popup next to `target`, inside `viewport`.
///
/// Horizontally the popup starts at the target's right edge when there is
/// room for it right of the target's left edge, pulled back so it ends at the
/// viewport edge; otherwise it sits [`TOOLTIP_GAP`] left of the target,
/// stopping at 0. The vertical axis is symmetric.
///
/// The result always lies within `(0, 0)..viewport`. A popup larger than the
/// viewport is shrunk to it.
#[must_use]
pub fn place(target: Rect, viewport: Size, max: Size) -> Rect {
    let (x, width) = place_axis(target.x0, target.x1, viewport.width, max.width);
    let (y, height) = place_axis(target.y0, target.y1, viewport.height, max.height);
    Rect::new(x, y, x + width, y + height)
}

fn place_axis(t0: f64, t1: f64, extent: f64, len: f64) -> (f64, f64) {
    let extent = extent.max(0.0);
    let len = if len.is_nan() { 0.0 } else { len };
    let start = if extent - len > t0 {
        t1.min(extent - len)
    } else {
        (t0 - len - TOOLTIP_GAP).max(0.0)
    };
    let len = len.clamp(0.0, extent);
    // `inf - inf` is NaN; `max` maps it to 0 so the clamp bounds stay ordered.
    (start.clamp(0.0, (extent - len).max(0.0)), len)
}

/// Popup sizing policy, as fractions of the viewport.
///
/// Grouping nodes get a larger popup that has room for a packed view of their
/// children; leaves only need a short summary.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TooltipSize {
    /// Width of a grouping node's popup, as a fraction of viewport width.
    pub internal_width: f64,
    /// Height of a grouping node's popup, as a fraction of viewport height.
    pub internal_height: f64,
    /// Width of a leaf's popup, as a fraction of viewport *height*.
    pub leaf_width: f64,
    /// Height of a leaf's popup, as a fraction of viewport height.
    pub leaf_height: f64,
}

impl Default for TooltipSize {
    fn default() -> Self {
        Self {
            internal_width: 0.5,
            internal_height: 0.8,
            leaf_width: 0.3,
            leaf_height: 0.4,
        }
    }
}

impl TooltipSize {
    /// Maximum popup size for a node in `viewport`.
    #[must_use]
    pub fn for_node(&self, has_children: bool, viewport: Size) -> Size {
        if has_children {
            Size::new(
                viewport.width * self.internal_width,
                viewport.height * self.internal_height,
            )
        } else {
            // Leaf popups scale with height only so they stay compact on wide screens.
            Size::new(
                viewport.height * self.leaf_width,
                viewport.height * self.leaf_height,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: Size = Size::new(1000.0, 600.0);

    #[test]
    fn opens_to_the_right_and_below_when_there_is_room() {
        let r = place(Rect::new(100.0, 50.0, 200.0, 120.0), VIEW, Size::new(300.0, 200.0));
        assert_eq!(r, Rect::new(200.0, 120.0, 500.0, 320.0));
    }

    #[test]
    fn pulls_back_to_fit_the_far_edge() {
        // Room right of x0, but not right of x1.
        let r = place(Rect::new(600.0, 300.0, 900.0, 550.0), VIEW, Size::new(300.0, 200.0));
        assert_eq!(r, Rect::new(700.0, 400.0, 1000.0, 600.0));
    }

    #[test]
    fn flips_left_and_up_with_a_gap() {
        let r = place(Rect::new(800.0, 500.0, 950.0, 590.0), VIEW, Size::new(300.0, 200.0));
        assert_eq!(r, Rect::new(497.0, 297.0, 797.0, 497.0));
    }

    #[test]
    fn clamps_at_origin_when_flipped() {
        let r = place(Rect::new(250.0, 150.0, 990.0, 590.0), VIEW, Size::new(800.0, 500.0));
        assert_eq!(r, Rect::new(0.0, 0.0, 800.0, 500.0));
    }

    #[test]
    fn oversize_popup_shrinks_to_viewport() {
        let r = place(Rect::new(10.0, 10.0, 20.0, 20.0), VIEW, Size::new(1500.0, 900.0));
        assert_eq!(r, Rect::new(0.0, 0.0, 1000.0, 600.0));
    }

    #[test]
    fn unbounded_viewport_and_popup_do_not_panic() {
        let inf = f64::INFINITY;
        let r = place(
            Rect::new(10.0, 10.0, 20.0, 20.0),
            Size::new(inf, inf),
            Size::new(inf, inf),
        );
        assert!(r.x0 >= 0.0 && r.y0 >= 0.0, "{r:?}");
        let r = place(Rect::new(10.0, 10.0, 20.0, 20.0), VIEW, Size::new(f64::NAN, inf));
        assert!(r.x0 >= 0.0 && r.y1 <= VIEW.height, "{r:?}");
    }

    #[test]
    fn sizing_policy() {
        let policy = TooltipSize::default();
        assert_eq!(policy.for_node(true, VIEW), Size::new(500.0, 480.0));
        assert_eq!(policy.for_node(false, VIEW), Size::new(180.0, 240.0));
    }
}
