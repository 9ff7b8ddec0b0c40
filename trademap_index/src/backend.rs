// Copyright 2026 the Trademap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend trait for point and rectangle queries over a fixed set of boxes.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::ops::ControlFlow;

use kurbo::{Point, Rect};

/// Returns `true` if `pt` lies in `rect`, edges included.
///
/// Treemap boxes share no interior, but after rounding a pointer can sit
/// exactly on an edge; inclusive edges make that pixel hit something.
#[inline]
#[must_use]
pub fn contains_inclusive(rect: &Rect, pt: Point) -> bool {
    pt.x >= rect.x0 && pt.x <= rect.x1 && pt.y >= rect.y0 && pt.y <= rect.y1
}

/// Returns `true` if `a` and `b` overlap or touch.
#[inline]
#[must_use]
pub fn overlaps_inclusive(a: &Rect, b: &Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}

/// Spatial backend abstraction used by [`SpatialIndex`](crate::SpatialIndex).
///
/// Slots are positions in the slice passed to [`Backend::build`]. A backend
/// is built once per layout and never mutated; a new layout builds a new
/// backend.
pub trait Backend: Debug {
    /// Builds the structure over `rects`; slot `i` is `rects[i]`.
    fn build(rects: &[Rect]) -> Self
    where
        Self: Sized;

    /// Number of slots.
    fn len(&self) -> usize;

    /// Returns `true` if there are no slots.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Visit slots whose box contains the point, in the backend's fixed order,
    /// until `f` breaks.
    fn visit_point<F>(&self, pt: Point, f: F) -> ControlFlow<()>
    where
        F: FnMut(usize) -> ControlFlow<()>;

    /// Visit slots whose box intersects the rectangle.
    fn visit_rect<F: FnMut(usize)>(&self, rect: Rect, f: F);

    /// The first slot, in visit order, whose box contains the point.
    fn first_at(&self, pt: Point) -> Option<usize> {
        let mut hit = None;
        let _ = self.visit_point(pt, |slot| {
            hit = Some(slot);
            ControlFlow::Break(())
        });
        hit
    }

    /// Query slots whose box contains the point. Default: collects `visit_point`.
    fn query_point<'a>(&'a self, pt: Point) -> Box<dyn Iterator<Item = usize> + 'a> {
        let mut out = Vec::new();
        let _ = self.visit_point(pt, |slot| {
            out.push(slot);
            ControlFlow::Continue(())
        });
        Box::new(out.into_iter())
    }

    /// Query slots whose box intersects the rectangle. Default: collects `visit_rect`.
    fn query_rect<'a>(&'a self, rect: Rect) -> Box<dyn Iterator<Item = usize> + 'a> {
        let mut out = Vec::new();
        self.visit_rect(rect, |slot| out.push(slot));
        Box::new(out.into_iter())
    }
}
