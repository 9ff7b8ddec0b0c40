// Copyright 2026 the Trademap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat vector backend with linear scans. Small and simple; the reference the
//! quad-tree is checked against.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::ops::ControlFlow;

use kurbo::{Point, Rect};

use crate::backend::{Backend, contains_inclusive, overlaps_inclusive};

/// Flat vector backend with linear scans, visiting slots in ascending order.
#[derive(Clone, Default)]
pub struct FlatVec {
    entries: Vec<Rect>,
}

impl Debug for FlatVec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FlatVec")
            .field("slots", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl Backend for FlatVec {
    fn build(rects: &[Rect]) -> Self {
        Self {
            entries: rects.to_vec(),
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn visit_point<F>(&self, pt: Point, mut f: F) -> ControlFlow<()>
    where
        F: FnMut(usize) -> ControlFlow<()>,
    {
        for (i, r) in self.entries.iter().enumerate() {
            if contains_inclusive(r, pt) {
                f(i)?;
            }
        }
        ControlFlow::Continue(())
    }

    fn visit_rect<F: FnMut(usize)>(&self, rect: Rect, mut f: F) {
        for (i, r) in self.entries.iter().enumerate() {
            if overlaps_inclusive(r, &rect) {
                f(i);
            }
        }
    }
}
