// Copyright 2026 the Trademap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=trademap_index --heading-base-level=0

//! Trademap Index: "which box is under the pointer" for a treemap layout.
//!
//! A [`SpatialIndex`] is built once from `(key, box)` pairs, typically the
//! children of the current view root, and answers point queries with the first
//! box that contains the point (edges inclusive). Pointer hover runs this on
//! every move, so the default [`QuadTree`] backend prunes whole subtrees:
//! - boxes are keyed by their top-left corner, and
//! - each subtree remembers the union of its boxes, so subtrees that start
//!   right of or below the point, or end left of or above it, are skipped.
//!
//! [`FlatVec`] is a linear scan with the same contract. It is the reference
//! the quad-tree is tested and benchmarked against, and a fine choice for a
//! handful of boxes.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use trademap_index::SpatialIndex;
//!
//! let index: SpatialIndex<&str> = SpatialIndex::build([
//!     ("left", Rect::new(0.0, 0.0, 50.0, 100.0)),
//!     ("right", Rect::new(52.0, 0.0, 100.0, 100.0)),
//! ]);
//! assert_eq!(index.query(Point::new(10.0, 10.0)), Some("left"));
//! assert_eq!(index.query(Point::new(51.0, 10.0)), None);
//! assert_eq!(index.query(Point::new(100.0, 100.0)), Some("right"));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod backend;
pub mod backends;

use alloc::vec::Vec;

use kurbo::{Point, Rect};

pub use backend::{Backend, contains_inclusive, overlaps_inclusive};
pub use backends::flatvec::FlatVec;
pub use backends::quadtree::QuadTree;

/// Keys and boxes behind a point-query [`Backend`].
#[derive(Clone, Debug)]
pub struct SpatialIndex<K, B = QuadTree> {
    keys: Vec<K>,
    rects: Vec<Rect>,
    backend: B,
}

impl<K: Copy, B: Backend> SpatialIndex<K, B> {
    /// Builds an index over `items`.
    ///
    /// When boxes overlap, the backend's visit order decides which key a
    /// query returns.
    pub fn build(items: impl IntoIterator<Item = (K, Rect)>) -> Self {
        let (keys, rects): (Vec<K>, Vec<Rect>) = items.into_iter().unzip();
        let backend = B::build(&rects);
        Self {
            keys,
            rects,
            backend,
        }
    }

    /// The key of the first box containing `pt`, if any.
    #[must_use]
    pub fn query(&self, pt: Point) -> Option<K> {
        self.backend.first_at(pt).map(|slot| self.keys[slot])
    }

    /// The first hit together with its box.
    #[must_use]
    pub fn query_with_rect(&self, pt: Point) -> Option<(K, Rect)> {
        self.backend
            .first_at(pt)
            .map(|slot| (self.keys[slot], self.rects[slot]))
    }

    /// Every key whose box contains `pt`, in visit order.
    pub fn query_all(&self, pt: Point) -> impl Iterator<Item = K> + '_ {
        self.backend.query_point(pt).map(|slot| self.keys[slot])
    }

    /// Every key whose box intersects `rect`, in visit order.
    pub fn query_rect(&self, rect: Rect) -> impl Iterator<Item = K> + '_ {
        self.backend.query_rect(rect).map(|slot| self.keys[slot])
    }

    /// Number of indexed boxes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if nothing is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterates `(key, box)` pairs in build order.
    pub fn iter(&self) -> impl Iterator<Item = (K, Rect)> + '_ {
        self.keys.iter().copied().zip(self.rects.iter().copied())
    }

    /// The backend, for diagnostics.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

/// Builds the default quad-tree index over `items`.
pub fn build_index<K: Copy>(items: impl IntoIterator<Item = (K, Rect)>) -> SpatialIndex<K> {
    SpatialIndex::build(items)
}
