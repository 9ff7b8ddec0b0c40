// Copyright 2026 the Trademap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trademap Hierarchy: the category tree that every layout consumes.
//!
//! [`Hierarchy::build`] turns an [`AggregatedTree`](trademap_records::AggregatedTree)
//! into an arena of nodes in which:
//! - leaves carry their aggregated amounts and internal nodes the sum of their
//!   children, and
//! - children are sorted by descending value, ties kept in key order.
//!
//! Views are re-rooted with [`Hierarchy::find_by_category`], which returns a
//! detached copy of the matching subtree. [`compare_ranks`] reports how the
//! top-level ordering differs between two hierarchies.
//!
//! ```rust
//! use trademap_hierarchy::Hierarchy;
//! use trademap_records::AggregatedTree;
//!
//! let mut agg = AggregatedTree::new();
//! agg.add("A", "B", "C", 100.0);
//! agg.add("A", "B", "D", 50.0);
//!
//! let tree = Hierarchy::build(&agg);
//! assert_eq!(tree.total(), 150.0);
//!
//! let a = tree.find_by_category("A").unwrap();
//! assert_eq!(a.node(a.root()).depth(), 0);
//! assert_eq!(a.total(), 150.0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod rank;
mod tree;

pub use rank::{RankChange, compare_ranks, ranked_deltas};
pub use tree::{Hierarchy, HierarchyNode, NodeId, NodeKind, PreOrder};
