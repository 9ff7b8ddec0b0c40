// Copyright 2026 the Trademap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=trademap_layout --heading-base-level=0

//! Trademap Layout: geometry for category hierarchies.
//!
//! Two layouts are provided, both pure functions of a
//! [`Hierarchy`](trademap_hierarchy::Hierarchy) and an explicit area:
//! - [`layout_rect`]: a squarified treemap. Each parent's box contains its
//!   children's boxes, separated by [`TreemapConfig::padding_outer`] from the
//!   parent edge and by [`TreemapConfig::padding_inner`] from each other.
//! - [`layout_pack`]: nested circle packing with leaf radius `sqrt(value)`,
//!   scaled to fit and centered in the area.
//!
//! Results are indexed by [`NodeId`](trademap_hierarchy::NodeId) and use
//! `kurbo` geometry. Degenerate input (zero values, empty trees, areas too
//! small for the padding) produces zero-area boxes or zero-radius circles
//! rather than errors.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Rect;
//! use trademap_hierarchy::Hierarchy;
//! use trademap_layout::{TreemapConfig, layout_rect};
//!
//! let tree = Hierarchy::flat("", [("A", 3.0), ("B", 1.0)]);
//! let layout = layout_rect(&tree, 400.0, 300.0, &TreemapConfig::default());
//!
//! assert_eq!(layout.rect(tree.root()), Rect::new(0.0, 0.0, 400.0, 300.0));
//! for &child in tree.children(tree.root()) {
//!     let r = layout.rect(child);
//!     assert!(r.x0 >= 5.0 && r.x1 <= 395.0);
//! }
//! ```
//!
//! ## Features
//!
//! - `std` (default): use the standard library for float math.
//! - `libm`: float math through `libm` for `no_std` targets.
//! - `serde`: derive `Serialize`/`Deserialize` for the config types.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod enclose;
mod pack;
mod treemap;

pub use config::{GOLDEN_RATIO, PackConfig, TreemapConfig};
pub use pack::{PackLayout, layout_pack};
pub use treemap::{RectLayout, layout_rect};
