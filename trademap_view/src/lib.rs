// Copyright 2026 the Trademap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=trademap_view --heading-base-level=0

//! Trademap View: headless interaction state for the treemap screen.
//!
//! Nothing here paints or listens for events. Hosts feed pointer positions,
//! viewport sizes and selections in, and read geometry back out:
//! - [`TreemapSession`]: owns the hierarchy, treemap layout and hit-test
//!   index for the selected window and category, rebuilds them together, and
//!   answers hover and click queries.
//! - [`place`] and [`TooltipSize`]: popup rectangles that stay inside the
//!   viewport.
//! - [`CategoryPath`]: three-level drill-down state.
//! - [`Timeline`] and [`Scrubber`]: the footer axis and dragging the selected
//!   window along it.
//! - [`Comparison`]: two windows side by side with rank deltas.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use trademap_records::{TimeRange, TradeRecord, TradeType};
//! use trademap_view::{SessionConfig, TreemapSession};
//!
//! let records = vec![
//!     TradeRecord::new(["Asia", "China", "Chips"], TradeType::Export, "2020.01", 80.0),
//!     TradeRecord::new(["Europe", "France", "Wine"], TradeType::Export, "2020.01", 20.0),
//! ];
//! let mut session = TreemapSession::new(
//!     records,
//!     TradeType::Export,
//!     TimeRange::parse("2020.01", None).unwrap(),
//!     Size::new(800.0, 600.0),
//!     SessionConfig::default(),
//! );
//!
//! let hover = session.hover(Point::new(100.0, 100.0)).unwrap();
//! assert_eq!(hover.name(), "Asia");
//!
//! assert!(session.click(Point::new(100.0, 100.0)));
//! assert_eq!(session.path().current(), "Asia");
//! ```
//!
//! ## Features
//!
//! - `serde`: derive `Serialize`/`Deserialize` for the configs, the category
//!   path and drag handles.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod compare;
mod navigation;
pub mod scrubber;
mod session;
mod timeline;
mod tooltip;

pub use compare::{Comparison, Snapshot};
pub use navigation::{CategoryPath, MAX_DEPTH};
pub use scrubber::{DragHandle, Scrubber};
pub use session::{Hover, SessionConfig, TreemapSession, View};
pub use timeline::Timeline;
pub use tooltip::{TOOLTIP_GAP, TooltipSize, place};
