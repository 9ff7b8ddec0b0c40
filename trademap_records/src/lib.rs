// Copyright 2026 the Trademap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=trademap_records --heading-base-level=0

//! Trademap Records: trade statistics records and their aggregation.
//!
//! This crate is the first stage of the Trademap pipeline. It owns:
//! - [`TradeRecord`]: one categorized, time-stamped amount as produced by ingestion.
//! - [`Period`] and [`TimeRange`]: chronologically ordered calendar months and
//!   the single-period or span window built from them.
//! - [`reduce`]: filters records by [`TradeType`] and window and sums them into
//!   an [`AggregatedTree`] keyed by the three category levels.
//!
//! It does **not** parse CSV or fetch data; callers hand it an already mapped
//! record set. Dirty rows (blank categories, unparseable periods, non-finite
//! amounts) are tolerated and skipped during aggregation rather than reported.
//!
//! ## Minimal example
//!
//! ```rust
//! use trademap_records::{TimeRange, TradeRecord, TradeType, reduce};
//!
//! let records = [
//!     TradeRecord::new(["A", "B", "C"], TradeType::Export, "2020.01", 100.0),
//!     TradeRecord::new(["A", "B", "D"], TradeType::Export, "2020.01", 50.0),
//! ];
//! let range = TimeRange::parse("2020.01", None).unwrap();
//! let tree = reduce(&records, TradeType::Export, &range);
//!
//! assert_eq!(tree.total(), 150.0);
//! assert_eq!(tree.get("A", "B", "D"), Some(50.0));
//! ```
//!
//! The footer timeline helpers, [`timelines`] and [`sum_by_period`], work over
//! the same record set.
//!
//! ## Features
//!
//! - `serde`: derive `Serialize`/`Deserialize` for records, periods, and ranges.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod aggregate;
mod nested;
mod period;
mod record;

pub use aggregate::{PeriodSeries, reduce, sum_by_period, timelines};
pub use nested::{AggregatedTree, BranchLevel, KeyedLevel, LeafLevel};
pub use period::{Period, PeriodError, TimeRange, TimeRangeError};
pub use record::{
    GRAND_TOTAL_LABEL, SUBTOTAL_LABEL, TradeRecord, TradeType, subtotals_only, without_subtotals,
};
