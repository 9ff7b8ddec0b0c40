// Copyright 2026 the Trademap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reductions over a flat record set.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::nested::AggregatedTree;
use crate::period::{Period, TimeRange};
use crate::record::{TradeRecord, TradeType};

/// Reduces records into the nested category mapping.
///
/// Keeps records of `trade_type` whose period falls inside `range` (exact
/// match for a single-period range, inclusive chronological comparison for a
/// span) and sums their amounts per `(depth1, depth2, depth3)` key. Records
/// that are not [well formed](TradeRecord::is_well_formed) are skipped.
///
/// An empty result is a valid "no data to render" state, not an error.
#[must_use]
pub fn reduce(records: &[TradeRecord], trade_type: TradeType, range: &TimeRange) -> AggregatedTree {
    let mut tree = AggregatedTree::new();
    let mut malformed = 0_usize;
    let mut kept = 0_usize;
    for record in records {
        if record.trade_type != trade_type {
            continue;
        }
        if !record.is_well_formed() {
            malformed += 1;
            continue;
        }
        let Ok(period) = record.period() else {
            continue;
        };
        if !range.contains(period) {
            continue;
        }
        let [d1, d2, d3] = record.categories();
        tree.add(d1, d2, d3, record.data);
        kept += 1;
    }
    tracing::debug!(
        total = records.len(),
        kept,
        malformed,
        groups = tree.groups().len(),
        "reduced trade records"
    );
    tree
}

/// The distinct periods present in `records`, in chronological order.
///
/// Rows with an unparseable period are ignored.
#[must_use]
pub fn timelines(records: &[TradeRecord]) -> Vec<Period> {
    let mut periods: Vec<Period> = records.iter().filter_map(|r| r.period().ok()).collect();
    periods.sort_unstable();
    periods.dedup();
    periods
}

/// Per-period totals for both trade types.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PeriodSeries {
    exports: Vec<(Period, f64)>,
    imports: Vec<(Period, f64)>,
}

impl PeriodSeries {
    /// The chronological `(period, total)` points for one trade type.
    #[must_use]
    pub fn points(&self, trade_type: TradeType) -> &[(Period, f64)] {
        match trade_type {
            TradeType::Export => &self.exports,
            TradeType::Import => &self.imports,
        }
    }

    /// The smallest and largest total for one trade type, if it has any points.
    #[must_use]
    pub fn extent(&self, trade_type: TradeType) -> Option<(f64, f64)> {
        let mut values = self.points(trade_type).iter().map(|(_, v)| *v);
        let first = values.next()?;
        Some(values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }

    /// Returns `true` if neither trade type has a point.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exports.is_empty() && self.imports.is_empty()
    }
}

/// Sums amounts per trade type and period for records in `category`.
///
/// A record belongs to `category` when any of its three components equals it;
/// an empty `category` keeps every record. Malformed records are skipped.
#[must_use]
pub fn sum_by_period(records: &[TradeRecord], category: &str) -> PeriodSeries {
    let mut exports: BTreeMap<Period, f64> = BTreeMap::new();
    let mut imports: BTreeMap<Period, f64> = BTreeMap::new();
    for record in records {
        if !record.in_category(category) || !record.is_well_formed() {
            continue;
        }
        let Ok(period) = record.period() else {
            continue;
        };
        let bucket = match record.trade_type {
            TradeType::Export => &mut exports,
            TradeType::Import => &mut imports,
        };
        *bucket.entry(period).or_insert(0.0) += record.data;
    }
    PeriodSeries {
        exports: exports.into_iter().collect(),
        imports: imports.into_iter().collect(),
    }
}
