// Copyright 2026 the Trademap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trade records as produced by ingestion.

use alloc::string::String;
use alloc::vec::Vec;

use crate::period::{Period, PeriodError};

/// Label used by the statistics export for the grand-total row at depth 1.
pub const GRAND_TOTAL_LABEL: &str = "총액";

/// Label used by the statistics export for subtotal rows at depths 2 and 3.
pub const SUBTOTAL_LABEL: &str = "소계";

/// Direction of trade a record measures.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TradeType {
    /// Export amounts.
    Export,
    /// Import amounts.
    Import,
}

impl TradeType {
    /// Both trade types, exports first.
    pub const ALL: [Self; 2] = [Self::Export, Self::Import];

    /// The column label the statistics export uses for this trade type.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Export => "수출액 (천달러)",
            Self::Import => "수입액 (천달러)",
        }
    }

    /// Looks up a trade type by its export column label.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == label.trim())
    }
}

/// One time-stamped, categorized amount.
///
/// Records are produced once at ingestion and never mutated. Field contents are
/// not validated on construction: dirty rows are tolerated here and skipped by
/// aggregation (see [`TradeRecord::is_well_formed`]).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TradeRecord {
    /// Top-level category (for example a region).
    pub category_depth1: String,
    /// Second-level category.
    pub category_depth2: String,
    /// Third-level category.
    pub category_depth3: String,
    /// Export or import.
    pub trade_type: TradeType,
    /// Period key, canonically `YYYY.MM`.
    pub time: String,
    /// Amount for this record.
    pub data: f64,
}

impl TradeRecord {
    /// Creates a record.
    #[must_use]
    pub fn new(categories: [&str; 3], trade_type: TradeType, time: &str, data: f64) -> Self {
        let [d1, d2, d3] = categories;
        Self {
            category_depth1: d1.into(),
            category_depth2: d2.into(),
            category_depth3: d3.into(),
            trade_type,
            time: time.into(),
            data,
        }
    }

    /// The three category components, outermost first.
    #[must_use]
    pub fn categories(&self) -> [&str; 3] {
        [
            self.category_depth1.as_str(),
            self.category_depth2.as_str(),
            self.category_depth3.as_str(),
        ]
    }

    /// Parses the record's period.
    pub fn period(&self) -> Result<Period, PeriodError> {
        self.time.parse()
    }

    /// Returns `true` if the record can take part in aggregation.
    ///
    /// A record is well formed when every category component is non-blank,
    /// its period parses, and its amount is finite.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.categories().iter().all(|c| !c.trim().is_empty())
            && self.period().is_ok()
            && self.data.is_finite()
    }

    /// Returns `true` for grand-total and subtotal rows.
    #[must_use]
    pub fn is_subtotal(&self) -> bool {
        self.category_depth1 == GRAND_TOTAL_LABEL
            || self.category_depth2 == SUBTOTAL_LABEL
            || self.category_depth3 == SUBTOTAL_LABEL
    }

    /// Returns `true` if any category component equals `category`.
    ///
    /// An empty `category` matches every record.
    #[must_use]
    pub fn in_category(&self, category: &str) -> bool {
        category.is_empty() || self.categories().contains(&category)
    }
}

/// Drops grand-total and subtotal rows, which would double-count in a treemap.
#[must_use]
pub fn without_subtotals(records: &[TradeRecord]) -> Vec<TradeRecord> {
    records.iter().filter(|r| !r.is_subtotal()).cloned().collect()
}

/// Keeps only grand-total and subtotal rows.
#[must_use]
pub fn subtotals_only(records: &[TradeRecord]) -> Vec<TradeRecord> {
    records.iter().filter(|r| r.is_subtotal()).cloned().collect()
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn trade_type_labels_round_trip() {
        for t in TradeType::ALL {
            assert_eq!(TradeType::from_label(t.label()), Some(t));
        }
        assert_eq!(TradeType::from_label("unknown"), None);
    }

    #[test]
    fn well_formedness() {
        let ok = TradeRecord::new(["A", "B", "C"], TradeType::Export, "2020.01", 1.0);
        assert!(ok.is_well_formed());

        let blank = TradeRecord::new(["A", " ", "C"], TradeType::Export, "2020.01", 1.0);
        assert!(!blank.is_well_formed());

        let bad_time = TradeRecord::new(["A", "B", "C"], TradeType::Export, "n/a", 1.0);
        assert!(!bad_time.is_well_formed());

        let nan = TradeRecord::new(["A", "B", "C"], TradeType::Export, "2020.01", f64::NAN);
        assert!(!nan.is_well_formed());
    }

    #[test]
    fn subtotal_rows_are_separated() {
        let row = |cats: [&str; 3], data: f64| {
            TradeRecord::new(cats, TradeType::Export, "2020.01", data)
        };
        let rows = [
            row([GRAND_TOTAL_LABEL, SUBTOTAL_LABEL, SUBTOTAL_LABEL], 10.0),
            row(["Asia", SUBTOTAL_LABEL, SUBTOTAL_LABEL], 7.0),
            row(["Asia", "China", SUBTOTAL_LABEL], 4.0),
            row(["Asia", "China", "Chips"], 4.0),
        ];
        let detail = without_subtotals(&rows);
        assert_eq!(detail.len(), 1);
        assert_eq!(detail[0].category_depth3, "Chips");
        assert_eq!(subtotals_only(&rows).len(), 3);
    }

    #[test]
    fn category_membership_checks_every_depth() {
        let r = TradeRecord::new(["Asia", "China", "Chips"], TradeType::Import, "2020.01", 1.0);
        assert!(r.in_category(""));
        assert!(r.in_category("Asia"));
        assert!(r.in_category("China"));
        assert!(r.in_category("Chips"));
        assert!(!r.in_category("Europe"));
    }
}
