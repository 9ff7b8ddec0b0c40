// Copyright 2026 the Trademap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `trademap_records` crate.
//!
//! These exercise the ingestion-to-aggregation path the host runs once per
//! window change: drop subtotal rows, then reduce by trade type and window.

use trademap_records::{
    GRAND_TOTAL_LABEL, Period, SUBTOTAL_LABEL, TimeRange, TradeRecord, TradeType, reduce,
    timelines, without_subtotals,
};

fn sample() -> Vec<TradeRecord> {
    let mut out = Vec::new();
    for (time, scale) in [("2020. 01", 1.0), ("2020. 02", 2.0), ("2020. 03", 3.0)] {
        out.push(TradeRecord::new(
            [GRAND_TOTAL_LABEL, SUBTOTAL_LABEL, SUBTOTAL_LABEL],
            TradeType::Export,
            time,
            1000.0 * scale,
        ));
        out.push(TradeRecord::new(
            ["Asia", SUBTOTAL_LABEL, SUBTOTAL_LABEL],
            TradeType::Export,
            time,
            600.0 * scale,
        ));
        out.push(TradeRecord::new(
            ["Asia", "China", "Chips"],
            TradeType::Export,
            time,
            400.0 * scale,
        ));
        out.push(TradeRecord::new(
            ["Asia", "Japan", "Cars"],
            TradeType::Export,
            time,
            200.0 * scale,
        ));
        out.push(TradeRecord::new(
            ["Europe", "France", "Wine"],
            TradeType::Import,
            time,
            50.0 * scale,
        ));
    }
    out
}

#[test]
fn subtotals_would_double_count() {
    let records = sample();
    let range = TimeRange::parse("2020.01", None).unwrap();

    let raw = reduce(&records, TradeType::Export, &range);
    let clean = reduce(&without_subtotals(&records), TradeType::Export, &range);

    assert_eq!(clean.total(), 600.0);
    assert!(raw.total() > clean.total());
}

#[test]
fn span_sums_every_month_in_window() {
    let records = without_subtotals(&sample());
    let range = TimeRange::parse("2020.02", Some("2020.03")).unwrap();
    let tree = reduce(&records, TradeType::Export, &range);

    assert_eq!(tree.get("Asia", "China", "Chips"), Some(400.0 * 5.0));
    assert_eq!(tree.get("Asia", "Japan", "Cars"), Some(200.0 * 5.0));
    assert_eq!(tree.get("Europe", "France", "Wine"), None);
}

#[test]
fn timeline_domain_comes_from_raw_period_keys() {
    let records = sample();
    let periods: Vec<Period> = timelines(&records);
    let text: Vec<String> = periods.iter().map(ToString::to_string).collect();
    assert_eq!(text, ["2020.01", "2020.02", "2020.03"]);
}
