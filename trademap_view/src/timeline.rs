// Copyright 2026 the Trademap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Band scale mapping periods onto a horizontal pixel axis.

use alloc::vec::Vec;
use core::ops::Range;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `round`
use trademap_records::{Period, TradeRecord, timelines};

/// The footer timeline: distinct periods spread evenly over `[0, width]`.
///
/// Each period owns a band of `width / len` pixels starting at
/// [`x_of`](Self::x_of). Pointer positions map back to the nearest band
/// boundary, so a pointer past the right end snaps to the last period and one
/// that rounds to a boundary below 0 maps to nothing.
#[derive(Clone, Debug, PartialEq)]
pub struct Timeline {
    periods: Vec<Period>,
    width: f64,
}

impl Timeline {
    /// A timeline over `periods`, which are sorted and deduplicated.
    #[must_use]
    pub fn new(mut periods: Vec<Period>, width: f64) -> Self {
        periods.sort_unstable();
        periods.dedup();
        Self {
            periods,
            width: width.max(0.0),
        }
    }

    /// A timeline over every period present in `records`.
    #[must_use]
    pub fn from_records(records: &[TradeRecord], width: f64) -> Self {
        Self::new(timelines(records), width)
    }

    /// The periods, earliest first.
    #[must_use]
    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    /// Number of periods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// Returns `true` if there are no periods.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Axis width in pixels.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Sets the axis width, for example after a resize.
    pub fn set_width(&mut self, width: f64) {
        self.width = width.max(0.0);
    }

    /// Width of one band, or 0 for an empty timeline.
    #[must_use]
    pub fn step(&self) -> f64 {
        if self.periods.is_empty() {
            0.0
        } else {
            self.width / self.periods.len() as f64
        }
    }

    /// The period at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Period> {
        self.periods.get(index).copied()
    }

    /// The latest period.
    #[must_use]
    pub fn last(&self) -> Option<Period> {
        self.periods.last().copied()
    }

    /// Position of `period` on the timeline.
    #[must_use]
    pub fn index_of(&self, period: Period) -> Option<usize> {
        self.periods.binary_search(&period).ok()
    }

    /// Left edge of band `index`.
    #[must_use]
    pub fn x_of(&self, index: usize) -> Option<f64> {
        (index < self.periods.len()).then(|| index as f64 * self.step())
    }

    /// Left edge of the band for `period`.
    #[must_use]
    pub fn x_of_period(&self, period: Period) -> Option<f64> {
        self.index_of(period).and_then(|i| self.x_of(i))
    }

    /// Pixel extent of band `index`.
    #[must_use]
    pub fn band(&self, index: usize) -> Option<Range<f64>> {
        let x = self.x_of(index)?;
        Some(x..x + self.step())
    }

    /// Index of the band boundary nearest to `x`.
    ///
    /// Positions within half a band left of the axis still snap to 0. Positions
    /// that round to below 0 yield `None`, and positions past the last band
    /// clamp to the last period.
    #[must_use]
    pub fn index_at(&self, x: f64) -> Option<usize> {
        if self.periods.is_empty() || self.width <= 0.0 || !x.is_finite() {
            return None;
        }
        let pos = (x / self.step()).round();
        if pos < 0.0 {
            return None;
        }
        let last = self.periods.len() - 1;
        if pos >= last as f64 {
            return Some(last);
        }
        #[expect(clippy::cast_possible_truncation, reason = "pos is in [0, last)")]
        let index = pos as usize;
        Some(index)
    }

    /// The period whose band boundary is nearest to `x`.
    #[must_use]
    pub fn period_at(&self, x: f64) -> Option<Period> {
        self.index_at(x).and_then(|i| self.get(i))
    }
}
