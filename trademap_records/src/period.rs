// Copyright 2026 the Trademap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Calendar periods (`YYYY.MM`) and the time windows built from them.

use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};

/// Errors produced when parsing a [`Period`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PeriodError {
    /// The input has no `.` between year and month.
    #[error("period `{input}` is missing the `.` between year and month")]
    MissingSeparator {
        /// The rejected input.
        input: String,
    },
    /// The year or month component is not a decimal number.
    #[error("period `{input}` has a non-numeric year or month")]
    NotNumeric {
        /// The rejected input.
        input: String,
    },
    /// The components parse but do not name a representable calendar month.
    #[error("period `{input}` does not name a calendar month")]
    OutOfRange {
        /// The rejected input.
        input: String,
    },
}

/// Errors produced when building a [`TimeRange`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TimeRangeError {
    /// One of the endpoints failed to parse.
    #[error(transparent)]
    Period(#[from] PeriodError),
    /// The span ends before it starts.
    #[error("time range {start} - {end} ends before it starts")]
    Reversed {
        /// The requested start.
        start: Period,
        /// The requested end.
        end: Period,
    },
}

/// A calendar month, ordered chronologically.
///
/// The canonical text form is `YYYY.MM`. Parsing is lenient about whitespace
/// (raw exports write `2020. 01`) and single-digit months, so two spellings of
/// the same month compare equal once parsed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period(NaiveDate);

impl Period {
    /// Creates a period from a year and a 1-based month.
    #[must_use]
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    /// The calendar year.
    #[must_use]
    pub fn year(self) -> i32 {
        self.0.year()
    }

    /// The 1-based month.
    #[must_use]
    pub fn month(self) -> u32 {
        self.0.month()
    }

    /// The first day of the month.
    #[must_use]
    pub fn first_day(self) -> NaiveDate {
        self.0
    }

    /// The following month, if representable.
    #[must_use]
    pub fn succ(self) -> Option<Self> {
        self.0.checked_add_months(Months::new(1)).map(Self)
    }

    /// The preceding month, if representable.
    #[must_use]
    pub fn pred(self) -> Option<Self> {
        self.0.checked_sub_months(Months::new(1)).map(Self)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}.{:02}", self.year(), self.month())
    }
}

impl FromStr for Period {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        let Some((year, month)) = compact.split_once('.') else {
            return Err(PeriodError::MissingSeparator {
                input: s.to_string(),
            });
        };
        let numeric = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !numeric(year) || !numeric(month) {
            return Err(PeriodError::NotNumeric {
                input: s.to_string(),
            });
        }
        let out_of_range = || PeriodError::OutOfRange {
            input: s.to_string(),
        };
        let year: i32 = year.parse().map_err(|_| out_of_range())?;
        let month: u32 = month.parse().map_err(|_| out_of_range())?;
        Self::new(year, month).ok_or_else(out_of_range)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Period {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Period {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = <String as serde::Deserialize<'de>>::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// The active time window: a single period, or an inclusive span.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeRange {
    start: Period,
    end: Option<Period>,
}

impl TimeRange {
    /// A single-period selection.
    #[must_use]
    pub const fn point(period: Period) -> Self {
        Self {
            start: period,
            end: None,
        }
    }

    /// An inclusive span. Fails if `end` precedes `start`.
    pub fn span(start: Period, end: Period) -> Result<Self, TimeRangeError> {
        if end < start {
            return Err(TimeRangeError::Reversed { start, end });
        }
        Ok(Self {
            start,
            end: Some(end),
        })
    }

    /// An inclusive span between two periods given in either order.
    #[must_use]
    pub fn between(a: Period, b: Period) -> Self {
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        Self {
            start,
            end: Some(end),
        }
    }

    /// Parses a range from its text endpoints.
    pub fn parse(start: &str, end: Option<&str>) -> Result<Self, TimeRangeError> {
        let start: Period = start.parse()?;
        match end {
            None => Ok(Self::point(start)),
            Some(end) => Self::span(start, end.parse()?),
        }
    }

    /// The first period of the window.
    #[must_use]
    pub fn start(&self) -> Period {
        self.start
    }

    /// The last period of a span, or `None` for a single-period selection.
    #[must_use]
    pub fn end(&self) -> Option<Period> {
        self.end
    }

    /// Returns `true` for a single-period selection.
    #[must_use]
    pub fn is_point(&self) -> bool {
        self.end.is_none()
    }

    /// Returns `true` if `period` falls inside the window.
    ///
    /// A single-period window matches exactly that period; a span matches
    /// chronologically between its endpoints, inclusive.
    #[must_use]
    pub fn contains(&self, period: Period) -> bool {
        match self.end {
            None => period == self.start,
            Some(end) => self.start <= period && period <= end,
        }
    }

    /// Collapses a span whose endpoints coincide into a single-period selection.
    #[must_use]
    pub fn collapsed(self) -> Self {
        match self.end {
            Some(end) if end == self.start => Self::point(self.start),
            _ => self,
        }
    }

    /// Returns `true` if both windows select the same periods in the same shape.
    ///
    /// A point and a one-period span are not the same window.
    #[must_use]
    pub fn is_same(&self, other: &Self) -> bool {
        self == other
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end {
            None => write!(f, "{}", self.start),
            Some(end) => write!(f, "{} - {}", self.start, end),
        }
    }
}
