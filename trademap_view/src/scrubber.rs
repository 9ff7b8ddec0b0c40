// Copyright 2026 the Trademap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dragging the selected time window along a [`Timeline`].
//!
//! ## Usage
//!
//! 1) Call [`Scrubber::start`] on pointer down with the grabbed [`DragHandle`].
//! 2) On each pointer move, call [`Scrubber::update`]; it returns the pending
//!    window for live preview.
//! 3) On pointer up, call [`Scrubber::end`] to commit the pending window, or
//!    [`Scrubber::cancel`] to drop it.
//!
//! Every move is measured from the pointer-down position and applied to the
//! committed window, so rounding never accumulates across moves.
//!
//! ```
//! use kurbo::Point;
//! use trademap_records::{Period, TimeRange};
//! use trademap_view::{DragHandle, Scrubber, Timeline};
//!
//! let months: Vec<Period> = (1..=12).map(|m| Period::new(2020, m).unwrap()).collect();
//! let timeline = Timeline::new(months.clone(), 1200.0);
//! let mut scrubber = Scrubber::new(TimeRange::span(months[0], months[2]).unwrap());
//!
//! scrubber.start(DragHandle::Window, Point::new(50.0, 10.0));
//! let preview = scrubber.update(&timeline, Point::new(250.0, 12.0));
//! assert_eq!(preview, Some(TimeRange::span(months[2], months[4]).unwrap()));
//!
//! scrubber.end();
//! assert_eq!(scrubber.range(), TimeRange::span(months[2], months[4]).unwrap());
//! ```

use kurbo::Point;
use trademap_records::{Period, TimeRange};

use crate::timeline::Timeline;

/// The part of the window the pointer grabbed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DragHandle {
    /// The body of a span: both ends move together, keeping the span length.
    Window,
    /// The left end of a span.
    Start,
    /// The right end of a span.
    End,
    /// The marker of a single-period selection: dragging it opens a span.
    Tip,
}

#[derive(Copy, Clone, Debug)]
struct ActiveDrag {
    handle: DragHandle,
    origin: Point,
}

/// Committed time window plus an in-progress drag.
#[derive(Clone, Debug)]
pub struct Scrubber {
    range: TimeRange,
    drag: Option<ActiveDrag>,
    pending: Option<TimeRange>,
}

impl Scrubber {
    /// A scrubber with `range` committed and no drag in progress.
    #[must_use]
    pub fn new(range: TimeRange) -> Self {
        Self {
            range,
            drag: None,
            pending: None,
        }
    }

    /// The committed window.
    #[must_use]
    pub fn range(&self) -> TimeRange {
        self.range
    }

    /// Replaces the committed window and drops any drag.
    pub fn set_range(&mut self, range: TimeRange) {
        self.range = range;
        self.cancel();
    }

    /// The window the current drag would commit, if it has moved yet.
    #[must_use]
    pub fn pending(&self) -> Option<TimeRange> {
        self.pending
    }

    /// The window to display: pending while dragging, else committed.
    #[must_use]
    pub fn visible(&self) -> TimeRange {
        self.pending.unwrap_or(self.range)
    }

    /// Returns `true` while a drag is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// The grabbed handle, while dragging.
    #[must_use]
    pub fn handle(&self) -> Option<DragHandle> {
        self.drag.map(|d| d.handle)
    }

    /// Starts dragging `handle` from pointer position `pos`.
    pub fn start(&mut self, handle: DragHandle, pos: Point) {
        self.drag = Some(ActiveDrag {
            handle,
            origin: pos,
        });
        self.pending = None;
    }

    /// Moves the pointer to `pos` and returns the pending window.
    ///
    /// Only the horizontal offset from the pointer-down position matters. A
    /// move that would push either end left of the timeline leaves the
    /// pending window unchanged. Returns `None` when not dragging or before
    /// any valid move.
    pub fn update(&mut self, timeline: &Timeline, pos: Point) -> Option<TimeRange> {
        let drag = self.drag?;
        let dx = (pos - drag.origin).x;
        if let Some(next) = self.propose(timeline, drag.handle, dx) {
            self.pending = Some(next);
        }
        self.pending
    }

    /// Ends the drag, committing the pending window.
    ///
    /// A span whose ends met becomes a single-period selection. Returns the
    /// new committed window if the drag produced one.
    pub fn end(&mut self) -> Option<TimeRange> {
        self.drag = None;
        let committed = self.pending.take()?.collapsed();
        if committed != self.range {
            tracing::debug!(from = %self.range, to = %committed, "time window committed");
        }
        self.range = committed;
        Some(committed)
    }

    /// Ends the drag without committing.
    pub fn cancel(&mut self) {
        self.drag = None;
        self.pending = None;
    }

    fn propose(&self, timeline: &Timeline, handle: DragHandle, dx: f64) -> Option<TimeRange> {
        let shift = |p: Period| {
            timeline
                .x_of_period(p)
                .and_then(|x| timeline.period_at(x + dx))
        };
        let start = self.range.start();
        match (handle, self.range.end()) {
            (DragHandle::Window, Some(end)) => {
                let new_start = shift(start)?;
                let new_end = shift(end)?;
                let last = timeline.last()?;
                if new_end == last {
                    // Pinned at the right edge: keep the span length instead of
                    // letting the clamped end squeeze it.
                    let gap = timeline.index_of(end)? - timeline.index_of(start)?;
                    let first = timeline.get((timeline.len() - 1).checked_sub(gap)?)?;
                    Some(TimeRange::between(first, last))
                } else {
                    Some(TimeRange::between(new_start, new_end))
                }
            }
            (DragHandle::Window, None) => shift(start).map(TimeRange::point),
            (DragHandle::Start, Some(end)) => Some(TimeRange::between(shift(start)?, end)),
            (DragHandle::End | DragHandle::Tip, Some(end)) => {
                Some(TimeRange::between(start, shift(end)?))
            }
            (DragHandle::Start | DragHandle::End | DragHandle::Tip, None) => {
                Some(TimeRange::between(start, shift(start)?))
            }
        }
    }
}
