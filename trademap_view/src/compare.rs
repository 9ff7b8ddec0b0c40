// Copyright 2026 the Trademap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Side-by-side snapshots of two time windows.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Size;
use trademap_hierarchy::{Hierarchy, RankChange, ranked_deltas};
use trademap_layout::{RectLayout, TreemapConfig, layout_rect};
use trademap_records::{TimeRange, TradeRecord, TradeType, reduce};

use crate::navigation::CategoryPath;

/// One window's hierarchy, re-rooted at the viewed category, with its layout.
#[derive(Clone, Debug)]
pub struct Snapshot {
    range: TimeRange,
    tree: Hierarchy,
    layout: RectLayout,
}

impl Snapshot {
    /// Aggregates `records` over `range`, re-roots at `category` and lays the
    /// result out in `size`.
    ///
    /// Returns `None` if `category` does not occur in the window.
    #[must_use]
    pub fn build(
        records: &[TradeRecord],
        trade_type: TradeType,
        range: TimeRange,
        category: &str,
        size: Size,
        config: &TreemapConfig,
    ) -> Option<Self> {
        Self::rerooted(records, trade_type, range, size, config, |full| {
            full.find_by_category(category)
        })
    }

    /// Like [`build`](Self::build), re-rooting along `path` level by level.
    #[must_use]
    pub fn build_along(
        records: &[TradeRecord],
        trade_type: TradeType,
        range: TimeRange,
        path: &CategoryPath,
        size: Size,
        config: &TreemapConfig,
    ) -> Option<Self> {
        Self::rerooted(records, trade_type, range, size, config, |full| {
            path.resolve(full)
        })
    }

    fn rerooted(
        records: &[TradeRecord],
        trade_type: TradeType,
        range: TimeRange,
        size: Size,
        config: &TreemapConfig,
        pick: impl FnOnce(&Hierarchy) -> Option<Hierarchy>,
    ) -> Option<Self> {
        let full = Hierarchy::build(&reduce(records, trade_type, &range));
        let tree = pick(&full)?;
        let layout = layout_rect(&tree, size.width, size.height, config);
        Some(Self {
            range,
            tree,
            layout,
        })
    }

    /// The window this snapshot aggregates.
    #[must_use]
    pub fn range(&self) -> TimeRange {
        self.range
    }

    /// The re-rooted hierarchy.
    #[must_use]
    pub fn tree(&self) -> &Hierarchy {
        &self.tree
    }

    /// Boxes for [`tree`](Self::tree).
    #[must_use]
    pub fn layout(&self) -> &RectLayout {
        &self.layout
    }
}

/// A reference window compared against the window being explored.
///
/// Deltas follow [`compare_ranks`](trademap_hierarchy::compare_ranks): the
/// position among the current snapshot's top-level children minus the
/// position in the interacting one.
#[derive(Clone, Debug)]
pub struct Comparison {
    current: Snapshot,
    interact: Snapshot,
    deltas: Vec<(String, i32)>,
}

impl Comparison {
    /// Builds both snapshots independently and ranks them against each other.
    ///
    /// Returns `None` if `category` is missing from either window.
    #[must_use]
    pub fn between(
        records: &[TradeRecord],
        trade_type: TradeType,
        current: TimeRange,
        interact: TimeRange,
        category: &str,
        size: Size,
        config: &TreemapConfig,
    ) -> Option<Self> {
        let current = Snapshot::build(records, trade_type, current, category, size, config)?;
        let interact = Snapshot::build(records, trade_type, interact, category, size, config)?;
        Some(Self::from_snapshots(current, interact))
    }

    /// Like [`between`](Self::between), re-rooting both windows along `path`.
    #[must_use]
    pub fn along(
        records: &[TradeRecord],
        trade_type: TradeType,
        current: TimeRange,
        interact: TimeRange,
        path: &CategoryPath,
        size: Size,
        config: &TreemapConfig,
    ) -> Option<Self> {
        let current = Snapshot::build_along(records, trade_type, current, path, size, config)?;
        let interact = Snapshot::build_along(records, trade_type, interact, path, size, config)?;
        Some(Self::from_snapshots(current, interact))
    }

    fn from_snapshots(current: Snapshot, interact: Snapshot) -> Self {
        let deltas = ranked_deltas(current.tree(), interact.tree());
        tracing::debug!(
            current = %current.range,
            interact = %interact.range,
            compared = deltas.len(),
            "comparison built"
        );
        Self {
            current,
            interact,
            deltas,
        }
    }

    /// The reference snapshot.
    #[must_use]
    pub fn current(&self) -> &Snapshot {
        &self.current
    }

    /// The snapshot being explored.
    #[must_use]
    pub fn interact(&self) -> &Snapshot {
        &self.interact
    }

    /// `(name, delta)` pairs in the interacting snapshot's rank order.
    #[must_use]
    pub fn deltas(&self) -> &[(String, i32)] {
        &self.deltas
    }

    /// Delta for `name`, if it is ranked in both snapshots.
    #[must_use]
    pub fn delta(&self, name: &str) -> Option<i32> {
        self.deltas
            .iter()
            .find(|(n, _)| n == name)
            .map(|&(_, d)| d)
    }

    /// How `name` moved, if it is ranked in both snapshots.
    #[must_use]
    pub fn change(&self, name: &str) -> Option<RankChange> {
        self.delta(name).map(RankChange::from_delta)
    }
}
