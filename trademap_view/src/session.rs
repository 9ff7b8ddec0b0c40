// Copyright 2026 the Trademap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The treemap view and its pointer interaction.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};
use trademap_hierarchy::{Hierarchy, NodeId};
use trademap_index::{SpatialIndex, contains_inclusive};
use trademap_layout::{PackConfig, PackLayout, RectLayout, TreemapConfig, layout_pack, layout_rect};
use trademap_records::{PeriodSeries, TimeRange, TradeRecord, TradeType, reduce, sum_by_period};

use crate::compare::Comparison;
use crate::navigation::CategoryPath;
use crate::timeline::Timeline;
use crate::tooltip::{TooltipSize, place};

/// Layout and popup settings for a [`TreemapSession`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionConfig {
    /// Main treemap layout.
    pub treemap: TreemapConfig,
    /// Circle packing inside a grouping node's popup.
    pub pack: PackConfig,
    /// Popup sizes.
    pub tooltip: TooltipSize,
    /// Packed view area as fractions of the viewport `(width, height)`.
    pub pack_area: (f64, f64),
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            treemap: TreemapConfig::default(),
            pack: PackConfig::default(),
            tooltip: TooltipSize::default(),
            pack_area: (0.3, 0.5),
        }
    }
}

impl SessionConfig {
    /// Sets the main treemap layout settings.
    #[must_use]
    pub fn with_treemap(mut self, treemap: TreemapConfig) -> Self {
        self.treemap = treemap;
        self
    }

    /// Sets the popup circle packing settings.
    #[must_use]
    pub fn with_pack(mut self, pack: PackConfig) -> Self {
        self.pack = pack;
        self
    }

    /// Sets the popup sizing policy.
    #[must_use]
    pub fn with_tooltip(mut self, tooltip: TooltipSize) -> Self {
        self.tooltip = tooltip;
        self
    }
}

/// Derived geometry for the current selection.
#[derive(Clone, Debug)]
pub struct View {
    tree: Hierarchy,
    layout: RectLayout,
    index: SpatialIndex<NodeId>,
}

impl View {
    fn build(tree: Hierarchy, viewport: Size, config: &TreemapConfig) -> Self {
        let layout = layout_rect(&tree, viewport.width, viewport.height, config);
        let index = SpatialIndex::build(layout.child_rects(&tree, tree.root()));
        Self {
            tree,
            layout,
            index,
        }
    }

    /// The hierarchy re-rooted at the viewed category.
    #[must_use]
    pub fn tree(&self) -> &Hierarchy {
        &self.tree
    }

    /// Boxes for every node of [`tree`](Self::tree).
    #[must_use]
    pub fn layout(&self) -> &RectLayout {
        &self.layout
    }

    /// Hit-test index over the root's children.
    #[must_use]
    pub fn index(&self) -> &SpatialIndex<NodeId> {
        &self.index
    }
}

/// What the pointer is over, with its popup.
#[derive(Clone, Debug)]
pub struct Hover {
    revision: u64,
    node: NodeId,
    name: String,
    value: f64,
    share: f64,
    rect: Rect,
    tooltip: Rect,
    detail: Hierarchy,
    pack: Option<PackLayout>,
}

impl Hover {
    /// The session revision this was computed against.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The hovered child of the view root.
    #[must_use]
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Name of the hovered category.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of the hovered category.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Percentage of the view root's value.
    #[must_use]
    pub fn share(&self) -> f64 {
        self.share
    }

    /// The hovered box.
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Popup rectangle, inside the viewport.
    #[must_use]
    pub fn tooltip(&self) -> Rect {
        self.tooltip
    }

    /// The hovered category as its own hierarchy.
    #[must_use]
    pub fn detail(&self) -> &Hierarchy {
        &self.detail
    }

    /// Circle packing of [`detail`](Self::detail), for grouping nodes only.
    #[must_use]
    pub fn pack(&self) -> Option<&PackLayout> {
        self.pack.as_ref()
    }
}

/// All derived treemap state behind one invalidation point.
///
/// Inputs are the record set, trade type, time window, category path and
/// viewport. Changing any of them calls [`rebuild`](Self::rebuild), which
/// recomputes hierarchy, layout and hit-test index together, drops the hover
/// and bumps the [`revision`](Self::revision).
#[derive(Clone, Debug)]
pub struct TreemapSession {
    records: Vec<TradeRecord>,
    trade_type: TradeType,
    range: TimeRange,
    path: CategoryPath,
    viewport: Size,
    config: SessionConfig,
    revision: u64,
    view: Option<View>,
    hover: Option<Hover>,
}

impl TreemapSession {
    /// A session at the root category, built immediately.
    #[must_use]
    pub fn new(
        records: Vec<TradeRecord>,
        trade_type: TradeType,
        range: TimeRange,
        viewport: Size,
        config: SessionConfig,
    ) -> Self {
        let mut session = Self {
            records,
            trade_type,
            range,
            path: CategoryPath::new(),
            viewport,
            config,
            revision: 0,
            view: None,
            hover: None,
        };
        session.rebuild();
        session
    }

    /// Counter bumped by every rebuild.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The current view, or `None` when the selected category is absent from
    /// the active window.
    #[must_use]
    pub fn view(&self) -> Option<&View> {
        self.view.as_ref()
    }

    /// The current hover, if any.
    #[must_use]
    pub fn hovered(&self) -> Option<&Hover> {
        self.hover.as_ref()
    }

    /// The record set.
    #[must_use]
    pub fn records(&self) -> &[TradeRecord] {
        &self.records
    }

    /// Active trade type.
    #[must_use]
    pub fn trade_type(&self) -> TradeType {
        self.trade_type
    }

    /// Active time window.
    #[must_use]
    pub fn range(&self) -> TimeRange {
        self.range
    }

    /// Selected categories.
    #[must_use]
    pub fn path(&self) -> &CategoryPath {
        &self.path
    }

    /// Viewport size.
    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Settings.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Replaces the record set.
    pub fn set_records(&mut self, records: Vec<TradeRecord>) {
        self.records = records;
        self.rebuild();
    }

    /// Switches between exports and imports.
    pub fn set_trade_type(&mut self, trade_type: TradeType) {
        if self.trade_type != trade_type {
            self.trade_type = trade_type;
            self.rebuild();
        }
    }

    /// Selects a new time window.
    pub fn set_range(&mut self, range: TimeRange) {
        if !self.range.is_same(&range) {
            self.range = range;
            self.rebuild();
        }
    }

    /// Jumps to a category path, for example from a breadcrumb.
    pub fn set_path(&mut self, path: CategoryPath) {
        if self.path != path {
            self.path = path;
            self.rebuild();
        }
    }

    /// Resizes the viewport.
    pub fn set_viewport(&mut self, viewport: Size) {
        if self.viewport != viewport {
            self.viewport = viewport;
            self.rebuild();
        }
    }

    /// Replaces the settings.
    pub fn set_config(&mut self, config: SessionConfig) {
        if self.config != config {
            self.config = config;
            self.rebuild();
        }
    }

    /// Recomputes every derived value from the current inputs.
    pub fn rebuild(&mut self) {
        self.revision = self.revision.wrapping_add(1);
        self.hover = None;
        let full = Hierarchy::build(&reduce(&self.records, self.trade_type, &self.range));
        self.view = self
            .path
            .resolve(&full)
            .map(|tree| View::build(tree, self.viewport, &self.config.treemap));
        tracing::debug!(
            revision = self.revision,
            records = self.records.len(),
            range = %self.range,
            category = self.path.current(),
            nodes = self.view.as_ref().map_or(0, |v| v.tree.len()),
            "treemap session rebuilt"
        );
    }

    /// Updates the hover for pointer position `pt`.
    ///
    /// While the pointer stays inside the hovered box the previous result is
    /// kept as is.
    pub fn hover(&mut self, pt: Point) -> Option<&Hover> {
        let still_inside = self
            .hover
            .as_ref()
            .is_some_and(|h| contains_inclusive(&h.rect, pt));
        if !still_inside {
            self.hover = self.hit(pt);
        }
        self.hover.as_ref()
    }

    /// Clears the hover, as when the pointer leaves the chart.
    pub fn leave(&mut self) {
        self.hover = None;
    }

    /// Drills into the category under `pt`.
    ///
    /// Returns `true` if the path changed. Clicking the category already
    /// being viewed does nothing.
    pub fn click(&mut self, pt: Point) -> bool {
        let Some(name) = self.hover(pt).map(|h| String::from(h.name())) else {
            return false;
        };
        if name == self.path.current() {
            return false;
        }
        self.path = self.path.navigate(&name);
        self.rebuild();
        true
    }

    /// Compares the active window against `interact` for the viewed category,
    /// laid out in the comparison panel's `size`.
    #[must_use]
    pub fn compare(&self, interact: TimeRange, size: Size) -> Option<Comparison> {
        Comparison::along(
            &self.records,
            self.trade_type,
            self.range,
            interact,
            &self.path,
            size,
            &self.config.treemap,
        )
    }

    /// A timeline over the record set's periods.
    #[must_use]
    pub fn timeline(&self, width: f64) -> Timeline {
        Timeline::from_records(&self.records, width)
    }

    /// Per-period totals for the viewed category.
    #[must_use]
    pub fn series(&self) -> PeriodSeries {
        sum_by_period(&self.records, self.path.current())
    }

    fn hit(&self, pt: Point) -> Option<Hover> {
        let view = self.view.as_ref()?;
        let (node, rect) = view.index.query_with_rect(pt)?;
        let tree = &view.tree;
        let hit = tree.node(node);
        let max = self
            .config
            .tooltip
            .for_node(hit.has_children(), self.viewport);
        let detail = tree.subtree(node);
        let pack = hit.has_children().then(|| {
            let (fw, fh) = self.config.pack_area;
            layout_pack(
                &detail,
                self.viewport.width * fw,
                self.viewport.height * fh,
                &self.config.pack,
            )
        });
        Some(Hover {
            revision: self.revision,
            node,
            name: String::from(hit.name()),
            value: hit.value(),
            share: tree.share(node),
            rect,
            tooltip: place(rect, self.viewport, max),
            detail,
            pack,
        })
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use alloc::vec;

    fn records() -> Vec<TradeRecord> {
        vec![
            TradeRecord::new(["Asia", "China", "Chips"], TradeType::Export, "2020.01", 60.0),
            TradeRecord::new(["Asia", "China", "Cars"], TradeType::Export, "2020.01", 20.0),
            TradeRecord::new(["Asia", "Japan", "Chips"], TradeType::Export, "2020.01", 20.0),
            TradeRecord::new(["Europe", "France", "Wine"], TradeType::Export, "2020.01", 50.0),
            TradeRecord::new(["Europe", "France", "Wine"], TradeType::Import, "2020.01", 70.0),
            TradeRecord::new(["Asia", "China", "Chips"], TradeType::Export, "2020.02", 10.0),
        ]
    }

    fn session() -> TreemapSession {
        TreemapSession::new(
            records(),
            TradeType::Export,
            TimeRange::parse("2020.01", None).unwrap(),
            Size::new(600.0, 400.0),
            SessionConfig::default(),
        )
    }

    fn center_of(s: &TreemapSession, name: &str) -> Point {
        let view = s.view().unwrap();
        let id = view.tree().find(name).unwrap();
        view.layout().rect(id).center()
    }

    #[test]
    fn builds_root_view_on_creation() {
        let s = session();
        assert_eq!(s.revision(), 1);
        let view = s.view().unwrap();
        assert_eq!(view.tree().total(), 150.0);
        assert_eq!(view.index().len(), 2);
    }

    #[test]
    fn hover_reports_child_with_tooltip_and_pack() {
        let mut s = session();
        let pt = center_of(&s, "Asia");
        let h = s.hover(pt).unwrap();
        assert_eq!(h.name(), "Asia");
        assert_eq!(h.value(), 100.0);
        assert!((h.share() - 100.0 / 150.0 * 100.0).abs() < 1e-9);
        assert_eq!(h.revision(), 1);
        assert_eq!(h.detail().total(), 100.0);
        let pack = h.pack().unwrap();
        assert_eq!(pack.len(), h.detail().len());
        let t = h.tooltip();
        assert!(t.x0 >= 0.0 && t.y0 >= 0.0 && t.x1 <= 600.0 && t.y1 <= 400.0);
    }

    #[test]
    fn hover_outside_any_box_is_none() {
        let mut s = session();
        assert!(s.hover(Point::new(1.0, 1.0)).is_none());
        assert!(s.hover(Point::new(-50.0, 10.0)).is_none());
    }

    #[test]
    fn click_drills_down_and_rebuilds() {
        let mut s = session();
        let pt = center_of(&s, "Asia");
        assert!(s.click(pt));
        assert_eq!(s.path().current(), "Asia");
        assert_eq!(s.revision(), 2);
        assert!(s.hovered().is_none());
        let view = s.view().unwrap();
        assert_eq!(view.tree().node(view.tree().root()).name(), "Asia");
        assert_eq!(view.index().len(), 2);

        let pt = center_of(&s, "China");
        assert!(s.click(pt));
        assert_eq!(s.path().depth(), 2);
        // Leaves of a drilled-down view carry no pack.
        let pt = center_of(&s, "Chips");
        assert!(s.hover(pt).unwrap().pack().is_none());
    }

    #[test]
    fn input_changes_invalidate_together() {
        let mut s = session();
        s.hover(center_of(&s, "Asia"));
        s.set_trade_type(TradeType::Import);
        assert_eq!(s.revision(), 2);
        assert!(s.hovered().is_none());
        assert_eq!(s.view().unwrap().tree().total(), 70.0);
        // Unchanged input does not rebuild.
        s.set_trade_type(TradeType::Import);
        assert_eq!(s.revision(), 2);
    }

    #[test]
    fn repeated_names_resolve_along_the_path() {
        let mut s = session();
        s.set_path(CategoryPath::from_levels(["Asia", "Japan", "Chips"]));
        assert_eq!(s.view().unwrap().tree().total(), 20.0);
        s.set_path(CategoryPath::from_levels(["Asia", "China", "Chips"]));
        assert_eq!(s.view().unwrap().tree().total(), 60.0);
    }

    #[test]
    fn missing_category_leaves_no_view() {
        let mut s = session();
        s.set_path(CategoryPath::from_levels(["Asia"]));
        s.set_range(TimeRange::parse("2020.02", None).unwrap());
        assert!(s.view().is_some());
        s.set_trade_type(TradeType::Import);
        assert!(s.view().is_none());
        assert!(s.hover(Point::new(100.0, 100.0)).is_none());
        assert!(!s.click(Point::new(100.0, 100.0)));
    }

    #[test]
    fn compare_and_footer_helpers_follow_the_path() {
        let mut s = session();
        s.set_path(CategoryPath::from_levels(["Asia"]));
        let panel = Size::new(240.0, 160.0);
        let cmp = s
            .compare(TimeRange::parse("2020.02", None).unwrap(), panel)
            .unwrap();
        assert_eq!(cmp.delta("China"), Some(0));
        assert_eq!(cmp.interact().layout().size(), panel);
        assert_eq!(s.timeline(200.0).len(), 2);
        let series = s.series();
        assert_eq!(series.points(TradeType::Export).len(), 2);
    }
}
