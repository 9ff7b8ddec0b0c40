// Copyright 2026 the Trademap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drill-down state: up to three selected category names.

use alloc::string::String;
use core::fmt;

use smallvec::SmallVec;
use trademap_hierarchy::Hierarchy;

/// Deepest drill-down supported by the category hierarchy.
pub const MAX_DEPTH: usize = 3;

/// The selected categories, outermost first.
///
/// An empty path views the whole hierarchy. Each [`navigate`](Self::navigate)
/// fills the next level; navigating once all [`MAX_DEPTH`] levels are set
/// returns to the root.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoryPath {
    levels: SmallVec<[String; MAX_DEPTH]>,
}

impl CategoryPath {
    /// The root view.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A path from host-supplied levels.
    ///
    /// Levels are read in order until the first blank one; anything past
    /// [`MAX_DEPTH`] is ignored.
    pub fn from_levels<'a>(levels: impl IntoIterator<Item = &'a str>) -> Self {
        let levels = levels
            .into_iter()
            .map(str::trim)
            .take_while(|l| !l.is_empty())
            .take(MAX_DEPTH)
            .map(String::from)
            .collect();
        Self { levels }
    }

    /// The selected name at `level` (0-based), if set.
    #[must_use]
    pub fn get(&self, level: usize) -> Option<&str> {
        self.levels.get(level).map(String::as_str)
    }

    /// The levels from outermost to innermost.
    pub fn levels(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.levels.iter().map(String::as_str)
    }

    /// The deepest selected category, or `""` at the root.
    #[must_use]
    pub fn current(&self) -> &str {
        self.levels.last().map_or("", String::as_str)
    }

    /// Number of selected levels.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// Returns `true` when nothing is selected.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.levels.is_empty()
    }

    /// The state after clicking the category `clicked`.
    #[must_use]
    pub fn navigate(&self, clicked: &str) -> Self {
        if self.levels.len() >= MAX_DEPTH {
            return Self::new();
        }
        let mut next = self.clone();
        next.levels.push(String::from(clicked));
        next
    }

    /// Re-roots `tree` at the node this path selects.
    ///
    /// Levels are matched one below the other from the root, so a name that
    /// repeats under several parents resolves to the branch on the path. A
    /// path that does not line up with `tree` falls back to the first node
    /// named [`current`](Self::current) in pre-order.
    #[must_use]
    pub fn resolve(&self, tree: &Hierarchy) -> Option<Hierarchy> {
        let mut id = tree.root();
        for name in self.levels() {
            match tree.child_named(id, name) {
                Some(child) => id = child,
                None => return tree.find_by_category(self.current()),
            }
        }
        Some(tree.subtree(id))
    }

    /// Keeps only the first `depth` levels, as a breadcrumb click does.
    #[must_use]
    pub fn truncate(&self, depth: usize) -> Self {
        let mut next = self.clone();
        next.levels.truncate(depth);
        next
    }
}

impl fmt::Display for CategoryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, level) in self.levels.iter().enumerate() {
            if i > 0 {
                f.write_str(" > ")?;
            }
            f.write_str(level)?;
        }
        Ok(())
    }
}
