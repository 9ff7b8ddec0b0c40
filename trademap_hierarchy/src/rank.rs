// Copyright 2026 the Trademap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rank movement of top-level children between two hierarchies.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::tree::Hierarchy;

/// Rank delta per child name of `interact`'s root.
///
/// For every root child of `interact` that also appears among the root
/// children of `current`, the delta is its index in `current` minus its index
/// in `interact`. Ranks are 0-based positions in descending-value order, so a
/// negative delta means the category was ranked higher in `interact`. Names
/// missing from `current` have no entry.
#[must_use]
pub fn compare_ranks(current: &Hierarchy, interact: &Hierarchy) -> HashMap<String, i32> {
    ranked_deltas(current, interact).into_iter().collect()
}

/// Same as [`compare_ranks`], in `interact`'s rank order.
///
/// Comparison panels list categories in this order.
#[must_use]
pub fn ranked_deltas(current: &Hierarchy, interact: &Hierarchy) -> Vec<(String, i32)> {
    let mut old_rank: HashMap<&str, usize> = HashMap::new();
    for (i, &id) in current.children(current.root()).iter().enumerate() {
        old_rank.entry(current.node(id).name()).or_insert(i);
    }
    interact
        .children(interact.root())
        .iter()
        .enumerate()
        .filter_map(|(i, &id)| {
            let name = interact.node(id).name();
            let old = *old_rank.get(name)?;
            Some((name.into(), signed_delta(old, i)))
        })
        .collect()
}

fn signed_delta(old: usize, new: usize) -> i32 {
    let old = i32::try_from(old).unwrap_or(i32::MAX);
    let new = i32::try_from(new).unwrap_or(i32::MAX);
    old.saturating_sub(new)
}

/// How a category moved, for presentation.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RankChange {
    /// Ranked this many places higher in the window than in the reference.
    Up(u32),
    /// Ranked this many places lower in the window than in the reference.
    Down(u32),
    /// Same position.
    Unchanged,
}

impl RankChange {
    /// Classifies a delta from [`compare_ranks`].
    ///
    /// A positive delta means the category sat further down in the reference
    /// list, so it moved up.
    #[must_use]
    pub fn from_delta(delta: i32) -> Self {
        match delta {
            0 => Self::Unchanged,
            d if d > 0 => Self::Up(d.unsigned_abs()),
            d => Self::Down(d.unsigned_abs()),
        }
    }
}
