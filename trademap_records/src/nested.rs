// Copyright 2026 the Trademap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The three-level nested mapping produced by aggregation.
//!
//! Each level is a [`KeyedLevel`]: string keys in first-insertion order with
//! hash-bucket lookup. Insertion order carries no meaning of its own, but it
//! is the deterministic tie-break when the hierarchy builder sorts siblings of
//! equal value.

use alloc::string::String;
use alloc::vec::Vec;
use core::hash::BuildHasher;

use hashbrown::DefaultHashBuilder;
use hashbrown::HashMap;

/// String-keyed entries in first-insertion order.
///
/// Keys are stored once, next to their values. Lookups go through a
/// hash-bucket index (hash -> small list of candidate positions) so the key
/// text is never duplicated into the index.
#[derive(Debug, Clone)]
pub struct KeyedLevel<V> {
    entries: Vec<(String, V)>,
    buckets: HashMap<u64, Vec<usize>>,
    build_hasher: DefaultHashBuilder,
}

impl<V> Default for KeyedLevel<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> KeyedLevel<V> {
    /// Creates an empty level.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            buckets: HashMap::new(),
            build_hasher: DefaultHashBuilder::default(),
        }
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the level has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.position(key).map(|i| &self.entries[i].1)
    }

    /// Iterates `(key, value)` pairs in first-insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &V)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates keys in first-insertion order.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Returns the value under `key`, inserting `make()` first if absent.
    pub fn get_or_insert_with(&mut self, key: &str, make: impl FnOnce() -> V) -> &mut V {
        let hash = self.build_hasher.hash_one(key);
        let found = self
            .buckets
            .get(&hash)
            .and_then(|ids| ids.iter().copied().find(|&i| self.entries[i].0 == key));
        let idx = match found {
            Some(i) => i,
            None => {
                let i = self.entries.len();
                self.entries.push((key.into(), make()));
                self.buckets.entry(hash).or_default().push(i);
                i
            }
        };
        &mut self.entries[idx].1
    }

    fn position(&self, key: &str) -> Option<usize> {
        let hash = self.build_hasher.hash_one(key);
        self.buckets
            .get(&hash)?
            .iter()
            .copied()
            .find(|&i| self.entries[i].0 == key)
    }
}

/// Third level: leaf category → summed amount.
pub type LeafLevel = KeyedLevel<f64>;

/// Second level: category → leaf level.
pub type BranchLevel = KeyedLevel<LeafLevel>;

/// Aggregated amounts keyed by `(depth1, depth2, depth3)`.
///
/// Every leaf value is the sum of the matching records' amounts. Intermediate
/// totals are not stored; the hierarchy builder derives them.
#[derive(Debug, Clone, Default)]
pub struct AggregatedTree {
    groups: KeyedLevel<BranchLevel>,
}

impl AggregatedTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `value` to the leaf at `(d1, d2, d3)`, creating it at zero if needed.
    pub fn add(&mut self, d1: &str, d2: &str, d3: &str, value: f64) {
        let leaf = self
            .groups
            .get_or_insert_with(d1, BranchLevel::new)
            .get_or_insert_with(d2, LeafLevel::new)
            .get_or_insert_with(d3, || 0.0);
        *leaf += value;
    }

    /// Returns `true` if nothing was aggregated ("no data to render").
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// The top-level groups in first-insertion order.
    #[must_use]
    pub fn groups(&self) -> &KeyedLevel<BranchLevel> {
        &self.groups
    }

    /// Looks up one leaf amount.
    #[must_use]
    pub fn get(&self, d1: &str, d2: &str, d3: &str) -> Option<f64> {
        self.groups.get(d1)?.get(d2)?.get(d3).copied()
    }

    /// Number of distinct `(d1, d2, d3)` keys.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.groups
            .iter()
            .flat_map(|(_, branch)| branch.iter())
            .map(|(_, leaves)| leaves.len())
            .sum()
    }

    /// Sum of every leaf amount.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.groups
            .iter()
            .flat_map(|(_, branch)| branch.iter())
            .flat_map(|(_, leaves)| leaves.iter())
            .map(|(_, v)| *v)
            .sum()
    }
}
