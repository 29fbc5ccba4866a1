//! Increment instruction sets.
//!
//! An [`IncrementSet`] maps dotted bucket paths to the amount each counter
//! should grow by. Callers usually merge the sets of several expansions
//! and hand the result to the store as a single atomic increment.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, RollupError};
use crate::path::increment_at;

/// Dotted bucket path to increment amount.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IncrementSet {
    entries: BTreeMap<String, i64>,
}

impl IncrementSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the increment for `path`, replacing any previous amount.
    pub fn insert(&mut self, path: impl Into<String>, amount: i64) {
        self.entries.insert(path.into(), amount);
    }

    pub fn get(&self, path: &str) -> Option<i64> {
        self.entries.get(path).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &i64)> {
        self.entries.iter()
    }

    /// Fold `other` into this set, summing amounts on shared paths.
    ///
    /// Fails with [`RollupError::IncrementOverflow`] if a sum leaves the
    /// `i64` range, in which case `self` is left unchanged.
    pub fn merge(&mut self, other: IncrementSet) -> Result<()> {
        let mut staged = Vec::with_capacity(other.entries.len());
        for (path, amount) in other.entries {
            let current = self.entries.get(&path).copied().unwrap_or(0);
            let sum = current
                .checked_add(amount)
                .ok_or_else(|| RollupError::IncrementOverflow(path.clone()))?;
            staged.push((path, sum));
        }
        self.entries.extend(staged);
        Ok(())
    }

    /// Apply every increment to an in-memory document.
    ///
    /// Paths are applied in key order and intermediate objects are created
    /// as needed. The set is applied as a unit: on the first conflicting
    /// path the error is returned and `document` is left untouched.
    pub fn apply_to(&self, document: &mut Value) -> Result<()> {
        let mut staged = document.clone();
        for (path, amount) in &self.entries {
            increment_at(&mut staged, path.as_str(), *amount)?;
        }
        *document = staged;
        Ok(())
    }
}

impl IntoIterator for IncrementSet {
    type Item = (String, i64);
    type IntoIter = std::collections::btree_map::IntoIter<String, i64>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
