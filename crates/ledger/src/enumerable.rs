//! Dense, index-addressable set with O(1) insert and removal
//!
//! Items live in a packed vector; a reverse map records each item's slot.
//! Removal moves the last item into the vacated slot and truncates, so the
//! valid indices are always exactly `0..len()`. The order of the remaining
//! items is not preserved across removals.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<T>", into = "Vec<T>")]
#[serde(bound(
    serialize = "T: Serialize + Copy + Eq + Hash",
    deserialize = "T: Deserialize<'de> + Copy + Eq + Hash"
))]
pub struct EnumerableSet<T: Copy + Eq + Hash> {
    items: Vec<T>,
    positions: HashMap<T, usize>,
}

impl<T: Copy + Eq + Hash> EnumerableSet<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Append `item`. Returns `false` and leaves the set untouched if it is
    /// already present.
    pub fn insert(&mut self, item: T) -> bool {
        if self.positions.contains_key(&item) {
            return false;
        }
        self.positions.insert(item, self.items.len());
        self.items.push(item);
        true
    }

    /// Swap-and-pop removal. Returns `false` if `item` was not present.
    pub fn remove(&mut self, item: &T) -> bool {
        let Some(index) = self.positions.remove(item) else {
            return false;
        };
        let last = self.items.len() - 1;
        if index != last {
            let moved = self.items[last];
            self.items[index] = moved;
            self.positions.insert(moved, index);
        }
        self.items.truncate(last);
        true
    }

    pub fn contains(&self, item: &T) -> bool {
        self.positions.contains_key(item)
    }

    pub fn get(&self, index: usize) -> Option<T> {
        self.items.get(index).copied()
    }

    pub fn position(&self, item: &T) -> Option<usize> {
        self.positions.get(item).copied()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T: Copy + Eq + Hash> Default for EnumerableSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + Eq + Hash> From<Vec<T>> for EnumerableSet<T> {
    /// Later duplicates are dropped.
    fn from(items: Vec<T>) -> Self {
        let mut set = Self::new();
        for item in items {
            set.insert(item);
        }
        set
    }
}

impl<T: Copy + Eq + Hash> From<EnumerableSet<T>> for Vec<T> {
    fn from(set: EnumerableSet<T>) -> Self {
        set.items
    }
}
