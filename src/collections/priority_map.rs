//! A priority queue addressable by key, backed by a d-ary heap.
//!
//! See [`PriorityMap`]

use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

use log::debug;

use crate::compare::{Comparator, Natural};
use crate::error::{Error, Result};

const DEFAULT_CAPACITY: usize = 8;
const DEFAULT_ARITY: usize = 2;
const SLOT_ERROR: &str = "invariant violated: heap entry missing from the slot map";

/// A map from keys to values that always knows its smallest value.
///
/// Entries live in a d-ary heap ordered by value under `C`; a hash map from
/// each key to its heap slot allows replacing or removing any entry in
/// `O(d log_d n)`. With [`Reversed`](crate::compare::Reversed) the largest value
/// comes first instead.
///
///```
/// use weighted_grove::PriorityMap;
///
/// let mut tasks = PriorityMap::new();
/// tasks.put("write", 3);
/// tasks.put("test", 5);
/// tasks.put("review", 1);
/// assert_eq!(tasks.put("test", 0), Some(5));
///
/// assert_eq!(tasks.pop(), Some(("test", 0)));
/// assert_eq!(tasks.remove(&"write"), Some(3));
/// assert_eq!(tasks.peek(), Some((&"review", &1)));
///```
#[derive(Clone, Debug)]
pub struct PriorityMap<K, V, C = Natural> {
    entries: Vec<(K, V)>,
    slots: HashMap<K, usize>,
    arity: usize,
    comparator: C,
}

impl<K: Hash + Eq + Clone, V: Ord> PriorityMap<K, V> {
    /// An empty binary heap.
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }

    /// An empty heap where each slot has `arity` children. Fails if `arity < 2`.
    pub fn with_arity(arity: usize) -> Result<Self> {
        Self::with_capacity_arity_and_comparator(DEFAULT_CAPACITY, arity, Natural)
    }
}

impl<K: Hash + Eq + Clone, V: Ord> Default for PriorityMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq + Clone, V, C: Comparator<V>> PriorityMap<K, V, C> {
    pub fn with_comparator(comparator: C) -> Self {
        PriorityMap {
            entries: Vec::with_capacity(DEFAULT_CAPACITY),
            slots: HashMap::with_capacity(DEFAULT_CAPACITY),
            arity: DEFAULT_ARITY,
            comparator,
        }
    }

    pub fn with_capacity_arity_and_comparator(
        capacity: usize,
        arity: usize,
        comparator: C,
    ) -> Result<Self> {
        if arity < 2 {
            return Err(Error::InvalidArgument("heap arity must be at least 2"));
        }
        Ok(PriorityMap {
            entries: Vec::with_capacity(capacity),
            slots: HashMap::with_capacity(capacity),
            arity,
            comparator,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    /// The entry with the smallest value. Ties are broken arbitrarily.
    pub fn peek(&self) -> Option<(&K, &V)> {
        self.entries.first().map(|(k, v)| (k, v))
    }

    pub fn peek_key(&self) -> Option<&K> {
        self.entries.first().map(|(k, _)| k)
    }

    pub fn peek_value(&self) -> Option<&V> {
        self.entries.first().map(|(_, v)| v)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.slots.get(key).map(|&slot| &self.entries[slot].1)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.slots.contains_key(key)
    }

    /// Inserts `value` under `key`, or replaces the value already there.
    /// Returns the previous value.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&slot) = self.slots.get(&key) {
            let old = std::mem::replace(&mut self.entries[slot].1, value);
            self.reposition(slot, &old);
            return Some(old);
        }
        if self.entries.len() == self.entries.capacity() {
            debug!(
                "priority map growing past {} entries",
                self.entries.capacity()
            );
        }
        let slot = self.entries.len();
        self.slots.insert(key.clone(), slot);
        self.entries.push((key, value));
        self.sift_up(slot);
        None
    }

    /// Removes the entry with the smallest value.
    pub fn pop(&mut self) -> Option<(K, V)> {
        if self.entries.is_empty() {
            return None;
        }
        Some(self.remove_slot(0))
    }

    /// Removes the entry under `key`, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let slot = *self.slots.get(key)?;
        Some(self.remove_slot(slot).1)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.slots.clear();
    }

    /// Iterates over the entries in heap order, which is not sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Moves the last entry into `slot` and restores the heap around it.
    fn remove_slot(&mut self, slot: usize) -> (K, V) {
        let last = self.entries.len() - 1;
        self.swap(slot, last);
        let (key, value) = self.entries.pop().expect(SLOT_ERROR);
        self.slots.remove(&key);
        if slot < self.entries.len() {
            self.reposition(slot, &value);
        }
        (key, value)
    }

    /// Restores the heap after the value at `slot` replaced `previous`.
    fn reposition(&mut self, slot: usize, previous: &V) {
        match self.comparator.compare(&self.entries[slot].1, previous) {
            Ordering::Less => self.sift_up(slot),
            Ordering::Greater => self.sift_down(slot),
            Ordering::Equal => {}
        }
    }

    fn less(&self, a: usize, b: usize) -> bool {
        self.comparator.compare(&self.entries[a].1, &self.entries[b].1) == Ordering::Less
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.entries.swap(a, b);
        *self.slots.get_mut(&self.entries[a].0).expect(SLOT_ERROR) = a;
        *self.slots.get_mut(&self.entries[b].0).expect(SLOT_ERROR) = b;
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / self.arity;
            if !self.less(slot, parent) {
                break;
            }
            self.swap(slot, parent);
            slot = parent;
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        loop {
            let first = slot * self.arity + 1;
            if first >= self.entries.len() {
                break;
            }
            let end = usize::min(first + self.arity, self.entries.len());
            let mut best = first;
            for child in first + 1..end {
                if self.less(child, best) {
                    best = child;
                }
            }
            if !self.less(best, slot) {
                break;
            }
            self.swap(slot, best);
            slot = best;
        }
    }

    /// Panics if the heap order or the slot map is broken.
    #[cfg(test)]
    fn assert_heap(&self) {
        assert_eq!(self.slots.len(), self.entries.len());
        for (slot, (key, _)) in self.entries.iter().enumerate() {
            assert_eq!(self.slots[key], slot);
            if slot > 0 {
                assert!(!self.less(slot, (slot - 1) / self.arity));
            }
        }
    }
}
