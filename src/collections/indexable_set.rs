//! A hash set that also supports positional access and uniform sampling.

use std::collections::HashMap;
use std::hash::Hash;

use rand::seq::SliceRandom;
use rand::Rng;

const DEFAULT_CAPACITY: usize = 8;
const INDEX_ERROR: &str = "invariant violated: element missing from the index map";

/// A set of distinct elements stored densely in a vector, with a hash map from
/// each element to its position.
///
/// Removal swaps the last element into the vacated position, so positions are
/// stable only until the next removal.
///
///```
/// use weighted_grove::IndexableSet;
///
/// let mut set = IndexableSet::new();
/// assert!(set.insert("a"));
/// assert!(set.insert("b"));
/// assert!(!set.insert("a"));
/// assert_eq!(set.get(1), Some(&"b"));
/// assert!(set.remove(&"a"));
/// assert_eq!(set.get(0), Some(&"b"));
///```
#[derive(Clone, Debug)]
pub struct IndexableSet<T> {
    items: Vec<T>,
    indices: HashMap<T, usize>,
}

impl<T: Hash + Eq + Clone> IndexableSet<T> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        IndexableSet {
            items: Vec::with_capacity(capacity),
            indices: HashMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The element at `index`, if there is one.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// The current position of `value`.
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.indices.get(value).copied()
    }

    pub fn contains(&self, value: &T) -> bool {
        self.indices.contains_key(value)
    }

    /// Returns `false` and leaves the set unchanged if `value` is already present.
    pub fn insert(&mut self, value: T) -> bool {
        if self.indices.contains_key(&value) {
            return false;
        }
        self.indices.insert(value.clone(), self.items.len());
        self.items.push(value);
        true
    }

    /// Returns `false` if `value` was not present.
    pub fn remove(&mut self, value: &T) -> bool {
        match self.indices.get(value) {
            Some(&index) => self.swap_remove(index).is_some(),
            None => false,
        }
    }

    /// Removes the element at `index`, moving the last element into its place.
    /// Returns the removed element.
    /// O(1) expected.
    pub fn swap_remove(&mut self, index: usize) -> Option<T> {
        if index >= self.items.len() {
            return None;
        }
        let removed = self.items.swap_remove(index);
        self.indices.remove(&removed);
        if let Some(moved) = self.items.get(index) {
            *self.indices.get_mut(moved).expect(INDEX_ERROR) = index;
        }
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.indices.clear();
    }

    /// Iterates in position order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// A uniformly random element, or `None` if the set is empty.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&T> {
        self.items.choose(rng)
    }
}

impl<T: Hash + Eq + Clone> Default for IndexableSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Hash + Eq + Clone> Extend<T> for IndexableSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Hash + Eq + Clone> FromIterator<T> for IndexableSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<'a, T> IntoIterator for &'a IndexableSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
