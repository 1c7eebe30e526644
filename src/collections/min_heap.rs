//! An indexed binary min-heap of `f64` priorities, for graph searches and event
//! simulations where every item is known by a small integer id.

use crate::error::{check_index, Error, Result};

/// A min-heap over the ids `0..capacity`, each holding at most one `f64` value.
/// The value of any id present can be looked up, changed or removed in
/// `O(log n)`. NaN values are rejected.
///
///```
/// use weighted_grove::MinHeap;
///
/// let mut heap = MinHeap::new(4);
/// heap.insert(2, 0.5).unwrap();
/// heap.insert(0, 1.5).unwrap();
/// heap.update(0, 0.25).unwrap();
/// assert_eq!(heap.pop(), Some(0));
/// assert_eq!(heap.peek_value(), Some(0.5));
///```
#[derive(Clone, Debug)]
pub struct MinHeap {
    values: Box<[f64]>,
    // heap slot -> id
    heap: Vec<usize>,
    // id -> heap slot
    position: Box<[Option<usize>]>,
}

fn check_value(value: f64) -> Result<()> {
    if value.is_nan() {
        Err(Error::InvalidArgument("heap values must not be NaN"))
    } else {
        Ok(())
    }
}

impl MinHeap {
    pub fn new(capacity: usize) -> Self {
        MinHeap {
            values: vec![0.0; capacity].into_boxed_slice(),
            heap: Vec::with_capacity(capacity),
            position: vec![None; capacity].into_boxed_slice(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.values.len()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// The id with the smallest value.
    pub fn peek(&self) -> Option<usize> {
        self.heap.first().copied()
    }

    pub fn peek_value(&self) -> Option<f64> {
        self.peek().map(|id| self.values[id])
    }

    pub fn contains(&self, id: usize) -> Result<bool> {
        check_index(id, self.capacity())?;
        Ok(self.position[id].is_some())
    }

    pub fn get(&self, id: usize) -> Result<Option<f64>> {
        Ok(self.contains(id)?.then(|| self.values[id]))
    }

    /// Returns `Ok(false)` without changes if `id` is already in the heap.
    pub fn insert(&mut self, id: usize, value: f64) -> Result<bool> {
        check_value(value)?;
        if self.contains(id)? {
            return Ok(false);
        }
        self.values[id] = value;
        self.position[id] = Some(self.heap.len());
        self.heap.push(id);
        self.sift_up(self.heap.len() - 1);
        Ok(true)
    }

    /// Removes and returns the id with the smallest value.
    pub fn pop(&mut self) -> Option<usize> {
        let id = self.peek()?;
        self.remove_slot(0);
        Some(id)
    }

    /// Removes `id`, returning its value if it was present.
    pub fn remove(&mut self, id: usize) -> Result<Option<f64>> {
        check_index(id, self.capacity())?;
        match self.position[id] {
            Some(slot) => {
                self.remove_slot(slot);
                Ok(Some(self.values[id]))
            }
            None => Ok(None),
        }
    }

    /// Changes the value of `id`, returning the old value. Ids not in the heap
    /// are left out, and `Ok(None)` is returned.
    pub fn update(&mut self, id: usize, value: f64) -> Result<Option<f64>> {
        check_value(value)?;
        check_index(id, self.capacity())?;
        let slot = match self.position[id] {
            Some(slot) => slot,
            None => return Ok(None),
        };
        let old = std::mem::replace(&mut self.values[id], value);
        if value < old {
            self.sift_up(slot);
        } else {
            self.sift_down(slot);
        }
        Ok(Some(old))
    }

    pub fn clear(&mut self) {
        for id in self.heap.drain(..) {
            self.position[id] = None;
        }
    }

    fn remove_slot(&mut self, slot: usize) {
        let last = self.heap.len() - 1;
        self.swap(slot, last);
        if let Some(id) = self.heap.pop() {
            self.position[id] = None;
        }
        if slot < self.heap.len() {
            self.sift_up(slot);
            self.sift_down(slot);
        }
    }

    fn less(&self, a: usize, b: usize) -> bool {
        self.values[self.heap[a]] < self.values[self.heap[b]]
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.position[self.heap[a]] = Some(a);
        self.position[self.heap[b]] = Some(b);
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if !self.less(slot, parent) {
                break;
            }
            self.swap(slot, parent);
            slot = parent;
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        loop {
            let left = 2 * slot + 1;
            if left >= self.heap.len() {
                break;
            }
            let right = left + 1;
            let child = if right < self.heap.len() && self.less(right, left) {
                right
            } else {
                left
            };
            if !self.less(child, slot) {
                break;
            }
            self.swap(slot, child);
            slot = child;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_ids_by_increasing_value() {
        let values = [4.0, -1.5, 2.25, 9.0, 0.0, 2.25];
        let mut heap = MinHeap::new(values.len());
        for (id, &value) in values.iter().enumerate() {
            assert_eq!(heap.insert(id, value), Ok(true));
        }
        assert_eq!(heap.insert(3, 1.0), Ok(false));
        assert_eq!(heap.get(3), Ok(Some(9.0)));

        let mut popped = vec![];
        while let Some(id) = heap.pop() {
            popped.push(values[id]);
        }
        assert_eq!(popped, vec![-1.5, 0.0, 2.25, 2.25, 4.0, 9.0]);
        assert!(heap.is_empty());
    }

    #[test]
    fn rejects_nan_and_bad_ids() {
        let mut heap = MinHeap::new(2);
        assert!(matches!(
            heap.insert(0, f64::NAN),
            Err(Error::InvalidArgument(_))
        ));
        assert_eq!(
            heap.insert(2, 1.0),
            Err(Error::IndexOutOfBounds { index: 2, len: 2 })
        );
        assert!(heap.contains(5).is_err());
        assert!(heap.remove(5).is_err());
        heap.insert(1, 3.0).unwrap();
        assert!(heap.update(1, f64::NAN).is_err());
        assert_eq!(heap.get(1), Ok(Some(3.0)));
    }

    #[test]
    fn update_and_remove() {
        let mut heap = MinHeap::new(8);
        for id in 0..8 {
            heap.insert(id, id as f64).unwrap();
        }
        assert_eq!(heap.update(7, -1.0), Ok(Some(7.0)));
        assert_eq!(heap.peek(), Some(7));
        assert_eq!(heap.update(7, 100.0), Ok(Some(-1.0)));
        assert_eq!(heap.peek(), Some(0));

        assert_eq!(heap.remove(0), Ok(Some(0.0)));
        assert_eq!(heap.remove(0), Ok(None));
        assert_eq!(heap.update(0, 5.0), Ok(None));
        assert_eq!(heap.contains(0), Ok(false));
        assert_eq!(heap.peek(), Some(1));
        assert_eq!(heap.len(), 7);

        heap.clear();
        assert_eq!(heap.peek_value(), None);
        assert_eq!(heap.contains(3), Ok(false));
        assert_eq!(heap.insert(3, 1.0), Ok(true));
    }
}
