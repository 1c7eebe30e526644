//! A bounded FIFO queue that overwrites its oldest element when full.
//!
//! See [`CircularQueue`]

use crate::error::{check_index, Error, Result};

const SLOT_ERROR: &str = "invariant violated: an occupied queue slot is empty";

/// A fixed-capacity ring buffer. Pushing onto a full queue evicts the front element,
/// so the queue always holds the most recent `capacity` elements.
///
///```
/// use weighted_grove::CircularQueue;
///
/// let mut queue = CircularQueue::new(2).unwrap();
/// assert_eq!(queue.push('a'), None);
/// assert_eq!(queue.push('b'), None);
/// assert_eq!(queue.push('c'), Some('a'));
/// assert_eq!(queue.iter().collect::<String>(), "bc");
///```
#[derive(Clone, Debug)]
pub struct CircularQueue<T> {
    buffer: Box<[Option<T>]>,
    head: usize,
    len: usize,
}

impl<T> CircularQueue<T> {
    /// Creates an empty queue. Fails if `capacity` is `0`.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidArgument("capacity must be greater than 0"));
        }
        let buffer = std::iter::repeat_with(|| None).take(capacity).collect();
        Ok(CircularQueue {
            buffer,
            head: 0,
            len: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Maps an index in `0..2 * capacity` into the buffer.
    fn wrap(&self, index: usize) -> usize {
        if index >= self.capacity() {
            index - self.capacity()
        } else {
            index
        }
    }

    /// The buffer slot of the element `index` places from the front.
    fn translate(&self, index: usize) -> usize {
        self.wrap(self.head + index)
    }

    /// The front element, the one [`CircularQueue::poll`] would return.
    pub fn peek(&self) -> Option<&T> {
        self.get(0)
    }

    /// The element `index` places from the front.
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        self.buffer[self.translate(index)].as_ref()
    }

    /// Replaces the element `index` places from the front, and returns the old one.
    pub fn set(&mut self, index: usize, value: T) -> Result<T> {
        check_index(index, self.len)?;
        let slot = self.translate(index);
        let old = std::mem::replace(&mut self.buffer[slot], Some(value));
        Ok(old.expect(SLOT_ERROR))
    }

    /// Appends `value` at the back. If the queue was full, the front element is
    /// evicted and returned.
    /// O(1)
    pub fn push(&mut self, value: T) -> Option<T> {
        let evicted = if self.is_full() {
            self.poll()
        } else {
            None
        };
        let tail = self.translate(self.len);
        self.buffer[tail] = Some(value);
        self.len += 1;
        evicted
    }

    /// Removes and returns the front element.
    /// O(1)
    pub fn poll(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let front = self.buffer[self.head].take();
        self.head = self.wrap(self.head + 1);
        self.len -= 1;
        front
    }

    pub fn clear(&mut self) {
        for slot in self.buffer.iter_mut() {
            *slot = None;
        }
        self.head = 0;
        self.len = 0;
    }

    /// Iterates from the front to the back.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        (0..self.len).map(move |i| self.buffer[self.translate(i)].as_ref().expect(SLOT_ERROR))
    }
}

impl<T> Extend<T> for CircularQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(matches!(
            CircularQueue::<u8>::new(0),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn wraps_around_and_evicts() {
        let mut queue = CircularQueue::new(3).unwrap();
        queue.extend(1..=5);
        assert!(queue.is_full());
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.iter().copied().collect::<Vec<_>>(), vec![3, 4, 5]);
        assert_eq!(queue.peek(), Some(&3));
        assert_eq!(queue.get(2), Some(&5));
        assert_eq!(queue.get(3), None);

        assert_eq!(queue.poll(), Some(3));
        assert_eq!(queue.push(6), None);
        assert_eq!(queue.push(7), Some(4));
        assert_eq!(queue.iter().copied().collect::<Vec<_>>(), vec![5, 6, 7]);
    }

    #[test]
    fn set_and_clear() {
        let mut queue = CircularQueue::new(2).unwrap();
        queue.extend(["x", "y", "z"]);
        assert_eq!(queue.set(0, "w"), Ok("y"));
        assert_eq!(
            queue.set(2, "v"),
            Err(Error::IndexOutOfBounds { index: 2, len: 2 })
        );
        assert_eq!(queue.iter().copied().collect::<Vec<_>>(), vec!["w", "z"]);

        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.poll(), None);
        queue.push("a");
        assert_eq!(queue.peek(), Some(&"a"));
    }
}
