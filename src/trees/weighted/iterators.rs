//! In-order iterators over a [`WeightedTree`](super::WeightedTree).
//! Both walk the parent links, so they need no stack.

use super::node::{Arena, NIL};

/// Borrowing in-order iterator, yielding each element with its own weight.
pub struct Iter<'a, E> {
    arena: &'a Arena<E>,
    next: usize,
    remaining: usize,
}

impl<'a, E> Iter<'a, E> {
    pub(super) fn new(arena: &'a Arena<E>, root: usize, len: usize) -> Self {
        Iter {
            arena,
            next: arena.extreme(root, crate::trees::Side::Left),
            remaining: len,
        }
    }
}

impl<'a, E> Iterator for Iter<'a, E> {
    type Item = (&'a E, u32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next == NIL {
            return None;
        }
        let current = self.next;
        self.next = self.arena.successor(current);
        self.remaining -= 1;
        Some((self.arena.element(current), self.arena.own_weight(current)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, E> ExactSizeIterator for Iter<'a, E> {}

/// Owning in-order iterator. The links and weights are left intact while the
/// elements are moved out, so the successor walk stays valid.
pub struct IntoIter<E> {
    arena: Arena<E>,
    next: usize,
    remaining: usize,
}

impl<E> IntoIter<E> {
    pub(super) fn new(arena: Arena<E>, root: usize, len: usize) -> Self {
        let next = arena.extreme(root, crate::trees::Side::Left);
        IntoIter {
            arena,
            next,
            remaining: len,
        }
    }
}

impl<E> Iterator for IntoIter<E> {
    type Item = (E, u32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next == NIL {
            return None;
        }
        let current = self.next;
        self.next = self.arena.successor(current);
        self.remaining -= 1;
        let weight = self.arena.own_weight(current);
        Some((self.arena.take_element(current), weight))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<E> ExactSizeIterator for IntoIter<E> {}
