//! The total orders used to place elements.
//!
//! A structure is built with one [`Comparator`] and keeps it for its whole life:
//! swapping the order under a populated tree or heap would break its invariants,
//! so there is no way to do it.

use std::cmp::Ordering;

/// A three-way comparison over `T`. Must be a total order.
pub trait Comparator<T: ?Sized> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// The natural order, through [`Ord`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Natural;

impl<T: Ord + ?Sized> Comparator<T> for Natural {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Reverses another comparator. `Reversed(Natural)` turns a min-heap into a max-heap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Reversed<C>(pub C);

impl<T: ?Sized, C: Comparator<T>> Comparator<T> for Reversed<C> {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.0.compare(b, a)
    }
}

/// Wraps a closure as a [`Comparator`].
///```
/// use weighted_grove::compare::{Comparator, FnComparator};
/// use std::cmp::Ordering;
///
/// let by_len = FnComparator::new(|a: &&str, b: &&str| a.len().cmp(&b.len()));
/// assert_eq!(by_len.compare(&"ab", &"c"), Ordering::Greater);
///```
#[derive(Clone, Copy)]
pub struct FnComparator<F> {
    func: F,
}

impl<F> FnComparator<F> {
    pub fn new(func: F) -> Self {
        FnComparator { func }
    }
}

impl<T: ?Sized, F> Comparator<T> for FnComparator<F>
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.func)(a, b)
    }
}

impl<F> std::fmt::Debug for FnComparator<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FnComparator")
    }
}

#[test]
fn reversed_natural() {
    assert_eq!(Natural.compare(&1, &2), Ordering::Less);
    assert_eq!(Reversed(Natural).compare(&1, &2), Ordering::Greater);
    assert_eq!(Reversed(Natural).compare(&"a", &"a"), Ordering::Equal);
}
