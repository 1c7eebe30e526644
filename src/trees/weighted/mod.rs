//! A red-black tree whose nodes carry sampling weights.
//!
//! Each element has a nonnegative own weight, and every node keeps the sum of the
//! weights in its subtree. This supports, all in `O(log n)` worst-case time:
//! ordered insertion, removal and lookup, weight queries and updates, and drawing an
//! element at random with probability proportional to its weight.
//!
//! See [`WeightedTree`].

mod balance;
mod iterators;
mod node;

pub use iterators::{IntoIter, Iter};

use std::cmp::Ordering;
use std::fmt;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::compare::{Comparator, FnComparator, Natural};
use crate::config::{TreeConfig, DEFAULT_INITIAL_CAPACITY};
use crate::trees::Side;
use node::{Arena, Color, NIL};

/// An ordered set of elements, each with a `u32` sampling weight.
///
/// Elements are ordered by a [`Comparator`] fixed at construction ([`Natural`] by default).
/// The tree owns its random source `R`, so sampling can be made deterministic by
/// injecting a seeded generator.
///
/// When an element with two children is removed, its in-order successor's element
/// is moved into its node. Elements are treated as plain data: nothing outside the
/// tree may rely on where an element is stored.
///
///```
/// use weighted_grove::WeightedTree;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut tree = WeightedTree::with_rng(StdRng::seed_from_u64(5));
/// tree.add_weighted("rare", 1);
/// tree.add_weighted("common", 99);
/// tree.add_weighted("never", 0);
///
/// assert_eq!(tree.total_weight(), 100);
/// assert_eq!(tree.weight(&"common"), Some(99));
/// assert_ne!(tree.sample(), Some(&"never"));
/// # tree.assert_correctness();
///```
pub struct WeightedTree<E, C = Natural, R = StdRng> {
    arena: Arena<E>,
    root: usize,
    len: usize,
    comparator: C,
    rng: R,
}

impl<E: Ord> WeightedTree<E> {
    /// Creates an empty tree ordered by `E: Ord`, sampling from an entropy-seeded [`StdRng`].
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    /// Creates an empty tree ordered by `E: Ord`.
    /// The random source is seeded from `config.seed` if given.
    pub fn with_config(config: TreeConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::from_parts(Natural, rng, config.initial_capacity)
    }
}

impl<E: Ord> Default for WeightedTree<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Ord, R: Rng> WeightedTree<E, Natural, R> {
    /// Creates an empty tree ordered by `E: Ord`, sampling from `rng`.
    pub fn with_rng(rng: R) -> Self {
        Self::from_parts(Natural, rng, DEFAULT_INITIAL_CAPACITY)
    }
}

impl<E, C: Comparator<E>> WeightedTree<E, C> {
    /// Creates an empty tree ordered by `comparator`.
    pub fn with_comparator(comparator: C) -> Self {
        Self::from_parts(comparator, StdRng::from_entropy(), DEFAULT_INITIAL_CAPACITY)
    }
}

impl<E, F> WeightedTree<E, FnComparator<F>>
where
    F: Fn(&E, &E) -> Ordering,
{
    /// Creates an empty tree ordered by a comparison closure.
    ///```
    /// use weighted_grove::WeightedTree;
    ///
    /// let mut tree: WeightedTree<i32, _> =
    ///     WeightedTree::with_compare_fn(|a: &i32, b: &i32| b.cmp(a));
    /// tree.extend([1, 3, 2]);
    /// assert_eq!(tree.iter().map(|(e, _)| *e).collect::<Vec<_>>(), vec![3, 2, 1]);
    ///```
    pub fn with_compare_fn(compare: F) -> Self {
        Self::with_comparator(FnComparator::new(compare))
    }
}

impl<E, C: Comparator<E>, R: Rng> WeightedTree<E, C, R> {
    /// Creates an empty tree ordered by `comparator`, sampling from `rng`.
    pub fn with_comparator_and_rng(comparator: C, rng: R) -> Self {
        Self::from_parts(comparator, rng, DEFAULT_INITIAL_CAPACITY)
    }

    /// Draws an element with probability proportional to its own weight.
    ///
    /// Returns [`None`] if the tree is empty or every weight is `0`.
    /// A uniform `u` in `[0, 1)` is drawn and scaled to an offset `r` in
    /// `[0, total_weight)`. The descent then goes left while `r` falls inside the left
    /// subtree's weight, stops if it falls inside the current node's own weight, and
    /// otherwise skips both and goes right.
    ///
    ///```
    /// use weighted_grove::WeightedTree;
    /// use rand::rngs::mock::StepRng;
    ///
    /// // this source always yields 0.5
    /// let mut tree: WeightedTree<i32, _, _> = WeightedTree::with_rng(StepRng::new(1 << 63, 0));
    /// tree.extend([(10, 1), (20, 2), (30, 1)]);
    /// // r = 2 lands in the weight range [1, 3) of 20
    /// assert_eq!(tree.sample(), Some(&20));
    ///```
    pub fn sample(&mut self) -> Option<&E> {
        let total = self.total_weight();
        if total == 0 {
            return None;
        }
        let unit: f64 = self.rng.gen();
        let mut offset = ((unit * total as f64) as u64).min(total - 1);

        let mut x = self.root;
        while x != NIL {
            let left = self.arena[x].left;
            let left_weight = self.arena.subtree(left);
            if offset < left_weight {
                x = left;
                continue;
            }
            offset -= left_weight;
            let own = self.arena.own_weight(x) as u64;
            if offset < own {
                return Some(self.arena.element(x));
            }
            offset -= own;
            x = self.arena[x].right;
        }
        // unreachable while the subtree weights are consistent
        None
    }

    /// Gives mutable access to the random source, e.g. to reseed it.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}

impl<E, C, R> WeightedTree<E, C, R> {
    fn from_parts(comparator: C, rng: R, capacity: usize) -> Self {
        WeightedTree {
            arena: Arena::with_capacity(capacity),
            root: NIL,
            len: 0,
            comparator,
            rng,
        }
    }

    /// The number of elements. `O(1)`.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The sum of all own weights: the subtree weight at the root.
    pub fn total_weight(&self) -> u64 {
        self.arena.subtree(self.root)
    }

    /// Removes every element. The comparator and the random source are kept.
    pub fn clear(&mut self) {
        debug!("clearing a weighted tree of {} elements", self.len);
        self.arena.clear();
        self.root = NIL;
        self.len = 0;
    }

    /// The smallest element, if any.
    pub fn first(&self) -> Option<&E> {
        self.extreme(Side::Left)
    }

    /// The largest element, if any.
    pub fn last(&self) -> Option<&E> {
        self.extreme(Side::Right)
    }

    fn extreme(&self, side: Side) -> Option<&E> {
        match self.arena.extreme(self.root, side) {
            NIL => None,
            x => Some(self.arena.element(x)),
        }
    }

    /// Iterates over `(element, own weight)` pairs in increasing order.
    pub fn iter(&self) -> Iter<'_, E> {
        Iter::new(&self.arena, self.root, self.len)
    }

    /// The number of edges on the longest path from the root down to a node.
    /// `0` for an empty or single-element tree.
    pub fn height(&self) -> usize {
        fn levels<E>(arena: &Arena<E>, x: usize) -> usize {
            if x == NIL {
                0
            } else {
                1 + std::cmp::max(levels(arena, arena[x].left), levels(arena, arena[x].right))
            }
        }
        levels(&self.arena, self.root).saturating_sub(1)
    }

    /// Cheap checks that run after every mutation in debug builds.
    fn debug_check_root(&self) {
        debug_assert!(!self.arena[self.root].is_red(), "red root");
        debug_assert_eq!(self.arena.subtree(NIL), 0, "sentinel carries weight");
        debug_assert!(!self.arena[NIL].is_red(), "red sentinel");
        debug_assert_eq!(self.root == NIL, self.len == 0);
    }
}

impl<E, C: Comparator<E>, R> WeightedTree<E, C, R> {
    /// Finds the node holding an element equal to `key`, or [`NIL`].
    fn find(&self, key: &E) -> usize {
        let mut x = self.root;
        while x != NIL {
            x = match self.comparator.compare(key, self.arena.element(x)) {
                Ordering::Less => self.arena[x].left,
                Ordering::Greater => self.arena[x].right,
                Ordering::Equal => return x,
            };
        }
        NIL
    }

    /// Whether an element equal to `key` is stored. `O(log n)`.
    pub fn contains(&self, key: &E) -> bool {
        self.find(key) != NIL
    }

    /// Inserts `element` with weight `1`. See [`WeightedTree::add_weighted`].
    pub fn add(&mut self, element: E) -> bool {
        self.add_weighted(element, 1)
    }

    /// Inserts `element` with the given own weight, if no equal element is present.
    ///
    /// Returns `true` if the tree changed. If an equal element is already stored, the
    /// tree is left exactly as it was, including that element's weight.
    ///
    /// The descent adds `weight` to the subtree weight of every node it passes, since
    /// the new node will end up below all of them. Finding a duplicate undoes these
    /// additions.
    pub fn add_weighted(&mut self, element: E, weight: u32) -> bool {
        let mut parent = NIL;
        let mut side = Side::Left;
        let mut x = self.root;
        while x != NIL {
            side = match self.comparator.compare(&element, self.arena.element(x)) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => {
                    debug!("duplicate element, insertion aborted");
                    self.arena.lower_path(parent, NIL, weight as u64);
                    return false;
                }
            };
            self.arena[x].subtree_weight += weight as u64;
            parent = x;
            x = self.arena[x].child(side);
        }

        let new = self.arena.alloc(element, weight, parent);
        if parent == NIL {
            self.root = new;
        } else {
            self.arena[parent].set_child(side, new);
        }
        self.fix_after_insert(new);
        self.len += 1;
        self.debug_check_root();
        true
    }

    /// Removes the element equal to `key`. Returns `false` if there is none,
    /// in which case nothing changes.
    pub fn remove(&mut self, key: &E) -> bool {
        self.take(key).is_some()
    }

    /// Removes the element equal to `key` and returns it.
    pub fn take(&mut self, key: &E) -> Option<E> {
        let z = self.find(key);
        if z == NIL {
            return None;
        }
        let element = self.delete_node(z);
        self.len -= 1;
        self.debug_check_root();
        Some(element)
    }

    /// The own weight of the element equal to `key`, not counting its descendants.
    pub fn weight(&self, key: &E) -> Option<u32> {
        match self.find(key) {
            NIL => None,
            x => Some(self.arena.own_weight(x)),
        }
    }

    /// Sets the own weight of the element equal to `key`, and returns the previous one.
    /// Returns [`None`] without changing anything if the element is absent.
    ///
    /// The difference is applied to the node and all of its ancestors. Weights play no
    /// part in the tree's shape, so nothing is rebalanced.
    pub fn set_weight(&mut self, key: &E, weight: u32) -> Option<u32> {
        match self.find(key) {
            NIL => None,
            x => Some(self.arena.set_own_weight(x, weight)),
        }
    }

    /// Walks the whole tree and panics if any invariant is broken: the search order,
    /// the red-black coloring, the parent links, the subtree weights and the element count.
    /// Takes `O(n)` time.
    pub fn assert_correctness(&self) {
        assert!(!self.arena[NIL].is_red(), "the sentinel must be black");
        assert_eq!(self.arena.subtree(NIL), 0, "the sentinel must have no weight");
        assert!(!self.arena[self.root].is_red(), "the root must be black");
        if self.root != NIL {
            assert_eq!(self.arena[self.root].parent, NIL, "the root has a parent");
        }
        let (count, _black_height) = self.assert_correctness_internal(self.root);
        assert_eq!(count, self.len, "wrong element count");

        let elements: Vec<&E> = self.iter().map(|(e, _)| e).collect();
        for pair in elements.windows(2) {
            assert_eq!(
                self.comparator.compare(pair[0], pair[1]),
                Ordering::Less,
                "elements out of order"
            );
        }
    }

    /// Returns the number of nodes and the black height of the subtree at `x`.
    fn assert_correctness_internal(&self, x: usize) -> (usize, usize) {
        if x == NIL {
            return (0, 1);
        }
        let node = &self.arena[x];
        assert!(node.element.is_some(), "a linked node is empty");
        for child in [node.left, node.right] {
            if child != NIL {
                assert_eq!(self.arena[child].parent, x, "broken parent link");
                assert!(
                    !(node.is_red() && self.arena[child].is_red()),
                    "red node with a red child"
                );
            }
        }
        let children_weight = self.arena.subtree(node.left) + self.arena.subtree(node.right);
        assert!(
            node.subtree_weight >= children_weight,
            "subtree weight is smaller than the children's"
        );
        assert!(
            node.subtree_weight - children_weight <= u32::MAX as u64,
            "own weight overflows"
        );

        let (left_count, left_black) = self.assert_correctness_internal(node.left);
        let (right_count, right_black) = self.assert_correctness_internal(node.right);
        assert_eq!(left_black, right_black, "unequal black heights");
        let black = left_black + (node.color == Color::Black) as usize;
        (left_count + right_count + 1, black)
    }
}

impl<E, C: Comparator<E>, R> Extend<E> for WeightedTree<E, C, R> {
    /// Adds each element with weight `1`. Duplicates are skipped.
    fn extend<T: IntoIterator<Item = E>>(&mut self, iter: T) {
        for element in iter {
            self.add(element);
        }
    }
}

impl<E, C: Comparator<E>, R> Extend<(E, u32)> for WeightedTree<E, C, R> {
    /// Adds each element with its weight. For duplicates the first weight wins.
    fn extend<T: IntoIterator<Item = (E, u32)>>(&mut self, iter: T) {
        for (element, weight) in iter {
            self.add_weighted(element, weight);
        }
    }
}

impl<E: Ord> std::iter::FromIterator<E> for WeightedTree<E> {
    fn from_iter<T: IntoIterator<Item = E>>(iter: T) -> Self {
        let mut tree = WeightedTree::new();
        tree.extend(iter);
        tree
    }
}

impl<E: Ord> std::iter::FromIterator<(E, u32)> for WeightedTree<E> {
    fn from_iter<T: IntoIterator<Item = (E, u32)>>(iter: T) -> Self {
        let mut tree = WeightedTree::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, E, C, R> IntoIterator for &'a WeightedTree<E, C, R> {
    type Item = (&'a E, u32);
    type IntoIter = Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<E, C, R> IntoIterator for WeightedTree<E, C, R> {
    type Item = (E, u32);
    type IntoIter = IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.arena, self.root, self.len)
    }
}

impl<E: fmt::Debug, C, R> fmt::Debug for WeightedTree<E, C, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
