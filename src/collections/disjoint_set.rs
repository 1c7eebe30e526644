//! Union-find over the integers `0..n`.

use crate::error::{check_index, Result};

/// A disjoint-set forest with union by rank and path compression.
/// Both [`DisjointSetForest::find`] and [`DisjointSetForest::union`] run in
/// amortized near-constant time.
#[derive(Clone, Debug)]
pub struct DisjointSetForest {
    parent: Vec<usize>,
    // Ranks stay below 64 since a root of rank r has at least 2^r members.
    rank: Vec<u8>,
    set_count: usize,
}

impl DisjointSetForest {
    /// `n` singleton sets, `{0}` through `{n - 1}`.
    pub fn new(n: usize) -> Self {
        DisjointSetForest {
            parent: (0..n).collect(),
            rank: vec![0; n],
            set_count: n,
        }
    }

    /// The number of elements, not of sets.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// The number of disjoint sets.
    pub fn set_count(&self) -> usize {
        self.set_count
    }

    /// The representative of the set containing `x`.
    /// Every node on the path is relinked directly to the root.
    pub fn find(&mut self, x: usize) -> Result<usize> {
        check_index(x, self.len())?;
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut current = x;
        while current != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        Ok(root)
    }

    /// Merges the sets of `x` and `y`. Returns `false` if they were already the same set.
    pub fn union(&mut self, x: usize, y: usize) -> Result<bool> {
        let x_root = self.find(x)?;
        let y_root = self.find(y)?;
        if x_root == y_root {
            return Ok(false);
        }
        match self.rank[x_root].cmp(&self.rank[y_root]) {
            std::cmp::Ordering::Less => self.parent[x_root] = y_root,
            std::cmp::Ordering::Greater => self.parent[y_root] = x_root,
            std::cmp::Ordering::Equal => {
                self.parent[y_root] = x_root;
                self.rank[x_root] += 1;
            }
        }
        self.set_count -= 1;
        Ok(true)
    }

    pub fn same_set(&mut self, x: usize, y: usize) -> Result<bool> {
        Ok(self.find(x)? == self.find(y)?)
    }
}

#[test]
fn union_find_basics() {
    let mut forest = DisjointSetForest::new(6);
    assert_eq!(forest.set_count(), 6);
    assert_eq!(forest.union(0, 1), Ok(true));
    assert_eq!(forest.union(2, 3), Ok(true));
    assert_eq!(forest.union(1, 3), Ok(true));
    assert_eq!(forest.union(0, 2), Ok(false));
    assert_eq!(forest.set_count(), 3);

    assert_eq!(forest.same_set(0, 3), Ok(true));
    assert_eq!(forest.same_set(0, 4), Ok(false));
    assert_eq!(forest.find(5), Ok(5));
    let root = forest.find(3).unwrap();
    for x in 0..4 {
        assert_eq!(forest.find(x), Ok(root));
    }
}

#[test]
fn out_of_range_is_an_error() {
    use crate::Error;

    let mut forest = DisjointSetForest::new(2);
    assert_eq!(
        forest.find(2),
        Err(Error::IndexOutOfBounds { index: 2, len: 2 })
    );
    assert!(forest.union(0, 9).is_err());
    assert_eq!(forest.set_count(), 2);
}

#[test]
fn long_chains_are_compressed() {
    let n = 1 << 10;
    let mut forest = DisjointSetForest::new(n);
    for x in 1..n {
        forest.union(x - 1, x).unwrap();
    }
    assert_eq!(forest.set_count(), 1);
    let root = forest.find(0).unwrap();
    for x in 0..n {
        assert_eq!(forest.find(x), Ok(root));
        assert_eq!(forest.parent[x], root);
    }
}
