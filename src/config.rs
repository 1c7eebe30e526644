//! Construction options for [`WeightedTree`](crate::weighted::WeightedTree).

/// Arena slots reserved up front when no capacity is given.
pub const DEFAULT_INITIAL_CAPACITY: usize = 16;

/// Options for building a tree with the natural order and the standard random source.
///
/// ```
/// use weighted_grove::{TreeConfig, WeightedTree};
///
/// let config = TreeConfig::default().with_seed(7).with_initial_capacity(1024);
/// let mut tree: WeightedTree<u32> = WeightedTree::with_config(config);
/// tree.add(3);
/// assert_eq!(tree.sample(), Some(&3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeConfig {
    /// Seed of the sampling random source. `None` draws a seed from system entropy.
    pub seed: Option<u64>,
    /// Number of nodes the arena can hold before reallocating.
    pub initial_capacity: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        TreeConfig {
            seed: None,
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }
}

impl TreeConfig {
    /// Makes sampling reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }
}
