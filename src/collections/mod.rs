//! Small single-invariant structures that complement [`WeightedTree`](crate::WeightedTree).
//!
//! Each lives in one allocation or two, and none of them rebalance.

pub mod circular_queue;
pub mod disjoint_set;
pub mod indexable_set;
pub mod min_heap;
pub mod priority_map;

pub use circular_queue::CircularQueue;
pub use disjoint_set::DisjointSetForest;
pub use indexable_set::IndexableSet;
pub use min_heap::MinHeap;
pub use priority_map::PriorityMap;
