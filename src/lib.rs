//! Compact data structures for schedulers, simulators and samplers.
//!
//! The centerpiece is [`WeightedTree`], a red-black tree whose elements carry
//! sampling weights, supporting ordered set operations together with weighted
//! random sampling in `O(log n)` time.
//!
//! Around it live a few simpler structures, in [`collections`]:
//! a bounded [`CircularQueue`], an [`IndexableSet`] with random access,
//! a [`DisjointSetForest`], a d-ary [`PriorityMap`] and an indexed [`MinHeap`].
//!
//! None of the structures are synchronized. Mutation takes `&mut self`.

pub mod collections;
pub mod compare;
pub mod config;
pub mod error;
pub mod trees;

pub use collections::{CircularQueue, DisjointSetForest, IndexableSet, MinHeap, PriorityMap};
pub use compare::{Comparator, Natural};
pub use config::TreeConfig;
pub use error::{Error, Result};
pub use trees::weighted::{self, WeightedTree};
