//! Balanced search trees.
//!
//! Currently this holds the weighted red-black tree, see [`weighted::WeightedTree`].

pub mod weighted;

/// A direction in a binary tree.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// The opposite side.
    pub fn flip(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}
