//! Red-black rebalancing for [`WeightedTree`].
//!
//! The fix-up passes follow the textbook (CLRS) formulation. Each case is written
//! once in terms of a [`Side`], and mirrored by flipping it.
//! Rotations are the only structural change that moves weight between nodes,
//! and they repair the two affected subtree weights in constant time.

use log::trace;

use super::node::{Color, NIL};
use super::WeightedTree;
use crate::trees::Side;

impl<E, C, R> WeightedTree<E, C, R> {
    /// Replaces `old` by `new` as a child of `parent`, or as the root if `parent` is [`NIL`].
    /// Does not touch `new.parent`.
    pub(super) fn replace_child(&mut self, parent: usize, old: usize, new: usize) {
        if parent == NIL {
            self.root = new;
        } else if self.arena[parent].left == old {
            self.arena[parent].left = new;
        } else {
            self.arena[parent].right = new;
        }
    }

    /// Rotates the subtree rooted at `x` towards `side`: the child of `x` on the opposite
    /// side becomes the subtree's root, and `x` becomes its child on `side`.
    ///
    /// Only `x` and the pivot change their sets of descendants, so only their subtree
    /// weights are recomputed. The pivot inherits the whole weight `x` used to carry,
    /// and `x` gives up the pivot except for the pivot's inner child, which it adopts.
    pub(super) fn rotate(&mut self, x: usize, side: Side) {
        let other = side.flip();
        let pivot = self.arena[x].child(other);
        debug_assert_ne!(pivot, NIL, "rotating without a pivot");
        trace!("rotating node {} to the {:?}", x, side);

        let inner = self.arena[pivot].child(side);
        let x_total = self.arena.subtree(x);
        let pivot_total = self.arena.subtree(pivot);
        let inner_total = self.arena.subtree(inner);

        self.arena[x].set_child(other, inner);
        if inner != NIL {
            self.arena[inner].parent = x;
        }

        let parent = self.arena[x].parent;
        self.arena[pivot].parent = parent;
        self.replace_child(parent, x, pivot);

        self.arena[pivot].set_child(side, x);
        self.arena[x].parent = pivot;

        self.arena[x].subtree_weight = x_total - pivot_total + inner_total;
        self.arena[pivot].subtree_weight = x_total;
    }

    fn is_red(&self, x: usize) -> bool {
        self.arena[x].is_red()
    }

    fn paint(&mut self, x: usize, color: Color) {
        self.arena[x].color = color;
    }

    /// Which child of its parent `x` is. `x` must not be the root.
    fn side_of(&self, x: usize) -> Side {
        let parent = self.arena[x].parent;
        if self.arena[parent].left == x {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Restores the red-black properties after `x` was linked in as a red leaf.
    pub(super) fn fix_after_insert(&mut self, mut x: usize) {
        while x != self.root && self.is_red(self.arena[x].parent) {
            let parent = self.arena[x].parent;
            let grandparent = self.arena[parent].parent;
            let side = self.side_of(parent);
            let uncle = self.arena[grandparent].child(side.flip());

            if self.is_red(uncle) {
                trace!("insert fix-up: recoloring at node {}", grandparent);
                self.paint(parent, Color::Black);
                self.paint(uncle, Color::Black);
                self.paint(grandparent, Color::Red);
                x = grandparent;
            } else {
                if x == self.arena[parent].child(side.flip()) {
                    // inner grandchild: straighten the zig-zag first
                    x = parent;
                    self.rotate(x, side);
                }
                let parent = self.arena[x].parent;
                let grandparent = self.arena[parent].parent;
                self.paint(parent, Color::Black);
                self.paint(grandparent, Color::Red);
                self.rotate(grandparent, side.flip());
            }
        }
        let root = self.root;
        self.paint(root, Color::Black);
    }

    /// Restores the red-black properties after a black node was spliced out and
    /// replaced by `x`. `x` may be the sentinel, in which case its parent link
    /// was set by the splice.
    pub(super) fn fix_after_delete(&mut self, mut x: usize) {
        while x != self.root && !self.is_red(x) {
            let parent = self.arena[x].parent;
            let side = if self.arena[parent].left == x {
                Side::Left
            } else {
                Side::Right
            };
            let other = side.flip();
            let mut sibling = self.arena[parent].child(other);

            if self.is_red(sibling) {
                trace!("delete fix-up: red sibling {}", sibling);
                self.paint(sibling, Color::Black);
                self.paint(parent, Color::Red);
                self.rotate(parent, side);
                sibling = self.arena[self.arena[x].parent].child(other);
            }

            let near = self.arena[sibling].child(side);
            let far = self.arena[sibling].child(other);
            if !self.is_red(near) && !self.is_red(far) {
                self.paint(sibling, Color::Red);
                x = self.arena[x].parent;
            } else {
                if !self.is_red(far) {
                    self.paint(near, Color::Black);
                    self.paint(sibling, Color::Red);
                    self.rotate(sibling, other);
                    sibling = self.arena[self.arena[x].parent].child(other);
                }
                let parent = self.arena[x].parent;
                let parent_color = self.arena[parent].color;
                self.paint(sibling, parent_color);
                self.paint(parent, Color::Black);
                let far = self.arena[sibling].child(other);
                self.paint(far, Color::Black);
                self.rotate(parent, side);
                x = self.root;
            }
        }
        self.paint(x, Color::Black);
    }

    /// Unlinks `z` from the tree, fixes weights and colors, and returns its element.
    ///
    /// With two children, the in-order successor `y` gives up its node instead:
    /// its weight is first removed from the path strictly below `z`, then its element
    /// moves into `z`'s slot, and `z`'s old weight is removed from `z` upwards. The
    /// successor's weight never leaves `z`'s subtree, so `z` ends up carrying it.
    /// Only after that is `y` detached, so every subtree weight is exact when the
    /// fix-up rotations run.
    pub(super) fn delete_node(&mut self, z: usize) -> E {
        let spliced = if self.arena[z].left == NIL || self.arena[z].right == NIL {
            let own = self.arena.own_weight(z) as u64;
            self.arena.lower_path(z, NIL, own);
            z
        } else {
            // both weights are read before any path changes; in between, z's derived
            // own weight is the sum of the two and may not fit in a u32
            let y = self.arena.extreme(self.arena[z].right, Side::Left);
            let z_weight = self.arena.own_weight(z) as u64;
            let y_weight = self.arena.own_weight(y) as u64;
            self.arena.lower_path(y, z, y_weight);
            self.arena.swap_elements(z, y);
            self.arena.lower_path(z, NIL, z_weight);
            y
        };

        let child = if self.arena[spliced].left != NIL {
            self.arena[spliced].left
        } else {
            self.arena[spliced].right
        };
        let parent = self.arena[spliced].parent;
        // may write the sentinel's parent link; the fix-up reads it back
        self.arena[child].parent = parent;
        self.replace_child(parent, spliced, child);
        trace!("spliced out node {}", spliced);

        let removed_color = self.arena[spliced].color;
        let element = self.arena.release(spliced);
        if removed_color == Color::Black {
            self.fix_after_delete(child);
        }
        element
    }
}
