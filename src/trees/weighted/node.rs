//! Arena storage for the nodes of a [`WeightedTree`](super::WeightedTree).
//!
//! Nodes refer to each other by index. Index [`NIL`] is the shared sentinel:
//! it is always black, carries no element and has subtree weight `0`, so every
//! real node has real indices in its `parent`, `left` and `right` fields.
//!
//! A node does not store its own weight. It is derived from the subtree weights
//! as `subtree(x) - subtree(left) - subtree(right)`, so that updating a weight
//! only ever touches one field per ancestor.

use std::ops::{Index, IndexMut};

use crate::trees::Side;

/// The sentinel index.
pub(super) const NIL: usize = 0;

pub(super) const OCCUPIED_ERROR: &str = "invariant violated: a linked node has no element";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(super) enum Color {
    Red,
    Black,
}

pub(super) struct Node<E> {
    /// `None` for the sentinel and for slots on the free list.
    pub(super) element: Option<E>,
    pub(super) subtree_weight: u64,
    pub(super) color: Color,
    pub(super) parent: usize,
    pub(super) left: usize,
    pub(super) right: usize,
}

impl<E> Node<E> {
    fn sentinel() -> Self {
        Node {
            element: None,
            subtree_weight: 0,
            color: Color::Black,
            parent: NIL,
            left: NIL,
            right: NIL,
        }
    }

    pub(super) fn child(&self, side: Side) -> usize {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(super) fn set_child(&mut self, side: Side, child: usize) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    pub(super) fn is_red(&self) -> bool {
        self.color == Color::Red
    }
}

/// Owns every node of one tree. Slot `0` is the sentinel.
pub(super) struct Arena<E> {
    nodes: Vec<Node<E>>,
    free: Vec<usize>,
}

impl<E> Arena<E> {
    pub(super) fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity + 1);
        nodes.push(Node::sentinel());
        Arena {
            nodes,
            free: vec![],
        }
    }

    /// Drops every element and keeps only the sentinel.
    pub(super) fn clear(&mut self) {
        self.nodes.truncate(1);
        self.nodes[NIL] = Node::sentinel();
        self.free.clear();
    }

    /// Creates a red leaf whose subtree weight is `weight`. Returns its index.
    pub(super) fn alloc(&mut self, element: E, weight: u32, parent: usize) -> usize {
        let node = Node {
            element: Some(element),
            subtree_weight: weight as u64,
            color: Color::Red,
            parent,
            left: NIL,
            right: NIL,
        };
        match self.free.pop() {
            Some(index) => {
                self.nodes[index] = node;
                index
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    /// Takes the element out of an unlinked node and recycles its slot.
    pub(super) fn release(&mut self, index: usize) -> E {
        debug_assert_ne!(index, NIL);
        let node = &mut self.nodes[index];
        node.parent = NIL;
        node.left = NIL;
        node.right = NIL;
        node.subtree_weight = 0;
        self.free.push(index);
        node.element.take().expect(OCCUPIED_ERROR)
    }

    /// Exchanges the elements stored at two nodes, leaving links and weights in place.
    pub(super) fn swap_elements(&mut self, a: usize, b: usize) {
        let taken = self.nodes[a].element.take();
        let taken = std::mem::replace(&mut self.nodes[b].element, taken);
        self.nodes[a].element = taken;
    }

    pub(super) fn element(&self, index: usize) -> &E {
        self.nodes[index].element.as_ref().expect(OCCUPIED_ERROR)
    }

    pub(super) fn take_element(&mut self, index: usize) -> E {
        self.nodes[index].element.take().expect(OCCUPIED_ERROR)
    }

    pub(super) fn subtree(&self, index: usize) -> u64 {
        self.nodes[index].subtree_weight
    }

    /// The node's own weight: its subtree weight minus both children's.
    pub(super) fn own_weight(&self, index: usize) -> u32 {
        let node = &self.nodes[index];
        let own = node.subtree_weight - self.subtree(node.left) - self.subtree(node.right);
        debug_assert!(own <= u32::MAX as u64, "own weight of node {} overflows", index);
        own as u32
    }

    /// Adds `amount` to the subtree weight of `from` and of each ancestor,
    /// stopping before `stop` (pass [`NIL`] to go up to the root).
    pub(super) fn raise_path(&mut self, mut from: usize, stop: usize, amount: u64) {
        while from != stop {
            self.nodes[from].subtree_weight += amount;
            from = self.nodes[from].parent;
        }
    }

    /// Subtracts `amount`, see [`Arena::raise_path`].
    pub(super) fn lower_path(&mut self, mut from: usize, stop: usize, amount: u64) {
        while from != stop {
            self.nodes[from].subtree_weight -= amount;
            from = self.nodes[from].parent;
        }
    }

    /// Sets the own weight of `index`, fixing every ancestor's subtree weight.
    /// Returns the previous own weight.
    pub(super) fn set_own_weight(&mut self, index: usize, weight: u32) -> u32 {
        let old = self.own_weight(index);
        if weight > old {
            self.raise_path(index, NIL, (weight - old) as u64);
        } else if weight < old {
            self.lower_path(index, NIL, (old - weight) as u64);
        }
        old
    }

    /// The leftmost or rightmost node of the subtree at `index`.
    pub(super) fn extreme(&self, mut index: usize, side: Side) -> usize {
        if index == NIL {
            return NIL;
        }
        loop {
            let next = self.nodes[index].child(side);
            if next == NIL {
                return index;
            }
            index = next;
        }
    }

    /// The in-order successor of `index`, or [`NIL`].
    pub(super) fn successor(&self, mut index: usize) -> usize {
        let right = self.nodes[index].right;
        if right != NIL {
            return self.extreme(right, Side::Left);
        }
        let mut parent = self.nodes[index].parent;
        while parent != NIL && index == self.nodes[parent].right {
            index = parent;
            parent = self.nodes[parent].parent;
        }
        parent
    }
}

impl<E> Index<usize> for Arena<E> {
    type Output = Node<E>;

    #[inline]
    fn index(&self, index: usize) -> &Node<E> {
        &self.nodes[index]
    }
}

impl<E> IndexMut<usize> for Arena<E> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Node<E> {
        &mut self.nodes[index]
    }
}
