use std::fmt;

use crate::types::{AvlNodeLike, Direction, Node};
use crate::util;

/// Arena-resident AVL node.
#[derive(Clone, Debug)]
pub struct AvlNode<T> {
    pub p: Option<u32>,
    pub l: Option<u32>,
    pub r: Option<u32>,
    // Wrapped in Option so a removed node can hand its value back by move
    // without shifting the arena.
    v: Option<T>,
    /// Height of the subtree rooted here, leaf = 0.
    pub h: i32,
}

impl<T> AvlNode<T> {
    pub fn new(v: T) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            v: Some(v),
            h: 0,
        }
    }

    /// # Panics
    ///
    /// Panics if the node was already removed from its tree.
    pub fn value(&self) -> &T {
        self.v.as_ref().expect("node slot was vacated")
    }

    pub fn is_vacant(&self) -> bool {
        self.v.is_none()
    }

    pub(crate) fn take_value(&mut self) -> T {
        self.p = None;
        self.l = None;
        self.r = None;
        self.h = 0;
        self.v.take().expect("node slot was vacated twice")
    }
}

impl<T> Node for AvlNode<T> {
    fn p(&self) -> Option<u32> {
        self.p
    }

    fn l(&self) -> Option<u32> {
        self.l
    }

    fn r(&self) -> Option<u32> {
        self.r
    }

    fn set_p(&mut self, v: Option<u32>) {
        self.p = v;
    }

    fn set_l(&mut self, v: Option<u32>) {
        self.l = v;
    }

    fn set_r(&mut self, v: Option<u32>) {
        self.r = v;
    }
}

impl<T> AvlNodeLike for AvlNode<T> {
    fn height(&self) -> i32 {
        self.h
    }

    fn set_height(&mut self, h: i32) {
        self.h = h;
    }
}

/// Read-only view of a node inside a tree, for structural inspection.
pub struct NodeRef<'a, T> {
    arena: &'a [AvlNode<T>],
    idx: u32,
}

impl<'a, T> NodeRef<'a, T> {
    pub(crate) fn new(arena: &'a [AvlNode<T>], idx: u32) -> Self {
        Self { arena, idx }
    }

    fn at(&self, idx: Option<u32>) -> Option<NodeRef<'a, T>> {
        idx.map(|i| NodeRef::new(self.arena, i))
    }

    fn node(&self) -> &'a AvlNode<T> {
        &self.arena[self.idx as usize]
    }

    /// Arena index of this node.
    pub fn index(&self) -> u32 {
        self.idx
    }

    pub fn value(&self) -> &'a T {
        self.node().value()
    }

    /// `None` for the root.
    pub fn parent(&self) -> Option<NodeRef<'a, T>> {
        self.at(self.node().p)
    }

    pub fn left(&self) -> Option<NodeRef<'a, T>> {
        self.at(self.node().l)
    }

    pub fn right(&self) -> Option<NodeRef<'a, T>> {
        self.at(self.node().r)
    }

    pub fn child(&self, dir: Direction) -> Option<NodeRef<'a, T>> {
        self.at(self.node().child(dir))
    }

    /// Slot under which `other` hangs off this node, if it is a direct child.
    pub fn direction_of(&self, other: &NodeRef<'_, T>) -> Option<Direction> {
        util::direction_of(self.arena, self.idx, other.idx)
    }

    pub fn height(&self) -> usize {
        self.node().h as usize
    }

    /// `height(left) - height(right)`, absent subtree counting as `-1`.
    pub fn balance_factor(&self) -> i32 {
        crate::avl::balance_factor(self.arena, self.idx)
    }

    pub fn is_leaf(&self) -> bool {
        self.node().l.is_none() && self.node().r.is_none()
    }
}

impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for NodeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("index", &self.idx)
            .field("value", self.value())
            .field("height", &self.node().h)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_value_clears_links() {
        let mut n = AvlNode::new(4);
        n.l = Some(1);
        n.p = Some(2);
        n.h = 1;
        assert_eq!(n.take_value(), 4);
        assert!(n.is_vacant());
        assert_eq!((n.p, n.l, n.r, n.h), (None, None, None, 0));
    }

    #[test]
    #[should_panic(expected = "node slot was vacated")]
    fn reading_vacated_slot_panics() {
        let mut n = AvlNode::new("x");
        n.take_value();
        n.value();
    }

    #[test]
    #[should_panic(expected = "node slot was vacated twice")]
    fn vacating_twice_panics() {
        let mut n = AvlNode::new(1u8);
        n.take_value();
        n.take_value();
    }
}
