//! Node trait definitions.
//!
//! Nodes live in a [`Vec`]-backed arena owned by the tree. Every link is an
//! `Option<u32>` index into that arena: `l` and `r` are the owning child
//! edges, `p` is the non-owning back-reference to the parent. All
//! tree-manipulation functions take the arena as `&mut [N]` and work with
//! indices.

use std::cmp::Ordering;

/// Addresses one of the two child slots of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Raw parent/child links (`p`, `l`, `r`).
///
/// Setters only write the slot on `self`. Use [`crate::util::set_child`] to
/// link two nodes, it keeps the back-reference in sync.
pub trait Node {
    fn p(&self) -> Option<u32>;
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
    fn set_p(&mut self, v: Option<u32>);
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);

    fn child(&self, dir: Direction) -> Option<u32> {
        match dir {
            Direction::Left => self.l(),
            Direction::Right => self.r(),
        }
    }

    fn set_child_slot(&mut self, dir: Direction, v: Option<u32>) {
        match dir {
            Direction::Left => self.set_l(v),
            Direction::Right => self.set_r(v),
        }
    }
}

/// AVL-specific node behavior.
pub trait AvlNodeLike: Node {
    /// Cached height of the subtree rooted here. A leaf has height `0`.
    fn height(&self) -> i32;
    fn set_height(&mut self, h: i32);
}

/// Comparator used by [`crate::AvlTree`].
///
/// `None` means the two values cannot be ordered against each other.
pub type Comparator<T> = fn(&T, &T) -> Option<Ordering>;

pub(crate) fn default_comparator<T: PartialOrd>(a: &T, b: &T) -> Option<Ordering> {
    a.partial_cmp(b)
}
