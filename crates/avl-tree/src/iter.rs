use std::iter::FusedIterator;

use crate::error::AvlError;
use crate::node::AvlNode;
use crate::util::{get_l, get_r};

/// Ascending in-order traversal over a tree's values, duplicates included.
///
/// Uses an explicit stack of arena indices; the left spine below the cursor
/// is pushed lazily on each step.
pub struct Iter<'a, T> {
    arena: &'a [AvlNode<T>],
    stack: Vec<u32>,
    curr: Option<u32>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(arena: &'a [AvlNode<T>], root: Option<u32>, len: usize) -> Self {
        Self {
            arena,
            stack: Vec::new(),
            curr: root,
            remaining: len,
        }
    }

    pub fn has_next(&self) -> bool {
        self.curr.is_some() || !self.stack.is_empty()
    }

    /// Like [`Iterator::next`], but exhaustion is an error.
    pub fn try_next(&mut self) -> Result<&'a T, AvlError> {
        self.next().ok_or(AvlError::NoMoreElements)
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(i) = self.curr {
            self.stack.push(i);
            self.curr = get_l(self.arena, i);
        }
        let i = self.stack.pop()?;
        self.curr = get_r(self.arena, i);
        self.remaining = self.remaining.saturating_sub(1);
        Some(self.arena[i as usize].value())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}
