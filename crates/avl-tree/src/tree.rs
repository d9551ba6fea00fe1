use std::cmp::Ordering;
use std::fmt;

use log::debug;

use crate::avl;
use crate::error::AvlError;
use crate::iter::Iter;
use crate::node::{AvlNode, NodeRef};
use crate::types::{default_comparator, Comparator, Direction};
use crate::util::{first, get_child, last};

/// AVL multiset: equal values are kept as distinct elements.
///
/// Nodes live in an arena owned by the tree; slots freed by removals are
/// reused by later insertions. A value equal to the node being visited
/// descends to the right on insertion.
pub struct AvlTree<T, C = Comparator<T>>
where
    C: Fn(&T, &T) -> Option<Ordering>,
{
    arena: Vec<AvlNode<T>>,
    free: Vec<u32>,
    root: Option<u32>,
    len: usize,
    comparator: C,
}

impl<T> AvlTree<T, Comparator<T>>
where
    T: PartialOrd,
{
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<T>)
    }

    /// Pre-sizes the arena for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut tree = Self::new();
        tree.arena.reserve(capacity);
        tree
    }
}

impl<T> Default for AvlTree<T, Comparator<T>>
where
    T: PartialOrd,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> AvlTree<T, C>
where
    C: Fn(&T, &T) -> Option<Ordering>,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            arena: Vec::new(),
            free: Vec::new(),
            root: None,
            len: 0,
            comparator,
        }
    }

    fn compare(&self, a: &T, b: &T) -> Result<Ordering, AvlError> {
        (self.comparator)(a, b).ok_or(AvlError::InvalidArgument)
    }

    /// A value the comparator cannot order against itself has no place in
    /// the tree.
    fn check(&self, value: &T) -> Result<(), AvlError> {
        match (self.comparator)(value, value) {
            Some(Ordering::Equal) => Ok(()),
            _ => Err(AvlError::InvalidArgument),
        }
    }

    fn alloc(&mut self, value: T) -> u32 {
        let node = AvlNode::new(value);
        match self.free.pop() {
            Some(idx) => {
                self.arena[idx as usize] = node;
                idx
            }
            None => {
                self.arena.push(node);
                (self.arena.len() - 1) as u32
            }
        }
    }

    /// Unlinks `idx`, rebalances and hands back its value.
    fn remove_node(&mut self, idx: u32) -> T {
        self.root = avl::remove(&mut self.arena, self.root, idx);
        self.len -= 1;
        self.free.push(idx);
        self.arena[idx as usize].take_value()
    }

    /// Adds one element; duplicates are kept.
    ///
    /// Fails with [`AvlError::InvalidArgument`], leaving the tree untouched,
    /// if the comparator cannot order `value`.
    pub fn insert(&mut self, value: T) -> Result<(), AvlError> {
        self.check(&value)?;

        let Some(mut curr) = self.root else {
            let idx = self.alloc(value);
            self.root = Some(idx);
            self.len = 1;
            return Ok(());
        };

        let dir = loop {
            let dir = match self.compare(self.arena[curr as usize].value(), &value)? {
                Ordering::Greater => Direction::Left,
                Ordering::Less | Ordering::Equal => Direction::Right,
            };
            match get_child(&self.arena, curr, dir) {
                Some(next) => curr = next,
                None => break dir,
            }
        };

        let idx = self.alloc(value);
        self.root = avl::insert_at(&mut self.arena, self.root, idx, curr, dir);
        self.len += 1;
        Ok(())
    }

    /// Inserts values in order. Stops at the first invalid value; earlier
    /// insertions stay in place.
    pub fn insert_all<I>(&mut self, values: I) -> Result<(), AvlError>
    where
        I: IntoIterator<Item = T>,
    {
        for value in values {
            self.insert(value)?;
        }
        Ok(())
    }

    /// Arena index of some node equal to `value`.
    fn find(&self, value: &T) -> Result<Option<u32>, AvlError> {
        self.check(value)?;
        let mut curr = self.root;
        while let Some(i) = curr {
            curr = match self.compare(value, self.arena[i as usize].value())? {
                Ordering::Equal => return Ok(Some(i)),
                Ordering::Less => get_child(&self.arena, i, Direction::Left),
                Ordering::Greater => get_child(&self.arena, i, Direction::Right),
            };
        }
        Ok(None)
    }

    pub fn find_first(&self, value: &T) -> Result<Option<NodeRef<'_, T>>, AvlError> {
        Ok(self.find(value)?.map(|i| NodeRef::new(&self.arena, i)))
    }

    pub fn contains(&self, value: &T) -> Result<bool, AvlError> {
        Ok(self.find(value)?.is_some())
    }

    /// Removes one element equal to `value` and returns it.
    pub fn remove_first(&mut self, value: &T) -> Result<Option<T>, AvlError> {
        let Some(idx) = self.find(value)? else {
            return Ok(None);
        };
        debug!("remove_first: removing node {idx}");
        Ok(Some(self.remove_node(idx)))
    }

    pub fn remove_min(&mut self) -> Option<T> {
        let idx = first(&self.arena, self.root)?;
        Some(self.remove_node(idx))
    }

    pub fn remove_max(&mut self) -> Option<T> {
        let idx = last(&self.arena, self.root)?;
        Some(self.remove_node(idx))
    }

    /// Counts every element equal to `value`.
    ///
    /// Rotations can leave equal values on both sides of each other, so this
    /// scans the whole tree.
    pub fn occurrences_of(&self, value: &T) -> Result<usize, AvlError> {
        self.check(value)?;
        let mut count = 0;
        for v in self.iter() {
            if self.compare(value, v)? == Ordering::Equal {
                count += 1;
            }
        }
        Ok(count)
    }

    pub fn min(&self) -> Option<&T> {
        first(&self.arena, self.root).map(|i| self.arena[i as usize].value())
    }

    pub fn max(&self) -> Option<&T> {
        last(&self.arena, self.root).map(|i| self.arena[i as usize].value())
    }

    /// Edges on the longest root-to-leaf path; `0` for both an empty and a
    /// single-element tree.
    pub fn height(&self) -> usize {
        avl::height_of(&self.arena, self.root).max(0) as usize
    }

    pub fn size(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.free.clear();
        self.root = None;
        self.len = 0;
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.arena, self.root, self.len)
    }

    /// All elements in ascending order, duplicates included.
    pub fn values(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    pub fn root(&self) -> Option<NodeRef<'_, T>> {
        self.root.map(|i| NodeRef::new(&self.arena, i))
    }

    pub fn root_index(&self) -> Option<u32> {
        self.root
    }

    /// View of the live node stored at arena index `idx`; `None` for slots
    /// freed by a removal and for indices past the arena.
    pub fn node(&self, idx: u32) -> Option<NodeRef<'_, T>> {
        match self.arena.get(idx as usize) {
            Some(n) if !n.is_vacant() => Some(NodeRef::new(&self.arena, idx)),
            _ => None,
        }
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    pub fn assert_valid(&self) -> Result<(), AvlError> {
        avl::assert_avl_tree(&self.arena, self.root, self.len, &self.comparator)
    }

    /// Structural dump, one node per line.
    pub fn print(&self) -> String
    where
        T: fmt::Debug,
    {
        avl::print(&self.arena, self.root, "")
    }
}

impl<'a, T, C> IntoIterator for &'a AvlTree<T, C>
where
    C: Fn(&T, &T) -> Option<Ordering>,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, C> fmt::Debug for AvlTree<T, C>
where
    T: fmt::Debug,
    C: Fn(&T, &T) -> Option<Ordering>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn freed_slots_are_reused() {
        let mut tree = AvlTree::new();
        tree.insert_all([1, 2, 3]).unwrap();
        assert_eq!(tree.remove_min(), Some(1));
        assert_eq!(tree.free, vec![0]);
        tree.insert(7).unwrap();
        assert!(tree.free.is_empty());
        assert_eq!(tree.arena.len(), 3);
        assert_eq!(tree.node(0).map(|n| *n.value()), Some(7));
        assert_eq!(tree.values(), vec![2, 3, 7]);
        tree.assert_valid().unwrap();
    }

    #[test]
    fn removed_slot_is_vacant_until_reused() {
        let mut tree = AvlTree::new();
        tree.insert_all([5, 6]).unwrap();
        assert_eq!(tree.remove_max(), Some(6));
        assert!(tree.arena[1].is_vacant());
        assert!(tree.node(1).is_none());
        assert_eq!(tree.node(0).map(|n| *n.value()), Some(5));
        assert!(tree.node(2).is_none());
    }

    #[test]
    fn node_view_follows_links() {
        let mut tree = AvlTree::new();
        tree.insert_all([2, 1, 3]).unwrap();
        let root = tree.node(0).unwrap();
        assert_eq!(root.left().map(|n| n.index()), Some(1));
        assert_eq!(tree.node(2).and_then(|n| n.parent()).map(|n| n.index()), Some(0));
    }

    #[test]
    fn invalid_probe_leaves_tree_untouched() {
        let mut tree = AvlTree::new();
        tree.insert_all([1.0, 2.0]).unwrap();
        assert_eq!(tree.insert(f64::NAN), Err(AvlError::InvalidArgument));
        assert_eq!(tree.arena.len(), 2);
        assert_eq!(tree.size(), 2);
    }
}
