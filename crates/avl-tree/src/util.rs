//! Structural (p / l / r) helpers shared by the AVL routines.
//!
//! Nothing here rebalances. Every helper that links two nodes also writes the
//! child's back-reference, so callers never touch a raw slot directly.

use crate::types::{Direction, Node};

#[inline]
pub(crate) fn get_p<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].p()
}

#[inline]
pub(crate) fn get_l<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].l()
}

#[inline]
pub(crate) fn get_r<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].r()
}

#[inline]
pub(crate) fn get_child<N: Node>(arena: &[N], idx: u32, dir: Direction) -> Option<u32> {
    arena[idx as usize].child(dir)
}

#[inline]
pub(crate) fn set_p<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_p(v);
}

/// Installs `child` in the `dir` slot of `parent` and points its
/// back-reference at `parent`.
///
/// A displaced former child that still points back at `parent` loses its
/// back-reference. The slot `child` previously occupied elsewhere is left as
/// is; moving a node is the caller's job.
pub fn set_child<N: Node>(arena: &mut [N], parent: u32, dir: Direction, child: Option<u32>) {
    let prev = get_child(arena, parent, dir);
    arena[parent as usize].set_child_slot(dir, child);
    if let Some(prev) = prev {
        if Some(prev) != child && get_p(arena, prev) == Some(parent) {
            set_p(arena, prev, None);
        }
    }
    if let Some(child) = child {
        set_p(arena, child, Some(parent));
    }
}

/// Clears the `dir` slot of `parent` and returns its former occupant.
pub fn remove_child<N: Node>(arena: &mut [N], parent: u32, dir: Direction) -> Option<u32> {
    let prev = get_child(arena, parent, dir);
    arena[parent as usize].set_child_slot(dir, None);
    if let Some(prev) = prev {
        if get_p(arena, prev) == Some(parent) {
            set_p(arena, prev, None);
        }
    }
    prev
}

/// Slot under which `child` is currently linked to `parent`.
pub fn direction_of<N: Node>(arena: &[N], parent: u32, child: u32) -> Option<Direction> {
    if get_l(arena, parent) == Some(child) {
        Some(Direction::Left)
    } else if get_r(arena, parent) == Some(child) {
        Some(Direction::Right)
    } else {
        None
    }
}

/// Puts `new` where `old` hangs: in `old`'s parent slot, or at the root.
/// Returns the (possibly changed) root.
///
/// # Panics
///
/// Panics if `old`'s parent does not link back to `old`.
pub fn replace<N: Node>(arena: &mut [N], root: Option<u32>, old: u32, new: Option<u32>) -> Option<u32> {
    let Some(p) = get_p(arena, old) else {
        if let Some(new) = new {
            set_p(arena, new, None);
        }
        return new;
    };
    let dir = direction_of(arena, p, old).expect("parent links back to its child");
    match new {
        Some(_) => set_child(arena, p, dir, new),
        None => {
            remove_child(arena, p, dir);
        }
    }
    root
}

/// Leftmost node in the tree.
pub fn first<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(l) = get_l(arena, curr) {
        curr = l;
    }
    Some(curr)
}

/// Rightmost node in the tree.
pub fn last<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(r) = get_r(arena, curr) {
        curr = r;
    }
    Some(curr)
}

fn size_inner<N: Node>(arena: &[N], root: u32) -> usize {
    1 + get_l(arena, root).map_or(0, |l| size_inner(arena, l))
        + get_r(arena, root).map_or(0, |r| size_inner(arena, r))
}

/// Number of nodes reachable from `root`.
pub fn size<N: Node>(arena: &[N], root: Option<u32>) -> usize {
    root.map_or(0, |r| size_inner(arena, r))
}
