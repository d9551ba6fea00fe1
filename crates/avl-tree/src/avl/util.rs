use std::cmp::Ordering;
use std::fmt::Debug;

use log::trace;

use crate::error::AvlError;
use crate::node::AvlNode;
use crate::types::{AvlNodeLike, Direction};
use crate::util::{direction_of, get_child, get_l, get_p, get_r, set_child, set_p, size};

/// Height of the subtree at `idx`; an absent subtree has height `-1`.
#[inline]
pub fn height_of<N: AvlNodeLike>(arena: &[N], idx: Option<u32>) -> i32 {
    idx.map_or(-1, |i| arena[i as usize].height())
}

#[inline]
pub(crate) fn update_height<N: AvlNodeLike>(arena: &mut [N], idx: u32) {
    let l = height_of(arena, get_l(arena, idx));
    let r = height_of(arena, get_r(arena, idx));
    arena[idx as usize].set_height(1 + l.max(r));
}

/// `height(left) - height(right)` from the cached child heights.
#[inline]
pub fn balance_factor<N: AvlNodeLike>(arena: &[N], idx: u32) -> i32 {
    height_of(arena, get_l(arena, idx)) - height_of(arena, get_r(arena, idx))
}

/// Rotates the subtree at `n` to the left: its right child `nr` takes `n`'s
/// place, `n` becomes `nr`'s left child and `nr`'s former left child moves
/// over to `n`'s right slot. Returns the (possibly changed) root.
///
/// # Panics
///
/// Panics if `n` has no right child.
pub fn rotate_left<N: AvlNodeLike>(arena: &mut [N], root: Option<u32>, n: u32) -> Option<u32> {
    let nr = get_r(arena, n).expect("left rotation needs a right child");
    let nrl = get_l(arena, nr);
    let p = get_p(arena, n);
    let dir = p.map(|p| direction_of(arena, p, n).expect("parent links back to its child"));
    trace!("rotate left at {n}, {nr} moves up");

    set_child(arena, n, Direction::Right, nrl);
    set_child(arena, nr, Direction::Left, Some(n));
    let root = match (p, dir) {
        (Some(p), Some(dir)) => {
            set_child(arena, p, dir, Some(nr));
            root
        }
        _ => {
            set_p(arena, nr, None);
            Some(nr)
        }
    };

    update_height(arena, n);
    update_height(arena, nr);
    root
}

/// Mirror image of [`rotate_left`].
///
/// # Panics
///
/// Panics if `n` has no left child.
pub fn rotate_right<N: AvlNodeLike>(arena: &mut [N], root: Option<u32>, n: u32) -> Option<u32> {
    let nl = get_l(arena, n).expect("right rotation needs a left child");
    let nlr = get_r(arena, nl);
    let p = get_p(arena, n);
    let dir = p.map(|p| direction_of(arena, p, n).expect("parent links back to its child"));
    trace!("rotate right at {n}, {nl} moves up");

    set_child(arena, n, Direction::Left, nlr);
    set_child(arena, nl, Direction::Right, Some(n));
    let root = match (p, dir) {
        (Some(p), Some(dir)) => {
            set_child(arena, p, dir, Some(nl));
            root
        }
        _ => {
            set_p(arena, nl, None);
            Some(nl)
        }
    };

    update_height(arena, n);
    update_height(arena, nl);
    root
}

/// Restores balance at `n`, which is too heavy on the `outer` side while
/// its `outer` child leans towards `inner`.
///
/// Afterwards `n` hangs directly below the new top of the subtree.
pub fn rotate<N: AvlNodeLike>(
    arena: &mut [N],
    root: Option<u32>,
    n: u32,
    outer: Direction,
    inner: Direction,
) -> Option<u32> {
    match (outer, inner) {
        (Direction::Right, Direction::Right) => rotate_left(arena, root, n),
        (Direction::Left, Direction::Left) => rotate_right(arena, root, n),
        (Direction::Left, Direction::Right) => {
            let nl = get_l(arena, n).expect("left-right rotation needs a left child");
            let root = rotate_left(arena, root, nl);
            rotate_right(arena, root, n)
        }
        (Direction::Right, Direction::Left) => {
            let nr = get_r(arena, n).expect("right-left rotation needs a right child");
            let root = rotate_right(arena, root, nr);
            rotate_left(arena, root, n)
        }
    }
}

/// Links the fresh leaf `n` into the `dir` slot of `parent` and rebalances.
/// Returns the (possibly changed) root.
pub fn insert_at<N: AvlNodeLike>(
    arena: &mut [N],
    root: Option<u32>,
    n: u32,
    parent: u32,
    dir: Direction,
) -> Option<u32> {
    arena[n as usize].set_height(0);
    set_child(arena, parent, dir, Some(n));
    rebalance_after_insert(arena, root, n)
}

/// Walks up from a freshly linked leaf. One rotation at the lowest
/// unbalanced ancestor restores the subtree to its old height, so the walk
/// stops there.
fn rebalance_after_insert<N: AvlNodeLike>(arena: &mut [N], root: Option<u32>, leaf: u32) -> Option<u32> {
    let mut child = leaf;
    let mut grandchild: Option<u32> = None;
    while let Some(n) = get_p(arena, child) {
        update_height(arena, n);
        let bf = balance_factor(arena, n);
        if bf.abs() >= 2 {
            let outer = direction_of(arena, n, child).expect("parent links back to its child");
            let gc = grandchild.expect("unbalanced node sits two levels above the new leaf");
            let inner = direction_of(arena, child, gc).expect("parent links back to its child");
            trace!("insert retrace: {n} unbalanced ({bf}), case {outer:?}-{inner:?}");
            return rotate(arena, root, n, outer, inner);
        }
        grandchild = Some(child);
        child = n;
    }
    root
}

/// Walks from `start` up to the root, rotating every ancestor whose balance
/// factor reached ±2. A rotation after a removal may shrink the subtree, so
/// the walk continues past it.
pub(crate) fn rebalance_after_remove<N: AvlNodeLike>(
    arena: &mut [N],
    mut root: Option<u32>,
    start: Option<u32>,
) -> Option<u32> {
    let mut curr = start;
    while let Some(n) = curr {
        update_height(arena, n);
        let bf = balance_factor(arena, n);
        let top = if bf.abs() >= 2 {
            let heavy = if bf > 0 { Direction::Left } else { Direction::Right };
            let child = get_child(arena, n, heavy).expect("heavier side has a child");
            let cbf = balance_factor(arena, child);
            let leans_away = match heavy {
                Direction::Left => cbf < 0,
                Direction::Right => cbf > 0,
            };
            let inner = if leans_away { heavy.opposite() } else { heavy };
            trace!("remove retrace: {n} unbalanced ({bf}), case {heavy:?}-{inner:?}");
            root = rotate(arena, root, n, heavy, inner);
            get_p(arena, n).expect("rotated node hangs below the new subtree top")
        } else {
            n
        };
        curr = get_p(arena, top);
    }
    root
}

/// Detaches `n` from the tree, rebalancing on the way back up.
/// Returns the new root.
pub fn remove<N: AvlNodeLike>(arena: &mut [N], root: Option<u32>, n: u32) -> Option<u32> {
    let (root, retrace_from) = super::splice::splice(arena, root, n);
    rebalance_after_remove(arena, root, retrace_from)
}

/// Checks every structural invariant of the tree at `root`.
pub fn assert_avl_tree<T, C>(
    arena: &[AvlNode<T>],
    root: Option<u32>,
    len: usize,
    comparator: &C,
) -> Result<(), AvlError>
where
    C: Fn(&T, &T) -> Option<Ordering>,
{
    fn fail(msg: impl Into<String>) -> Result<(), AvlError> {
        Err(AvlError::InvariantViolation(msg.into()))
    }

    let reachable = size(arena, root);
    if reachable != len {
        return fail(format!("size is {len} but {reachable} nodes are reachable"));
    }

    let Some(root) = root else {
        return Ok(());
    };

    if get_p(arena, root).is_some() {
        return fail("root has parent");
    }

    fn validate_links_and_height<T>(arena: &[AvlNode<T>], node: u32) -> Result<i32, AvlError> {
        let n = &arena[node as usize];
        if n.is_vacant() {
            return Err(AvlError::InvariantViolation(format!("node {node} is vacant")));
        }

        let mut lh = -1;
        let mut rh = -1;
        if let Some(l) = n.l {
            if arena[l as usize].p != Some(node) {
                return Err(AvlError::InvariantViolation(format!(
                    "broken parent link on left child of {node}"
                )));
            }
            lh = validate_links_and_height(arena, l)?;
        }
        if let Some(r) = n.r {
            if arena[r as usize].p != Some(node) {
                return Err(AvlError::InvariantViolation(format!(
                    "broken parent link on right child of {node}"
                )));
            }
            rh = validate_links_and_height(arena, r)?;
        }

        let expected = 1 + lh.max(rh);
        if n.h != expected {
            return Err(AvlError::InvariantViolation(format!(
                "height mismatch at {node}: expected {expected}, got {}",
                n.h
            )));
        }
        if (lh - rh).abs() > 1 {
            return Err(AvlError::InvariantViolation(format!(
                "AVL balance violated at {node}: {}",
                lh - rh
            )));
        }
        Ok(expected)
    }

    validate_links_and_height(arena, root)?;

    let mut prev: Option<&T> = None;
    for value in crate::iter::Iter::new(arena, Some(root), len) {
        if let Some(prev) = prev {
            match comparator(prev, value) {
                Some(Ordering::Less | Ordering::Equal) => {}
                _ => return fail("node order violated"),
            }
        }
        prev = Some(value);
    }

    Ok(())
}

/// Appends `n` and, below it, both child slots as `├─` (left) and `└─`
/// (right) branches. An empty slot next to a present sibling shows as `∅`.
fn print_node<T: Debug>(arena: &[AvlNode<T>], node: Option<u32>, tab: &str, out: &mut String) {
    let Some(i) = node else {
        out.push('∅');
        return;
    };
    let n = &arena[i as usize];
    out.push_str(&format!("{:?} [h={}]", n.value(), n.h));
    if n.l.is_none() && n.r.is_none() {
        return;
    }
    for (child, branch, indent) in [(n.l, "├─", "│  "), (n.r, "└─", "   ")] {
        out.push('\n');
        out.push_str(tab);
        out.push_str(branch);
        out.push(' ');
        print_node(arena, child, &format!("{tab}{indent}"), out);
    }
}

/// Debug dump of the tree structure.
pub fn print<T: Debug>(arena: &[AvlNode<T>], root: Option<u32>, tab: &str) -> String {
    let mut out = String::new();
    print_node(arena, root, tab, &mut out);
    out
}
