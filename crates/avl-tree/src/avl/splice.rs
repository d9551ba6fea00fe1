//! Structural removal of one node, without rebalancing.

use log::debug;

use crate::types::{Direction, Node};
use crate::util::{first, get_l, get_p, get_r, replace, set_child};

enum Children {
    Leaf,
    One(u32),
    Two(u32, u32),
}

fn children<N: Node>(arena: &[N], n: u32) -> Children {
    match (get_l(arena, n), get_r(arena, n)) {
        (None, None) => Children::Leaf,
        (Some(c), None) | (None, Some(c)) => Children::One(c),
        (Some(l), Some(r)) => Children::Two(l, r),
    }
}

fn detach<N: Node>(arena: &mut [N], n: u32) {
    let node = &mut arena[n as usize];
    node.set_p(None);
    node.set_l(None);
    node.set_r(None);
}

/// Unlinks `n` and leaves it fully detached.
///
/// Returns the new root and the node the balance retrace has to start from:
/// the former parent of whichever node physically left its slot. With two
/// children that is the in-order successor, which is spliced out first and
/// then takes over `n`'s position and both of its children.
pub(crate) fn splice<N: Node>(arena: &mut [N], root: Option<u32>, n: u32) -> (Option<u32>, Option<u32>) {
    let p = get_p(arena, n);
    let (root, retrace_from) = match children(arena, n) {
        Children::Leaf => {
            debug!("splice {n}: leaf");
            (replace(arena, root, n, None), p)
        }
        Children::One(c) => {
            debug!("splice {n}: single child {c} moves up");
            (replace(arena, root, n, Some(c)), p)
        }
        Children::Two(l, r) => {
            let s = first(arena, Some(r)).expect("right subtree has a leftmost node");
            let sp = get_p(arena, s);
            debug!("splice {n}: successor {s} takes its place");
            let (root, from) = splice(arena, root, s);
            // Splicing the successor may have rewritten `n`'s right slot.
            let r = get_r(arena, n);
            set_child(arena, s, Direction::Left, Some(l));
            set_child(arena, s, Direction::Right, r);
            let root = replace(arena, root, n, Some(s));
            (root, if sp == Some(n) { Some(s) } else { from })
        }
    };
    detach(arena, n);
    (root, retrace_from)
}
