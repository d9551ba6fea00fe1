//! Arena-based AVL multiset.
//!
//! [`AvlTree`] keeps values of any partially ordered type in a self-balancing
//! binary search tree, duplicates included. Instead of raw pointers, nodes
//! are stored in a `Vec` arena owned by the tree and every link is an
//! `Option<u32>` index into it. Child links own, parent links only point
//! back, so retracing after an insert or a removal walks up through parent
//! indices without descending from the root again.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`types`] | [`Direction`], [`Node`] and [`AvlNodeLike`] traits |
//! [`node`] | [`AvlNode`] arena slot, [`NodeRef`] read-only view |
//! [`util`] | Link maintenance: `set_child`, `remove_child`, `replace`, … |
//! [`avl`] | Rotations, insert/remove retrace, validation, debug print |
//! [`tree`] | [`AvlTree`] container |
//! [`iter`] | [`Iter`] in-order traversal |
//!
//! ```
//! use avl_tree::AvlTree;
//!
//! let mut tree = AvlTree::new();
//! tree.insert_all([2, 1, 3, 5, 4]).unwrap();
//! assert_eq!(tree.values(), vec![1, 2, 3, 4, 5]);
//! assert_eq!(tree.height(), 2);
//! assert_eq!(tree.remove_first(&4).unwrap(), Some(4));
//! assert_eq!(tree.size(), 4);
//! ```

pub mod avl;
pub mod error;
pub mod iter;
pub mod node;
pub mod tree;
pub mod types;
pub mod util;

pub use error::AvlError;
pub use iter::Iter;
pub use node::{AvlNode, NodeRef};
pub use tree::AvlTree;
pub use types::{AvlNodeLike, Comparator, Direction, Node};
