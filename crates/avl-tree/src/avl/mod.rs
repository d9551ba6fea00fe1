//! Balancing core: rotations, insert/remove retrace and validation.

mod splice;
pub mod util;

pub use util::{
    assert_avl_tree, balance_factor, height_of, insert_at, print, remove, rotate, rotate_left,
    rotate_right,
};
