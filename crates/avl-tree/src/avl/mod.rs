//! AVL tree family: node type, arena algorithms, and the owning tree.

#[path = "AvlTree.rs"]
pub mod avl_tree;
pub mod iter;
pub mod types;
pub mod util;

pub use avl_tree::AvlTree;
pub use iter::Iter;
pub use types::{AvlNode, AvlNodeLike};
pub use util::{assert_avl_tree, find, insert, is_balanced, print, remove};
