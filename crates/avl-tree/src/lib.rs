//! Arena-backed AVL tree.
//!
//! An ordered container of distinct values with `O(log n)` insert, remove
//! and search. Nodes are stored in a [`Vec`] arena owned by the tree and
//! link to their children through `Option<u32>` indices; each node is held
//! by exactly one parent slot (or the root), never shared.
//!
//! ```
//! use avl_tree::AvlTree;
//!
//! let mut tree = AvlTree::new();
//! for v in [10, 20, 30] {
//!     tree.insert(v);
//! }
//! assert_eq!(tree.inorder_traversal(), vec![10, 20, 30]);
//! assert_eq!(tree.preorder_traversal(), vec![20, 10, 30]);
//! assert_eq!(tree.height(), 1);
//!
//! tree.remove(&20);
//! assert!(!tree.search(&20));
//! assert!(tree.is_balanced());
//! ```
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`types`] | [`Node`] link trait, comparator helpers |
//! | [`avl::types`] | [`AvlNode`] and the [`AvlNodeLike`] trait |
//! | [`avl::util`] | Rotations, recursive insert / remove / find, traversals, validation |
//! | [`avl::avl_tree`] | [`AvlTree`], the owning wrapper |
//! | [`avl::iter`] | [`Iter`], explicit-stack in-order iterator |
//! | [`error`] | [`AvlError`] |

pub mod avl;
pub mod error;
pub mod types;

pub use avl::{AvlNode, AvlNodeLike, AvlTree, Iter};
pub use error::AvlError;
pub use types::{default_comparator, Comparator, Node};
