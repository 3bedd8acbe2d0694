//! Node trait definitions.
//!
//! Nodes live in a [`Vec`]-backed arena and each child "pointer" is an
//! `Option<u32>` index into it. All tree-manipulation functions take the
//! arena as a slice and work with indices. There are no parent links: every
//! index is held by exactly one parent slot or by the tree root.

/// Child links (`l`, `r`).
pub trait Node {
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);
}

/// Ordering used by the tree: negative when `a < b`, zero when equal,
/// positive when `a > b`.
pub type Comparator<T> = dyn Fn(&T, &T) -> i32;

/// Comparator derived from [`PartialOrd`].
pub fn default_comparator<T: PartialOrd>(a: &T, b: &T) -> i32 {
    if a == b {
        0
    } else if a < b {
        -1
    } else {
        1
    }
}
