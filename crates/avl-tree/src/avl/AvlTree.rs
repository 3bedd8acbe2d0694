use std::fmt;

use tracing::{debug, trace};

use crate::error::AvlError;
use crate::types::default_comparator;

use super::iter::Iter;
use super::types::{AvlNode, AvlNodeLike};
use super::util;

/// Self-balancing binary search tree of distinct values.
///
/// Nodes live in an arena owned by the tree and link to their children by
/// index. The arena is kept dense: removing a value frees its slot at once,
/// so the tree never holds more nodes than values.
///
/// Ordering comes from the comparator, which defaults to [`PartialOrd`].
pub struct AvlTree<T, C = fn(&T, &T) -> i32>
where
    C: Fn(&T, &T) -> i32,
{
    root: Option<u32>,
    arena: Vec<AvlNode<T>>,
    comparator: C,
}

impl<T> AvlTree<T, fn(&T, &T) -> i32>
where
    T: PartialOrd,
{
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<T>)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, default_comparator::<T>)
    }
}

impl<T> Default for AvlTree<T, fn(&T, &T) -> i32>
where
    T: PartialOrd,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> AvlTree<T, C>
where
    C: Fn(&T, &T) -> i32,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self::with_capacity_and_comparator(0, comparator)
    }

    pub fn with_capacity_and_comparator(capacity: usize, comparator: C) -> Self {
        Self {
            root: None,
            arena: Vec::with_capacity(capacity),
            comparator,
        }
    }

    /// Inserts `value`, returning `false` if an equal value was already
    /// present (the tree is then unchanged).
    ///
    /// # Panics
    ///
    /// Panics if the node cannot be allocated; see [`try_insert`](Self::try_insert).
    pub fn insert(&mut self, value: T) -> bool {
        match self.try_insert(value) {
            Ok(inserted) => inserted,
            Err(err) => panic!("{err}"),
        }
    }

    /// Fallible [`insert`](Self::insert). Storage for the new node is
    /// reserved before anything is touched, so on error the tree is
    /// unchanged.
    pub fn try_insert(&mut self, value: T) -> Result<bool, AvlError> {
        if self.arena.len() >= u32::MAX as usize {
            debug!(len = self.arena.len(), "node arena is full");
            return Err(AvlError::CapacityExceeded);
        }
        if let Err(err) = self.arena.try_reserve(1) {
            debug!(error = %err, "failed to reserve tree node");
            return Err(err.into());
        }

        let n = self.arena.len() as u32;
        self.arena.push(AvlNode::new(value));
        let (root, linked) = util::insert(&mut self.arena, self.root, n, &self.comparator);
        if linked {
            self.root = Some(root);
        } else {
            self.arena.pop();
        }
        Ok(linked)
    }

    /// Removes `value`, returning whether it was present.
    pub fn remove(&mut self, value: &T) -> bool {
        self.take(value).is_some()
    }

    /// Removes `value` and hands back the stored copy.
    pub fn take(&mut self, value: &T) -> Option<T> {
        let (root, removed) = util::remove(&mut self.arena, self.root, value, &self.comparator);
        self.root = root;
        let gone = removed?;

        let last = (self.arena.len() - 1) as u32;
        if gone != last {
            self.root = util::relink(&mut self.arena, self.root, last, gone, &self.comparator);
            trace!(from = last, to = gone, "compact arena");
        }
        Some(self.arena.swap_remove(gone as usize).into_value())
    }

    pub fn search(&self, value: &T) -> bool {
        self.get(value).is_some()
    }

    /// The stored value equal to `value`.
    pub fn get(&self, value: &T) -> Option<&T> {
        util::find(&self.arena, self.root, value, &self.comparator).map(|i| &self.arena[i as usize].v)
    }

    /// Height of the whole tree: `-1` when empty, `0` for a single node.
    pub fn height(&self) -> i32 {
        util::height(&self.arena, self.root)
    }

    pub fn is_balanced(&self) -> bool {
        util::is_balanced(&self.arena, self.root)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn clear(&mut self) {
        self.root = None;
        self.arena.clear();
    }

    /// Smallest value.
    pub fn first(&self) -> Option<&T> {
        self.root
            .map(|root| &self.arena[util::min_node(&self.arena, root) as usize].v)
    }

    /// Largest value.
    pub fn last(&self) -> Option<&T> {
        self.root
            .map(|root| &self.arena[util::max_node(&self.arena, root) as usize].v)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.arena, self.root, self.arena.len())
    }

    pub fn preorder_traversal(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut ret = Vec::with_capacity(self.len());
        util::preorder(&self.arena, self.root, &mut |_, n: &AvlNode<T>| ret.push(n.v.clone()));
        ret
    }

    pub fn inorder_traversal(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut ret = Vec::with_capacity(self.len());
        util::inorder(&self.arena, self.root, &mut |_, n: &AvlNode<T>| ret.push(n.v.clone()));
        ret
    }

    pub fn postorder_traversal(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut ret = Vec::with_capacity(self.len());
        util::postorder(&self.arena, self.root, &mut |_, n: &AvlNode<T>| ret.push(n.v.clone()));
        ret
    }

    pub fn assert_valid(&self) -> Result<(), AvlError> {
        util::assert_avl_tree(&self.arena, self.root, &self.comparator)
    }
}

impl<T> FromIterator<T> for AvlTree<T, fn(&T, &T) -> i32>
where
    T: PartialOrd,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T, C> Extend<T> for AvlTree<T, C>
where
    C: Fn(&T, &T) -> i32,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T, C> IntoIterator for &'a AvlTree<T, C>
where
    C: Fn(&T, &T) -> i32,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T, C> fmt::Debug for AvlTree<T, C>
where
    T: fmt::Debug,
    C: Fn(&T, &T) -> i32,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&util::print(&self.arena, self.root, ""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root_value(tree: &AvlTree<i32>) -> Option<i32> {
        tree.root.map(|i| tree.arena[i as usize].v)
    }

    #[test]
    fn right_right_case_rotates_left() {
        let tree: AvlTree<i32> = [10, 20, 30].into_iter().collect();
        assert_eq!(root_value(&tree), Some(20));
        assert_eq!(tree.inorder_traversal(), vec![10, 20, 30]);
        assert_eq!(tree.height(), 1);
        tree.assert_valid().unwrap();
    }

    #[test]
    fn left_right_case_double_rotates() {
        let tree: AvlTree<i32> = [30, 10, 20].into_iter().collect();
        assert_eq!(root_value(&tree), Some(20));
        assert_eq!(tree.preorder_traversal(), vec![20, 10, 30]);
        assert_eq!(tree.height(), 1);
    }

    #[test]
    fn right_left_case_double_rotates() {
        let tree: AvlTree<i32> = [10, 30, 20].into_iter().collect();
        assert_eq!(root_value(&tree), Some(20));
        assert_eq!(tree.postorder_traversal(), vec![10, 30, 20]);
    }

    #[test]
    fn removal_keeps_arena_dense() {
        let mut tree: AvlTree<i32> = (0..32).collect();
        for i in (0..32).step_by(2) {
            assert!(tree.remove(&i));
            assert_eq!(tree.arena.len(), tree.len());
            tree.assert_valid().unwrap();
        }
        assert_eq!(tree.len(), 16);
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), (1..32).step_by(2).collect::<Vec<_>>());
    }

    #[test]
    fn duplicate_insert_does_not_grow_arena() {
        let mut tree = AvlTree::new();
        assert!(tree.insert(7));
        assert!(!tree.insert(7));
        assert_eq!(tree.arena.len(), 1);
        assert_eq!(tree.height(), 0);
    }
}
