use std::iter::FusedIterator;

use super::types::AvlNode;

/// In-order iterator over an [`AvlTree`](super::AvlTree), ascending.
///
/// Walks with an explicit stack of pending ancestors instead of recursion.
pub struct Iter<'a, T> {
    arena: &'a [AvlNode<T>],
    stack: Vec<u32>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(arena: &'a [AvlNode<T>], root: Option<u32>, len: usize) -> Self {
        let mut iter = Self {
            arena,
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left(root);
        iter
    }

    fn push_left(&mut self, mut node: Option<u32>) {
        while let Some(i) = node {
            self.stack.push(i);
            node = self.arena[i as usize].l;
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let i = self.stack.pop()?;
        let arena = self.arena;
        let node = &arena[i as usize];
        self.push_left(node.r);
        self.remaining -= 1;
        Some(&node.v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}
