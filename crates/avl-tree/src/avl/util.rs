//! Recursive AVL algorithms over a node arena.
//!
//! Every mutating function takes a subtree root index and returns the
//! (possibly rotated) subtree root, so the caller re-links it into the slot
//! it came from. Heights are cached on the nodes and kept exact by every
//! mutation before it returns.

use std::fmt::Debug;

use tracing::trace;

use crate::error::AvlError;
use crate::types::Node;

use super::types::AvlNodeLike;

#[inline]
fn get_l<N: Node>(arena: &[N], i: u32) -> Option<u32> {
    arena[i as usize].l()
}

#[inline]
fn get_r<N: Node>(arena: &[N], i: u32) -> Option<u32> {
    arena[i as usize].r()
}

#[inline]
fn set_l<N: Node>(arena: &mut [N], i: u32, v: Option<u32>) {
    arena[i as usize].set_l(v);
}

#[inline]
fn set_r<N: Node>(arena: &mut [N], i: u32, v: Option<u32>) {
    arena[i as usize].set_r(v);
}

/// Cached height of a subtree, `-1` when absent.
#[inline]
pub fn height<N: AvlNodeLike>(arena: &[N], node: Option<u32>) -> i32 {
    node.map_or(-1, |i| arena[i as usize].height())
}

/// Height recomputed by full descent, ignoring the cached field.
pub fn compute_height<N: Node>(arena: &[N], node: Option<u32>) -> i32 {
    match node {
        None => -1,
        Some(i) => {
            let lh = compute_height(arena, get_l(arena, i));
            let rh = compute_height(arena, get_r(arena, i));
            1 + lh.max(rh)
        }
    }
}

/// Balance factor, `height(left) - height(right)`; `0` when absent.
#[inline]
pub fn balance<N: AvlNodeLike>(arena: &[N], node: Option<u32>) -> i32 {
    match node {
        None => 0,
        Some(i) => height(arena, get_l(arena, i)) - height(arena, get_r(arena, i)),
    }
}

#[inline]
fn update_height<N: AvlNodeLike>(arena: &mut [N], i: u32) {
    let h = 1 + height(arena, get_l(arena, i)).max(height(arena, get_r(arena, i)));
    arena[i as usize].set_height(h);
}

/// Promotes the left child of `y` and returns it as the new subtree root.
pub fn rotate_right<N: AvlNodeLike>(arena: &mut [N], y: u32) -> u32 {
    let x = get_l(arena, y).expect("right rotation needs a left child");
    let t2 = get_r(arena, x);

    set_r(arena, x, Some(y));
    set_l(arena, y, t2);

    update_height(arena, y);
    update_height(arena, x);
    trace!(from = y, to = x, "rotate right");
    x
}

/// Promotes the right child of `x` and returns it as the new subtree root.
pub fn rotate_left<N: AvlNodeLike>(arena: &mut [N], x: u32) -> u32 {
    let y = get_r(arena, x).expect("left rotation needs a right child");
    let t2 = get_l(arena, y);

    set_l(arena, y, Some(x));
    set_r(arena, x, t2);

    update_height(arena, x);
    update_height(arena, y);
    trace!(from = x, to = y, "rotate left");
    y
}

/// Leftmost node of the subtree rooted at `i`.
pub fn min_node<N: Node>(arena: &[N], mut i: u32) -> u32 {
    while let Some(l) = get_l(arena, i) {
        i = l;
    }
    i
}

/// Rightmost node of the subtree rooted at `i`.
pub fn max_node<N: Node>(arena: &[N], mut i: u32) -> u32 {
    while let Some(r) = get_r(arena, i) {
        i = r;
    }
    i
}

/// Links the detached leaf `n` into the subtree at `root`.
///
/// Returns the new subtree root and whether `n` was linked. When a node with
/// an equal value already exists the subtree is left untouched and `n` stays
/// detached.
pub fn insert<N, C>(arena: &mut [N], root: Option<u32>, n: u32, comparator: &C) -> (u32, bool)
where
    N: AvlNodeLike,
    C: Fn(&N::Value, &N::Value) -> i32,
{
    let mut linked = false;
    let root = insert_at(arena, root, n, comparator, &mut linked);
    (root, linked)
}

fn insert_at<N, C>(
    arena: &mut [N],
    node: Option<u32>,
    n: u32,
    comparator: &C,
    linked: &mut bool,
) -> u32
where
    N: AvlNodeLike,
    C: Fn(&N::Value, &N::Value) -> i32,
{
    let Some(curr) = node else {
        *linked = true;
        return n;
    };

    let cmp = comparator(arena[n as usize].value(), arena[curr as usize].value());
    if cmp < 0 {
        let child = insert_at(arena, get_l(arena, curr), n, comparator, linked);
        set_l(arena, curr, Some(child));
    } else if cmp > 0 {
        let child = insert_at(arena, get_r(arena, curr), n, comparator, linked);
        set_r(arena, curr, Some(child));
    } else {
        return curr;
    }

    if !*linked {
        return curr;
    }
    rebalance_after_insert(arena, curr, n, comparator)
}

fn rebalance_after_insert<N, C>(arena: &mut [N], node: u32, n: u32, comparator: &C) -> u32
where
    N: AvlNodeLike,
    C: Fn(&N::Value, &N::Value) -> i32,
{
    update_height(arena, node);
    let bf = balance(arena, Some(node));

    if bf > 1 {
        let nl = get_l(arena, node).expect("left-heavy node has a left child");
        if comparator(arena[n as usize].value(), arena[nl as usize].value()) < 0 {
            return rotate_right(arena, node);
        }
        let nl = rotate_left(arena, nl);
        set_l(arena, node, Some(nl));
        return rotate_right(arena, node);
    }

    if bf < -1 {
        let nr = get_r(arena, node).expect("right-heavy node has a right child");
        if comparator(arena[n as usize].value(), arena[nr as usize].value()) > 0 {
            return rotate_left(arena, node);
        }
        let nr = rotate_right(arena, nr);
        set_r(arena, node, Some(nr));
        return rotate_left(arena, node);
    }

    node
}

/// Removes the node equal to `key` from the subtree at `root`.
///
/// Returns the new subtree root and the index of the detached node, or
/// `None` when no node matched (the subtree is then unchanged). The detached
/// node keeps its arena slot; reclaiming it is up to the caller.
pub fn remove<N, C>(
    arena: &mut [N],
    root: Option<u32>,
    key: &N::Value,
    comparator: &C,
) -> (Option<u32>, Option<u32>)
where
    N: AvlNodeLike,
    C: Fn(&N::Value, &N::Value) -> i32,
{
    let mut removed = None;
    let root = remove_at(arena, root, key, comparator, &mut removed);
    (root, removed)
}

fn remove_at<N, C>(
    arena: &mut [N],
    node: Option<u32>,
    key: &N::Value,
    comparator: &C,
    removed: &mut Option<u32>,
) -> Option<u32>
where
    N: AvlNodeLike,
    C: Fn(&N::Value, &N::Value) -> i32,
{
    let curr = node?;

    let cmp = comparator(key, arena[curr as usize].value());
    if cmp < 0 {
        let child = remove_at(arena, get_l(arena, curr), key, comparator, removed);
        set_l(arena, curr, child);
    } else if cmp > 0 {
        let child = remove_at(arena, get_r(arena, curr), key, comparator, removed);
        set_r(arena, curr, child);
    } else {
        match (get_l(arena, curr), get_r(arena, curr)) {
            (Some(_), Some(r)) => {
                // The key moves to the minimum slot of the right subtree,
                // which has at most a right child.
                let succ = min_node(arena, r);
                swap_values(arena, curr, succ);
                let child = remove_at(arena, Some(r), key, comparator, removed);
                set_r(arena, curr, child);
            }
            (l, r) => {
                set_l(arena, curr, None);
                set_r(arena, curr, None);
                arena[curr as usize].set_height(0);
                *removed = Some(curr);
                return l.or(r);
            }
        }
    }

    if removed.is_none() {
        return Some(curr);
    }
    Some(rebalance_after_remove(arena, curr))
}

fn rebalance_after_remove<N: AvlNodeLike>(arena: &mut [N], node: u32) -> u32 {
    update_height(arena, node);
    let bf = balance(arena, Some(node));

    if bf > 1 {
        let nl = get_l(arena, node).expect("left-heavy node has a left child");
        if balance(arena, Some(nl)) >= 0 {
            return rotate_right(arena, node);
        }
        let nl = rotate_left(arena, nl);
        set_l(arena, node, Some(nl));
        return rotate_right(arena, node);
    }

    if bf < -1 {
        let nr = get_r(arena, node).expect("right-heavy node has a right child");
        if balance(arena, Some(nr)) <= 0 {
            return rotate_left(arena, node);
        }
        let nr = rotate_right(arena, nr);
        set_r(arena, node, Some(nr));
        return rotate_left(arena, node);
    }

    node
}

fn swap_values<N: AvlNodeLike>(arena: &mut [N], a: u32, b: u32) {
    let (lo, hi) = if a < b { (a, b) } else { (b, a) };
    let (head, tail) = arena.split_at_mut(hi as usize);
    std::mem::swap(head[lo as usize].value_mut(), tail[0].value_mut());
}

/// Re-points the single link that refers to `from` so it refers to `to`.
///
/// `from` must be linked into the tree at `root`; it is located by descending
/// on its own value. Returns the new root.
pub fn relink<N, C>(arena: &mut [N], root: Option<u32>, from: u32, to: u32, comparator: &C) -> Option<u32>
where
    N: AvlNodeLike,
    C: Fn(&N::Value, &N::Value) -> i32,
{
    if root == Some(from) {
        return Some(to);
    }

    let mut slot = None;
    let mut curr = root;
    while let Some(i) = curr {
        let cmp = comparator(arena[from as usize].value(), arena[i as usize].value());
        let next = if cmp < 0 { get_l(arena, i) } else { get_r(arena, i) };
        if next == Some(from) {
            slot = Some((i, cmp < 0));
            break;
        }
        curr = next;
    }

    match slot {
        Some((p, true)) => set_l(arena, p, Some(to)),
        Some((p, false)) => set_r(arena, p, Some(to)),
        None => {}
    }
    root
}

/// Index of the node equal to `key`, if any.
pub fn find<N, C>(arena: &[N], node: Option<u32>, key: &N::Value, comparator: &C) -> Option<u32>
where
    N: AvlNodeLike,
    C: Fn(&N::Value, &N::Value) -> i32,
{
    let curr = node?;
    let cmp = comparator(key, arena[curr as usize].value());
    if cmp == 0 {
        Some(curr)
    } else if cmp < 0 {
        find(arena, get_l(arena, curr), key, comparator)
    } else {
        find(arena, get_r(arena, curr), key, comparator)
    }
}

/// Visits node, then left subtree, then right subtree.
pub fn preorder<N: Node, F: FnMut(u32, &N)>(arena: &[N], node: Option<u32>, f: &mut F) {
    let Some(i) = node else {
        return;
    };
    f(i, &arena[i as usize]);
    preorder(arena, get_l(arena, i), f);
    preorder(arena, get_r(arena, i), f);
}

/// Visits left subtree, then node, then right subtree (ascending order).
pub fn inorder<N: Node, F: FnMut(u32, &N)>(arena: &[N], node: Option<u32>, f: &mut F) {
    let Some(i) = node else {
        return;
    };
    inorder(arena, get_l(arena, i), f);
    f(i, &arena[i as usize]);
    inorder(arena, get_r(arena, i), f);
}

/// Visits left subtree, then right subtree, then node.
pub fn postorder<N: Node, F: FnMut(u32, &N)>(arena: &[N], node: Option<u32>, f: &mut F) {
    let Some(i) = node else {
        return;
    };
    postorder(arena, get_l(arena, i), f);
    postorder(arena, get_r(arena, i), f);
    f(i, &arena[i as usize]);
}

/// Checks the balance bound at every node, recomputing heights bottom-up.
pub fn is_balanced<N: Node>(arena: &[N], root: Option<u32>) -> bool {
    checked_height(arena, root).is_some()
}

fn checked_height<N: Node>(arena: &[N], node: Option<u32>) -> Option<i32> {
    let Some(i) = node else {
        return Some(-1);
    };
    let lh = checked_height(arena, get_l(arena, i))?;
    let rh = checked_height(arena, get_r(arena, i))?;
    if (lh - rh).abs() > 1 {
        return None;
    }
    Some(1 + lh.max(rh))
}

/// Full structural validation: strict ordering, exact cached heights, the
/// balance bound, and every arena slot linked exactly once.
pub fn assert_avl_tree<N, C>(arena: &[N], root: Option<u32>, comparator: &C) -> Result<(), AvlError>
where
    N: AvlNodeLike,
    C: Fn(&N::Value, &N::Value) -> i32,
{
    fn validate_node<N: AvlNodeLike>(
        arena: &[N],
        node: Option<u32>,
        seen: &mut [bool],
    ) -> Result<i32, AvlError> {
        let Some(i) = node else {
            return Ok(-1);
        };
        match seen.get_mut(i as usize) {
            None => return Err(AvlError::DanglingLink { index: i }),
            Some(true) => return Err(AvlError::DuplicateReference),
            Some(slot) => *slot = true,
        }

        let lh = validate_node(arena, get_l(arena, i), seen)?;
        let rh = validate_node(arena, get_r(arena, i), seen)?;

        let expected = 1 + lh.max(rh);
        let actual = arena[i as usize].height();
        if actual != expected {
            return Err(AvlError::HeightMismatch { expected, actual });
        }
        let balance = lh - rh;
        if !(-1..=1).contains(&balance) {
            return Err(AvlError::BalanceViolated { balance });
        }
        Ok(expected)
    }

    let mut seen = vec![false; arena.len()];
    validate_node(arena, root, &mut seen)?;
    let reachable = seen.iter().filter(|s| **s).count();
    if reachable != arena.len() {
        return Err(AvlError::UnreachableNodes {
            reachable,
            total: arena.len(),
        });
    }

    let mut prev: Option<u32> = None;
    let mut result = Ok(());
    inorder(arena, root, &mut |i, n: &N| {
        if let Some(p) = prev {
            if result.is_ok() && comparator(arena[p as usize].value(), n.value()) >= 0 {
                result = Err(AvlError::OrderViolated);
            }
        }
        prev = Some(i);
    });
    result
}

/// Debug printer for AVL trees.
pub fn print<N>(arena: &[N], node: Option<u32>, tab: &str) -> String
where
    N: AvlNodeLike,
    N::Value: Debug,
{
    match node {
        None => "∅".to_string(),
        Some(i) => {
            let n = &arena[i as usize];
            let left = print(arena, n.l(), &format!("{tab}  "));
            let right = print(arena, n.r(), &format!("{tab}  "));
            format!(
                "Node[{i}] [h={}] {:?}\n{tab}L={left}\n{tab}R={right}",
                n.height(),
                n.value()
            )
        }
    }
}
